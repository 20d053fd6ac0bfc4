use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64};
use crate::core::{PriceScale, TimeScale, Viewport};
use crate::error::{ChartError, ChartResult};

/// One OHLC interval keyed by UNIX-seconds time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    /// Builds a bar as supplied, without checking the OHLC envelope.
    ///
    /// A bar with `high < low` still renders (as an inverted candle).
    /// Use [`OhlcBar::validated`] or `OhlcSeries::validate_integrity` for
    /// strict input.
    #[must_use]
    pub const fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    /// Builds a bar and checks its invariants.
    ///
    /// Invariants:
    /// - all values are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn validated(time: f64, open: f64, high: f64, low: f64, close: f64) -> ChartResult<Self> {
        let bar = Self::new(time, open, high, low, close);
        bar.check_integrity()?;
        Ok(bar)
    }

    /// Converts strongly-typed temporal/decimal input into a bar.
    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        ))
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.time.is_finite()
            && self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    pub fn check_integrity(self) -> ChartResult<()> {
        let reason = if !self.is_finite() {
            "ohlc values must be finite"
        } else if self.low > self.high {
            "ohlc low must be <= high"
        } else if self.open < self.low
            || self.open > self.high
            || self.close < self.low
            || self.close > self.high
        {
            "ohlc open/close must be within low/high range"
        } else {
            return Ok(());
        };

        Err(ChartError::DataIntegrity {
            time: self.time,
            reason: reason.to_owned(),
        })
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }
}

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub center_x: f64,
    pub body_left: f64,
    pub body_right: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub is_bullish: bool,
}

/// Projects OHLC candles into deterministic render geometry.
/// Bars with a non-finite price are skipped.
pub fn project_candles(
    bars: &[OhlcBar],
    time_scale: TimeScale,
    price_scale: PriceScale,
    viewport: Viewport,
    body_width_px: f64,
) -> ChartResult<Vec<CandleGeometry>> {
    if !body_width_px.is_finite() || body_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "body width must be finite and > 0".to_owned(),
        ));
    }

    #[cfg(feature = "parallel-projection")]
    {
        bars.par_iter()
            .filter(|bar| bar.is_finite())
            .map(|bar| {
                project_single_candle(*bar, time_scale, price_scale, viewport, body_width_px)
            })
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        bars.iter()
            .filter(|bar| bar.is_finite())
            .map(|bar| {
                project_single_candle(*bar, time_scale, price_scale, viewport, body_width_px)
            })
            .collect()
    }
}

fn project_single_candle(
    bar: OhlcBar,
    time_scale: TimeScale,
    price_scale: PriceScale,
    viewport: Viewport,
    body_width_px: f64,
) -> ChartResult<CandleGeometry> {
    let half = body_width_px / 2.0;
    let center_x = time_scale.time_to_pixel(bar.time, viewport)?;
    let open_y = price_scale.price_to_pixel(bar.open, viewport)?;
    let close_y = price_scale.price_to_pixel(bar.close, viewport)?;
    let high_y = price_scale.price_to_pixel(bar.high, viewport)?;
    let low_y = price_scale.price_to_pixel(bar.low, viewport)?;

    // Inverted bars (high < low) still produce an ordered wick.
    Ok(CandleGeometry {
        center_x,
        body_left: center_x - half,
        body_right: center_x + half,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top: high_y.min(low_y),
        wick_bottom: high_y.max(low_y),
        is_bullish: bar.is_bullish(),
    })
}
