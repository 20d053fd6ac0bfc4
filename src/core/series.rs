use serde::{Deserialize, Serialize};

use crate::core::{OhlcBar, candles_in_time_window, price_envelope};
use crate::error::{ChartError, ChartResult};

/// Column view of a series: parallel arrays in index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcColumns {
    pub time: Vec<f64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

/// Immutable OHLC dataset sorted by strictly increasing time.
///
/// Only timestamps are checked on construction. Non-finite prices and
/// envelope violations (`high < low`, open/close outside the wick) are
/// accepted unless [`OhlcSeries::validate_integrity`] is called. Such bars are
/// skipped by price derivation and projection, or drawn visually wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcSeries {
    bars: Vec<OhlcBar>,
}

impl OhlcSeries {
    pub fn from_bars(bars: Vec<OhlcBar>) -> ChartResult<Self> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.time.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "bar at index {index} has non-finite time {}",
                    bar.time
                )));
            }
        }
        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(ChartError::InvalidData(format!(
                    "bar times must be strictly increasing: index {} time={} follows time={}",
                    index + 1,
                    pair[1].time,
                    pair[0].time
                )));
            }
        }
        Ok(Self { bars })
    }

    /// Builds a series from parallel columns. Every column must match
    /// `times` in length; nothing is truncated.
    pub fn from_columns(
        times: &[f64],
        opens: &[f64],
        highs: &[f64],
        lows: &[f64],
        closes: &[f64],
    ) -> ChartResult<Self> {
        let expected = times.len();
        for (name, column) in [
            ("open", opens),
            ("high", highs),
            ("low", lows),
            ("close", closes),
        ] {
            if column.len() != expected {
                return Err(ChartError::ShapeMismatch {
                    context: format!("ohlc column `{name}`"),
                    expected,
                    actual: column.len(),
                });
            }
        }

        let bars = (0..expected)
            .map(|i| OhlcBar::new(times[i], opens[i], highs[i], lows[i], closes[i]))
            .collect();
        Self::from_bars(bars)
    }

    /// Fails with `DataIntegrity` naming the first bar that violates the
    /// OHLC envelope.
    pub fn validate_integrity(&self) -> ChartResult<()> {
        self.bars
            .iter()
            .try_for_each(|bar| bar.check_integrity())
    }

    #[must_use]
    pub fn bars(&self) -> &[OhlcBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last bar time, `None` for an empty series.
    #[must_use]
    pub fn time_span(&self) -> Option<(f64, f64)> {
        Some((self.bars.first()?.time, self.bars.last()?.time))
    }

    /// Bars inside the inclusive window, borrowed from the series.
    #[must_use]
    pub fn window(&self, start: f64, end: f64) -> &[OhlcBar] {
        candles_in_time_window(&self.bars, start, end)
    }

    #[must_use]
    pub fn global_envelope(&self) -> Option<(f64, f64)> {
        price_envelope(&self.bars)
    }

    #[must_use]
    pub fn columns(&self) -> OhlcColumns {
        let len = self.bars.len();
        let mut columns = OhlcColumns {
            time: Vec::with_capacity(len),
            open: Vec::with_capacity(len),
            high: Vec::with_capacity(len),
            low: Vec::with_capacity(len),
            close: Vec::with_capacity(len),
        };
        for bar in &self.bars {
            columns.time.push(bar.time);
            columns.open.push(bar.open);
            columns.high.push(bar.high);
            columns.low.push(bar.low);
            columns.close.push(bar.close);
        }
        columns
    }
}
