use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, OhlcBar, Viewport, price_envelope};
use crate::error::{ChartError, ChartResult};

/// Tuning controls for price-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for PriceScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.05,
            bottom_padding_ratio: 0.05,
            min_span_absolute: 0.000_001,
        }
    }
}

impl PriceScaleTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "price scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "price scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Linear price axis mapped to an inverted Y pixel axis (higher price, smaller y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    domain_start: f64,
    domain_end: f64,
}

impl PriceScale {
    /// Creates a price scale from explicit min/max values.
    pub fn new(price_min: f64, price_max: f64) -> ChartResult<Self> {
        LinearScale::new(price_min, price_max)?;
        Ok(Self {
            domain_start: price_min.min(price_max),
            domain_end: price_min.max(price_max),
        })
    }

    /// Creates a price scale, widening a zero-width domain to `min_span`.
    pub fn with_min_span(price_min: f64, price_max: f64, min_span: f64) -> ChartResult<Self> {
        if !price_min.is_finite() || !price_max.is_finite() {
            return Err(ChartError::InvalidData(
                "price domain must be finite".to_owned(),
            ));
        }
        if !min_span.is_finite() || min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "price scale min span must be finite and > 0".to_owned(),
            ));
        }

        let (low, high) = (price_min.min(price_max), price_min.max(price_max));
        if high - low < min_span {
            let center = (low + high) / 2.0;
            let half = min_span / 2.0;
            return Self::new(center - half, center + half);
        }
        Self::new(low, high)
    }

    /// Autoscale over the full low/high envelope of `bars` with relative padding.
    ///
    /// This is the render layer's default fit, not the pan/zoom derivation.
    pub fn from_bars_tuned(bars: &[OhlcBar], tuning: PriceScaleTuning) -> ChartResult<Self> {
        let tuning = tuning.validate()?;
        let (low, high) = price_envelope(bars).ok_or_else(|| {
            ChartError::InvalidData("price scale cannot be built from empty data".to_owned())
        })?;

        let span = (high - low).abs().max(tuning.min_span_absolute);
        Self::with_min_span(
            low - span * tuning.bottom_padding_ratio,
            high + span * tuning.top_padding_ratio,
            tuning.min_span_absolute,
        )
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn price_to_pixel(self, price: f64, viewport: Viewport) -> ChartResult<f64> {
        let viewport = viewport.ensure_valid()?;
        let height = f64::from(viewport.height);
        let from_bottom = self.linear()?.domain_to_pixel(price, height)?;
        Ok(height - from_bottom)
    }

    pub fn pixel_to_price(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        let viewport = viewport.ensure_valid()?;
        let height = f64::from(viewport.height);
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        self.linear()?.pixel_to_domain(height - pixel, height)
    }

    fn linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.domain_start, self.domain_end)
    }
}
