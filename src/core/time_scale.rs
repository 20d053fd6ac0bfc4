use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, OhlcBar, Viewport};
use crate::error::{ChartError, ChartResult};

/// Span used when the data covers a single instant.
const DEGENERATE_SPAN_SECONDS: f64 = 1.0;

/// Minimum widened span, in units in the last place of the bound.
const RESOLVABLE_ULPS: f64 = 4.0;

/// Time axis model with separate full and visible ranges.
///
/// `full_*` tracks the fitted data range.
/// `visible_*` is the committed viewport after pan, zoom or explicit requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    full_start: f64,
    full_end: f64,
    visible_start: f64,
    visible_end: f64,
}

impl TimeScale {
    /// Creates a scale with matching full and visible ranges.
    pub fn new(time_start: f64, time_end: f64) -> ChartResult<Self> {
        let (start, end) = normalize_range(time_start, time_end, DEGENERATE_SPAN_SECONDS)?;
        Ok(Self {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
        })
    }

    /// Fits full and visible ranges to the first and last bar times.
    pub fn from_bars(bars: &[OhlcBar]) -> ChartResult<Self> {
        let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
            return Err(ChartError::InvalidData(
                "time scale cannot be built from empty data".to_owned(),
            ));
        };
        Self::new(first.time, last.time)
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn visible_span(self) -> f64 {
        self.visible_end - self.visible_start
    }

    /// Overrides the visible range without modifying the full fitted range.
    ///
    /// Reversed bounds are swapped; equal bounds are widened to a tiny span.
    pub fn set_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.set_visible_range_with_min_span(start, end, 1e-9)
    }

    /// Like [`TimeScale::set_visible_range`], widening equal bounds to
    /// `min_span` centered on the requested instant.
    ///
    /// The widened span never drops below what `f64` can resolve at the
    /// bound's magnitude, so the committed range always has positive width.
    pub fn set_visible_range_with_min_span(
        &mut self,
        start: f64,
        end: f64,
        min_span: f64,
    ) -> ChartResult<()> {
        if !min_span.is_finite() || min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "visible range min span must be finite and > 0".to_owned(),
            ));
        }
        let (start, end) = normalize_range(start, end, min_span)?;
        self.visible_start = start;
        self.visible_end = end;
        Ok(())
    }

    pub fn reset_visible_range_to_full(&mut self) {
        self.visible_start = self.full_start;
        self.visible_end = self.full_end;
    }

    /// Pans the visible range by an additive time delta.
    pub fn pan_visible_by_delta(&mut self, delta_time: f64) -> ChartResult<()> {
        if !delta_time.is_finite() {
            return Err(ChartError::InvalidData(
                "pan delta must be finite".to_owned(),
            ));
        }

        self.set_visible_range(self.visible_start + delta_time, self.visible_end + delta_time)
    }

    /// Zooms visible range around an anchor time.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out.
    /// The resulting span is clamped by `min_span_absolute`.
    pub fn zoom_visible_by_factor(
        &mut self,
        factor: f64,
        anchor_time: f64,
        min_span_absolute: f64,
    ) -> ChartResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor_time.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        if !min_span_absolute.is_finite() || min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom min span must be finite and > 0".to_owned(),
            ));
        }

        let current_span = self.visible_span();
        let target_span = (current_span / factor).max(min_span_absolute);
        let left_ratio = (anchor_time - self.visible_start) / current_span;

        let new_start = anchor_time - left_ratio * target_span;
        self.set_visible_range(new_start, new_start + target_span)
    }

    pub fn time_to_pixel(self, time: f64, viewport: Viewport) -> ChartResult<f64> {
        let viewport = viewport.ensure_valid()?;
        self.visible_linear()?
            .domain_to_pixel(time, f64::from(viewport.width))
    }

    pub fn pixel_to_time(self, pixel: f64, viewport: Viewport) -> ChartResult<f64> {
        let viewport = viewport.ensure_valid()?;
        self.visible_linear()?
            .pixel_to_domain(pixel, f64::from(viewport.width))
    }

    fn visible_linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.visible_start, self.visible_end)
    }
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    let (low, high) = (start.min(end), start.max(end));
    if low < high {
        return Ok((low, high));
    }

    // Epoch seconds near 1.7e9 have an ULP of ~2.4e-7.
    let resolvable = low.abs() * f64::EPSILON * RESOLVABLE_ULPS;
    let half = min_span.max(resolvable) / 2.0;
    let (low, high) = (low - half, high + half);
    if low < high {
        Ok((low, high))
    } else {
        Err(ChartError::InvalidData(
            "scale range cannot be widened to a positive span".to_owned(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::TimeScale;

    #[test]
    fn reversed_visible_range_is_normalized() {
        let mut scale = TimeScale::new(0.0, 100.0).expect("scale");
        scale.set_visible_range(80.0, 20.0).expect("set range");
        assert_eq!(scale.visible_range(), (20.0, 80.0));
        assert_eq!(scale.full_range(), (0.0, 100.0));
    }

    #[test]
    fn zoom_keeps_anchor_ratio_and_respects_min_span() {
        let mut scale = TimeScale::new(0.0, 100.0).expect("scale");
        scale
            .zoom_visible_by_factor(2.0, 50.0, 1.0)
            .expect("zoom in");
        assert_eq!(scale.visible_range(), (25.0, 75.0));

        scale
            .zoom_visible_by_factor(1_000.0, 50.0, 10.0)
            .expect("clamped zoom");
        let (start, end) = scale.visible_range();
        assert!((end - start - 10.0).abs() <= 1e-9);
    }

    #[test]
    fn equal_bounds_at_epoch_magnitude_get_positive_span() {
        let t = 1_704_153_600.0;
        let mut scale = TimeScale::new(t - 86_400.0, t + 86_400.0).expect("scale");

        scale.set_visible_range(t, t).expect("tiny span");
        let (start, end) = scale.visible_range();
        assert!(start < t && t < end);

        scale
            .set_visible_range_with_min_span(t, t, 60.0)
            .expect("minute span");
        assert_eq!(scale.visible_range(), (t - 30.0, t + 30.0));
    }
}
