use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{OhlcSeries, price_envelope};
use crate::error::{ChartError, ChartResult};

use super::EmptyWindowPolicy;

/// Result of one time-range notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PriceRangeUpdate {
    /// Set the price range to `(min, max)`, derived from `bars` visible bars.
    Apply { range: (f64, f64), bars: usize },
    /// The window held no bars; range came from the global envelope.
    ClampedToGlobal { range: (f64, f64) },
    /// Leave the price range as it is.
    Keep,
}

impl PriceRangeUpdate {
    #[must_use]
    pub fn range(self) -> Option<(f64, f64)> {
        match self {
            Self::Apply { range, .. } | Self::ClampedToGlobal { range } => Some(range),
            Self::Keep => None,
        }
    }
}

/// Single consumer of committed time-range changes.
///
/// The chart's time scale is the only producer. Implementations read the
/// committed window and the series and return the price range to apply;
/// they never write chart state themselves.
pub trait TimeRangeListener {
    fn on_time_range_changed(
        &mut self,
        committed: (f64, f64),
        series: &OhlcSeries,
    ) -> PriceRangeUpdate;
}

/// Derives `[min(low) - pad, max(high) + pad]` over the bars in view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRangeSync {
    margin_pad: f64,
    empty_window_policy: EmptyWindowPolicy,
}

impl PriceRangeSync {
    pub fn new(margin_pad: f64, empty_window_policy: EmptyWindowPolicy) -> ChartResult<Self> {
        if !margin_pad.is_finite() || margin_pad < 0.0 {
            return Err(ChartError::InvalidData(
                "margin pad must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            margin_pad,
            empty_window_policy,
        })
    }

    #[must_use]
    pub fn margin_pad(self) -> f64 {
        self.margin_pad
    }

    #[must_use]
    pub fn empty_window_policy(self) -> EmptyWindowPolicy {
        self.empty_window_policy
    }

    /// Pure derivation used by the listener; same inputs, same output.
    #[must_use]
    pub fn derive(self, committed: (f64, f64), series: &OhlcSeries) -> PriceRangeUpdate {
        let in_view = series.window(committed.0, committed.1);
        if let Some((low, high)) = price_envelope(in_view) {
            return PriceRangeUpdate::Apply {
                range: self.padded(low, high),
                bars: in_view.len(),
            };
        }

        match self.empty_window_policy {
            EmptyWindowPolicy::KeepPrevious => PriceRangeUpdate::Keep,
            EmptyWindowPolicy::ClampToGlobal => match series.global_envelope() {
                Some((low, high)) => PriceRangeUpdate::ClampedToGlobal {
                    range: self.padded(low, high),
                },
                None => PriceRangeUpdate::Keep,
            },
        }
    }

    fn padded(self, low: f64, high: f64) -> (f64, f64) {
        (low - self.margin_pad, high + self.margin_pad)
    }
}

impl TimeRangeListener for PriceRangeSync {
    fn on_time_range_changed(
        &mut self,
        committed: (f64, f64),
        series: &OhlcSeries,
    ) -> PriceRangeUpdate {
        let update = self.derive(committed, series);
        match update {
            PriceRangeUpdate::Apply { range, bars } => debug!(
                t_min = committed.0,
                t_max = committed.1,
                bars,
                p_min = range.0,
                p_max = range.1,
                "derived price range from visible bars"
            ),
            PriceRangeUpdate::ClampedToGlobal { range } => debug!(
                t_min = committed.0,
                t_max = committed.1,
                p_min = range.0,
                p_max = range.1,
                "visible window is empty; clamped price range to dataset envelope"
            ),
            PriceRangeUpdate::Keep => debug!(
                t_min = committed.0,
                t_max = committed.1,
                "visible window is empty; keeping previous price range"
            ),
        }
        update
    }
}
