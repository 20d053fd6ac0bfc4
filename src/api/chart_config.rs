use serde::{Deserialize, Serialize};

use crate::core::{PriceScaleTuning, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Value type of the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisType {
    /// UNIX-seconds values labelled as UTC dates.
    #[default]
    Date,
    /// Raw numeric values.
    Linear,
}

/// What the price-range sync does when the committed time window holds no bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmptyWindowPolicy {
    /// Leave the price range at its prior value.
    #[default]
    KeepPrevious,
    /// Fall back to the whole dataset's low/high envelope plus the margin pad.
    ClampToGlobal,
}

/// Candle body/wick colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleStyle {
    pub increasing_color: Color,
    pub decreasing_color: Color,
    pub wick_width_px: f64,
    /// Body width as a fraction of the per-bar pixel slot.
    pub body_width_ratio: f64,
    pub max_body_width_px: f64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            increasing_color: Color::rgb(61.0 / 255.0, 153.0 / 255.0, 112.0 / 255.0),
            decreasing_color: Color::rgb(1.0, 65.0 / 255.0, 54.0 / 255.0),
            wick_width_px: 1.0,
            body_width_ratio: 0.7,
            max_body_width_px: 24.0,
        }
    }
}

/// Bootstrap configuration for [`super::RangeSyncedChart`].
///
/// Serializable so a report can persist chart setup alongside its data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Flat price-unit margin added below the visible low and above the visible high.
    #[serde(default = "default_margin_pad")]
    pub margin_pad: f64,
    #[serde(default)]
    pub range_slider_visible: bool,
    #[serde(default)]
    pub x_axis_type: AxisType,
    #[serde(default)]
    pub empty_window_policy: EmptyWindowPolicy,
    /// Reject series with OHLC envelope violations at construction.
    #[serde(default)]
    pub strict_integrity: bool,
    #[serde(default = "default_min_time_span")]
    pub min_time_span: f64,
    #[serde(default = "default_zoom_step_ratio")]
    pub zoom_step_ratio: f64,
    #[serde(default)]
    pub initial_price_tuning: PriceScaleTuning,
    #[serde(default)]
    pub candle_style: CandleStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            margin_pad: default_margin_pad(),
            range_slider_visible: false,
            x_axis_type: AxisType::Date,
            empty_window_policy: EmptyWindowPolicy::KeepPrevious,
            strict_integrity: false,
            min_time_span: default_min_time_span(),
            zoom_step_ratio: default_zoom_step_ratio(),
            initial_price_tuning: PriceScaleTuning::default(),
            candle_style: CandleStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_margin_pad(mut self, margin_pad: f64) -> Self {
        self.margin_pad = margin_pad;
        self
    }

    #[must_use]
    pub fn with_empty_window_policy(mut self, policy: EmptyWindowPolicy) -> Self {
        self.empty_window_policy = policy;
        self
    }

    #[must_use]
    pub fn with_strict_integrity(mut self, strict: bool) -> Self {
        self.strict_integrity = strict;
        self
    }

    #[must_use]
    pub fn with_x_axis_type(mut self, axis_type: AxisType) -> Self {
        self.x_axis_type = axis_type;
        self
    }

    #[must_use]
    pub fn with_min_time_span(mut self, min_time_span: f64) -> Self {
        self.min_time_span = min_time_span;
        self
    }

    #[must_use]
    pub fn with_candle_style(mut self, style: CandleStyle) -> Self {
        self.candle_style = style;
        self
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.viewport().ensure_valid()?;
        if !self.margin_pad.is_finite() || self.margin_pad < 0.0 {
            return Err(ChartError::InvalidData(
                "margin pad must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_time_span.is_finite() || self.min_time_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "min time span must be finite and > 0".to_owned(),
            ));
        }
        if !self.zoom_step_ratio.is_finite() || self.zoom_step_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom step ratio must be finite and > 0".to_owned(),
            ));
        }
        self.initial_price_tuning.validate()?;

        let style = self.candle_style;
        style.increasing_color.validate()?;
        style.decreasing_color.validate()?;
        for (value, name) in [
            (style.wick_width_px, "wick_width_px"),
            (style.body_width_ratio, "body_width_ratio"),
            (style.max_body_width_px, "max_body_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "candle style `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Declarative layout resolved at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_axis_type: AxisType,
    pub range_slider_visible: bool,
}

impl ChartLayout {
    #[must_use]
    pub fn for_title(title: &str, config: ChartConfig) -> Self {
        Self {
            title: format!("Candlestick Chart: {title}"),
            width: config.width,
            height: config.height,
            x_axis_type: config.x_axis_type,
            range_slider_visible: config.range_slider_visible,
        }
    }
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    500
}

fn default_margin_pad() -> f64 {
    100.0
}

fn default_min_time_span() -> f64 {
    1.0
}

fn default_zoom_step_ratio() -> f64 {
    0.1
}
