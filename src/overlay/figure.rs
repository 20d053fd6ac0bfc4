use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

const POINTS_PER_INCH: f64 = 72.0;

/// Explicit figure handle settings: size, resolution and plot margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Width and height in inches.
    pub fig_size: (f64, f64),
    pub dpi: f64,
    pub face_color: Color,
    pub edge_color: Color,
    /// Subplot box as fractions of the figure: left, right, bottom, top.
    pub subplot: (f64, f64, f64, f64),
    /// Fraction of the data span added on each side of both axes.
    pub data_margin: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            fig_size: (15.0, 5.0),
            dpi: 120.0,
            face_color: Color::WHITE,
            edge_color: Color::BLACK,
            subplot: (0.125, 0.9, 0.11, 0.88),
            data_margin: 0.05,
        }
    }
}

impl FigureConfig {
    #[must_use]
    pub fn with_fig_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.fig_size = (width_in, height_in);
        self
    }

    #[must_use]
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.fig_size.0, "fig width"),
            (self.fig_size.1, "fig height"),
            (self.dpi, "dpi"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "figure {name} must be finite and > 0"
                )));
            }
        }
        let (left, right, bottom, top) = self.subplot;
        if !(0.0..1.0).contains(&left)
            || !(0.0..=1.0).contains(&right)
            || !(0.0..1.0).contains(&bottom)
            || !(0.0..=1.0).contains(&top)
            || left >= right
            || bottom >= top
        {
            return Err(ChartError::InvalidData(
                "subplot box must satisfy 0 <= left < right <= 1 and 0 <= bottom < top <= 1"
                    .to_owned(),
            ));
        }
        if !self.data_margin.is_finite() || self.data_margin < 0.0 {
            return Err(ChartError::InvalidData(
                "data margin must be finite and >= 0".to_owned(),
            ));
        }
        self.face_color.validate()?;
        self.edge_color.validate()?;
        self.viewport().ensure_valid()?;
        Ok(self)
    }

    /// Pixel canvas: inches times dpi, rounded.
    #[must_use]
    pub fn viewport(self) -> Viewport {
        let width = (self.fig_size.0 * self.dpi).round().max(0.0) as u32;
        let height = (self.fig_size.1 * self.dpi).round().max(0.0) as u32;
        Viewport::new(width, height)
    }

    /// Converts a typographic size (points) into pixels at this dpi.
    #[must_use]
    pub fn points_to_px(self, points: f64) -> f64 {
        points * self.dpi / POINTS_PER_INCH
    }
}

/// Colors, marker sizes (points) and legend labels of the four layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub raw_color: Color,
    pub raw_marker_size_pt: f64,
    pub fit_color: Color,
    pub fit_line_width_pt: f64,
    pub maxima_color: Color,
    pub minima_color: Color,
    pub extrema_marker_size_pt: f64,
    pub legend_labels: [String; 4],
    pub legend_font_pt: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            raw_color: Color::GREY,
            raw_marker_size_pt: 2.0,
            fit_color: Color::BLACK,
            fit_line_width_pt: 1.5,
            maxima_color: Color::BLUE,
            minima_color: Color::RED,
            extrema_marker_size_pt: 6.0,
            legend_labels: [
                "Stock Data".to_owned(),
                "Polynomial Fit".to_owned(),
                "Local Maxima".to_owned(),
                "Local Minima".to_owned(),
            ],
            legend_font_pt: 10.0,
        }
    }
}

impl OverlayStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.raw_color,
            self.fit_color,
            self.maxima_color,
            self.minima_color,
        ] {
            color.validate()?;
        }
        for (value, name) in [
            (self.raw_marker_size_pt, "raw_marker_size_pt"),
            (self.fit_line_width_pt, "fit_line_width_pt"),
            (self.extrema_marker_size_pt, "extrema_marker_size_pt"),
            (self.legend_font_pt, "legend_font_pt"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "overlay style `{name}` must be finite and > 0"
                )));
            }
        }
        if self.legend_labels.iter().any(String::is_empty) {
            return Err(ChartError::InvalidData(
                "legend labels must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
