//! One-shot overlay of raw samples, a fitted curve and its local extrema.
//!
//! The fitted curve and extrema indices come from an external fitting step;
//! this module only validates and draws them.

mod figure;
mod input;
mod renderer;

pub use figure::{FigureConfig, OverlayStyle};
pub use input::{ExtremaResult, OverlayInput};
pub use renderer::{
    ExtremaOverlayRenderer, LegendEntry, LegendGlyph, OverlayFrame, OverlayLayer,
};
