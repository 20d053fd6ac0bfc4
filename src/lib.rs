//! candle-scope: exploratory financial charts.
//!
//! Two independent components:
//! - [`RangeSyncedChart`], a headless candlestick chart whose price range is
//!   re-derived from the visible bars on every time-range change;
//! - [`ExtremaOverlayRenderer`], a one-shot plot of raw samples, a fitted
//!   curve and supplied local extrema.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod overlay;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, RangeSyncedChart};
pub use error::{ChartError, ChartResult};
pub use overlay::{ExtremaOverlayRenderer, ExtremaResult, OverlayInput};
