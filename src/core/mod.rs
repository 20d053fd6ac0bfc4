mod candlestick;
pub mod price_scale;
pub mod primitives;
pub mod scale;
mod series;
pub mod time_scale;
pub mod types;
mod windowing;

pub use candlestick::{CandleGeometry, OhlcBar, project_candles};
pub use price_scale::{PriceScale, PriceScaleTuning};
pub use scale::LinearScale;
pub use series::{OhlcColumns, OhlcSeries};
pub use time_scale::TimeScale;
pub use types::{Viewport, ViewportState};
pub use windowing::{candles_in_time_window, price_envelope};
