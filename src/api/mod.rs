//! Interactive candlestick chart with a price range that follows pan/zoom.

mod axis_label_format;
mod chart;
mod chart_config;
mod interaction_resolvers;
mod price_range_sync;
mod render_frame_builder;
mod snapshot;
mod time_range_controller;

pub use chart::RangeSyncedChart;
pub use chart_config::{AxisType, CandleStyle, ChartConfig, ChartLayout, EmptyWindowPolicy};
pub use price_range_sync::{PriceRangeSync, PriceRangeUpdate, TimeRangeListener};
pub use snapshot::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1};
