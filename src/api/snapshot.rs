use serde::{Deserialize, Serialize};

use crate::core::{OhlcColumns, ViewportState};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{ChartLayout, EmptyWindowPolicy, RangeSyncedChart};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable chart state for display surfaces and regression tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub layout: ChartLayout,
    pub viewport: ViewportState,
    pub margin_pad: f64,
    pub empty_window_policy: EmptyWindowPolicy,
    pub visible_bar_count: usize,
    pub trace: OhlcColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl<R: Renderer> RangeSyncedChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            layout: self.layout.clone(),
            viewport: self.viewport(),
            margin_pad: self.sync.margin_pad(),
            empty_window_policy: self.sync.empty_window_policy(),
            visible_bar_count: self.visible_bars().len(),
            trace: self.candlestick_trace(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
