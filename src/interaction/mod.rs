use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Pointer gesture state for one chart.
///
/// Only tracks what the pan/zoom producers need: whether a drag is active
/// and how far it has travelled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    mode: InteractionMode,
    drag_distance_px: f64,
    gesture_count: u64,
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        self.mode == InteractionMode::Panning
    }

    /// Net horizontal displacement of the current drag, in pixels.
    #[must_use]
    pub fn drag_distance_px(self) -> f64 {
        self.drag_distance_px
    }

    /// Number of completed pan gestures.
    #[must_use]
    pub fn gesture_count(self) -> u64 {
        self.gesture_count
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
        self.drag_distance_px = 0.0;
    }

    pub fn on_pan_drag(&mut self, delta_px: f64) {
        if self.is_panning() {
            self.drag_distance_px += delta_px;
        }
    }

    pub fn on_pan_end(&mut self) {
        if self.is_panning() {
            self.gesture_count += 1;
        }
        self.mode = InteractionMode::Idle;
        self.drag_distance_px = 0.0;
    }
}
