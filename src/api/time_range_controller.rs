use tracing::trace;

use crate::error::ChartResult;
use crate::render::Renderer;

use super::RangeSyncedChart;
use super::interaction_resolvers::{resolve_pixel_pan_delta_time, resolve_wheel_zoom_factor};

impl<R: Renderer> RangeSyncedChart<R> {
    /// Overrides the visible time range; reversed bounds are normalized.
    pub fn set_time_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.on_time_range_changed(start, end)
    }

    /// Resets the visible range to the full data span.
    pub fn reset_time_visible_range(&mut self) {
        self.time_scale.reset_visible_range_to_full();
        self.emit_time_range_changed();
    }

    pub fn pan_time_visible_by_delta(&mut self, delta_time: f64) -> ChartResult<()> {
        self.time_scale.pan_visible_by_delta(delta_time)?;
        self.emit_time_range_changed();
        Ok(())
    }

    /// Zooms around `anchor_time`; `factor > 1.0` zooms in.
    pub fn zoom_time_visible_by_factor(
        &mut self,
        factor: f64,
        anchor_time: f64,
    ) -> ChartResult<()> {
        self.time_scale
            .zoom_visible_by_factor(factor, anchor_time, self.config.min_time_span)?;
        self.emit_time_range_changed();
        Ok(())
    }

    pub fn pan_start(&mut self) {
        self.interaction.on_pan_start();
    }

    /// Applies one drag step while a pan gesture is active.
    ///
    /// Returns `false` (and changes nothing) outside a pan gesture.
    pub fn pan_drag(&mut self, delta_px: f64) -> ChartResult<bool> {
        if !self.interaction.is_panning() {
            return Ok(false);
        }
        let delta_time = resolve_pixel_pan_delta_time(
            delta_px,
            f64::from(self.config.width),
            self.time_scale.visible_span(),
        )?;
        self.interaction.on_pan_drag(delta_px);
        trace!(delta_px, delta_time, "drag pan step");
        self.pan_time_visible_by_delta(delta_time)?;
        Ok(true)
    }

    pub fn pan_end(&mut self) {
        self.interaction.on_pan_end();
    }

    /// Wheel zoom anchored at a pixel x position. Returns `false` for a zero delta.
    pub fn wheel_zoom(&mut self, wheel_delta_y: f64, anchor_x_px: f64) -> ChartResult<bool> {
        let Some(factor) = resolve_wheel_zoom_factor(wheel_delta_y, self.config.zoom_step_ratio)?
        else {
            return Ok(false);
        };
        let anchor_time = self
            .time_scale
            .pixel_to_time(anchor_x_px, self.pixel_viewport())?;
        trace!(wheel_delta_y, factor, anchor_time, "wheel zoom step");
        self.zoom_time_visible_by_factor(factor, anchor_time)?;
        Ok(true)
    }
}
