use crate::error::{ChartError, ChartResult};

const WHEEL_STEP_UNITS: f64 = 120.0;

/// Converts a horizontal drag (pixels, positive = rightwards) into a time delta.
///
/// Dragging right moves the window back in time.
pub(super) fn resolve_pixel_pan_delta_time(
    delta_px: f64,
    viewport_width_px: f64,
    visible_span: f64,
) -> ChartResult<f64> {
    if !delta_px.is_finite() {
        return Err(ChartError::InvalidData(
            "pan pixel delta must be finite".to_owned(),
        ));
    }
    if !viewport_width_px.is_finite() || viewport_width_px <= 0.0 {
        return Err(ChartError::InvalidData(
            "pan viewport width must be finite and > 0".to_owned(),
        ));
    }
    let delta_time = -(delta_px / viewport_width_px) * visible_span;
    if !delta_time.is_finite() {
        return Err(ChartError::InvalidData(
            "computed pixel pan delta time must be finite".to_owned(),
        ));
    }
    Ok(delta_time)
}

/// Wheel delta to zoom factor; negative delta (wheel up) zooms in.
pub(super) fn resolve_wheel_zoom_factor(
    wheel_delta_y: f64,
    zoom_step_ratio: f64,
) -> ChartResult<Option<f64>> {
    if wheel_delta_y == 0.0 {
        return Ok(None);
    }

    let normalized_steps = wheel_delta_y / WHEEL_STEP_UNITS;
    let base = 1.0 + zoom_step_ratio;
    let factor = base.powf(-normalized_steps);
    if !factor.is_finite() || factor <= 0.0 {
        return Err(ChartError::InvalidData(
            "computed wheel zoom factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(Some(factor))
}
