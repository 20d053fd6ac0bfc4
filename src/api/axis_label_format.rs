use crate::core::primitives::unix_seconds_to_datetime;

use super::AxisType;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Relative positions of the tick labels along each axis.
pub(super) const TICK_FRACTIONS: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

pub(super) fn format_time_axis_label(time: f64, axis_type: AxisType, visible_span: f64) -> String {
    if !time.is_finite() {
        return "nan".to_owned();
    }
    match axis_type {
        AxisType::Linear => format!("{time:.2}"),
        AxisType::Date => {
            let Some(datetime) = unix_seconds_to_datetime(time) else {
                return format!("{time:.0}");
            };
            let pattern = if visible_span <= 600.0 {
                "%H:%M:%S"
            } else if visible_span <= 2.0 * SECONDS_PER_DAY {
                "%m-%d %H:%M"
            } else {
                "%Y-%m-%d"
            };
            datetime.format(pattern).to_string()
        }
    }
}

pub(super) fn format_price_axis_label(price: f64) -> String {
    if !price.is_finite() {
        return "nan".to_owned();
    }
    format!("{price:.2}")
}
