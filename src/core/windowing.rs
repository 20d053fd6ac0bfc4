use ordered_float::OrderedFloat;

use crate::core::OhlcBar;

/// Returns the bars whose time falls inside an inclusive window.
///
/// `bars` must be sorted by strictly increasing time; the result borrows a
/// contiguous sub-slice located by binary search.
#[must_use]
pub fn candles_in_time_window(bars: &[OhlcBar], start: f64, end: f64) -> &[OhlcBar] {
    if start.is_nan() || end.is_nan() {
        return &[];
    }
    let (min_t, max_t) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    let first = bars.partition_point(|bar| bar.time < min_t);
    let last = bars.partition_point(|bar| bar.time <= max_t);
    if first >= last {
        return &[];
    }
    &bars[first..last]
}

/// Returns `(min low, max high)` over `bars`, ignoring non-finite values.
///
/// `None` when no finite low/high pair exists.
#[must_use]
pub fn price_envelope(bars: &[OhlcBar]) -> Option<(f64, f64)> {
    let low = bars
        .iter()
        .map(|bar| bar.low)
        .filter(|value| value.is_finite())
        .min_by_key(|value| OrderedFloat(*value))?;
    let high = bars
        .iter()
        .map(|bar| bar.high)
        .filter(|value| value.is_finite())
        .max_by_key(|value| OrderedFloat(*value))?;
    Some((low, high))
}
