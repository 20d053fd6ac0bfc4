use approx::assert_relative_eq;
use candle_scope::api::{ChartConfig, RangeSyncedChart};
use candle_scope::core::{OhlcBar, OhlcSeries};
use candle_scope::interaction::InteractionMode;

/// Eleven bars at t = 0, 10, ..., 100 with lows 100 + i and highs 110 + i.
fn build_chart() -> RangeSyncedChart {
    let bars = (0..=10)
        .map(|i| {
            let i = f64::from(i);
            OhlcBar::new(i * 10.0, 105.0 + i, 110.0 + i, 100.0 + i, 106.0 + i)
        })
        .collect();
    let series = OhlcSeries::from_bars(bars).expect("series");
    RangeSyncedChart::create_with_config(series, "pan-zoom", ChartConfig::default())
        .expect("chart init")
}

#[test]
fn drag_pan_moves_window_and_rederives_price_range() {
    let mut chart = build_chart();
    chart.set_time_visible_range(0.0, 50.0).expect("set range");
    assert_eq!(chart.price_range(), (0.0, 215.0));

    chart.pan_start();
    assert_eq!(chart.interaction_mode(), InteractionMode::Panning);
    // Dragging left by half the 1000 px width moves forward by half the span.
    let applied = chart.pan_drag(-500.0).expect("drag");
    chart.pan_end();

    assert!(applied);
    let (start, end) = chart.time_range();
    assert_relative_eq!(start, 25.0, epsilon = 1e-9);
    assert_relative_eq!(end, 75.0, epsilon = 1e-9);
    assert_eq!(chart.price_range(), (3.0, 217.0));
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn drag_outside_gesture_is_ignored() {
    let mut chart = build_chart();
    let before = (chart.time_range(), chart.price_range());

    let applied = chart.pan_drag(120.0).expect("drag while idle");
    assert!(!applied);
    assert_eq!((chart.time_range(), chart.price_range()), before);
}

#[test]
fn interaction_state_tracks_drag_distance() {
    let mut chart = build_chart();
    chart.pan_start();
    chart.pan_drag(30.0).expect("drag");
    chart.pan_drag(-10.0).expect("drag");
    assert_relative_eq!(chart.interaction().drag_distance_px(), 20.0, epsilon = 1e-9);
    chart.pan_end();
    assert_eq!(chart.interaction().gesture_count(), 1);
}

#[test]
fn wheel_zoom_in_narrows_window_and_rederives_price_range() {
    let mut chart = build_chart();
    assert_relative_eq!(chart.price_range().0, 99.0, epsilon = 1e-9);
    assert_relative_eq!(chart.price_range().1, 121.0, epsilon = 1e-9);

    let zoomed = chart.wheel_zoom(-120.0, 500.0).expect("wheel zoom");
    assert!(zoomed);

    let (start, end) = chart.time_range();
    assert_relative_eq!(end - start, 100.0 / 1.1, epsilon = 1e-9);
    assert_relative_eq!((start + end) / 2.0, 50.0, epsilon = 1e-9);
    // Bars at t = 10..=90 stay in view.
    assert_eq!(chart.visible_bars().len(), 9);
    assert_eq!(chart.price_range(), (1.0, 219.0));
}

#[test]
fn wheel_zoom_out_widens_window() {
    let mut chart = build_chart();
    chart.set_time_visible_range(40.0, 60.0).expect("set range");

    chart.wheel_zoom(120.0, 500.0).expect("zoom out");
    let (start, end) = chart.time_range();
    assert_relative_eq!(end - start, 20.0 * 1.1, epsilon = 1e-9);
    assert_eq!(chart.visible_bars().len(), 3);
}

#[test]
fn zero_wheel_delta_is_noop() {
    let mut chart = build_chart();
    let before = chart.time_range();
    assert!(!chart.wheel_zoom(0.0, 300.0).expect("zero delta"));
    assert_eq!(chart.time_range(), before);
}

#[test]
fn zoom_respects_minimum_time_span() {
    let mut chart = build_chart();
    chart
        .zoom_time_visible_by_factor(1_000_000.0, 50.0)
        .expect("deep zoom");
    let (start, end) = chart.time_range();
    assert_relative_eq!(end - start, 1.0, epsilon = 1e-9);
    assert_eq!(chart.visible_bars().len(), 1);
    assert_eq!(chart.price_range(), (5.0, 215.0));
}

#[test]
fn programmatic_pan_past_data_keeps_price_range() {
    let mut chart = build_chart();
    chart.set_time_visible_range(90.0, 100.0).expect("set range");
    let before = chart.price_range();

    chart.pan_time_visible_by_delta(1_000.0).expect("pan");
    assert!(chart.visible_bars().is_empty());
    assert_eq!(chart.price_range(), before);
}

#[test]
fn invalid_inputs_are_rejected() {
    let mut chart = build_chart();
    assert!(chart.pan_time_visible_by_delta(f64::NAN).is_err());
    assert!(chart.zoom_time_visible_by_factor(0.0, 10.0).is_err());
    assert!(chart.set_time_visible_range(f64::INFINITY, 10.0).is_err());
    chart.pan_start();
    assert!(chart.pan_drag(f64::NAN).is_err());
}

const HOUR: f64 = 3_600.0;
const JAN_1_2024: f64 = 1_704_067_200.0;

/// Hourly bars from 2024-01-01T00:00Z, priced like `build_chart`.
fn build_epoch_chart() -> RangeSyncedChart {
    let bars = (0..=10)
        .map(|i| {
            let i = f64::from(i);
            OhlcBar::new(JAN_1_2024 + i * HOUR, 105.0 + i, 110.0 + i, 100.0 + i, 106.0 + i)
        })
        .collect();
    let series = OhlcSeries::from_bars(bars).expect("series");
    RangeSyncedChart::create(series, "epoch").expect("chart init")
}

#[test]
fn epoch_timestamps_survive_pan_zoom_and_render() {
    let mut chart = build_epoch_chart();
    chart
        .set_time_visible_range(JAN_1_2024, JAN_1_2024 + 4.0 * HOUR)
        .expect("set range");
    assert_eq!(chart.price_range(), (0.0, 214.0));

    chart.pan_start();
    assert!(chart.pan_drag(-500.0).expect("drag"));
    chart.pan_end();
    let (start, end) = chart.time_range();
    assert_relative_eq!(start, JAN_1_2024 + 2.0 * HOUR, epsilon = 1e-3);
    assert_relative_eq!(end, JAN_1_2024 + 6.0 * HOUR, epsilon = 1e-3);
    assert_eq!(chart.visible_bars().len(), 5);
    assert_eq!(chart.price_range(), (2.0, 216.0));
    chart.render().expect("render after pan");
    assert_eq!(chart.renderer().last_rect_count, 5);

    let bar_time = JAN_1_2024 + 5.0 * HOUR;
    chart
        .set_time_visible_range(bar_time, bar_time)
        .expect("single bar window");
    assert_eq!(chart.visible_bars().len(), 1);
    assert_eq!(chart.price_range(), (5.0, 215.0));

    chart.pan_start();
    assert!(chart.pan_drag(100.0).expect("drag"));
    chart.pan_end();
    let (start, end) = chart.time_range();
    assert_relative_eq!(end - start, 1.0, epsilon = 1e-6);
    assert!(start < bar_time - 0.5);
    assert_eq!(chart.visible_bars().len(), 1);

    assert!(chart.wheel_zoom(120.0, 500.0).expect("zoom out"));
    chart.render().expect("render single bar");
    assert_eq!(chart.renderer().last_rect_count, 1);
    assert_eq!(chart.renderer().last_line_count, 1);
}
