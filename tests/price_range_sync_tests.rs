use candle_scope::api::{
    ChartConfig, EmptyWindowPolicy, PriceRangeSync, PriceRangeUpdate, RangeSyncedChart,
    TimeRangeListener,
};
use candle_scope::core::{OhlcBar, OhlcSeries};

fn three_bar_series() -> OhlcSeries {
    OhlcSeries::from_bars(vec![
        OhlcBar::new(1.0, 10.0, 12.0, 9.0, 11.0),
        OhlcBar::new(2.0, 11.0, 15.0, 10.0, 14.0),
        OhlcBar::new(3.0, 14.0, 14.0, 12.0, 13.0),
    ])
    .expect("valid series")
}

fn build_chart(config: ChartConfig) -> RangeSyncedChart {
    RangeSyncedChart::create_with_config(three_bar_series(), "sync", config).expect("chart init")
}

#[test]
fn window_over_first_two_bars_pads_envelope_by_hundred() {
    let mut chart = build_chart(ChartConfig::default());
    chart.on_time_range_changed(1.0, 2.0).expect("range change");

    assert_eq!(chart.time_range(), (1.0, 2.0));
    assert_eq!(chart.price_range(), (-91.0, 115.0));
    assert_eq!(chart.viewport().price_range, (-91.0, 115.0));
}

#[test]
fn custom_margin_pad_is_applied() {
    let mut chart = build_chart(ChartConfig::default().with_margin_pad(0.5));
    chart.set_time_visible_range(2.0, 3.0).expect("set range");
    assert_eq!(chart.price_range(), (9.5, 15.5));
}

#[test]
fn repeated_window_gives_identical_price_range() {
    let mut chart = build_chart(ChartConfig::default());
    chart.set_time_visible_range(1.5, 3.0).expect("first");
    let first = chart.price_range();

    chart.set_time_visible_range(1.0, 1.0).expect("elsewhere");
    chart.set_time_visible_range(1.5, 3.0).expect("second");
    assert_eq!(chart.price_range(), first);
}

#[test]
fn empty_window_keeps_previous_range_by_default() {
    let mut chart = build_chart(ChartConfig::default());
    chart.set_time_visible_range(1.0, 2.0).expect("set range");
    let before = chart.price_range();

    chart.set_time_visible_range(10.0, 20.0).expect("empty window");
    assert_eq!(chart.time_range(), (10.0, 20.0));
    assert_eq!(chart.price_range(), before);
    assert!(chart.visible_bars().is_empty());
}

#[test]
fn empty_window_between_bars_keeps_previous_range() {
    let mut chart = build_chart(ChartConfig::default());
    chart.set_time_visible_range(3.0, 3.0).expect("last bar only");
    let before = chart.price_range();

    chart.set_time_visible_range(1.2, 1.8).expect("gap between bars");
    assert_eq!(chart.price_range(), before);
}

#[test]
fn empty_window_clamps_to_global_envelope_when_configured() {
    let config = ChartConfig::default()
        .with_margin_pad(1.0)
        .with_empty_window_policy(EmptyWindowPolicy::ClampToGlobal);
    let mut chart = build_chart(config);
    chart.set_time_visible_range(2.0, 2.0).expect("single bar");
    assert_eq!(chart.price_range(), (9.0, 16.0));

    chart.set_time_visible_range(-50.0, -10.0).expect("empty window");
    assert_eq!(chart.price_range(), (8.0, 16.0));
}

#[test]
fn listener_reads_committed_range_not_raw_request() {
    let mut chart = build_chart(ChartConfig::default());
    chart.on_time_range_changed(2.0, 1.0).expect("reversed bounds");

    assert_eq!(chart.time_range(), (1.0, 2.0));
    assert_eq!(chart.price_range(), (-91.0, 115.0));
}

#[test]
fn reset_restores_full_span_and_rederives_price_range() {
    let mut chart = build_chart(ChartConfig::default());
    chart.set_time_visible_range(3.0, 3.0).expect("narrow");
    chart.reset_time_visible_range();

    assert_eq!(chart.time_range(), (1.0, 3.0));
    assert_eq!(chart.price_range(), (-91.0, 115.0));
}

#[test]
fn listener_can_be_driven_directly() {
    let series = three_bar_series();
    let mut sync = PriceRangeSync::new(100.0, EmptyWindowPolicy::KeepPrevious).expect("sync");

    let update = sync.on_time_range_changed((1.0, 2.0), &series);
    assert_eq!(
        update,
        PriceRangeUpdate::Apply {
            range: (-91.0, 115.0),
            bars: 2
        }
    );
    assert_eq!(
        sync.on_time_range_changed((4.0, 5.0), &series),
        PriceRangeUpdate::Keep
    );
}

#[test]
fn negative_margin_pad_is_rejected() {
    assert!(PriceRangeSync::new(-0.1, EmptyWindowPolicy::KeepPrevious).is_err());
    assert!(PriceRangeSync::new(f64::INFINITY, EmptyWindowPolicy::ClampToGlobal).is_err());
}

#[test]
fn range_change_marks_chart_for_redraw() {
    let mut chart = build_chart(ChartConfig::default());
    chart.render().expect("render");
    assert!(!chart.is_redraw_pending());

    chart.set_time_visible_range(1.0, 2.0).expect("set range");
    assert!(chart.is_redraw_pending());
    chart.render().expect("render");
    assert!(!chart.is_redraw_pending());

    chart.set_time_visible_range(10.0, 20.0).expect("empty window");
    assert!(!chart.is_redraw_pending());
}

const DAY: f64 = 86_400.0;
const JAN_1_2024: f64 = 1_704_067_200.0;

fn daily_three_bar_series() -> OhlcSeries {
    OhlcSeries::from_bars(vec![
        OhlcBar::new(JAN_1_2024, 10.0, 12.0, 9.0, 11.0),
        OhlcBar::new(JAN_1_2024 + DAY, 11.0, 15.0, 10.0, 14.0),
        OhlcBar::new(JAN_1_2024 + 2.0 * DAY, 14.0, 14.0, 12.0, 13.0),
    ])
    .expect("valid series")
}

#[test]
fn single_instant_window_on_epoch_timestamps_stays_usable() {
    let mut chart =
        RangeSyncedChart::create(daily_three_bar_series(), "epoch").expect("chart init");
    let t = JAN_1_2024 + DAY;

    chart.set_time_visible_range(t, t).expect("single instant");
    let (start, end) = chart.time_range();
    assert!(end > start);
    assert_eq!((start, end), (t - 0.5, t + 0.5));
    assert_eq!(chart.visible_bars().len(), 1);
    assert_eq!(chart.price_range(), (-90.0, 115.0));

    chart.render().expect("render after single-instant window");
    assert!(chart.wheel_zoom(-120.0, 500.0).expect("wheel zoom"));
    chart
        .zoom_time_visible_by_factor(0.5, t)
        .expect("zoom by factor");
    let (start, end) = chart.time_range();
    assert!(end > start);

    chart.pan_start();
    assert!(chart.pan_drag(-100.0).expect("drag"));
    chart.pan_end();
    let (panned_start, panned_end) = chart.time_range();
    assert!(panned_start > start);
    assert!(panned_end > end);
    chart.render().expect("render after pan");
}

#[test]
fn single_instant_window_uses_configured_min_time_span() {
    let config = ChartConfig::default().with_min_time_span(3_600.0);
    let mut chart = RangeSyncedChart::create_with_config(daily_three_bar_series(), "hour", config)
        .expect("chart init");
    let t = JAN_1_2024 + 2.0 * DAY;

    chart.set_time_visible_range(t, t).expect("single instant");
    assert_eq!(chart.time_range(), (t - 1_800.0, t + 1_800.0));
    assert_eq!(chart.price_range(), (-88.0, 114.0));
}
