use candle_scope::overlay::{
    ExtremaOverlayRenderer, ExtremaResult, FigureConfig, LegendGlyph, OverlayInput, OverlayLayer,
    OverlayStyle,
};
use candle_scope::render::{Color, NullRenderer, Primitive};
use candle_scope::ChartError;

struct Fixture {
    x_raw: Vec<f64>,
    y_raw: Vec<f64>,
    x_fit: Vec<f64>,
    y_fit: Vec<f64>,
}

impl Fixture {
    fn input<'a>(&'a self, min_idx: &'a [usize], max_idx: &'a [usize]) -> OverlayInput<'a> {
        OverlayInput::new(
            &self.x_raw,
            &self.y_raw,
            &self.x_fit,
            &self.y_fit,
            min_idx,
            max_idx,
        )
    }
}

fn fixture() -> Fixture {
    let x_raw: Vec<f64> = (0..8).map(|i| f64::from(i) * 0.75).collect();
    let y_raw = vec![10.0, 12.5, 9.0, 13.0, 14.5, 11.0, 15.0, 12.0];
    let x_fit: Vec<f64> = (0..6).map(f64::from).collect();
    let y_fit = vec![11.0, 9.5, 13.5, 12.0, 10.5, 14.0];
    Fixture {
        x_raw,
        y_raw,
        x_fit,
        y_fit,
    }
}

fn circle_color(primitive: &Primitive) -> Option<Color> {
    match primitive {
        Primitive::Circle(circle) => Some(circle.fill_color),
        _ => None,
    }
}

#[test]
fn overlay_renders_all_layers_in_fixed_order() {
    let data = fixture();
    let extrema = ExtremaResult::new(vec![2, 5], vec![1, 4]);
    let input = OverlayInput::with_extrema(
        &data.x_raw,
        &data.y_raw,
        &data.x_fit,
        &data.y_fit,
        &extrema,
    );

    let renderer = ExtremaOverlayRenderer::default();
    let frame = renderer.build_frame(input).expect("overlay frame");

    let order: Vec<OverlayLayer> = frame.layers.keys().copied().collect();
    assert_eq!(order, OverlayLayer::Z_ORDER.to_vec());
    assert_eq!(frame.layer(OverlayLayer::RawSamples).len(), 8);
    assert_eq!(frame.layer(OverlayLayer::FittedCurve).len(), 5);
    assert_eq!(frame.layer(OverlayLayer::LocalMaxima).len(), 2);
    assert_eq!(frame.layer(OverlayLayer::LocalMinima).len(), 2);

    let style = renderer.style();
    assert!(
        frame
            .layer(OverlayLayer::LocalMaxima)
            .iter()
            .all(|p| circle_color(p) == Some(style.maxima_color))
    );
    assert!(
        frame
            .layer(OverlayLayer::LocalMinima)
            .iter()
            .all(|p| circle_color(p) == Some(style.minima_color))
    );
}

#[test]
fn flattened_frame_paints_bottom_layer_first() {
    let data = fixture();
    let input = data.input(&[1, 4], &[2, 5]);
    let frame = ExtremaOverlayRenderer::default()
        .build_frame(input)
        .expect("overlay frame")
        .flatten();

    // Axes box, then 8 raw dots, 5 fit segments, 2 maxima and 2 minima.
    assert!(matches!(frame.primitives[0], Primitive::Rect(_)));
    assert_eq!(circle_color(&frame.primitives[1]), Some(Color::GREY));
    assert!(matches!(frame.primitives[9], Primitive::Line(_)));
    assert!(matches!(frame.primitives[13], Primitive::Line(_)));
    assert_eq!(circle_color(&frame.primitives[14]), Some(Color::BLUE));
    assert_eq!(circle_color(&frame.primitives[15]), Some(Color::BLUE));
    assert_eq!(circle_color(&frame.primitives[16]), Some(Color::RED));
    assert_eq!(circle_color(&frame.primitives[17]), Some(Color::RED));
    assert!(matches!(frame.primitives[18], Primitive::Rect(_)));
}

#[test]
fn extrema_markers_sit_on_fitted_samples() {
    let data = fixture();
    let input = data.input(&[1], &[5]);
    let frame = ExtremaOverlayRenderer::default()
        .build_frame(input)
        .expect("overlay frame");

    let Primitive::Line(last_segment) = &frame.layer(OverlayLayer::FittedCurve)[4] else {
        panic!("fit layer holds line segments");
    };
    let Primitive::Circle(maximum) = &frame.layer(OverlayLayer::LocalMaxima)[0] else {
        panic!("maxima layer holds dots");
    };
    assert!((maximum.cx - last_segment.x2).abs() <= 1e-9);
    assert!((maximum.cy - last_segment.y2).abs() <= 1e-9);

    let Primitive::Line(first_segment) = &frame.layer(OverlayLayer::FittedCurve)[0] else {
        panic!("fit layer holds line segments");
    };
    let Primitive::Circle(minimum) = &frame.layer(OverlayLayer::LocalMinima)[0] else {
        panic!("minima layer holds dots");
    };
    assert!((minimum.cx - first_segment.x2).abs() <= 1e-9);
    assert!((minimum.cy - first_segment.y2).abs() <= 1e-9);
}

#[test]
fn render_hands_one_frame_to_canvas() {
    let data = fixture();
    let input = data.input(&[1, 4], &[2, 5]);
    let mut canvas = NullRenderer::default();

    ExtremaOverlayRenderer::default()
        .render(&mut canvas, input)
        .expect("render");

    assert_eq!(canvas.render_count, 1);
    // 8 raw + 2 maxima + 2 minima + 3 legend markers.
    assert_eq!(canvas.last_circle_count, 15);
    // 5 fit segments + the legend line sample.
    assert_eq!(canvas.last_line_count, 6);
    // Axes box and legend box.
    assert_eq!(canvas.last_rect_count, 2);
    assert_eq!(canvas.last_text_count, 4);

    let frame = canvas.last_frame.expect("frame kept");
    assert_eq!(frame.viewport.width, 1800);
    assert_eq!(frame.viewport.height, 600);
    assert_eq!(frame.background, Color::WHITE);
}

#[test]
fn out_of_range_maximum_fails_before_drawing() {
    let data = fixture();
    let input = data.input(&[1], &[7]);
    let mut canvas = NullRenderer::default();

    let err = ExtremaOverlayRenderer::default()
        .render(&mut canvas, input)
        .expect_err("index 7 is outside six fitted samples");

    match err {
        ChartError::IndexOutOfRange {
            array,
            position,
            index,
            len,
        } => {
            assert_eq!(array, "max_idx");
            assert_eq!(position, 0);
            assert_eq!(index, 7);
            assert_eq!(len, 6);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(canvas.render_count, 0);
}

#[test]
fn index_equal_to_fit_length_is_out_of_range() {
    let data = fixture();
    let input = data.input(&[6], &[]);
    let err = ExtremaOverlayRenderer::default()
        .build_frame(input)
        .expect_err("index 6 is one past the end");
    assert!(matches!(
        err,
        ChartError::IndexOutOfRange {
            array: "min_idx",
            ..
        }
    ));
}

#[test]
fn mismatched_fit_arrays_are_shape_errors() {
    let data = fixture();
    let short_fit = &data.y_fit[..5];
    let input = OverlayInput::new(&data.x_raw, &data.y_raw, &data.x_fit, short_fit, &[], &[]);
    let err = ExtremaOverlayRenderer::default()
        .build_frame(input)
        .expect_err("fit arrays differ in length");
    assert!(matches!(
        err,
        ChartError::ShapeMismatch {
            expected: 6,
            actual: 5,
            ..
        }
    ));
}

#[test]
fn legend_lists_layers_with_their_glyphs() {
    let data = fixture();
    let input = data.input(&[], &[]);
    let frame = ExtremaOverlayRenderer::default()
        .build_frame(input)
        .expect("overlay frame");

    let labels: Vec<&str> = frame.legend.iter().map(|entry| entry.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Stock Data", "Polynomial Fit", "Local Maxima", "Local Minima"]
    );
    assert_eq!(frame.legend[1].glyph, LegendGlyph::Line);
    assert_eq!(frame.legend[0].glyph, LegendGlyph::Marker);
    assert!(frame.layer(OverlayLayer::LocalMaxima).is_empty());
}

#[test]
fn repeated_calls_are_independent() {
    let data = fixture();
    let renderer = ExtremaOverlayRenderer::default();
    let first = renderer
        .build_frame(data.input(&[1], &[2]))
        .expect("first");
    let _other = renderer
        .build_frame(OverlayInput::new(&[0.0, 100.0], &[0.0, 100.0], &[], &[], &[], &[]))
        .expect("unrelated call");
    let again = renderer
        .build_frame(data.input(&[1], &[2]))
        .expect("second");

    assert_eq!(first, again);
}

#[test]
fn non_finite_fit_points_break_the_curve() {
    let x_fit = [0.0, 1.0, 2.0, 3.0, 4.0];
    let y_fit = [1.0, 2.0, f64::NAN, 2.0, 1.0];
    let input = OverlayInput::new(&[], &[], &x_fit, &y_fit, &[], &[]);
    let frame = ExtremaOverlayRenderer::default()
        .build_frame(input)
        .expect("overlay frame");
    assert_eq!(frame.layer(OverlayLayer::FittedCurve).len(), 2);
}

#[test]
fn custom_figure_changes_canvas_size() {
    let figure = FigureConfig::default().with_fig_size(10.0, 4.0).with_dpi(100.0);
    let renderer =
        ExtremaOverlayRenderer::new(figure, OverlayStyle::default()).expect("valid figure");
    let data = fixture();
    let frame = renderer
        .build_frame(data.input(&[], &[]))
        .expect("overlay frame");
    assert_eq!((frame.viewport.width, frame.viewport.height), (1000, 400));

    let bad = FigureConfig::default().with_dpi(0.0);
    assert!(ExtremaOverlayRenderer::new(bad, OverlayStyle::default()).is_err());
}
