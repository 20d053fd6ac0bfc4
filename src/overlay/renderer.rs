use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{LinearScale, Viewport};
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, Primitive, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

use super::{FigureConfig, OverlayInput, OverlayStyle};

const AXES_LINE_WIDTH_PX: f64 = 1.0;
const LEGEND_PADDING_PX: f64 = 8.0;
const LEGEND_SAMPLE_WIDTH_PX: f64 = 24.0;
const LEGEND_CHAR_WIDTH_RATIO: f64 = 0.6;

/// Drawing layers of the overlay, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayLayer {
    RawSamples,
    FittedCurve,
    LocalMaxima,
    LocalMinima,
    Legend,
}

impl OverlayLayer {
    pub const Z_ORDER: [Self; 5] = [
        Self::RawSamples,
        Self::FittedCurve,
        Self::LocalMaxima,
        Self::LocalMinima,
        Self::Legend,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGlyph {
    Marker,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub glyph: LegendGlyph,
    /// Marker radius or line width in pixels.
    pub size_px: f64,
}

/// Layered scene produced by one overlay call.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub viewport: Viewport,
    pub face_color: Color,
    pub axes: RectPrimitive,
    pub layers: IndexMap<OverlayLayer, Vec<Primitive>>,
    pub legend: SmallVec<[LegendEntry; 4]>,
}

impl OverlayFrame {
    #[must_use]
    pub fn layer(&self, layer: OverlayLayer) -> &[Primitive] {
        self.layers.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flattens layers bottom to top into a single ordered frame.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport)
            .with_background(self.face_color)
            .with_rect(self.axes);
        for primitives in self.layers.values() {
            frame.primitives.extend(primitives.iter().cloned());
        }
        frame
    }
}

/// Stateless renderer for raw samples, a fitted curve and its extrema.
///
/// Each call is independent; the canvas is passed in explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtremaOverlayRenderer {
    figure: FigureConfig,
    style: OverlayStyle,
}

impl ExtremaOverlayRenderer {
    pub fn new(figure: FigureConfig, style: OverlayStyle) -> ChartResult<Self> {
        let figure = figure.validate()?;
        style.validate()?;
        Ok(Self { figure, style })
    }

    #[must_use]
    pub fn figure(&self) -> FigureConfig {
        self.figure
    }

    #[must_use]
    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Builds the overlay and hands the flattened frame to `canvas`.
    pub fn render<C: Renderer + ?Sized>(
        &self,
        canvas: &mut C,
        input: OverlayInput<'_>,
    ) -> ChartResult<()> {
        let frame = self.build_frame(input)?;
        canvas.render(&frame.flatten())
    }

    pub fn build_frame(&self, input: OverlayInput<'_>) -> ChartResult<OverlayFrame> {
        input.validate()?;

        let viewport = self.figure.viewport();
        let plot = PlotArea::new(self.figure, viewport, &input)?;
        let style = &self.style;
        let raw_radius = self.marker_radius_px(style.raw_marker_size_pt);
        let extrema_radius = self.marker_radius_px(style.extrema_marker_size_pt);

        let mut layers = IndexMap::with_capacity(OverlayLayer::Z_ORDER.len());
        for layer in OverlayLayer::Z_ORDER {
            layers.insert(layer, Vec::new());
        }

        if let Some(raw) = layers.get_mut(&OverlayLayer::RawSamples) {
            for (&x, &y) in input.x_raw.iter().zip(input.y_raw) {
                if let Some((px, py)) = plot.project(x, y)? {
                    raw.push(Primitive::Circle(CirclePrimitive::new(
                        px,
                        py,
                        raw_radius,
                        style.raw_color,
                    )));
                }
            }
        }

        if let Some(fit) = layers.get_mut(&OverlayLayer::FittedCurve) {
            let width = self.figure.points_to_px(style.fit_line_width_pt);
            let mut previous: Option<(f64, f64)> = None;
            for (&x, &y) in input.x_fit.iter().zip(input.y_fit) {
                let current = plot.project(x, y)?;
                if let (Some((x1, y1)), Some((x2, y2))) = (previous, current) {
                    fit.push(Primitive::Line(LinePrimitive::new(
                        x1,
                        y1,
                        x2,
                        y2,
                        width,
                        style.fit_color,
                    )));
                }
                previous = current;
            }
        }

        for (layer, indices, color) in [
            (OverlayLayer::LocalMaxima, input.max_idx, style.maxima_color),
            (OverlayLayer::LocalMinima, input.min_idx, style.minima_color),
        ] {
            let Some(markers) = layers.get_mut(&layer) else {
                continue;
            };
            for &index in indices {
                if let Some((px, py)) = plot.project(input.x_fit[index], input.y_fit[index])? {
                    markers.push(Primitive::Circle(CirclePrimitive::new(
                        px,
                        py,
                        extrema_radius,
                        color,
                    )));
                }
            }
        }

        let legend = self.legend_entries();
        if let Some(legend_layer) = layers.get_mut(&OverlayLayer::Legend) {
            self.push_legend(legend_layer, &legend, &plot);
        }

        debug!(
            raw = input.x_raw.len(),
            fit = input.x_fit.len(),
            maxima = input.max_idx.len(),
            minima = input.min_idx.len(),
            "built extrema overlay frame"
        );

        Ok(OverlayFrame {
            viewport,
            face_color: self.figure.face_color,
            axes: RectPrimitive::new(
                plot.left,
                plot.top,
                plot.right - plot.left,
                plot.bottom - plot.top,
                self.figure.face_color,
            )
            .with_border(AXES_LINE_WIDTH_PX, self.figure.edge_color),
            layers,
            legend,
        })
    }

    fn marker_radius_px(&self, size_pt: f64) -> f64 {
        self.figure.points_to_px(size_pt) / 2.0
    }

    fn legend_entries(&self) -> SmallVec<[LegendEntry; 4]> {
        let style = &self.style;
        let raw_radius = self.marker_radius_px(style.raw_marker_size_pt);
        let extrema_radius = self.marker_radius_px(style.extrema_marker_size_pt);
        let fit_width = self.figure.points_to_px(style.fit_line_width_pt);
        let glyphs = [
            (style.raw_color, LegendGlyph::Marker, raw_radius),
            (style.fit_color, LegendGlyph::Line, fit_width),
            (style.maxima_color, LegendGlyph::Marker, extrema_radius),
            (style.minima_color, LegendGlyph::Marker, extrema_radius),
        ];
        style
            .legend_labels
            .iter()
            .zip(glyphs)
            .map(|(label, (color, glyph, size_px))| LegendEntry {
                label: label.clone(),
                color,
                glyph,
                size_px,
            })
            .collect()
    }

    fn push_legend(&self, out: &mut Vec<Primitive>, entries: &[LegendEntry], plot: &PlotArea) {
        let font_px = self.figure.points_to_px(self.style.legend_font_pt);
        let row_height = font_px * 1.4;
        let longest = entries
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let width = LEGEND_PADDING_PX * 3.0
            + LEGEND_SAMPLE_WIDTH_PX
            + longest * font_px * LEGEND_CHAR_WIDTH_RATIO;
        let height = LEGEND_PADDING_PX * 2.0 + row_height * entries.len() as f64;
        let left = plot.right - LEGEND_PADDING_PX - width;
        let top = plot.top + LEGEND_PADDING_PX;

        out.push(Primitive::Rect(
            RectPrimitive::new(left, top, width, height, Color::rgba(1.0, 1.0, 1.0, 0.8))
                .with_border(AXES_LINE_WIDTH_PX, Color::rgb(0.8, 0.8, 0.8)),
        ));

        for (row, entry) in entries.iter().enumerate() {
            let center_y = top + LEGEND_PADDING_PX + row_height * (row as f64 + 0.5);
            let sample_left = left + LEGEND_PADDING_PX;
            let sample_center = sample_left + LEGEND_SAMPLE_WIDTH_PX / 2.0;
            match entry.glyph {
                LegendGlyph::Line => out.push(Primitive::Line(LinePrimitive::new(
                    sample_left,
                    center_y,
                    sample_left + LEGEND_SAMPLE_WIDTH_PX,
                    center_y,
                    entry.size_px,
                    entry.color,
                ))),
                LegendGlyph::Marker => out.push(Primitive::Circle(CirclePrimitive::new(
                    sample_center,
                    center_y,
                    entry.size_px,
                    entry.color,
                ))),
            }
            out.push(Primitive::Text(TextPrimitive::new(
                entry.label.clone(),
                sample_left + LEGEND_SAMPLE_WIDTH_PX + LEGEND_PADDING_PX,
                center_y - font_px / 2.0,
                font_px,
                Color::BLACK,
                TextHAlign::Left,
            )));
        }
    }
}

/// Pixel box of the axes plus data-to-pixel scales.
struct PlotArea {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x_scale: LinearScale,
    y_scale: LinearScale,
}

impl PlotArea {
    fn new(
        figure: FigureConfig,
        viewport: Viewport,
        input: &OverlayInput<'_>,
    ) -> ChartResult<Self> {
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let (left, right, bottom, top) = figure.subplot;

        let xs = input.x_raw.iter().chain(input.x_fit);
        let ys = input.y_raw.iter().chain(input.y_fit);
        let (x_min, x_max) = padded_bounds(xs.copied(), figure.data_margin);
        let (y_min, y_max) = padded_bounds(ys.copied(), figure.data_margin);

        Ok(Self {
            left: left * width,
            right: right * width,
            top: (1.0 - top) * height,
            bottom: (1.0 - bottom) * height,
            x_scale: LinearScale::new(x_min, x_max)?,
            y_scale: LinearScale::new(y_min, y_max)?,
        })
    }

    /// Maps one sample into pixels; `None` for non-finite samples.
    fn project(&self, x: f64, y: f64) -> ChartResult<Option<(f64, f64)>> {
        if !x.is_finite() || !y.is_finite() {
            return Ok(None);
        }
        let px = self.left + self.x_scale.domain_to_pixel(x, self.right - self.left)?;
        let py = self.bottom - self.y_scale.domain_to_pixel(y, self.bottom - self.top)?;
        Ok(Some((px, py)))
    }
}

/// Finite min/max of `values` widened by `margin` of the span.
///
/// Empty or single-valued inputs get a unit span around the value.
fn padded_bounds(values: impl Iterator<Item = f64>, margin: f64) -> (f64, f64) {
    let (min, max) = values
        .filter(|value| value.is_finite())
        .fold(None, |acc: Option<(OrderedFloat<f64>, OrderedFloat<f64>)>, value| {
            let value = OrderedFloat(value);
            Some(match acc {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            })
        })
        .map_or((0.0, 1.0), |(min, max)| (min.0, max.0));

    if max - min <= f64::EPSILON * max.abs().max(1.0) {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * margin;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::padded_bounds;

    #[test]
    fn bounds_are_widened_by_margin() {
        let (min, max) = padded_bounds([0.0, 10.0, f64::NAN].into_iter(), 0.05);
        assert!((min + 0.5).abs() <= 1e-12);
        assert!((max - 10.5).abs() <= 1e-12);
    }

    #[test]
    fn degenerate_bounds_get_unit_span() {
        assert_eq!(padded_bounds([3.0, 3.0].into_iter(), 0.05), (2.5, 3.5));
        assert_eq!(padded_bounds(std::iter::empty(), 0.05), (0.0, 1.0));
    }
}
