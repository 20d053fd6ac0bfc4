use crate::core::CandleGeometry;
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::RangeSyncedChart;
use super::axis_label_format::{TICK_FRACTIONS, format_price_axis_label, format_time_axis_label};

const TITLE_FONT_PX: f64 = 16.0;
const AXIS_FONT_PX: f64 = 11.0;
const LABEL_INSET_PX: f64 = 4.0;
const MIN_BODY_WIDTH_PX: f64 = 1.0;
const MIN_BODY_HEIGHT_PX: f64 = 1.0;
const AXIS_TEXT_COLOR: Color = Color::rgb(0.27, 0.27, 0.27);

impl<R: Renderer> RangeSyncedChart<R> {
    /// Body width for the bars currently in view.
    #[must_use]
    pub fn visible_body_width_px(&self) -> f64 {
        let style = self.config.candle_style;
        let visible = self.time_scale.visible_span();
        let bars = self.visible_bars();
        let slot = if bars.len() >= 2 {
            let data_span = bars[bars.len() - 1].time - bars[0].time;
            let per_bar = data_span / (bars.len() - 1) as f64;
            f64::from(self.config.width) * per_bar / visible
        } else {
            f64::from(self.config.width) / 10.0
        };
        (slot * style.body_width_ratio).clamp(MIN_BODY_WIDTH_PX, style.max_body_width_px)
    }

    /// Materializes the visible candles, title and axis labels.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let viewport = self.pixel_viewport();
        let mut frame = RenderFrame::new(viewport);
        let style = self.config.candle_style;

        let geometries = self.project_visible_candles(self.visible_body_width_px())?;
        for candle in &geometries {
            push_candle(&mut frame, candle, style.wick_width_px, self.candle_color(candle));
        }

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let (time_start, time_end) = self.time_scale.visible_range();
        let time_span = time_end - time_start;
        for fraction in TICK_FRACTIONS {
            let time = time_start + fraction * time_span;
            frame.push_text(TextPrimitive::new(
                format_time_axis_label(time, self.config.x_axis_type, time_span),
                fraction * width,
                height - AXIS_FONT_PX - LABEL_INSET_PX,
                AXIS_FONT_PX,
                AXIS_TEXT_COLOR,
                TextHAlign::Center,
            ));
        }

        let (price_min, price_max) = self.price_scale.domain();
        for fraction in TICK_FRACTIONS {
            let price = price_min + fraction * (price_max - price_min);
            let y = self.price_scale.price_to_pixel(price, viewport)?;
            frame.push_text(TextPrimitive::new(
                format_price_axis_label(price),
                width - LABEL_INSET_PX,
                y,
                AXIS_FONT_PX,
                AXIS_TEXT_COLOR,
                TextHAlign::Right,
            ));
        }

        frame.push_text(TextPrimitive::new(
            self.layout.title.clone(),
            width / 2.0,
            LABEL_INSET_PX,
            TITLE_FONT_PX,
            Color::BLACK,
            TextHAlign::Center,
        ));

        Ok(frame)
    }

    /// Builds the frame, hands it to the renderer and clears the redraw flag.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.redraw_pending = false;
        Ok(())
    }

    fn candle_color(&self, candle: &CandleGeometry) -> Color {
        if candle.is_bullish {
            self.config.candle_style.increasing_color
        } else {
            self.config.candle_style.decreasing_color
        }
    }
}

fn push_candle(frame: &mut RenderFrame, candle: &CandleGeometry, wick_width: f64, color: Color) {
    frame.push_line(LinePrimitive::new(
        candle.center_x,
        candle.wick_top,
        candle.center_x,
        candle.wick_bottom,
        wick_width,
        color,
    ));
    let body_height = (candle.body_bottom - candle.body_top).max(MIN_BODY_HEIGHT_PX);
    frame.push_rect(RectPrimitive::new(
        candle.body_left,
        candle.body_top,
        candle.body_right - candle.body_left,
        body_height,
        color,
    ));
}
