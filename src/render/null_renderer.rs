use crate::error::ChartResult;
use crate::render::{Primitive, RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content and keeps the last frame so callers can
/// inspect what would have been drawn.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub render_count: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_circle_count: usize,
    pub last_text_count: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let (mut lines, mut rects, mut circles, mut texts) = (0, 0, 0, 0);
        for primitive in &frame.primitives {
            match primitive {
                Primitive::Line(_) => lines += 1,
                Primitive::Rect(_) => rects += 1,
                Primitive::Circle(_) => circles += 1,
                Primitive::Text(_) => texts += 1,
            }
        }
        self.render_count += 1;
        self.last_line_count = lines;
        self.last_rect_count = rects;
        self.last_circle_count = circles;
        self.last_text_count = texts;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
