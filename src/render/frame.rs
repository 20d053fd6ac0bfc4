use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextPrimitive};

/// One draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic scene for one draw pass.
///
/// Backends clear to `background` and then paint `primitives` in order, so
/// later primitives sit above earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub primitives: Vec<Primitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::WHITE,
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.push_line(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.push_rect(rect);
        self
    }

    #[must_use]
    pub fn with_circle(mut self, circle: CirclePrimitive) -> Self {
        self.push_circle(circle);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.primitives.push(Primitive::Line(line));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.primitives.push(Primitive::Rect(rect));
    }

    pub fn push_circle(&mut self, circle: CirclePrimitive) {
        self.primitives.push(Primitive::Circle(circle));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.primitives.push(Primitive::Text(text));
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &CirclePrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Circle(circle) => Some(circle),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            Primitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.ensure_valid()?;
        self.background.validate()?;
        self.primitives.iter().try_for_each(Primitive::validate)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
