//! Text widget

use crate::core::context::Color;
use crate::core::geometry::{Point, Rect, Size};
use crate::core::{Children, Widget, WidgetBase};
use crate::render::Renderer;
use crate::style::{TextAlign, TextStyle, VerticalAlign};

/// Single run of styled text
pub struct Text {
    base: WidgetBase,
    content: String,
    style: TextStyle,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            content: content.into(),
            style: TextStyle::default(),
        }
    }

    pub fn font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.style.font_family = family.into();
        self.style.font_size = size;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.style.font_size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style.color = color;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.style.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.style.italic = italic;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.style.align = align;
        self
    }

    pub fn valign(mut self, valign: VerticalAlign) -> Self {
        self.style.valign = valign;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.style.line_height = line_height;
        self
    }

    pub fn text_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn style_ref(&self) -> &TextStyle {
        &self.style
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new("")
    }
}

/// Top-left position of a text block of `size` inside `area`
pub(crate) fn aligned_origin(area: Rect, size: Size, align: TextAlign, valign: VerticalAlign) -> Point {
    let x = match align {
        TextAlign::Left => area.x,
        TextAlign::Center => area.x + (area.width - size.width) / 2.0,
        TextAlign::Right => area.x + area.width - size.width,
    };
    let y = match valign {
        VerticalAlign::Top => area.y,
        VerticalAlign::Middle => area.y + (area.height - size.height) / 2.0,
        VerticalAlign::Bottom => area.y + area.height - size.height,
    };
    Point::new(x, y)
}

impl Widget for Text {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        if self.content.is_empty() {
            return Size::new(0.0, self.style.font_size);
        }
        Size::new(
            self.style.approx_width(&self.content),
            self.style.font_size * self.style.line_height,
        )
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.base.paint(renderer);
        if self.content.is_empty() {
            return;
        }
        let font = renderer.load_font_face(&self.style.font_family, self.style.font_size, self.style.face());
        let size = renderer.measure_text(font, &self.content);
        let origin = aligned_origin(self.base.content_bounds, size, self.style.align, self.style.valign);
        renderer.draw_text(&self.content, origin, font, self.style.color, &self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WidgetTree;
    use crate::render::{ApproxText, Canvas, FontFace, Primitive};

    #[test]
    fn test_measure_uses_char_count() {
        let mut tree = WidgetTree::new();
        tree.set_root(Text::new("héllo").font_size(10.0));
        let size = tree.measure(Size::new(500.0, 500.0));
        assert!((size.width - 30.0).abs() < 1e-4);
        assert!((size.height - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_text_is_one_line_tall() {
        let mut tree = WidgetTree::new();
        tree.set_root(Text::new(""));
        assert_eq!(tree.measure(Size::new(500.0, 500.0)), Size::new(0.0, 14.0));
    }

    #[test]
    fn test_centered_text_position() {
        let mut tree = WidgetTree::new();
        tree.set_root(Text::new("ab").font_size(10.0).align(TextAlign::Center));
        let mut canvas = Canvas::new(ApproxText);
        tree.measure(Size::new(100.0, 20.0));
        tree.layout(Rect::new(0.0, 0.0, 100.0, 20.0));
        tree.render(&mut canvas);
        match &canvas.draw_list().primitives[0] {
            Primitive::Text { position, text, .. } => {
                assert_eq!(text, "ab");
                assert!((position.x - 44.0).abs() < 1e-4);
                assert!((position.y - 3.0).abs() < 1e-4);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_bold_italic_select_font_face() {
        let mut tree = WidgetTree::new();
        tree.set_root(Text::new("hi").bold(true).italic(true));
        let mut canvas = Canvas::new(ApproxText);
        tree.frame(Size::new(100.0, 20.0), &mut canvas);
        let font = canvas.draw_list().primitives.iter().find_map(|p| match p {
            Primitive::Text { font, .. } => Some(*font),
            _ => None,
        });
        let face = font.and_then(|f| canvas.font_face(f));
        assert_eq!(face, Some(FontFace { bold: true, italic: true }));
    }

    #[test]
    fn test_origin_for_bottom_right() {
        let p = aligned_origin(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Size::new(20.0, 10.0),
            TextAlign::Right,
            VerticalAlign::Bottom,
        );
        assert_eq!(p, Point::new(80.0, 40.0));
    }
}
