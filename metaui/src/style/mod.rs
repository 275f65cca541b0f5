//! Styling system for MetaUI

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Padding, Point, Rect};
use crate::render::{FontFace, Renderer};

/// Box decoration of a widget. Copied by value; state-dependent looks are
/// produced by building a modified copy at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub background: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub border_radius: CornerRadius,
    pub padding: Padding,
    pub margin: Padding,
    pub shadow: Option<Shadow>,
    pub gradient: Option<Gradient>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
            border_radius: CornerRadius::default(),
            padding: Padding::zero(),
            margin: Padding::zero(),
            shadow: None,
            gradient: None,
        }
    }
}

impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    // Builder methods
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = width;
        self.border_color = color;
        self
    }

    pub fn border_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.border_radius = radius.into();
        self
    }

    pub fn padding(mut self, p: impl Into<Padding>) -> Self {
        self.padding = p.into();
        self
    }

    pub fn margin(mut self, m: impl Into<Padding>) -> Self {
        self.margin = m.into();
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Paint shadow, background and border for `bounds`, in that order
    pub fn paint(&self, bounds: Rect, renderer: &mut dyn Renderer) {
        if let Some(shadow) = &self.shadow {
            renderer.draw_rounded_rect(bounds.translate(shadow.offset), self.border_radius, shadow.color);
        }

        if let Some(g) = &self.gradient {
            renderer.draw_gradient(bounds, g.start, g.end, g.angle);
        } else if self.background.a > 0.0 {
            if self.border_radius.is_zero() {
                renderer.draw_rect(bounds, self.background);
            } else {
                renderer.draw_rounded_rect(bounds, self.border_radius, self.background);
            }
        }

        if self.border_width > 0.0 && self.border_color.a > 0.0 {
            renderer.draw_border(bounds, self.border_radius, self.border_color, self.border_width);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub offset: Point,
    pub blur: f32,
}

impl Shadow {
    pub fn new(color: Color, offset: Point, blur: f32) -> Self {
        Self { color, offset, blur }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::new(0.0, 0.0, 0.0, 0.3),
            offset: Point::new(0.0, 2.0),
            blur: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    /// Degrees; 90 runs top to bottom
    pub angle: f32,
}

impl Gradient {
    pub fn new(start: Color, end: Color, angle: f32) -> Self {
        Self { start, end, angle }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Generic family new text styles start with
pub const DEFAULT_FAMILY: &str = "sans-serif";

/// Font and color settings for text content
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub line_height: f32,
    pub align: TextAlign,
    pub valign: VerticalAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FAMILY.to_string(),
            font_size: 14.0,
            color: Color::WHITE,
            bold: false,
            italic: false,
            line_height: 1.4,
            align: TextAlign::Left,
            valign: VerticalAlign::Middle,
        }
    }
}

impl TextStyle {
    pub fn face(&self) -> FontFace {
        FontFace { bold: self.bold, italic: self.italic }
    }

    /// Width of `text` under the fixed-advance approximation used while
    /// measuring (no font access during the measure pass)
    pub fn approx_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size * 0.6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ApproxText, Canvas, Primitive};

    #[test]
    fn test_paint_order_shadow_background_border() {
        let style = BoxStyle::new()
            .background(Color::BLACK)
            .border(1.0, Color::WHITE)
            .border_radius(4.0)
            .shadow(Shadow::default());
        let mut canvas = Canvas::new(ApproxText);
        style.paint(Rect::new(0.0, 0.0, 10.0, 10.0), &mut canvas);

        let prims = &canvas.draw_list().primitives;
        assert_eq!(prims.len(), 3);
        assert!(matches!(prims[0], Primitive::RoundedRect { rect, .. } if rect.y == 2.0));
        assert!(matches!(prims[1], Primitive::RoundedRect { .. }));
        assert!(matches!(prims[2], Primitive::Border { .. }));
    }

    #[test]
    fn test_square_corners_use_plain_rect() {
        let style = BoxStyle::new().background(Color::BLACK);
        let mut canvas = Canvas::new(ApproxText);
        style.paint(Rect::new(0.0, 0.0, 10.0, 10.0), &mut canvas);
        assert!(matches!(canvas.draw_list().primitives[0], Primitive::Rect { .. }));
    }

    #[test]
    fn test_transparent_style_paints_nothing() {
        let mut canvas = Canvas::new(ApproxText);
        BoxStyle::new().paint(Rect::new(0.0, 0.0, 10.0, 10.0), &mut canvas);
        assert!(canvas.draw_list().primitives.is_empty());
    }
}
