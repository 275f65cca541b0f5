//! Button widget

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Padding, Size};
use crate::core::{Children, EventCtx, MouseEvent, Widget, WidgetBase};
use crate::render::Renderer;
use crate::style::{TextAlign, TextStyle};
use crate::widgets::text::aligned_origin;

pub const BUTTON_IDLE: Color = Color::from_hex(0x3b82f6ff);
pub const BUTTON_HOVER: Color = Color::from_hex(0x2563ebff);
pub const BUTTON_ACTIVE: Color = Color::from_hex(0x1d4ed8ff);

/// Standard button widget
///
/// `pressed` mirrors the last button event: it is set by a press inside the
/// bounds and cleared by the next button event of any kind.
pub struct Button {
    base: WidgetBase,
    label: String,
    text: TextStyle,
    hover_color: Color,
    active_color: Color,
    pressed: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        let mut base = WidgetBase::new();
        base.style.padding = Padding::only(10.0, 20.0, 10.0, 20.0);
        base.style.border_radius = CornerRadius::all(4.0);
        base.style.background = BUTTON_IDLE;
        Self {
            base,
            label: label.into(),
            text: TextStyle {
                color: Color::WHITE,
                align: TextAlign::Center,
                ..TextStyle::default()
            },
            hover_color: BUTTON_HOVER,
            active_color: BUTTON_ACTIVE,
            pressed: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text.color = color;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.text.font_size = size;
        self
    }

    pub fn hover_color(mut self, color: Color) -> Self {
        self.hover_color = color;
        self
    }

    pub fn active_color(mut self, color: Color) -> Self {
        self.active_color = color;
        self
    }

    pub fn label_text(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Background for the current interaction state
    pub fn current_background(&self) -> Color {
        if self.pressed {
            self.active_color
        } else if self.base.hovered() {
            self.hover_color
        } else {
            self.base.style.background
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new("")
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        Size::new(self.text.approx_width(&self.label), self.text.font_size * 1.4)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let style = self.base.style.clone().background(self.current_background());
        style.paint(self.base.bounds(), renderer);

        let font = renderer.load_font_face(&self.text.font_family, self.text.font_size, self.text.face());
        let size = renderer.measure_text(font, &self.label);
        let origin = aligned_origin(self.base.content_bounds(), size, self.text.align, self.text.valign);
        renderer.draw_text(&self.label, origin, font, self.text.color, &self.text);
    }

    fn handle_mouse_button(&mut self, event: &MouseEvent, ctx: &mut EventCtx) -> bool {
        self.pressed = event.pressed && self.base.bounds().contains(event.position);
        self.base.click(event, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::{MessageKind, WidgetTree};
    use crate::render::{ApproxText, Canvas, Primitive};

    fn laid_out() -> (WidgetTree, crate::core::WidgetId) {
        let mut tree = WidgetTree::new();
        let id = tree.set_root(Button::new("OK"));
        tree.frame(Size::new(300.0, 300.0), &mut Canvas::new(ApproxText));
        (tree, id)
    }

    #[test]
    fn test_default_height() {
        let (tree, id) = laid_out();
        let size = tree.base(id).unwrap().measured_size();
        assert!((size.height - 39.6).abs() < 1e-4);
        assert!((size.width - (2.0 * 14.0 * 0.6 + 40.0)).abs() < 1e-4);
    }

    #[test]
    fn test_background_precedence() {
        let (mut tree, id) = laid_out();
        let inside = Point::new(5.0, 5.0);
        assert_eq!(tree.get::<Button>(id).unwrap().current_background(), BUTTON_IDLE);

        tree.handle_mouse_move(&MouseEvent::moved(inside));
        assert_eq!(tree.get::<Button>(id).unwrap().current_background(), BUTTON_HOVER);

        tree.handle_mouse_button(&MouseEvent::press(inside));
        assert_eq!(tree.get::<Button>(id).unwrap().current_background(), BUTTON_ACTIVE);
    }

    #[test]
    fn test_pressed_survives_drag_off_until_next_button_event() {
        let (mut tree, id) = laid_out();
        tree.handle_mouse_button(&MouseEvent::press(Point::new(5.0, 5.0)));
        tree.handle_mouse_move(&MouseEvent::moved(Point::new(350.0, 350.0)));
        assert!(tree.get::<Button>(id).unwrap().is_pressed());

        tree.handle_mouse_button(&MouseEvent::release(Point::new(350.0, 350.0)));
        assert!(!tree.get::<Button>(id).unwrap().is_pressed());
    }

    #[test]
    fn test_press_emits_clicked() {
        let (mut tree, id) = laid_out();
        assert!(tree.handle_mouse_button(&MouseEvent::press(Point::new(5.0, 5.0))));
        let msgs = tree.drain_messages();
        assert!(msgs.iter().any(|m| m.source == id && m.kind == MessageKind::Clicked));
    }

    #[test]
    fn test_render_does_not_mutate_style() {
        let (mut tree, id) = laid_out();
        tree.handle_mouse_button(&MouseEvent::press(Point::new(5.0, 5.0)));
        let mut canvas = Canvas::new(ApproxText);
        tree.render(&mut canvas);
        assert!(matches!(
            canvas.draw_list().primitives[0],
            Primitive::RoundedRect { color, .. } if color == BUTTON_ACTIVE
        ));
        assert_eq!(tree.base(id).unwrap().style.background, BUTTON_IDLE);
        assert_eq!(canvas.draw_list().texts().collect::<Vec<_>>(), vec!["OK"]);
    }
}
