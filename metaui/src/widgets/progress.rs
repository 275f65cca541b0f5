//! Progress indicators

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Point, Rect, Size};
use crate::core::{Children, Widget, WidgetBase};
use crate::render::Renderer;
use crate::style::TextStyle;

/// Linear progress bar
pub struct ProgressBar {
    base: WidgetBase,
    progress: f32, // 0.0 to 1.0
    fill_color: Color,
    show_label: bool,
}

impl ProgressBar {
    pub fn new(progress: f32) -> Self {
        let mut base = WidgetBase::new();
        base.style.background = Color::gray(0.2);
        base.style.border_radius = CornerRadius::all(3.0);
        Self {
            base,
            progress: progress.clamp(0.0, 1.0),
            fill_color: Color::from_hex(0x3b82f6ff),
            show_label: false,
        }
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.set_progress(progress);
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Draw a percentage label when the bar is at least 14px tall
    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    pub fn get_progress(&self) -> f32 {
        self.progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Widget for ProgressBar {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        Size::new(200.0, 10.0)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.base.paint(renderer);
        let content = self.base.content_bounds();
        let fill = Rect::new(content.x, content.y, self.progress * content.width, content.height);
        renderer.draw_rounded_rect(fill, self.base.style.border_radius, self.fill_color);

        if self.show_label && content.height >= 14.0 {
            let label = format!("{}%", (self.progress * 100.0) as i32);
            let style = TextStyle { font_size: 10.0, ..TextStyle::default() };
            let font = renderer.load_font_face(&style.font_family, style.font_size, style.face());
            let size = renderer.measure_text(font, &label);
            let pos = Point::new(
                content.x + (content.width - size.width) / 2.0,
                content.y + (content.height - size.height) / 2.0,
            );
            renderer.draw_text(&label, pos, font, Color::WHITE, &style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{WidgetExt, WidgetTree};
    use crate::render::{ApproxText, Canvas, Primitive};

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(ProgressBar::new(1.5).get_progress(), 1.0);
        let mut bar = ProgressBar::default();
        bar.set_progress(-0.2);
        assert_eq!(bar.get_progress(), 0.0);
    }

    #[test]
    fn test_fill_width_and_label() {
        let mut tree = WidgetTree::new();
        tree.set_root(ProgressBar::new(0.25).show_label(true).height(20.0));
        let mut canvas = Canvas::new(ApproxText);
        let size = tree.measure(Size::new(500.0, 500.0));
        tree.layout(Rect::new(0.0, 0.0, size.width, size.height));
        tree.render(&mut canvas);

        let prims = &canvas.draw_list().primitives;
        assert!(matches!(prims[1], Primitive::RoundedRect { rect, .. } if rect.width == 50.0));
        assert_eq!(canvas.draw_list().texts().collect::<Vec<_>>(), vec!["25%"]);
    }

    #[test]
    fn test_short_bar_has_no_label() {
        let mut tree = WidgetTree::new();
        tree.set_root(ProgressBar::new(0.5).show_label(true));
        let mut canvas = Canvas::new(ApproxText);
        tree.frame(Size::new(200.0, 10.0), &mut canvas);
        assert_eq!(canvas.draw_list().texts().count(), 0);
    }
}
