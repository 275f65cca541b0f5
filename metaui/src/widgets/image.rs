//! Image widgets

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Rect, Size};
use crate::core::{Children, Widget, WidgetBase};
use crate::layout::SizeSpec;
use crate::render::Renderer;

const EMPTY_PLACEHOLDER: Color = Color::new(0.3, 0.3, 0.3, 0.5);
const ERROR_PLACEHOLDER: Color = Color::new(0.5, 0.2, 0.2, 0.5);
const DEFAULT_SIZE: Size = Size::new(100.0, 100.0);

/// Image loaded through the renderer by path.
///
/// The texture is loaded in the prepare step before measuring. Until a load
/// succeeds the widget measures 100x100; afterwards it measures at the
/// texture's natural size. An empty path and a failed load draw different
/// placeholders.
pub struct Image {
    base: WidgetBase,
    path: String,
    preserve_aspect: bool,
    opacity: f32,
    natural: Option<Size>,
}

impl Image {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            path: path.into(),
            preserve_aspect: true,
            opacity: 1.0,
            natural: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.set_path(path);
        self
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.natural = None;
    }

    pub fn preserve_aspect(mut self, preserve: bool) -> Self {
        self.preserve_aspect = preserve;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn image_path(&self) -> &str {
        &self.path
    }

    /// Texture size once the image has loaded
    pub fn natural_size(&self) -> Option<Size> {
        self.natural
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new("")
    }
}

impl Widget for Image {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn prepare(&mut self, renderer: &mut dyn Renderer) {
        if self.natural.is_some() || self.path.is_empty() {
            return;
        }
        if let Some(texture) = renderer.load_image(&self.path) {
            self.natural = renderer.texture_size(texture);
        }
    }

    fn measure_content(&mut self, _available: Size, _children: &mut Children<'_>) -> Size {
        self.natural.unwrap_or(DEFAULT_SIZE)
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.base.paint(renderer);
        let content = self.base.content_bounds();

        if self.path.is_empty() {
            renderer.draw_rect(content, EMPTY_PLACEHOLDER);
            return;
        }
        let Some(texture) = renderer.load_image(&self.path) else {
            renderer.draw_rect(content, ERROR_PLACEHOLDER);
            return;
        };
        if self.preserve_aspect {
            renderer.draw_image_scaled(texture, content, true, self.opacity);
        } else {
            renderer.draw_image(texture, content, self.opacity);
        }
    }
}

/// Fixed-size square glyph placeholder, drawn as a filled circle
pub struct Icon {
    base: WidgetBase,
    name: String,
    color: Color,
}

impl Icon {
    pub fn new(name: impl Into<String>, size: f32) -> Self {
        Self {
            base: WidgetBase::sized(SizeSpec::fixed(size), SizeSpec::fixed(size)),
            name: name.into(),
            color: Color::WHITE,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn icon_size(mut self, size: f32) -> Self {
        self.base.width = SizeSpec::fixed(size);
        self.base.height = SizeSpec::fixed(size);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Widget for Icon {
    fn base(&self) -> &WidgetBase { &self.base }
    fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }

    fn render(&self, renderer: &mut dyn Renderer) {
        self.base.paint(renderer);
        let content = self.base.content_bounds();
        let c = content.center();
        let r = (content.width.min(content.height) / 2.0 - 2.0).max(0.0);
        renderer.draw_rounded_rect(
            Rect::new(c.x - r, c.y - r, r * 2.0, r * 2.0),
            CornerRadius::all(r),
            self.color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WidgetTree;
    use crate::render::{ApproxText, Canvas, Primitive};
    use crate::widgets::BoxLayout;

    fn png(w: u32, h: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        ::image::RgbaImage::new(w, h)
            .write_to(&mut std::io::Cursor::new(&mut buf), ::image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn first_rect_color(canvas: &Canvas<ApproxText>) -> Option<Color> {
        canvas.draw_list().primitives.iter().find_map(|p| match p {
            Primitive::Rect { color, .. } => Some(*color),
            _ => None,
        })
    }

    #[test]
    fn test_empty_and_missing_placeholders_differ() {
        let mut tree = WidgetTree::new();
        tree.set_root(Image::new(""));
        let mut canvas = Canvas::new(ApproxText);
        tree.frame(Size::new(200.0, 200.0), &mut canvas);
        assert_eq!(first_rect_color(&canvas), Some(EMPTY_PLACEHOLDER));

        let mut tree = WidgetTree::new();
        tree.set_root(Image::new("/no/such/image.png"));
        let mut canvas = Canvas::new(ApproxText);
        tree.frame(Size::new(200.0, 200.0), &mut canvas);
        assert_eq!(first_rect_color(&canvas), Some(ERROR_PLACEHOLDER));
    }

    #[test]
    fn test_natural_size_learned_before_measure() {
        let mut canvas = Canvas::new(ApproxText);
        canvas.images_mut().load_bytes("logo.png", &png(40, 20));

        let mut tree = WidgetTree::new();
        let id = tree.set_root(Image::new("logo.png"));
        assert_eq!(tree.measure(Size::new(500.0, 500.0)), DEFAULT_SIZE);

        tree.prepare(&mut canvas);
        assert_eq!(tree.get::<Image>(id).unwrap().natural_size(), Some(Size::new(40.0, 20.0)));
        assert_eq!(tree.measure(Size::new(500.0, 500.0)), Size::new(40.0, 20.0));
    }

    #[test]
    fn test_first_frame_draws_at_natural_size() {
        let mut canvas = Canvas::new(ApproxText);
        canvas.images_mut().load_bytes("logo.png", &png(40, 20));

        let mut tree = WidgetTree::new();
        let root = tree.set_root(BoxLayout::column());
        tree.add_child(root, Image::new("logo.png")).unwrap();
        tree.frame(Size::new(500.0, 500.0), &mut canvas);

        let rect = canvas.draw_list().primitives.iter().find_map(|p| match p {
            Primitive::Image { rect, .. } => Some(*rect),
            _ => None,
        });
        assert_eq!(rect, Some(Rect::new(0.0, 0.0, 40.0, 20.0)));
    }

    #[test]
    fn test_render_does_not_change_measurement() {
        let mut canvas = Canvas::new(ApproxText);
        canvas.images_mut().load_bytes("logo.png", &png(40, 20));

        let mut tree = WidgetTree::new();
        let id = tree.set_root(Image::new("logo.png"));
        tree.measure(Size::new(500.0, 500.0));
        tree.layout(Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.render(&mut canvas);
        assert_eq!(tree.get::<Image>(id).unwrap().natural_size(), None);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let img = Image::new("x.png").opacity(3.0);
        assert_eq!(img.opacity, 1.0);
    }

    #[test]
    fn test_icon_is_fixed_square() {
        let mut tree = WidgetTree::new();
        tree.set_root(Icon::new("star", 24.0));
        assert_eq!(tree.measure(Size::new(500.0, 500.0)), Size::new(24.0, 24.0));
    }
}
