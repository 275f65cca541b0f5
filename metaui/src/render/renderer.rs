//! The renderer capability and a recording implementation of it

use std::collections::HashMap;

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Point, Rect, Size};
use crate::render::{DrawList, FontFace, ImageCache, Primitive, TextBackend};
use crate::style::{TextStyle, DEFAULT_FAMILY};

/// Opaque font reference returned by [`Renderer::load_font`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub(crate) u32);

/// Opaque texture reference returned by [`Renderer::load_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

/// Drawing surface the widget tree paints into.
///
/// Resource loading never fails from the widget's point of view: fonts fall
/// back along a search chain and images report `None` so the widget can draw
/// a placeholder.
pub trait Renderer {
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_rounded_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color);
    fn draw_border(&mut self, rect: Rect, radius: CornerRadius, color: Color, width: f32);
    fn draw_gradient(&mut self, rect: Rect, start: Color, end: Color, angle: f32);
    fn draw_text(&mut self, text: &str, position: Point, font: FontHandle, color: Color, style: &TextStyle);
    fn draw_image(&mut self, texture: TextureHandle, rect: Rect, opacity: f32);
    fn draw_image_scaled(&mut self, texture: TextureHandle, rect: Rect, preserve_aspect: bool, opacity: f32);

    fn load_font(&mut self, family: &str, size: f32) -> FontHandle {
        self.load_font_face(family, size, FontFace::REGULAR)
    }

    fn load_font_face(&mut self, family: &str, size: f32, face: FontFace) -> FontHandle;
    fn load_image(&mut self, path: &str) -> Option<TextureHandle>;
    fn texture_size(&self, texture: TextureHandle) -> Option<Size>;
    fn measure_text(&mut self, font: FontHandle, text: &str) -> Size;
}

#[derive(Debug, Clone)]
struct LoadedFont {
    family: String,
    size: f32,
    face: FontFace,
}

/// Renderer that records primitives into a [`DrawList`].
///
/// Fonts are cached by family, size and face, images by path. The caches
/// are never evicted.
pub struct Canvas<T: TextBackend> {
    list: DrawList,
    text: T,
    default_family: Option<String>,
    fonts: Vec<LoadedFont>,
    font_lookup: HashMap<(String, u32, FontFace), FontHandle>,
    images: ImageCache,
}

impl<T: TextBackend> Canvas<T> {
    pub fn new(text: T) -> Self {
        Self {
            list: DrawList::new(),
            text,
            default_family: None,
            fonts: Vec::new(),
            font_lookup: HashMap::new(),
            images: ImageCache::new(),
        }
    }

    /// Family that requests for the generic `sans-serif` resolve to
    pub fn default_family(mut self, family: impl Into<String>) -> Self {
        let family = family.into();
        self.default_family = (family != DEFAULT_FAMILY).then_some(family);
        self
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.list
    }

    pub fn images(&self) -> &ImageCache {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut ImageCache {
        &mut self.images
    }

    /// Drop the recorded primitives, keeping the resource caches
    pub fn begin_frame(&mut self) {
        self.list.clear();
    }

    /// Resolved family name of a loaded font
    pub fn font_family(&self, font: FontHandle) -> Option<&str> {
        self.fonts.get(font.0 as usize).map(|f| f.family.as_str())
    }

    pub fn font_face(&self, font: FontHandle) -> Option<FontFace> {
        self.fonts.get(font.0 as usize).map(|f| f.face)
    }
}

/// Largest rect with the texture's aspect ratio, centered in `rect`
pub fn fit_rect(rect: Rect, texture: Size) -> Rect {
    if texture.width <= 0.0 || texture.height <= 0.0 {
        return rect;
    }
    let scale = (rect.width / texture.width).min(rect.height / texture.height);
    let w = texture.width * scale;
    let h = texture.height * scale;
    Rect::new(rect.x + (rect.width - w) / 2.0, rect.y + (rect.height - h) / 2.0, w, h)
}

impl<T: TextBackend> Renderer for Canvas<T> {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.list.push(Primitive::Rect { rect, color });
    }

    fn draw_rounded_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        self.list.push(Primitive::RoundedRect { rect, radius, color });
    }

    fn draw_border(&mut self, rect: Rect, radius: CornerRadius, color: Color, width: f32) {
        self.list.push(Primitive::Border { rect, radius, color, width });
    }

    fn draw_gradient(&mut self, rect: Rect, start: Color, end: Color, angle: f32) {
        self.list.push(Primitive::Gradient { rect, start, end, angle });
    }

    fn draw_text(&mut self, text: &str, position: Point, font: FontHandle, color: Color, style: &TextStyle) {
        let size = self.fonts.get(font.0 as usize).map_or(style.font_size, |f| f.size);
        self.list.push(Primitive::Text {
            position,
            text: text.to_string(),
            font,
            size,
            color,
        });
    }

    fn draw_image(&mut self, texture: TextureHandle, rect: Rect, opacity: f32) {
        self.list.push(Primitive::Image { rect, texture, opacity });
    }

    fn draw_image_scaled(&mut self, texture: TextureHandle, rect: Rect, preserve_aspect: bool, opacity: f32) {
        let rect = match self.texture_size(texture) {
            Some(size) if preserve_aspect => fit_rect(rect, size),
            _ => rect,
        };
        self.draw_image(texture, rect, opacity);
    }

    fn load_font_face(&mut self, family: &str, size: f32, face: FontFace) -> FontHandle {
        let key = (family.to_string(), size.to_bits(), face);
        if let Some(handle) = self.font_lookup.get(&key) {
            return *handle;
        }
        let requested = match &self.default_family {
            Some(default) if family == DEFAULT_FAMILY => default.as_str(),
            _ => family,
        };
        let resolved = self.text.resolve_family(requested);
        let handle = FontHandle(self.fonts.len() as u32);
        tracing::debug!(requested, resolved = %resolved, size, bold = face.bold, italic = face.italic, "loaded font");
        self.fonts.push(LoadedFont { family: resolved, size, face });
        self.font_lookup.insert(key, handle);
        handle
    }

    fn load_image(&mut self, path: &str) -> Option<TextureHandle> {
        self.images.load(path)
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<Size> {
        self.images
            .get(texture)
            .map(|img| Size::new(img.width as f32, img.height as f32))
    }

    fn measure_text(&mut self, font: FontHandle, text: &str) -> Size {
        match self.fonts.get(font.0 as usize) {
            Some(f) => self.text.measure(&f.family, f.size, f.face, text),
            None => Size::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ApproxText;

    #[test]
    fn test_fonts_are_cached_by_family_and_size() {
        let mut canvas = Canvas::new(ApproxText);
        let a = canvas.load_font("sans-serif", 14.0);
        let b = canvas.load_font("sans-serif", 14.0);
        let c = canvas.load_font("sans-serif", 16.0);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let bold = canvas.load_font_face("sans-serif", 14.0, FontFace { bold: true, italic: false });
        assert_ne!(a, bold);
        assert_eq!(canvas.font_face(bold), Some(FontFace { bold: true, italic: false }));
        assert_eq!(canvas.font_face(a), Some(FontFace::REGULAR));
    }

    #[test]
    fn test_default_family_replaces_generic_sans() {
        let mut canvas = Canvas::new(ApproxText).default_family("Inter");
        let sans = canvas.load_font("sans-serif", 14.0);
        let mono = canvas.load_font("monospace", 14.0);
        assert_eq!(canvas.font_family(sans), Some("Inter"));
        assert_eq!(canvas.font_family(mono), Some("monospace"));

        let mut canvas = Canvas::new(ApproxText).default_family("sans-serif");
        let sans = canvas.load_font("sans-serif", 14.0);
        assert_eq!(canvas.font_family(sans), Some("sans-serif"));
    }

    #[test]
    fn test_measure_uses_font_size() {
        let mut canvas = Canvas::new(ApproxText);
        let font = canvas.load_font("sans-serif", 10.0);
        let size = canvas.measure_text(font, "abcd");
        assert!((size.width - 24.0).abs() < 1e-4);
        assert!((size.height - 14.0).abs() < 1e-4);
    }

    #[test]
    fn test_fit_rect_preserves_aspect() {
        let r = fit_rect(Rect::new(0.0, 0.0, 200.0, 100.0), Size::new(50.0, 50.0));
        assert_eq!(r, Rect::new(50.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_missing_image_yields_none() {
        let mut canvas = Canvas::new(ApproxText);
        assert!(canvas.load_image("/definitely/not/here.png").is_none());
    }
}
