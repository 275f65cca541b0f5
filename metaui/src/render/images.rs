//! Decoded image storage keyed by path

use std::collections::HashMap;

use crate::render::TextureHandle;

/// RGBA8 pixels of a decoded image
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Image cache. Failed loads are remembered as well, so a broken path is
/// only decoded (and logged) once.
#[derive(Debug, Default)]
pub struct ImageCache {
    by_path: HashMap<String, Option<TextureHandle>>,
    images: Vec<Option<ImageData>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &str) -> Option<TextureHandle> {
        if let Some(cached) = self.by_path.get(path) {
            return *cached;
        }
        let handle = match image::open(path) {
            Ok(img) => Some(self.insert(img)),
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to load image");
                None
            }
        };
        self.by_path.insert(path.to_string(), handle);
        handle
    }

    /// Decode an in-memory encoded image and register it under `key`
    pub fn load_bytes(&mut self, key: &str, bytes: &[u8]) -> Option<TextureHandle> {
        if let Some(cached) = self.by_path.get(key) {
            return *cached;
        }
        let handle = match image::load_from_memory(bytes) {
            Ok(img) => Some(self.insert(img)),
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to decode image");
                None
            }
        };
        self.by_path.insert(key.to_string(), handle);
        handle
    }

    fn insert(&mut self, img: image::DynamicImage) -> TextureHandle {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let handle = TextureHandle(self.images.len() as u32);
        self.images.push(Some(ImageData {
            width,
            height,
            pixels: rgba.into_raw(),
        }));
        handle
    }

    pub fn get(&self, handle: TextureHandle) -> Option<&ImageData> {
        self.images.get(handle.0 as usize).and_then(Option::as_ref)
    }

    /// Forget a path; its handle stops resolving
    pub fn unload(&mut self, path: &str) {
        if let Some(Some(handle)) = self.by_path.remove(path) {
            if let Some(slot) = self.images.get_mut(handle.0 as usize) {
                *slot = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::new(w, h);
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn test_decode_from_memory() {
        let mut cache = ImageCache::new();
        let handle = cache.load_bytes("logo", &png_bytes(4, 2)).unwrap();
        let data = cache.get(handle).unwrap();
        assert_eq!((data.width, data.height), (4, 2));
        assert_eq!(data.pixels.len(), 4 * 2 * 4);
    }

    #[test]
    fn test_failures_are_cached() {
        let mut cache = ImageCache::new();
        assert!(cache.load_bytes("junk", b"not an image").is_none());
        assert!(cache.by_path.contains_key("junk"));
        assert!(cache.load("/nope/missing.png").is_none());
    }

    #[test]
    fn test_unload_invalidates_handle() {
        let mut cache = ImageCache::new();
        let handle = cache.load_bytes("a", &png_bytes(1, 1)).unwrap();
        cache.unload("a");
        assert!(cache.get(handle).is_none());
    }
}
