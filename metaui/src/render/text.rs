//! Text measurement backends

use std::collections::HashMap;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};

use crate::core::geometry::Size;

/// Families tried after the requested one and any configured fallbacks
pub const DEFAULT_FALLBACKS: [&str; 3] = ["DejaVu Sans", "Liberation Sans", "Noto Sans"];

const GENERIC_FAMILIES: [&str; 3] = ["sans-serif", "serif", "monospace"];

/// Weight and slant of a loaded font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontFace {
    pub bold: bool,
    pub italic: bool,
}

impl FontFace {
    pub const REGULAR: FontFace = FontFace { bold: false, italic: false };

    fn attrs(self, family: &str) -> Attrs<'_> {
        let mut attrs = Attrs::new().family(family_of(family));
        if self.bold {
            attrs = attrs.weight(Weight::BOLD);
        }
        if self.italic {
            attrs = attrs.style(Style::Italic);
        }
        attrs
    }
}

/// Font resolution and text measurement used by [`crate::render::Canvas`]
pub trait TextBackend {
    /// Map a requested family to one that is actually available. Never fails;
    /// the last resort is the generic `sans-serif` family.
    fn resolve_family(&mut self, family: &str) -> String;

    fn measure(&mut self, family: &str, size: f32, face: FontFace, text: &str) -> Size;
}

/// Fixed-advance metrics: 0.6 em per character, 1.4 em per line.
///
/// Deterministic and font-free, which is what the measure pass and the
/// tests rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxText;

impl TextBackend for ApproxText {
    fn resolve_family(&mut self, family: &str) -> String {
        family.to_string()
    }

    fn measure(&mut self, _family: &str, size: f32, _face: FontFace, text: &str) -> Size {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Size::new(widest as f32 * size * 0.6, lines as f32 * size * 1.4)
    }
}

/// Shaped measurement through cosmic-text, with family lookup against the
/// system font database
pub struct CosmicText {
    font_system: FontSystem,
    db: fontdb::Database,
    fallbacks: Vec<String>,
    resolved: HashMap<String, String>,
}

impl CosmicText {
    pub fn new() -> Self {
        Self::with_fallbacks(Vec::new())
    }

    /// `fallbacks` are tried, in order, before the built-in list
    pub fn with_fallbacks(fallbacks: Vec<String>) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "font database loaded");
        Self {
            font_system: FontSystem::new(),
            db,
            fallbacks,
            resolved: HashMap::new(),
        }
    }

    fn has_family(&self, name: &str) -> bool {
        if GENERIC_FAMILIES.contains(&name) {
            return true;
        }
        let families = [fontdb::Family::Name(name)];
        let query = fontdb::Query {
            families: &families,
            ..Default::default()
        };
        self.db.query(&query).is_some()
    }
}

impl Default for CosmicText {
    fn default() -> Self {
        Self::new()
    }
}

fn family_of(name: &str) -> Family<'_> {
    match name {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        other => Family::Name(other),
    }
}

impl TextBackend for CosmicText {
    fn resolve_family(&mut self, family: &str) -> String {
        if let Some(name) = self.resolved.get(family) {
            return name.clone();
        }

        let chain = std::iter::once(family)
            .chain(self.fallbacks.iter().map(String::as_str))
            .chain(DEFAULT_FALLBACKS);
        let mut found = None;
        for candidate in chain {
            if self.has_family(candidate) {
                found = Some(candidate.to_string());
                break;
            }
        }

        let name = found.unwrap_or_else(|| {
            tracing::warn!(family, "no matching font found, using sans-serif");
            "sans-serif".to_string()
        });
        if name != family {
            tracing::info!(requested = family, using = %name, "font fallback");
        }
        self.resolved.insert(family.to_string(), name.clone());
        name
    }

    fn measure(&mut self, family: &str, size: f32, face: FontFace, text: &str) -> Size {
        if text.is_empty() {
            return Size::new(0.0, size);
        }
        let metrics = Metrics::new(size, size * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        let attrs = face.attrs(family);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut width = 0.0f32;
        let mut lines = 0usize;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            lines += 1;
        }
        Size::new(width, lines.max(1) as f32 * metrics.line_height)
    }
}
