//! Application configuration loaded from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Theme;
use crate::error::{Error, Result};
use crate::style::DEFAULT_FAMILY;

/// Top-level application configuration. Every field is optional in the
/// JSON source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub theme: ThemeKind,

    #[serde(default)]
    pub fonts: FontConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_true")]
    pub resizable: bool,

    #[serde(default = "default_true")]
    pub decorations: bool,
}

fn default_title() -> String { "MetaUI".to_string() }
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_true() -> bool { true }

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            resizable: true,
            decorations: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    pub fn theme(self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Font family used for new text plus the extra families tried before the
/// built-in fallback chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    #[serde(default = "default_family")]
    pub family: String,

    #[serde(default)]
    pub fallbacks: Vec<String>,
}

fn default_family() -> String { DEFAULT_FAMILY.to_string() }

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: default_family(),
            fallbacks: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&source)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Window title and size as the config for a quick start
    pub fn window(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            window: WindowConfig {
                title: title.into(),
                width,
                height,
                ..WindowConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window.width, 800);
        assert!(config.window.resizable);
        assert_eq!(config.theme, ThemeKind::Dark);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(
            r#"{"window": {"title": "Demo", "height": 400}, "theme": "light",
                "fonts": {"fallbacks": ["Inter"]}}"#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 400);
        assert_eq!(config.theme, ThemeKind::Light);
        assert_eq!(config.fonts.family, "sans-serif");
        assert_eq!(config.fonts.fallbacks, vec!["Inter".to_string()]);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(AppConfig::from_json("{"), Err(Error::ConfigParse(_))));
        assert!(matches!(
            AppConfig::from_json(r#"{"theme": "sepia"}"#),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::ConfigIo { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("metaui-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"window": {"width": 500}}"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.window.width, 500);
    }
}
