//! Render primitives

use crate::core::context::Color;
use crate::core::geometry::{CornerRadius, Point, Rect};
use crate::render::{FontHandle, TextureHandle};

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        rect: Rect,
        color: Color,
    },
    RoundedRect {
        rect: Rect,
        radius: CornerRadius,
        color: Color,
    },
    Border {
        rect: Rect,
        radius: CornerRadius,
        color: Color,
        width: f32,
    },
    Gradient {
        rect: Rect,
        start: Color,
        end: Color,
        angle: f32,
    },
    Text {
        position: Point,
        text: String,
        font: FontHandle,
        size: f32,
        color: Color,
    },
    Image {
        rect: Rect,
        texture: TextureHandle,
        opacity: f32,
    },
}

/// Render command list for one frame, in paint order
#[derive(Debug, Default)]
pub struct DrawList {
    pub primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self { primitives: Vec::new() }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Text runs in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
