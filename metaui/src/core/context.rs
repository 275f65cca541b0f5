//! Colors, themes and the context handed to widgets during event dispatch

use crate::core::{Message, MessageKind, WidgetId};

/// Messages and focus requests collected while an event travels the tree
#[derive(Debug, Default)]
pub(crate) struct Outbox {
    pub messages: Vec<Message>,
    pub focus_request: Option<WidgetId>,
}

/// Context passed to a widget while it handles an input event
pub struct EventCtx<'a> {
    id: WidgetId,
    outbox: &'a mut Outbox,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(id: WidgetId, outbox: &'a mut Outbox) -> Self {
        Self { id, outbox }
    }

    /// Id of the widget currently handling the event
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Queue a message from the current widget for the host
    pub fn emit(&mut self, kind: MessageKind) {
        self.outbox.messages.push(Message { source: self.id, kind });
    }

    /// Ask the tree to move keyboard focus to the current widget once the
    /// dispatch completes
    pub fn request_focus(&mut self) {
        self.outbox.focus_request = Some(self.id);
    }
}

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Parse a packed `0xRRGGBBAA` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 24) & 0xff) as f32 / 255.0,
            g: ((hex >> 16) & 0xff) as f32 / 255.0,
            b: ((hex >> 8) & 0xff) as f32 / 255.0,
            a: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl Theme {
    /// Catppuccin Mocha
    pub fn dark() -> Self {
        Self {
            background: Color::from_hex(0x1e1e2eff),
            surface: Color::from_hex(0x313244ff),
            primary: Color::from_hex(0x89b4faff),
            secondary: Color::from_hex(0xcba6f7ff),
            text: Color::from_hex(0xcdd6f4ff),
            text_muted: Color::from_hex(0x6c7086ff),
            border: Color::from_hex(0x45475aff),
            success: Color::from_hex(0xa6e3a1ff),
            warning: Color::from_hex(0xf9e2afff),
            error: Color::from_hex(0xf38ba8ff),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            surface: Color::new(0.98, 0.98, 0.98, 1.0),
            primary: Color::from_hex(0x3b82f6ff),
            secondary: Color::from_hex(0x8b5cf6ff),
            text: Color::new(0.11, 0.13, 0.18, 1.0),
            text_muted: Color::new(0.46, 0.51, 0.58, 1.0),
            border: Color::new(0.89, 0.90, 0.93, 1.0),
            success: Color::from_hex(0x10b981ff),
            warning: Color::from_hex(0xf59e0bff),
            error: Color::from_hex(0xef4444ff),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
