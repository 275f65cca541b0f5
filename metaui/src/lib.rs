//! MetaUI - retained-mode widget toolkit
//!
//! Widgets live in a [`WidgetTree`] arena. Each frame the tree is measured
//! bottom-up, laid out top-down and painted into a [`Renderer`]; input is
//! routed back through the same tree and surfaces as [`Message`]s that the
//! host turns into deferred [`Commands`].

pub mod core;
pub mod layout;
pub mod style;
pub mod render;
pub mod widgets;
pub mod animation;
pub mod app;
pub mod error;

pub use crate::core::{
    Children, Color, Commands, CornerRadius, EventCtx, InputEvent, Key, KeyEvent, Message,
    MessageKind, Modifiers, MouseButton, MouseEvent, Padding, Point, Rect, ScrollEvent, Size,
    Theme, TreeCommand, Widget, WidgetBase, WidgetExt, WidgetId, WidgetTree,
};
pub use app::{App, AppConfig, FontConfig, ThemeKind, WindowConfig};
pub use error::{Error, Result};
pub use layout::*;
pub use render::{ApproxText, Canvas, CosmicText, DrawList, FontFace, Primitive, Renderer, TextBackend};
pub use style::*;
pub use widgets::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::animation::{Easing, Tween};
    pub use crate::app::{App, AppConfig};
    pub use crate::core::{
        Color, Commands, Message, MessageKind, Padding, Point, Rect, Size, Theme, Widget,
        WidgetExt, WidgetId, WidgetTree,
    };
    pub use crate::layout::{Alignment, Direction, SizeSpec};
    pub use crate::style::*;
    pub use crate::widgets::*;
}
