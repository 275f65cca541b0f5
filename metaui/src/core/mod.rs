//! Core types and traits for MetaUI

pub mod geometry;
pub mod context;
mod events;
mod widget;
mod tree;

pub use geometry::*;
pub use context::{Color, EventCtx, Theme};
pub use events::*;
pub use widget::*;
pub use tree::*;
