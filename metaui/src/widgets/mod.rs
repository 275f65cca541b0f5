//! Built-in widgets

mod container;
mod scroll;
mod text;
mod button;
mod input;
mod image;
mod progress;

pub use container::*;
pub use scroll::*;
pub use text::*;
pub use button::*;
pub use input::*;
pub use self::image::*;
pub use progress::*;
