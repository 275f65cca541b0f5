//! Renderer capability consumed by widgets, plus the recording canvas that
//! implements it

mod renderer;
mod primitives;
mod text;
mod images;
#[cfg(feature = "desktop")]
mod gpu;

pub use renderer::*;
pub use primitives::*;
pub use text::*;
pub use images::*;
#[cfg(feature = "desktop")]
pub use gpu::*;
