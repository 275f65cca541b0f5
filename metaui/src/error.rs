//! Error types for MetaUI

use std::path::PathBuf;

use thiserror::Error;

use crate::core::WidgetId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("widget {0:?} no longer exists")]
    StaleWidget(WidgetId),

    #[error("widget {0:?} does not accept children")]
    NotAContainer(WidgetId),

    #[error("the widget tree has no root")]
    NoRoot,

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[cfg(feature = "desktop")]
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[cfg(feature = "desktop")]
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[cfg(feature = "desktop")]
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[cfg(feature = "desktop")]
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[cfg(feature = "desktop")]
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub type Result<T> = std::result::Result<T, Error>;
