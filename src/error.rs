use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::world::MapError;

/// Anything that stops the program before or while opening the window
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid map: {0}")]
    Map(#[from] MapError),
    #[error("failed to read map {path}: {source}")]
    ReadMap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("display surface failed: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),
}

pub type Result<T> = std::result::Result<T, AppError>;
