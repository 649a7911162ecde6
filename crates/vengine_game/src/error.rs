//! Startup failures. Every variant is fatal: `main` reports it on stderr and
//! exits with status 1. Nothing at runtime produces a `GameError`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("Failed to create window: {0}")]
    Window(String),

    #[error("GPU initialization failed: {0}")]
    Gpu(String),

    #[error("Failed to load asset '{}': {source}", .path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load texture: {0}")]
    Texture(String),

    #[error("Audio initialization failed: {0}")]
    Audio(String),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
