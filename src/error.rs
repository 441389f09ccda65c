//! Error types
//!
//! Asset errors are recoverable: loaders log them and carry on without the
//! asset. Platform errors are fatal and end the process.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a single asset from disk
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid font file {}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
    #[error("failed to decode audio {}", path.display())]
    Audio {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

impl AssetError {
    /// Path of the asset that failed
    pub fn path(&self) -> &std::path::Path {
        match self {
            AssetError::Io { path, .. }
            | AssetError::Image { path, .. }
            | AssetError::Font { path, .. }
            | AssetError::Audio { path, .. } => path,
        }
    }

    /// Log this failure with its cause; the game carries on without the asset
    pub fn log(&self) {
        match std::error::Error::source(self) {
            Some(cause) => log::error!("{self}: {cause}"),
            None => log::error!("{self}"),
        }
    }
}

/// Window, event loop and GPU setup errors
#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("event loop creation failed")]
    EventLoopCreation(#[source] winit::error::EventLoopError),
    #[error("event loop error")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
    #[error("window creation failed")]
    Window(#[from] winit::error::OsError),
    #[error("surface creation failed")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("GPU device request failed")]
    Device(#[from] wgpu::RequestDeviceError),
}
