//! Error types for Curtain.

use thiserror::Error;

/// Curtain error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The load request was invalid before any loading began
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A resource failed and the session aborted
    #[error("{0}")]
    Aborted(#[from] crate::orchestrator::SessionAbortError),

    /// Screen state machine error
    #[error("Screen error: {0}")]
    Screen(#[from] crate::screen::ScreenError),

    /// Render surface error
    #[error("Surface error: {0}")]
    Surface(#[from] crate::surface::SurfaceError),
}

/// Result type alias for Curtain operations.
pub type Result<T> = std::result::Result<T, Error>;
