//! Curtain - asset-loading splash screen over a pluggable render surface.
//!
//! A caller hands [`load`] a [`LoadRequest`]: named resource groups, each
//! loaded by the registered [`ResourceLoader`] for its kind. Groups are
//! processed in request order; resources within a group load concurrently.
//! While the session runs, a splash screen with a logo and progress bar is
//! rendered through the host's [`RenderSurface`]; on success it fades out,
//! tears itself down, and the `on_load` callback fires.

mod defaults;
pub mod error;

pub mod config;
pub mod loader;
pub mod orchestrator;
pub mod progress;
pub mod screen;
pub mod surface;

pub use error::{Error, Result};

pub use config::{ConfigError, LoadRequest, ResourceGroup, ResourceSpec, SessionCallback};
pub use defaults::{SCRIPTS_KIND, STYLESHEETS_KIND};
pub use loader::{LoaderError, LoaderRegistry, ResourceLoader, ScriptLoader, StylesheetLoader};
pub use orchestrator::{
    LoadSession, Orchestrator, ResourceLoadError, SessionAbortError, SessionOutcome,
};
pub use progress::{ProgressFraction, ProgressTracker};
pub use screen::{LoadScreen, ScreenError, ScreenPhase};
pub use surface::{NodeId, RenderSurface, StyleProperty, SurfaceError};

use std::sync::Arc;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Loads every group in `request` behind a splash screen on `surface`.
///
/// Convenience for `Orchestrator::new(surface).run(request)`.
pub async fn load(surface: Arc<dyn RenderSurface>, request: LoadRequest) -> Result<()> {
    Orchestrator::new(surface).run(request).await
}
