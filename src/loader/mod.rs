//! Pluggable resource loaders.
//!
//! Every resource kind resolves to one [`ResourceLoader`] through the
//! [`LoaderRegistry`]. The registry is seeded with loaders for the two
//! conventional kinds and accepts caller overrides, which win by name.

mod builtin;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{ConfigError, ResourceGroup, ResourceSpec};
use crate::defaults::{SCRIPTS_KIND, STYLESHEETS_KIND};
use crate::surface::{RenderSurface, SurfaceError};

pub use builtin::{ScriptLoader, StylesheetLoader};

/// Failure value produced by a resource loader.
///
/// The contents are implementation-defined; the orchestrator only carries
/// the value through to the session error.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct LoaderError {
    message: String,
}

impl LoaderError {
    /// Creates a loader error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SurfaceError> for LoaderError {
    fn from(err: SurfaceError) -> Self {
        Self::new(err.to_string())
    }
}

/// Asynchronously loads one resource of a kind.
///
/// Implementations resolve with the spec's locator on success. Loads of one
/// group run concurrently, so implementations must tolerate overlapping
/// calls through `&self`.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    async fn load(&self, spec: &ResourceSpec) -> Result<String, LoaderError>;
}

/// Maps kind names to their loaders.
pub struct LoaderRegistry {
    entries: HashMap<String, Arc<dyn ResourceLoader>>,
}

impl LoaderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a registry seeded with the built-in `"scripts"` and
    /// `"stylesheets"` loaders bound to the given surface.
    pub fn with_defaults(surface: Arc<dyn RenderSurface>) -> Self {
        let mut registry = Self::new();
        registry.insert(
            SCRIPTS_KIND,
            Arc::new(ScriptLoader::new(Arc::clone(&surface))) as Arc<dyn ResourceLoader>,
        );
        registry.insert(
            STYLESHEETS_KIND,
            Arc::new(StylesheetLoader::new(surface)) as Arc<dyn ResourceLoader>,
        );
        registry
    }

    /// Registers a loader for a kind, replacing any previous entry.
    pub fn insert(&mut self, kind: impl Into<String>, loader: Arc<dyn ResourceLoader>) {
        self.entries.insert(kind.into(), loader);
    }

    /// Looks up the loader for a kind.
    pub fn get(&self, kind: &str) -> Option<Arc<dyn ResourceLoader>> {
        self.entries.get(kind).cloned()
    }

    /// Returns `true` if a loader is registered for the kind.
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// Verifies that every group's kind has a registered loader.
    ///
    /// Runs at configuration time so a dangling kind fails the session
    /// before any loading begins, not at dispatch time.
    pub fn validate_coverage(&self, groups: &[ResourceGroup]) -> Result<(), ConfigError> {
        for group in groups {
            if !self.contains(&group.kind) {
                return Err(ConfigError::MissingLoader {
                    kind: group.kind.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
