//! Load request configuration.
//!
//! A [`LoadRequest`] is the single value handed to the orchestrator: an
//! ordered list of resource groups, optional per-kind loader overrides, and
//! the two session callbacks. Group order is processing order; order within
//! a group carries no meaning because members load concurrently.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::ResourceLoader;

/// Errors detected before any loading begins.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The request named no resource groups at all.
    #[error("Load request contains no resource groups")]
    NoGroups,

    /// Two groups used the same kind name.
    #[error("Duplicate resource kind '{kind}'")]
    DuplicateKind { kind: String },

    /// A group referenced a kind with no registered loader.
    #[error("No loader registered for kind '{kind}'")]
    MissingLoader { kind: String },

    /// A progress denominator of zero was requested.
    #[error("Total resource count must be positive")]
    ZeroTotal,
}

/// One loadable unit within a group.
///
/// Accepts the two wire shapes a request may carry: a bare locator string,
/// or a structured descriptor with a `src` field and an optional `module`
/// flag. The flag is parsed but currently reserved; no built-in loader
/// consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceSpec {
    /// A plain locator.
    Locator(String),
    /// A locator with auxiliary flags.
    Detailed {
        src: String,
        #[serde(default)]
        module: bool,
    },
}

impl ResourceSpec {
    /// The locator identifying this resource.
    pub fn locator(&self) -> &str {
        match self {
            Self::Locator(src) => src,
            Self::Detailed { src, .. } => src,
        }
    }

    /// Whether the resource was flagged as a module. Reserved.
    pub fn is_module(&self) -> bool {
        match self {
            Self::Locator(_) => false,
            Self::Detailed { module, .. } => *module,
        }
    }
}

impl From<&str> for ResourceSpec {
    fn from(src: &str) -> Self {
        Self::Locator(src.to_string())
    }
}

impl From<String> for ResourceSpec {
    fn from(src: String) -> Self {
        Self::Locator(src)
    }
}

/// A named kind mapped to the resources that load under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    /// Kind name, e.g. `"scripts"`. Selects the loader.
    pub kind: String,
    /// Members of the group. All load concurrently.
    pub resources: Vec<ResourceSpec>,
}

impl ResourceGroup {
    /// Creates a group from anything convertible into resource specs.
    pub fn new<K, I, S>(kind: K, resources: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<ResourceSpec>,
    {
        Self {
            kind: kind.into(),
            resources: resources.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of resources in the group.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the group has no resources. An empty group trivially succeeds.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Zero-argument session callback.
pub type SessionCallback = Box<dyn FnOnce() + Send>;

/// Configuration for one load session.
///
/// Loader overrides and callbacks are dedicated fields, never group kinds,
/// so the kind namespace carries no reserved names.
#[derive(Default)]
pub struct LoadRequest {
    /// Resource groups, in processing order.
    pub groups: Vec<ResourceGroup>,
    /// Per-kind loader overrides; an entry replaces the built-in of the
    /// same name and may introduce new kinds.
    pub loaders: Vec<(String, Arc<dyn ResourceLoader>)>,
    /// Invoked once, before any loading begins.
    pub on_preload: Option<SessionCallback>,
    /// Invoked once, after successful completion and teardown.
    pub on_load: Option<SessionCallback>,
}

impl LoadRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resource group. Group order is processing order.
    pub fn group<K, I, S>(mut self, kind: K, resources: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<ResourceSpec>,
    {
        self.groups.push(ResourceGroup::new(kind, resources));
        self
    }

    /// Registers a loader override for a kind.
    pub fn loader(mut self, kind: impl Into<String>, loader: Arc<dyn ResourceLoader>) -> Self {
        self.loaders.push((kind.into(), loader));
        self
    }

    /// Sets the pre-load callback.
    pub fn on_preload(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_preload = Some(Box::new(callback));
        self
    }

    /// Sets the completion callback.
    pub fn on_load(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    /// Total resource count across all groups. Fixed before loading begins
    /// and never recomputed during a session.
    pub fn total_resources(&self) -> usize {
        self.groups.iter().map(ResourceGroup::len).sum()
    }

    /// Validates the group list: at least one group, no duplicate kinds.
    ///
    /// Loader coverage is validated separately against the effective
    /// registry, since overrides may add kinds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.groups.is_empty() {
            return Err(ConfigError::NoGroups);
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.kind.as_str()) {
                return Err(ConfigError::DuplicateKind {
                    kind: group.kind.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_accepts_bare_locator() {
        let spec: ResourceSpec = serde_json::from_str(r#""main.js""#).unwrap();
        assert_eq!(spec.locator(), "main.js");
        assert!(!spec.is_module());
    }

    #[test]
    fn test_spec_accepts_structured_descriptor() {
        let spec: ResourceSpec = serde_json::from_str(r#"{"src": "app.js", "module": true}"#).unwrap();
        assert_eq!(spec.locator(), "app.js");
        assert!(spec.is_module());

        let spec: ResourceSpec = serde_json::from_str(r#"{"src": "app.js"}"#).unwrap();
        assert!(!spec.is_module());
    }

    #[test]
    fn test_total_resources_sums_all_groups() {
        let request = LoadRequest::new()
            .group("scripts", ["a.js", "b.js"])
            .group("stylesheets", ["x.css"])
            .group("assets", Vec::<String>::new());
        assert_eq!(request.total_resources(), 3);
    }

    #[test]
    fn test_validate_rejects_empty_request() {
        assert_eq!(LoadRequest::new().validate(), Err(ConfigError::NoGroups));
    }

    #[test]
    fn test_validate_rejects_duplicate_kind() {
        let request = LoadRequest::new()
            .group("scripts", ["a.js"])
            .group("scripts", ["b.js"]);
        assert_eq!(
            request.validate(),
            Err(ConfigError::DuplicateKind {
                kind: "scripts".to_string()
            })
        );
    }
}
