//! Default loaders for the two conventional kinds.
//!
//! Both loaders build the corresponding element through the render surface,
//! attach it to the document, and settle on the surface's load/error event
//! for that element.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ResourceSpec;
use crate::loader::{LoaderError, ResourceLoader};
use crate::surface::RenderSurface;

/// Loads `"scripts"` resources by injecting a `<script>` tag.
pub struct ScriptLoader {
    surface: Arc<dyn RenderSurface>,
}

impl ScriptLoader {
    /// Creates a script loader bound to a surface.
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self { surface }
    }
}

#[async_trait]
impl ResourceLoader for ScriptLoader {
    async fn load(&self, spec: &ResourceSpec) -> Result<String, LoaderError> {
        let src = spec.locator();
        // The module flag is accepted but not yet reflected in the tag.
        let tag = self.surface.create_element("script", &[]);
        self.surface.set_attribute(tag, "src", src)?;
        self.surface.append_child(self.surface.body(), tag)?;
        self.surface.await_load(tag).await?;
        log::debug!("Loaded script {}", src);
        Ok(src.to_string())
    }
}

/// Loads `"stylesheets"` resources by injecting a `<link rel="stylesheet">`.
pub struct StylesheetLoader {
    surface: Arc<dyn RenderSurface>,
}

impl StylesheetLoader {
    /// Creates a stylesheet loader bound to a surface.
    pub fn new(surface: Arc<dyn RenderSurface>) -> Self {
        Self { surface }
    }
}

#[async_trait]
impl ResourceLoader for StylesheetLoader {
    async fn load(&self, spec: &ResourceSpec) -> Result<String, LoaderError> {
        let href = spec.locator();
        let tag = self.surface.create_element("link", &[]);
        self.surface.set_attribute(tag, "rel", "stylesheet")?;
        self.surface.set_attribute(tag, "href", href)?;
        self.surface.append_child(self.surface.head(), tag)?;
        self.surface.await_load(tag).await?;
        log::debug!("Loaded stylesheet {}", href);
        Ok(href.to_string())
    }
}
