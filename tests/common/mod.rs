//! Shared test fixture: a recording render surface.
//!
//! `FakeSurface` implements every primitive against an in-memory operation
//! log so tests can assert on exactly what the splash screen rendered.
//! Element load events resolve immediately unless the element's locator was
//! marked as failing.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use curtain::{NodeId, RenderSurface, StyleProperty, SurfaceError};

/// One recorded surface operation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Created {
        node: NodeId,
        tag: String,
        classes: Vec<String>,
    },
    Appended {
        parent: NodeId,
        child: NodeId,
    },
    Removed {
        node: NodeId,
    },
    Style {
        node: NodeId,
        property: StyleProperty,
        value: String,
    },
    Attribute {
        node: NodeId,
        name: String,
        value: String,
    },
    Text {
        node: NodeId,
        text: String,
    },
    Class {
        node: NodeId,
        class: String,
    },
    Alert {
        message: String,
    },
}

pub struct FakeSurface {
    next_id: AtomicU64,
    ops: Mutex<Vec<SurfaceOp>>,
    ids: Mutex<HashMap<String, NodeId>>,
    attributes: Mutex<HashMap<NodeId, HashMap<String, String>>>,
    failing_locators: Mutex<HashSet<String>>,
    alerts: Mutex<Vec<String>>,
    alerted: Notify,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(10),
            ops: Mutex::new(Vec::new()),
            ids: Mutex::new(HashMap::new()),
            attributes: Mutex::new(HashMap::new()),
            failing_locators: Mutex::new(HashSet::new()),
            alerts: Mutex::new(Vec::new()),
            alerted: Notify::new(),
        }
    }

    /// Registers a host-page element reachable through `element_by_id`.
    pub fn register_id(&self, id: &str) -> NodeId {
        let node = NodeId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.ids.lock().unwrap().insert(id.to_string(), node);
        node
    }

    /// Marks a locator so elements pointing at it fire their error event.
    pub fn fail_loads_of(&self, locator: &str) {
        self.failing_locators
            .lock()
            .unwrap()
            .insert(locator.to_string());
    }

    /// Snapshot of every recorded operation.
    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.ops.lock().unwrap().clone()
    }

    /// Raised alert messages, in order.
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    /// Resolves once at least one alert has been raised.
    pub async fn wait_for_alert(&self) {
        if !self.alerts().is_empty() {
            return;
        }
        self.alerted.notified().await;
    }

    /// First created node carrying the given class.
    pub fn created_with_class(&self, class: &str) -> Option<NodeId> {
        self.ops().iter().find_map(|op| match op {
            SurfaceOp::Created { node, classes, .. } if classes.iter().any(|c| c == class) => {
                Some(*node)
            }
            _ => None,
        })
    }

    /// Every created node with the given tag.
    pub fn created_with_tag(&self, tag: &str) -> Vec<NodeId> {
        self.ops()
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Created { node, tag: t, .. } if t == tag => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// First child appended under the given parent.
    pub fn first_child_of(&self, parent: NodeId) -> Option<NodeId> {
        self.ops().iter().find_map(|op| match op {
            SurfaceOp::Appended { parent: p, child } if *p == parent => Some(*child),
            _ => None,
        })
    }

    /// Values written for one style property on one node, in order.
    pub fn style_values(&self, node: NodeId, property: StyleProperty) -> Vec<String> {
        self.ops()
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Style {
                    node: n,
                    property: p,
                    value,
                } if *n == node && *p == property => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Width values written to the progress bar, in order.
    pub fn bar_widths(&self) -> Vec<String> {
        let Some(track) = self.created_with_class("progressBar") else {
            return Vec::new();
        };
        let Some(bar) = self.first_child_of(track) else {
            return Vec::new();
        };
        self.style_values(bar, StyleProperty::Width)
    }

    /// The progress bar node, once the chrome is mounted.
    pub fn bar(&self) -> Option<NodeId> {
        self.first_child_of(self.created_with_class("progressBar")?)
    }

    /// Number of nodes detached so far.
    pub fn removed_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Removed { .. }))
            .count()
    }

    fn record(&self, op: SurfaceOp) {
        self.ops.lock().unwrap().push(op);
    }

    fn locator_of(&self, node: NodeId) -> Option<String> {
        let attributes = self.attributes.lock().unwrap();
        let node_attributes = attributes.get(&node)?;
        node_attributes
            .get("src")
            .or_else(|| node_attributes.get("href"))
            .cloned()
    }
}

#[async_trait]
impl RenderSurface for FakeSurface {
    fn create_element(&self, tag: &str, classes: &[&str]) -> NodeId {
        let node = NodeId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.record(SurfaceOp::Created {
            node,
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        });
        node
    }

    fn body(&self) -> NodeId {
        NodeId::new(1)
    }

    fn head(&self) -> NodeId {
        NodeId::new(2)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Appended { parent, child });
        Ok(())
    }

    fn remove(&self, node: NodeId) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Removed { node });
        Ok(())
    }

    fn set_style(
        &self,
        node: NodeId,
        property: StyleProperty,
        value: &str,
    ) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Style {
            node,
            property,
            value: value.to_string(),
        });
        Ok(())
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.attributes
            .lock()
            .unwrap()
            .entry(node)
            .or_default()
            .insert(name.to_string(), value.to_string());
        self.record(SurfaceOp::Attribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn set_text(&self, node: NodeId, text: &str) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Text {
            node,
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_class(&self, node: NodeId, class: &str) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Class {
            node,
            class: class.to_string(),
        });
        Ok(())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.lock().unwrap().get(id).copied()
    }

    async fn await_load(&self, node: NodeId) -> Result<(), SurfaceError> {
        if let Some(locator) = self.locator_of(node) {
            if self.failing_locators.lock().unwrap().contains(&locator) {
                return Err(SurfaceError::ElementFailed { locator });
            }
        }
        Ok(())
    }

    async fn await_transition_end(&self, _node: NodeId) -> Result<(), SurfaceError> {
        Ok(())
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
        self.record(SurfaceOp::Alert {
            message: message.to_string(),
        });
        self.alerted.notify_one();
    }
}
