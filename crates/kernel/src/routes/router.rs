//! The live router primitive and an in-memory implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;

use super::component::ComponentHandle;
use crate::menu::MenuMeta;

/// A route ready to hand to the router.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// `None` for synthesized layout wrappers, which are never routed to by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Always absolute.
    pub path: String,
    /// `None` for directory nodes without a component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentHandle>,
    pub meta: MenuMeta,
    /// Set on layout wrappers synthesized around first-level leaves.
    pub is_first_level_wrapped: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Whether this node or any descendant is named `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name) || self.children.iter().any(|c| c.contains_name(name))
    }

    /// Find the node mounted at `path` in this subtree.
    pub fn find_path(&self, path: &str) -> Option<&RouteNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_path(path))
    }
}

/// Removes a previously added route when invoked.
pub struct RemovalHandle(Box<dyn FnOnce() + Send>);

impl RemovalHandle {
    pub fn new(remove: impl FnOnce() + Send + 'static) -> Self {
        Self(Box::new(remove))
    }

    /// Remove the route.
    pub fn remove(self) {
        (self.0)();
    }
}

impl std::fmt::Debug for RemovalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RemovalHandle")
    }
}

/// The route table the registry mutates.
pub trait LiveRouter: Send + Sync {
    /// Whether a route with this name is registered, at any depth.
    fn has_route(&self, name: &str) -> bool;

    /// Add a top-level route.
    fn add_route(&self, route: RouteNode) -> RemovalHandle;
}

/// Thread-safe in-memory route table.
///
/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    inner: Arc<MemoryRouterInner>,
}

#[derive(Debug, Default)]
struct MemoryRouterInner {
    routes: RwLock<Vec<(u64, RouteNode)>>,
    next_id: AtomicU64,
}

impl MemoryRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the registered top-level routes, in insertion order.
    pub fn routes(&self) -> Vec<RouteNode> {
        self.inner
            .routes
            .read()
            .iter()
            .map(|(_, route)| route.clone())
            .collect()
    }

    /// Number of top-level routes.
    pub fn len(&self) -> usize {
        self.inner.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.routes.read().is_empty()
    }

    /// Find the route mounted at `path`, at any depth.
    pub fn find_path(&self, path: &str) -> Option<RouteNode> {
        self.inner
            .routes
            .read()
            .iter()
            .find_map(|(_, route)| route.find_path(path).cloned())
    }
}

impl LiveRouter for MemoryRouter {
    fn has_route(&self, name: &str) -> bool {
        self.inner
            .routes
            .read()
            .iter()
            .any(|(_, route)| route.contains_name(name))
    }

    fn add_route(&self, route: RouteNode) -> RemovalHandle {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.routes.write().push((id, route));

        let inner = Arc::clone(&self.inner);
        RemovalHandle::new(move || {
            inner.routes.write().retain(|(route_id, _)| *route_id != id);
        })
    }
}
