//! Component resolution.
//!
//! Menus name views by logical path (`/system/user`). A [`ComponentResolver`]
//! maps those to handles; [`ComponentLoader`] turns failures into diagnostic
//! handles so one bad entry never blocks registration.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::error::{RouteError, RouteResult};
use crate::menu::is_layout;

/// Opaque reference to something the rendering layer can mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentHandle {
    /// Renders nothing. Used for empty component paths.
    Empty,
    /// The shared page shell.
    Layout,
    /// The embedded external-content surface.
    Iframe,
    /// A lazily loaded view module.
    View { module: String },
    /// Inline error marker naming the path that could not be resolved.
    Missing { requested: String },
}

impl ComponentHandle {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

/// Maps a logical component path to a handle.
pub trait ComponentResolver: Send + Sync {
    fn resolve(&self, path: &str) -> RouteResult<ComponentHandle>;
}

/// Resolver backed by a table of known view modules.
///
/// Candidates are probed in order: `<base><path><ext>` then
/// `<base><path>/index<ext>`.
#[derive(Debug, Clone)]
pub struct ViewModules {
    base: String,
    extension: String,
    /// `None` accepts the first candidate for every path.
    modules: Option<BTreeSet<String>>,
}

impl ViewModules {
    /// Build a resolver over an explicit module table.
    pub fn new<I, S>(base: impl Into<String>, extension: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            extension: extension.into(),
            modules: Some(modules.into_iter().map(Into::into).collect()),
        }
    }

    /// Build a resolver that trusts every path.
    pub fn permissive(base: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            extension: extension.into(),
            modules: None,
        }
    }

    /// Module keys tried for a logical path, in probing order.
    pub fn candidates(&self, path: &str) -> [String; 2] {
        let base = self.base.trim_end_matches('/');
        let path = path.trim_end_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        [
            format!("{base}{path}{}", self.extension),
            format!("{base}{path}/index{}", self.extension),
        ]
    }

    /// Number of known modules, or `None` when permissive.
    pub fn module_count(&self) -> Option<usize> {
        self.modules.as_ref().map(BTreeSet::len)
    }
}

impl ComponentResolver for ViewModules {
    fn resolve(&self, path: &str) -> RouteResult<ComponentHandle> {
        let candidates = self.candidates(path);
        let found = match &self.modules {
            None => candidates.first().cloned(),
            Some(modules) => candidates.iter().find(|c| modules.contains(*c)).cloned(),
        };

        match found {
            Some(module) => Ok(ComponentHandle::View { module }),
            None => Err(RouteError::ComponentNotFound {
                path: path.to_string(),
                candidates: candidates.to_vec(),
            }),
        }
    }
}

/// Loads component handles for menu entries, never failing.
#[derive(Clone)]
pub struct ComponentLoader {
    resolver: Arc<dyn ComponentResolver>,
}

impl ComponentLoader {
    pub fn new(resolver: Arc<dyn ComponentResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve a component path.
    ///
    /// Empty paths give [`ComponentHandle::Empty`], the layout sentinel gives
    /// [`ComponentHandle::Layout`], and unresolvable paths give
    /// [`ComponentHandle::Missing`].
    pub fn load(&self, path: &str, route: &str) -> ComponentHandle {
        if path.is_empty() {
            return ComponentHandle::Empty;
        }
        if is_layout(path) {
            return ComponentHandle::Layout;
        }

        match self.resolver.resolve(path) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(route = %route, component = %path, error = %e, "component not found");
                ComponentHandle::Missing {
                    requested: path.to_string(),
                }
            }
        }
    }

    pub fn layout(&self) -> ComponentHandle {
        ComponentHandle::Layout
    }

    pub fn iframe(&self) -> ComponentHandle {
        ComponentHandle::Iframe
    }
}

impl std::fmt::Debug for ComponentLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn modules() -> ViewModules {
        ViewModules::new(
            "/src/views",
            ".vue",
            ["/src/views/dashboard/console/index.vue", "/src/views/system/user.vue"],
        )
    }

    #[test]
    fn direct_candidate_wins() {
        let handle = modules().resolve("/system/user").unwrap();
        assert_eq!(
            handle,
            ComponentHandle::View {
                module: "/src/views/system/user.vue".to_string()
            }
        );
    }

    #[test]
    fn falls_back_to_index_module() {
        let handle = modules().resolve("/dashboard/console").unwrap();
        assert_eq!(
            handle,
            ComponentHandle::View {
                module: "/src/views/dashboard/console/index.vue".to_string()
            }
        );
    }

    #[test]
    fn prefers_direct_over_index() {
        let views = ViewModules::new("/v", "", ["/v/a/index", "/v/a"]);
        assert_eq!(
            views.resolve("a").unwrap(),
            ComponentHandle::View {
                module: "/v/a".to_string()
            }
        );
    }

    #[test]
    fn unknown_path_is_an_error() {
        let err = modules().resolve("/nope").unwrap_err();
        assert!(matches!(err, RouteError::ComponentNotFound { .. }));
    }

    #[test]
    fn permissive_accepts_anything() {
        let views = ViewModules::permissive("/src/views/", ".vue");
        assert_eq!(views.module_count(), None);
        assert_eq!(
            views.resolve("/anything").unwrap(),
            ComponentHandle::View {
                module: "/src/views/anything.vue".to_string()
            }
        );
    }

    #[test]
    fn loader_degrades_failures() {
        let loader = ComponentLoader::new(Arc::new(modules()));
        assert_eq!(loader.load("", "X"), ComponentHandle::Empty);
        assert_eq!(loader.load("Layout", "X"), ComponentHandle::Layout);
        assert_eq!(loader.load("/index/index", "X"), ComponentHandle::Layout);
        assert_eq!(
            loader.load("/nope", "X"),
            ComponentHandle::Missing {
                requested: "/nope".to_string()
            }
        );
        assert!(!loader.load("/system/user", "X").is_missing());
    }
}
