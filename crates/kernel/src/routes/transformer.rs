//! Menu-to-route transformation.
//!
//! Branches, in precedence order:
//! 1. iframe nodes render through the iframe surface; at the top level they
//!    are wrapped in a layout node mounted at their first path segment
//! 2. first-level leaves with a component are wrapped the same way; a node
//!    that declares `children`, even an empty list, is a directory and stays
//!    unwrapped
//! 3. everything else resolves its own component, if any
//!
//! Children are transformed one level deeper whichever branch was taken.
//! The input tree is never modified.

use tracing::trace;

use super::component::{ComponentHandle, ComponentLoader};
use super::iframe::{IframeRecord, IframeRegistry};
use super::router::RouteNode;
use crate::menu::{MenuMeta, MenuNode, first_segment, route_path};

/// Transforms menu trees into route trees, recording iframe routes as it goes.
pub struct RouteTransformer<'a> {
    loader: &'a ComponentLoader,
    iframes: &'a mut IframeRegistry,
}

impl<'a> RouteTransformer<'a> {
    pub fn new(loader: &'a ComponentLoader, iframes: &'a mut IframeRegistry) -> Self {
        Self { loader, iframes }
    }

    /// Transform a top-level menu node.
    pub fn transform(&mut self, menu: &MenuNode) -> RouteNode {
        self.transform_at(menu, 0, "")
    }

    fn transform_at(&mut self, menu: &MenuNode, depth: usize, parent_path: &str) -> RouteNode {
        let path = route_path(parent_path, &menu.path);

        if menu.meta.is_iframe {
            self.iframes.add(IframeRecord {
                path: path.clone(),
                meta: menu.meta.clone(),
            });
            let children = self.transform_children(menu, depth + 1, &path);
            let component = Some(self.loader.iframe());
            let route = route_node(menu, path, component, menu.meta.clone(), children);
            trace!(path = %route.path, depth, "iframe route");
            return if depth == 0 { wrap(route) } else { route };
        }

        if depth == 0 && !menu.is_directory() && menu.has_component() {
            let meta = MenuMeta {
                is_first_level: true,
                ..menu.meta.clone()
            };
            let component = self.loader.load(&menu.component, &menu.name);
            let children = self.transform_children(menu, depth + 1, &path);
            trace!(path = %path, "first-level route wrapped");
            return wrap(route_node(menu, path, Some(component), meta, children));
        }

        let component = menu
            .has_component()
            .then(|| self.loader.load(&menu.component, &menu.name));
        let children = self.transform_children(menu, depth + 1, &path);
        route_node(menu, path, component, menu.meta.clone(), children)
    }

    fn transform_children(
        &mut self,
        menu: &MenuNode,
        depth: usize,
        parent_path: &str,
    ) -> Vec<RouteNode> {
        menu.child_nodes()
            .iter()
            .map(|child| self.transform_at(child, depth, parent_path))
            .collect()
    }
}

fn route_node(
    menu: &MenuNode,
    path: String,
    component: Option<ComponentHandle>,
    meta: MenuMeta,
    children: Vec<RouteNode>,
) -> RouteNode {
    RouteNode {
        id: menu.id,
        name: (!menu.name.is_empty()).then(|| menu.name.clone()),
        path,
        component,
        meta,
        is_first_level_wrapped: false,
        children,
    }
}

/// Mount `route` inside an unnamed layout node at its first path segment.
fn wrap(route: RouteNode) -> RouteNode {
    RouteNode {
        id: None,
        name: None,
        path: first_segment(&route.path),
        component: Some(ComponentHandle::Layout),
        meta: MenuMeta {
            is_first_level: false,
            ..route.meta.clone()
        },
        is_first_level_wrapped: true,
        children: vec![route],
    }
}
