//! navgraph test utilities.
//!
//! Menu tree builders and a representative admin menu used by the kernel's
//! integration tests.

use std::sync::Arc;

use navgraph_kernel::menu::MenuNode;
use navgraph_kernel::routes::{ComponentLoader, IframeRegistry, RouteRegistry, ViewModules};
use navgraph_kernel::session::MemorySessionStore;

/// Start building a menu node.
pub fn test_menu(name: &str, path: &str) -> TestMenu {
    TestMenu {
        node: MenuNode::new(name, path, ""),
    }
}

/// A menu node builder for test fixtures.
#[derive(Debug, Clone)]
pub struct TestMenu {
    node: MenuNode,
}

impl TestMenu {
    /// Set the component path.
    pub fn component(mut self, component: &str) -> Self {
        self.node.component = component.to_string();
        self
    }

    /// Use the layout sentinel as component.
    pub fn layout(self) -> Self {
        self.component("Layout")
    }

    /// Restrict to the given roles.
    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.node.meta.roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Point at an external URL.
    pub fn link(mut self, url: &str) -> Self {
        self.node.meta.link = Some(url.to_string());
        self
    }

    /// Render the link inside the iframe surface.
    pub fn iframe(mut self, url: &str) -> Self {
        self.node.meta.link = Some(url.to_string());
        self.node.meta.is_iframe = true;
        self
    }

    /// Hide from navigation.
    pub fn hidden(mut self) -> Self {
        self.node.meta.is_hide = true;
        self
    }

    /// Set the title.
    pub fn title(mut self, title: &str) -> Self {
        self.node.meta.title = title.to_string();
        self
    }

    /// Set the children, making this a directory.
    pub fn children(mut self, children: Vec<MenuNode>) -> Self {
        self.node.children = Some(children);
        self
    }

    pub fn build(self) -> MenuNode {
        self.node
    }
}

/// A small admin menu exercising every node kind.
///
/// - Dashboard: layout directory with a console page
/// - System: R_SUPER-only directory with users, roles and a stub
/// - About: first-level leaf
/// - Docs: first-level iframe
/// - Github: first-level external link
pub fn admin_menu() -> Vec<MenuNode> {
    vec![
        test_menu("Dashboard", "/dashboard")
            .layout()
            .title("menus.dashboard.title")
            .children(vec![
                test_menu("Console", "console")
                    .component("/dashboard/console")
                    .build(),
            ])
            .build(),
        test_menu("System", "/system")
            .layout()
            .roles(&["R_SUPER"])
            .children(vec![
                test_menu("User", "user").component("/system/user").build(),
                test_menu("Role", "role").component("/system/role").build(),
                test_menu("Pending", "pending").build(),
            ])
            .build(),
        test_menu("About", "/about").component("/about/index").build(),
        test_menu("Docs", "/outside/iframe/docs")
            .iframe("https://docs.example.com")
            .build(),
        test_menu("Github", "").link("https://github.com").build(),
    ]
}

/// View modules matching [`admin_menu`].
pub fn admin_views() -> ViewModules {
    ViewModules::new(
        "/src/views",
        ".vue",
        [
            "/src/views/dashboard/console/index.vue",
            "/src/views/system/user/index.vue",
            "/src/views/system/role/index.vue",
            "/src/views/about/index.vue",
        ],
    )
}

/// A registry over [`admin_views`].
pub fn test_registry() -> RouteRegistry {
    RouteRegistry::new(ComponentLoader::new(Arc::new(admin_views())))
}

/// An iframe registry over a fresh in-memory session store.
pub fn test_iframes() -> (IframeRegistry, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    (IframeRegistry::new(store.clone()), store)
}

/// Collect every route name in a menu tree, depth first.
pub fn menu_names(menus: &[MenuNode]) -> Vec<String> {
    let mut names = Vec::new();
    for menu in menus {
        names.push(menu.name.clone());
        names.extend(menu_names(menu.child_nodes()));
    }
    names
}

/// Parse a menu tree in the backend JSON shape.
pub fn menu_from_json(json: &str) -> serde_json::Result<Vec<MenuNode>> {
    serde_json::from_str(json)
}
