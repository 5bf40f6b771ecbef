//! Canonical menu tree types.
//!
//! A menu tree arrives either from the static frontend route table or from
//! the backend menu endpoint. Both deserialize into [`MenuNode`].

use serde::{Deserialize, Serialize};

/// Reserved component value meaning "wrap with the shared page shell".
pub const LAYOUT_SENTINEL: &str = "Layout";

/// View path of the shared page shell, used by backend menus in place of
/// [`LAYOUT_SENTINEL`].
pub const LAYOUT_ALIAS: &str = "/index/index";

/// Whether a component value refers to the shared page shell.
pub fn is_layout(component: &str) -> bool {
    component == LAYOUT_SENTINEL || component == LAYOUT_ALIAS
}

/// A declarative menu entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    /// Backend identifier, only used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Route name; must be unique across the registered graph.
    #[serde(default)]
    pub name: String,

    /// Declared path segment: absolute, relative, or empty.
    #[serde(default)]
    pub path: String,

    /// Empty, the layout sentinel, or a logical view path.
    #[serde(default)]
    pub component: String,

    #[serde(default)]
    pub meta: MenuMeta,

    /// `None` and `Some(vec![])` differ: any `Some` marks a directory node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuNode>>,
}

/// Display and routing metadata attached to a menu entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuMeta {
    /// Title or i18n key. Opaque to routing.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hidden from navigation but still routable.
    pub is_hide: bool,
    pub is_hide_tab: bool,
    /// External URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub is_iframe: bool,
    pub keep_alive: bool,
    /// Allowed roles. Empty means unrestricted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Button-level permissions, carried through untouched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub auth_list: Vec<AuthMark>,
    /// Computed by the transformer, ignored on input.
    #[serde(skip_deserializing)]
    pub is_first_level: bool,
    #[serde(alias = "isAffix")]
    pub fixed_tab: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_path: Option<String>,
    pub is_full_page: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_badge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_text_badge: Option<String>,
}

/// A button-level permission entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthMark {
    pub title: String,
    pub auth_mark: String,
}

impl MenuNode {
    /// Create a node with a name, path and component.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            component: component.into(),
            ..Default::default()
        }
    }

    /// Set the children, turning this node into a directory.
    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Set the metadata.
    pub fn with_meta(mut self, meta: MenuMeta) -> Self {
        self.meta = meta;
        self
    }

    /// A directory node has a `children` list, even an empty one.
    pub fn is_directory(&self) -> bool {
        self.children.is_some()
    }

    /// Children as a slice; empty for leaves.
    pub fn child_nodes(&self) -> &[MenuNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether this node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.child_nodes().is_empty()
    }

    pub fn has_component(&self) -> bool {
        !self.component.is_empty()
    }

    /// Whether the component is the layout sentinel.
    pub fn is_layout(&self) -> bool {
        is_layout(&self.component)
    }

    /// External link or iframe target.
    pub fn is_external(&self) -> bool {
        self.has_link() || self.meta.is_iframe
    }

    pub fn has_link(&self) -> bool {
        self.meta.link.as_deref().is_some_and(|l| !l.is_empty())
    }

    /// Label used in diagnostics: the name, else the id, else the path.
    pub fn label(&self) -> String {
        if !self.name.is_empty() {
            self.name.clone()
        } else if let Some(id) = self.id {
            format!("#{id}")
        } else {
            self.path.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_json() {
        let json = r#"[{
            "id": 7,
            "name": "Dashboard",
            "path": "/dashboard",
            "component": "/index/index",
            "meta": {"title": "menus.dashboard.title", "roles": ["R_SUPER"], "isAffix": true},
            "children": [
                {"name": "Console", "path": "console", "component": "/dashboard/console",
                 "meta": {"title": "Console", "keepAlive": true,
                          "authList": [{"title": "Add", "authMark": "add"}]}}
            ]
        }]"#;

        let menus: Vec<MenuNode> = serde_json::from_str(json).unwrap();
        assert_eq!(menus.len(), 1);
        let dashboard = &menus[0];
        assert_eq!(dashboard.id, Some(7));
        assert!(dashboard.is_layout());
        assert!(dashboard.meta.fixed_tab);
        assert_eq!(dashboard.meta.roles, vec!["R_SUPER"]);

        let console = &dashboard.child_nodes()[0];
        assert!(console.meta.keep_alive);
        assert_eq!(console.meta.auth_list[0].auth_mark, "add");
        assert!(!console.is_directory());
    }

    #[test]
    fn empty_children_marks_directory() {
        let node: MenuNode = serde_json::from_str(r#"{"name": "Group", "children": []}"#).unwrap();
        assert!(node.is_directory());
        assert!(!node.has_children());

        let leaf: MenuNode = serde_json::from_str(r#"{"name": "Leaf"}"#).unwrap();
        assert!(!leaf.is_directory());
    }

    #[test]
    fn is_first_level_is_not_read_from_input() {
        let node: MenuNode =
            serde_json::from_str(r#"{"name": "X", "meta": {"isFirstLevel": true}}"#).unwrap();
        assert!(!node.meta.is_first_level);
    }

    #[test]
    fn empty_link_is_not_external() {
        let mut node = MenuNode::new("Doc", "", "");
        node.meta.link = Some(String::new());
        assert!(!node.is_external());

        node.meta.link = Some("https://example.com".to_string());
        assert!(node.is_external());
    }

    #[test]
    fn label_falls_back_to_id_then_path() {
        let mut node = MenuNode::new("", "/x", "");
        assert_eq!(node.label(), "/x");
        node.id = Some(3);
        assert_eq!(node.label(), "#3");
        node.name = "X".to_string();
        assert_eq!(node.label(), "X");
    }
}
