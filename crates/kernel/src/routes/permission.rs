//! Navigation-time permission checks against the registered menu.
//!
//! A direct navigation is allowed when its path is a visible menu path or
//! lies under one (`/user/123` under `/user`). Anything else is redirected
//! to the home path.

use std::collections::HashSet;

use tracing::debug;

use crate::menu::MenuNode;

/// Outcome of [`validate_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCheck {
    /// The requested path when allowed, the home path otherwise.
    pub path: String,
    pub allowed: bool,
}

/// Flattened set of visible menu paths.
#[derive(Debug, Clone, Default)]
pub struct MenuPathSet {
    paths: HashSet<String>,
}

impl MenuPathSet {
    /// Collect every non-hidden path in the tree.
    pub fn from_menus(menus: &[MenuNode]) -> Self {
        let mut paths = HashSet::new();
        collect_paths(menus, &mut paths);
        Self { paths }
    }

    /// Whether navigation to `target` is allowed.
    pub fn permits(&self, target: &str) -> bool {
        if target == "/" || self.paths.contains(target) {
            return true;
        }
        self.paths.iter().any(|path| {
            target
                .strip_prefix(path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn collect_paths(menus: &[MenuNode], paths: &mut HashSet<String>) {
    for menu in menus {
        if !menu.meta.is_hide && !menu.path.is_empty() {
            let path = if menu.path.starts_with('/') {
                menu.path.clone()
            } else {
                format!("/{}", menu.path)
            };
            paths.insert(path);
        }
        collect_paths(menu.child_nodes(), paths);
    }
}

/// Whether `target` is reachable through the menu tree.
pub fn has_permission(target: &str, menus: &[MenuNode]) -> bool {
    MenuPathSet::from_menus(menus).permits(target)
}

/// Return `target` if allowed, otherwise `home`.
pub fn validate_path(target: &str, menus: &[MenuNode], home: &str) -> PathCheck {
    if has_permission(target, menus) {
        PathCheck {
            path: target.to_string(),
            allowed: true,
        }
    } else {
        debug!(target = %target, home = %home, "navigation not permitted, redirecting home");
        PathCheck {
            path: home.to_string(),
            allowed: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn menus() -> Vec<MenuNode> {
        let mut secret = MenuNode::new("Secret", "/system/secret", "/system/secret");
        secret.meta.is_hide = true;
        vec![
            MenuNode::new("User", "/user", "/user"),
            MenuNode::new("System", "/system", "Layout").with_children(vec![
                MenuNode::new("Role", "/system/role", "/system/role"),
                secret,
            ]),
            MenuNode::new("Relative", "relative", "/relative"),
        ]
    }

    #[test]
    fn root_is_always_permitted() {
        assert!(has_permission("/", &[]));
    }

    #[test]
    fn exact_match() {
        assert!(has_permission("/user", &menus()));
        assert!(has_permission("/system/role", &menus()));
    }

    #[test]
    fn prefix_match_requires_segment_boundary() {
        assert!(has_permission("/user/123", &menus()));
        assert!(!has_permission("/userx", &menus()));
    }

    #[test]
    fn hidden_menus_are_excluded() {
        // Still reachable through the visible parent prefix.
        assert!(has_permission("/system/secret", &menus()));
        let only_hidden = {
            let mut m = MenuNode::new("Hidden", "/hidden", "/hidden");
            m.meta.is_hide = true;
            vec![m]
        };
        assert!(!has_permission("/hidden", &only_hidden));
    }

    #[test]
    fn children_of_pathless_groups_are_collected() {
        let tree = vec![
            MenuNode::new("Group", "", "")
                .with_children(vec![MenuNode::new("Leaf", "/leaf", "/leaf")]),
        ];
        assert!(has_permission("/leaf", &tree));
    }

    #[test]
    fn relative_paths_gain_a_leading_slash() {
        assert!(has_permission("/relative", &menus()));
        assert_eq!(MenuPathSet::from_menus(&menus()).len(), 4);
    }

    #[test]
    fn validate_path_redirects_home() {
        let allowed = validate_path("/user/1", &menus(), "/dashboard/console");
        assert_eq!(
            allowed,
            PathCheck {
                path: "/user/1".to_string(),
                allowed: true
            }
        );

        let denied = validate_path("/nope", &menus(), "/dashboard/console");
        assert!(!denied.allowed);
        assert_eq!(denied.path, "/dashboard/console");
    }
}
