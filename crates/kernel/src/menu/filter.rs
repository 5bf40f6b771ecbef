//! Role-based menu filtering.

use super::node::MenuNode;

/// Whether a node's role restriction admits any of the caller's roles.
///
/// Nodes without a role list are unrestricted.
pub fn allows(menu: &MenuNode, roles: &[String]) -> bool {
    menu.meta.roles.is_empty() || menu.meta.roles.iter().any(|r| roles.contains(r))
}

/// Drop every node the caller may not see, together with its subtree.
///
/// Returns a new tree; sibling order is preserved.
pub fn filter_by_roles(menus: &[MenuNode], roles: &[String]) -> Vec<MenuNode> {
    menus
        .iter()
        .filter(|menu| allows(menu, roles))
        .map(|menu| MenuNode {
            children: menu
                .children
                .as_ref()
                .map(|children| filter_by_roles(children, roles)),
            ..menu.clone()
        })
        .collect()
}
