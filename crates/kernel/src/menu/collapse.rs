//! Removal of inert menu stubs.

use super::node::MenuNode;

/// A node is inert when it has no children list, no link, no iframe flag
/// and no component other than the layout sentinel.
pub fn is_inert(menu: &MenuNode) -> bool {
    !menu.is_directory()
        && !menu.has_link()
        && !menu.meta.is_iframe
        && (!menu.has_component() || menu.is_layout())
}

/// Remove inert nodes, children first.
///
/// Directory nodes survive even when all their children are removed.
pub fn collapse_empty(menus: &[MenuNode]) -> Vec<MenuNode> {
    menus
        .iter()
        .filter_map(|menu| {
            let collapsed = MenuNode {
                children: menu.children.as_ref().map(|c| collapse_empty(c)),
                ..menu.clone()
            };
            (!is_inert(&collapsed)).then_some(collapsed)
        })
        .collect()
}
