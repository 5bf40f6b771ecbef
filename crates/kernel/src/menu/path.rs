//! Route path normalization.
//!
//! Menu entries declare paths relative to their parent. Registered routes
//! need absolute paths.

use super::node::MenuNode;

/// Whether a path is an external URL rather than a route path.
pub fn is_url(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Resolve a declared path against its parent's resolved path.
///
/// - empty paths stay empty (group-only nodes)
/// - URLs and absolute paths are returned unchanged
/// - relative paths are joined to the parent with duplicate slashes collapsed
pub fn resolve_path(parent: &str, path: &str) -> String {
    if path.is_empty() || is_url(path) || path.starts_with('/') {
        return path.to_string();
    }

    if parent.is_empty() {
        return format!("/{path}");
    }

    collapse_slashes(&format!("{parent}/{path}"))
}

/// Resolve the path a registered route is mounted at.
///
/// Like [`resolve_path`], except that an empty path inherits the parent's
/// path, falling back to `/` at the top level.
pub fn route_path(parent: &str, path: &str) -> String {
    if !path.is_empty() {
        return resolve_path(parent, path);
    }
    if parent.is_empty() {
        "/".to_string()
    } else {
        parent.to_string()
    }
}

/// First non-empty segment of a path, prefixed with `/`.
///
/// `/dashboard/console` -> `/dashboard`, `""` -> `/`.
pub fn first_segment(path: &str) -> String {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .map(|segment| format!("/{segment}"))
        .unwrap_or_else(|| "/".to_string())
}

/// Rewrite every node's path to its absolute form, recursively.
pub fn normalize_paths(menus: &[MenuNode], parent: &str) -> Vec<MenuNode> {
    menus
        .iter()
        .map(|menu| {
            let path = resolve_path(parent, &menu.path);
            // Children of a group-only node resolve against the grandparent.
            let base = if path.is_empty() { parent } else { path.as_str() };
            let children = menu
                .children
                .as_ref()
                .map(|children| normalize_paths(children, base));
            MenuNode {
                path,
                children,
                ..menu.clone()
            }
        })
        .collect()
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}
