//! Menu trees and the processing applied before route registration.
//!
//! A menu tree is filtered by the caller's roles, stripped of inert stubs
//! and rewritten to absolute paths before the route layer sees it.

mod collapse;
mod filter;
mod node;
mod path;
mod processor;
mod source;

pub use collapse::{collapse_empty, is_inert};
pub use filter::{allows, filter_by_roles};
pub use node::{AuthMark, LAYOUT_ALIAS, LAYOUT_SENTINEL, MenuMeta, MenuNode, is_layout};
pub use path::{first_segment, is_url, normalize_paths, resolve_path, route_path};
pub use processor::{AccessMode, MenuProcessor};
pub use source::{JsonFileMenuSource, MenuSource, StaticMenuSource};
