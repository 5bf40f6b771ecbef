//! Dynamic route registration.
//!
//! Processed menu trees are validated, transformed into route trees and
//! added to a [`LiveRouter`]. Navigation-time checks live in [`permission`].

mod component;
mod iframe;
pub mod permission;
mod registry;
mod router;
mod transformer;
mod validator;

pub use component::{ComponentHandle, ComponentLoader, ComponentResolver, ViewModules};
pub use iframe::{DEFAULT_STORAGE_KEY, IframeRecord, IframeRegistry};
pub use permission::{MenuPathSet, PathCheck, has_permission, validate_path};
pub use registry::RouteRegistry;
pub use router::{LiveRouter, MemoryRouter, RemovalHandle, RouteNode};
pub use transformer::RouteTransformer;
pub use validator::{RouteValidator, ValidationReport};
