//! navgraph kernel library
//!
//! Turns declarative menu trees into registered route graphs: role
//! filtering, stub collapsing, path normalization, validation, layout
//! wrapping, iframe bookkeeping and navigation-time permission checks.
//! The `navgraph` binary drives the same pipeline from the command line.

pub mod config;
pub mod error;
pub mod menu;
pub mod routes;
pub mod session;

pub use config::Config;
pub use error::{RouteError, RouteResult};
