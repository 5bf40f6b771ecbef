//! Menu processing: the steps between a raw menu tree and validation.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::collapse::collapse_empty;
use super::filter::filter_by_roles;
use super::node::MenuNode;
use super::path::normalize_paths;
use super::source::MenuSource;
use crate::error::{RouteError, RouteResult};

/// Where authorization decisions about the menu are made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// The static route table is filtered by the caller's roles locally.
    #[default]
    Frontend,
    /// The backend returns an already-authorized menu.
    Backend,
}

impl FromStr for AccessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            other => Err(format!("unknown access mode '{other}', expected frontend or backend")),
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frontend => f.write_str("frontend"),
            Self::Backend => f.write_str("backend"),
        }
    }
}

/// Filters, collapses and normalizes a raw menu tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuProcessor {
    mode: AccessMode,
}

impl MenuProcessor {
    pub fn new(mode: AccessMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Fetch the menu from a source and process it.
    pub async fn load(
        &self,
        source: &dyn MenuSource,
        roles: &[String],
    ) -> RouteResult<Vec<MenuNode>> {
        let raw = source
            .menu_list()
            .await
            .map_err(|e| RouteError::MenuSource {
                details: format!("{e:#}"),
            })?;
        self.process(&raw, roles)
    }

    /// Role filter (frontend mode only), collapse, then absolute paths.
    pub fn process(&self, menus: &[MenuNode], roles: &[String]) -> RouteResult<Vec<MenuNode>> {
        let filtered = match self.mode {
            AccessMode::Frontend => filter_by_roles(menus, roles),
            AccessMode::Backend => menus.to_vec(),
        };
        let collapsed = collapse_empty(&filtered);
        let normalized = normalize_paths(&collapsed, "");

        if normalized.is_empty() {
            return Err(RouteError::EmptyMenu);
        }

        debug!(
            mode = %self.mode,
            input = menus.len(),
            output = normalized.len(),
            "menu processed"
        );
        info!(top_level = normalized.len(), "menu list ready");
        Ok(normalized)
    }
}
