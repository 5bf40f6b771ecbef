//! Menu sources.
//!
//! In frontend mode the menu comes from a static route table. In backend
//! mode it is fetched from the server; [`JsonFileMenuSource`] reads the same
//! JSON shape from disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::node::MenuNode;

/// Anything that can produce the raw menu tree.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the raw menu tree.
    async fn menu_list(&self) -> Result<Vec<MenuNode>>;
}

/// An in-memory menu table.
#[derive(Debug, Clone, Default)]
pub struct StaticMenuSource {
    menus: Vec<MenuNode>,
}

impl StaticMenuSource {
    pub fn new(menus: Vec<MenuNode>) -> Self {
        Self { menus }
    }
}

#[async_trait]
impl MenuSource for StaticMenuSource {
    async fn menu_list(&self) -> Result<Vec<MenuNode>> {
        Ok(self.menus.clone())
    }
}

/// A JSON array of menu nodes stored on disk.
#[derive(Debug, Clone)]
pub struct JsonFileMenuSource {
    path: PathBuf,
}

impl JsonFileMenuSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MenuSource for JsonFileMenuSource {
    async fn menu_list(&self) -> Result<Vec<MenuNode>> {
        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read menu file {}", self.path.display()))?;
        let menus: Vec<MenuNode> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse menu file {}", self.path.display()))?;
        debug!(path = %self.path.display(), count = menus.len(), "menu file loaded");
        Ok(menus)
    }
}
