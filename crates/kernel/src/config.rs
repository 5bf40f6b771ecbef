//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

use crate::menu::AccessMode;
use crate::routes::DEFAULT_STORAGE_KEY;

/// Route registration configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where menu authorization happens (default: frontend).
    pub access_mode: AccessMode,

    /// Redirect target for navigations outside the menu (default: /dashboard/console).
    pub home_path: String,

    /// Prefix of view module keys (default: /src/views).
    pub view_base: String,

    /// Suffix of view module keys (default: .vue).
    pub view_extension: String,

    /// Session storage key for iframe routes (default: iframeRoutes).
    pub iframe_storage_key: String,

    /// Reject duplicate route names instead of warning (default: false).
    pub strict_route_names: bool,

    /// Roles of the current session (comma-separated, default: none).
    pub roles: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_mode: AccessMode::Frontend,
            home_path: "/dashboard/console".to_string(),
            view_base: "/src/views".to_string(),
            view_extension: ".vue".to_string(),
            iframe_storage_key: DEFAULT_STORAGE_KEY.to_string(),
            strict_route_names: false,
            roles: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let access_mode = match lookup("NAVGRAPH_ACCESS_MODE") {
            Some(v) => v
                .parse()
                .map_err(anyhow::Error::msg)
                .context("NAVGRAPH_ACCESS_MODE must be frontend or backend")?,
            None => defaults.access_mode,
        };

        let home_path = lookup("NAVGRAPH_HOME_PATH").unwrap_or(defaults.home_path);
        if !home_path.starts_with('/') {
            anyhow::bail!("NAVGRAPH_HOME_PATH must be an absolute path, got '{home_path}'");
        }

        let view_base = lookup("NAVGRAPH_VIEW_BASE").unwrap_or(defaults.view_base);
        let view_extension = lookup("NAVGRAPH_VIEW_EXTENSION").unwrap_or(defaults.view_extension);
        let iframe_storage_key =
            lookup("NAVGRAPH_IFRAME_STORAGE_KEY").unwrap_or(defaults.iframe_storage_key);

        let strict_route_names = match lookup("NAVGRAPH_STRICT_ROUTE_NAMES") {
            Some(v) => parse_bool(&v).context("NAVGRAPH_STRICT_ROUTE_NAMES must be a boolean")?,
            None => defaults.strict_route_names,
        };

        let roles = lookup("NAVGRAPH_ROLES")
            .map(|v| parse_list(&v))
            .unwrap_or_default();

        Ok(Self {
            access_mode,
            home_path,
            view_base,
            view_extension,
            iframe_storage_key,
            strict_route_names,
            roles,
        })
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("invalid boolean '{other}'"),
    }
}
