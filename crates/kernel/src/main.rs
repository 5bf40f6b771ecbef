//! navgraph
//!
//! Runs the menu-to-route pipeline against a menu file and prints the
//! result.
//!
//! Usage:
//!   navgraph register --menu menu.json --views views.json --roles R_SUPER
//!   navgraph check /system/user --menu menu.json

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use navgraph_kernel::Config;
use navgraph_kernel::config::parse_list;
use navgraph_kernel::menu::{JsonFileMenuSource, MenuProcessor};
use navgraph_kernel::routes::{
    ComponentResolver, IframeRecord, IframeRegistry, MemoryRouter, RouteNode, RouteRegistry,
    ViewModules, validate_path,
};
use navgraph_kernel::session::MemorySessionStore;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a menu tree and print the resulting routes.
    Register {
        /// JSON array of menu nodes.
        #[arg(long)]
        menu: PathBuf,

        /// JSON array of available view module keys. Without it every view resolves.
        #[arg(long)]
        views: Option<PathBuf>,

        /// Comma-separated caller roles, overriding NAVGRAPH_ROLES.
        #[arg(long)]
        roles: Option<String>,
    },
    /// Check whether navigation to a path is allowed.
    Check {
        /// Requested path.
        path: String,

        /// JSON array of menu nodes.
        #[arg(long)]
        menu: PathBuf,

        /// Comma-separated caller roles, overriding NAVGRAPH_ROLES.
        #[arg(long)]
        roles: Option<String>,
    },
}

#[derive(Serialize)]
struct RegisterOutput {
    routes: Vec<RouteNode>,
    iframes: Vec<IframeRecord>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    info!(mode = %config.access_mode, "configuration loaded");

    match cli.command {
        Command::Register { menu, views, roles } => {
            let roles = roles.map(|r| parse_list(&r)).unwrap_or_else(|| config.roles.clone());
            cmd_register(&config, menu, views, &roles).await
        }
        Command::Check { path, menu, roles } => {
            let roles = roles.map(|r| parse_list(&r)).unwrap_or_else(|| config.roles.clone());
            cmd_check(&config, &path, menu, &roles).await
        }
    }
}

async fn cmd_register(
    config: &Config,
    menu: PathBuf,
    views: Option<PathBuf>,
    roles: &[String],
) -> Result<()> {
    let resolver: Arc<dyn ComponentResolver> = match views {
        Some(path) => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read views file {}", path.display()))?;
            let modules: Vec<String> = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse views file {}", path.display()))?;
            Arc::new(ViewModules::new(
                config.view_base.clone(),
                config.view_extension.clone(),
                modules,
            ))
        }
        None => Arc::new(ViewModules::permissive(
            config.view_base.clone(),
            config.view_extension.clone(),
        )),
    };

    let router = MemoryRouter::new();
    let store = Arc::new(MemorySessionStore::new());
    let mut iframes = IframeRegistry::with_key(store, config.iframe_storage_key.clone());
    let mut registry = RouteRegistry::from_config(config, resolver);

    let source = JsonFileMenuSource::new(menu);
    registry
        .register_from_source(&router, &source, roles, &mut iframes)
        .await
        .context("route registration failed")?;

    let output = RegisterOutput {
        routes: router.routes(),
        iframes: iframes.get_all().to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn cmd_check(config: &Config, path: &str, menu: PathBuf, roles: &[String]) -> Result<()> {
    let source = JsonFileMenuSource::new(menu);
    let menus = MenuProcessor::new(config.access_mode)
        .load(&source, roles)
        .await
        .context("failed to process menu")?;

    let check = validate_path(path, &menus, &config.home_path);
    if check.allowed {
        println!("allowed: {}", check.path);
    } else {
        println!("denied: redirect to {}", check.path);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
