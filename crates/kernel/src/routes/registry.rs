//! Route registry - validates menu trees and registers them with the router.
//!
//! Registration happens at most once per session. The registry keeps the
//! removal handle of every route it added so logout can tear them down.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::component::{ComponentLoader, ComponentResolver};
use super::iframe::IframeRegistry;
use super::router::{LiveRouter, RemovalHandle};
use super::transformer::RouteTransformer;
use super::validator::RouteValidator;
use crate::config::Config;
use crate::error::{RouteError, RouteResult};
use crate::menu::{MenuNode, MenuProcessor, MenuSource};

/// Owns registration state for one session.
#[derive(Debug)]
pub struct RouteRegistry {
    loader: ComponentLoader,
    validator: RouteValidator,
    processor: MenuProcessor,
    removals: Vec<RemovalHandle>,
    registered: bool,
}

impl RouteRegistry {
    /// Create a registry with default validation and frontend processing.
    pub fn new(loader: ComponentLoader) -> Self {
        Self {
            loader,
            validator: RouteValidator::new(),
            processor: MenuProcessor::default(),
            removals: Vec::new(),
            registered: false,
        }
    }

    /// Create a registry configured from [`Config`].
    pub fn from_config(config: &Config, resolver: Arc<dyn ComponentResolver>) -> Self {
        Self::new(ComponentLoader::new(resolver))
            .with_validator(RouteValidator::new().with_strict_names(config.strict_route_names))
            .with_processor(MenuProcessor::new(config.access_mode))
    }

    pub fn with_validator(mut self, validator: RouteValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_processor(mut self, processor: MenuProcessor) -> Self {
        self.processor = processor;
        self
    }

    /// Validate and register a processed menu tree.
    ///
    /// Returns the number of top-level routes added. Does nothing once
    /// registered. Validation completes before the router is touched, so a
    /// failed registration leaves the router unchanged.
    pub fn register(
        &mut self,
        router: &dyn LiveRouter,
        menus: &[MenuNode],
        iframes: &mut IframeRegistry,
    ) -> RouteResult<usize> {
        if self.registered {
            debug!("routes already registered, skipping");
            return Ok(0);
        }

        let report = self.validator.validate(menus);
        for warning in &report.warnings {
            debug!(warning = %warning, "route validation warning");
        }
        if !report.valid {
            error!(errors = report.errors.len(), "route validation failed");
            return Err(RouteError::validation(report.errors));
        }

        let mut transformer = RouteTransformer::new(&self.loader, iframes);
        let mut added = 0;
        for menu in menus {
            if menu.name.is_empty() {
                warn!(path = %menu.path, "skipping unnamed top-level menu");
                continue;
            }
            if router.has_route(&menu.name) {
                warn!(
                    name = %menu.name,
                    path = %menu.path,
                    "route name already registered, skipping"
                );
                continue;
            }
            let route = transformer.transform(menu);
            self.removals.push(router.add_route(route));
            added += 1;
        }

        self.registered = true;
        if let Err(e) = iframes.save() {
            warn!(error = %e, "failed to persist iframe routes");
        }

        info!(routes = added, iframes = iframes.len(), "dynamic routes registered");
        Ok(added)
    }

    /// Fetch, process and register a menu tree.
    ///
    /// The source is not consulted once routes are registered.
    pub async fn register_from_source(
        &mut self,
        router: &dyn LiveRouter,
        source: &dyn MenuSource,
        roles: &[String],
        iframes: &mut IframeRegistry,
    ) -> RouteResult<usize> {
        if self.registered {
            debug!("routes already registered, skipping menu fetch");
            return Ok(0);
        }
        let menus = self.processor.load(source, roles).await?;
        self.register(router, &menus, iframes)
    }

    /// Remove every route this registry added.
    pub fn unregister(&mut self) {
        let count = self.removals.len();
        for handle in self.removals.drain(..) {
            handle.remove();
        }
        self.registered = false;
        if count > 0 {
            info!(routes = count, "dynamic routes removed");
        }
    }

    /// Logout teardown: remove routes and forget iframe records.
    pub fn reset(&mut self, iframes: &mut IframeRegistry) {
        self.unregister();
        iframes.clear();
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Mark routes as registered without adding any.
    ///
    /// Only for suppressing retries after a failed attempt (for example an
    /// auth redirect mid-registration). Navigation to dynamic routes will not
    /// resolve until [`unregister`](Self::unregister) and a real registration.
    pub fn mark_as_registered(&mut self) {
        warn!("routes marked as registered without registration");
        self.registered = true;
    }

    /// Number of top-level routes currently held.
    pub fn route_count(&self) -> usize {
        self.removals.len()
    }
}
