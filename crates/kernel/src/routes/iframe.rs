//! Iframe route records.
//!
//! Iframe routes all render through one generic surface, which looks up the
//! external target by route path at render time. The table lives for the
//! session and must be cleared on logout so one user's targets never leak
//! into the next session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RouteError, RouteResult};
use crate::menu::MenuMeta;
use crate::session::SessionStore;

/// Default session storage key.
pub const DEFAULT_STORAGE_KEY: &str = "iframeRoutes";

/// An iframe-bearing route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IframeRecord {
    pub path: String,
    pub meta: MenuMeta,
}

impl IframeRecord {
    /// The external URL the surface should load.
    pub fn target(&self) -> Option<&str> {
        self.meta.link.as_deref()
    }
}

/// Session-scoped table of iframe routes, keyed by path.
pub struct IframeRegistry {
    records: Vec<IframeRecord>,
    store: Arc<dyn SessionStore>,
    key: String,
}

impl IframeRegistry {
    /// Create an empty registry persisting under [`DEFAULT_STORAGE_KEY`].
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            store,
            key: key.into(),
        }
    }

    /// Add a record. A record with the same path is kept as is.
    pub fn add(&mut self, record: IframeRecord) -> bool {
        if self.records.iter().any(|r| r.path == record.path) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn get_all(&self) -> &[IframeRecord] {
        &self.records
    }

    pub fn find_by_path(&self, path: &str) -> Option<&IframeRecord> {
        self.records.iter().find(|r| r.path == path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record, in memory and in the session store.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Err(e) = self.store.remove_item(&self.key) {
            warn!(key = %self.key, error = %e, "failed to remove iframe routes from session");
        }
        debug!(key = %self.key, "iframe routes cleared");
    }

    /// Persist the records. Does nothing when there are none.
    pub fn save(&self) -> RouteResult<()> {
        if self.records.is_empty() {
            return Ok(());
        }
        let json =
            serde_json::to_string(&self.records).map_err(|e| RouteError::storage(&self.key, e))?;
        self.store
            .set_item(&self.key, &json)
            .map_err(|e| RouteError::storage(&self.key, format!("{e:#}")))?;
        debug!(key = %self.key, count = self.records.len(), "iframe routes saved");
        Ok(())
    }

    /// Replace the records with the ones in the session store.
    ///
    /// A missing key, unreadable storage or corrupt data all leave the table
    /// empty; the last two are logged.
    pub fn load(&mut self) {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.records.clear();
                return;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read iframe routes from session");
                self.records.clear();
                return;
            }
        };

        match serde_json::from_str::<Vec<IframeRecord>>(&raw) {
            Ok(records) => {
                self.records.clear();
                for record in records {
                    self.add(record);
                }
                debug!(key = %self.key, count = self.records.len(), "iframe routes loaded");
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to parse iframe routes, starting empty");
                self.records.clear();
            }
        }
    }
}

impl std::fmt::Debug for IframeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IframeRegistry")
            .field("key", &self.key)
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
