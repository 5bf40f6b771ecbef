//! Route registration error types with actionable messages.

use thiserror::Error;

/// Errors raised while turning a menu tree into routes.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The menu tree failed structural validation. Every error is listed.
    #[error("route validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    /// Nothing was left to register after filtering and collapsing.
    #[error("menu list is empty after processing, the session may need to log in again")]
    EmptyMenu,

    /// The menu source could not produce a tree.
    #[error("failed to load menu list: {details}")]
    MenuSource { details: String },

    /// No view module matched a component path.
    #[error("component '{path}' not found, tried: {}", candidates.join(", "))]
    ComponentNotFound {
        path: String,
        candidates: Vec<String>,
    },

    /// The session store rejected a read or write.
    #[error("session storage key '{key}': {details}")]
    Storage { key: String, details: String },
}

impl RouteError {
    /// Create a validation error from accumulated messages.
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    /// Create a storage error.
    pub fn storage(key: impl Into<String>, details: impl ToString) -> Self {
        Self::Storage {
            key: key.into(),
            details: details.to_string(),
        }
    }
}

/// Result type alias using RouteError.
pub type RouteResult<T> = Result<T, RouteError>;
