use thiserror::Error;

/// Errors surfaced by the role catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("role '{0}' is not in the catalog")]
    UnknownRole(String),

    #[error("role catalog lock poisoned")]
    CatalogUnavailable,
}
