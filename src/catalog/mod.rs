//! # Act Catalog
//!
//! Read-only reference data: the competing acts of each show. Services only depend
//! on the [`ActCatalog`] trait; [`JsonActCatalog`] is the bundled file-backed source.

pub mod json;

use async_trait::async_trait;
use thiserror::Error;

use crate::error::StoreResult;
use crate::models::{Act, EventType};

pub use json::JsonActCatalog;

/// Failures while loading a catalog source
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {error}")]
    Read { path: String, error: String },

    #[error("Failed to parse catalog file {path}: {error}")]
    Parse { path: String, error: String },

    #[error("Invalid act '{act_id}': {reason}")]
    InvalidAct { act_id: String, reason: String },

    #[error("Duplicate act id '{0}'")]
    DuplicateAct(String),
}

#[async_trait]
pub trait ActCatalog: Send + Sync {
    /// Acts of one show in running order, or the whole catalog for `None`
    async fn list_acts(&self, event_type: Option<EventType>) -> StoreResult<Vec<Act>>;
}
