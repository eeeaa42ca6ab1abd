//! Storage backends for the portal entities.
//!
//! Three independent backends implement the same record-store capability: an
//! embedded document store, an admin-privileged document API client, and a
//! relational REST client. Route handlers depend only on the capability and
//! select a backend per entity type.

mod admin;
mod document;
mod normalize;
mod table;

pub use admin::AdminDocStore;
pub use document::DocumentStore;
pub use normalize::normalize_record;
pub use table::TableStore;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::AppError;

/// A raw stored record before normalization.
pub type RawRecord = Map<String, Value>;

/// CRUD capability over one backend.
///
/// `location` selects the collection or table an operation targets. The
/// underlying client is initialized lazily, once, and reused; it is never
/// re-created per request.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record and return it with its backend-assigned
    /// identifier and timestamps.
    async fn create(&self, location: &str, fields: RawRecord) -> Result<RawRecord, AppError>;

    /// Fetch a record by id. `Ok(None)` means the record does not exist.
    async fn find_by_id(&self, location: &str, id: &str) -> Result<Option<RawRecord>, AppError>;

    /// Merge `fields` into the record, re-stamping `updatedAt` to the current
    /// server time, and return the updated record.
    async fn update_by_id(
        &self,
        location: &str,
        id: &str,
        fields: RawRecord,
    ) -> Result<RawRecord, AppError>;

    /// Delete a record by id. Backends that can distinguish a missing target
    /// return `NotFound`; backends that cannot report success regardless.
    async fn delete_by_id(&self, location: &str, id: &str) -> Result<(), AppError>;
}

/// The three process-wide backends, selected per entity type.
pub struct Stores {
    pub document: Arc<dyn RecordStore>,
    pub admin: Arc<dyn RecordStore>,
    pub table: Arc<dyn RecordStore>,
}

/// Log a backend failure with its operation context and wrap it for the
/// response envelope.
pub(crate) fn backend_error(context: &str, err: impl std::fmt::Display) -> AppError {
    tracing::error!("{}: {}", context, err);
    AppError::Backend(format!("{}: {}", context, err))
}
