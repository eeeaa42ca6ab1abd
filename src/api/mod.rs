//! CRUD route handlers.
//!
//! Every route is a POST with a JSON body and answers with the
//! `{success, ...}` envelope from the frontend contract. Request bodies are
//! validated explicitly before any backend call.

mod banners;
mod categories;
mod events;
mod faqs;
mod logos;
mod news;
mod policy;
mod regions;
mod settings;

pub use banners::*;
pub use categories::*;
pub use events::*;
pub use faqs::*;
pub use logos::*;
pub use news::*;
pub use policy::*;
pub use regions::*;
pub use settings::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::store::{normalize_record, RawRecord};

/// Success envelope; entity fields are flattened next to `success`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub record: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn record(record: T) -> Self {
        Self {
            success: true,
            record,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Bare success envelope for deletes.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type for record-bearing routes.
pub type ApiResult<T> = Result<Envelope<T>, AppError>;

/// Response type for delete routes.
pub type AckResult = Result<Ack, AppError>;

/// Body of get and delete requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdBody {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

/// Body of update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updates: Option<RawRecord>,
    #[serde(default)]
    pub collection: Option<String>,
}

/// Extract a required, non-blank id or fail with 400 before touching any
/// backend.
pub(crate) fn require_id(id: Option<String>) -> Result<String, AppError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(AppError::Validation("id is required".to_string())),
    }
}

/// Extract the update field map, stripping backend-managed fields the client
/// must not set.
pub(crate) fn require_updates(updates: Option<RawRecord>) -> Result<RawRecord, AppError> {
    let mut updates =
        updates.ok_or_else(|| AppError::Validation("updates is required".to_string()))?;

    for managed in ["id", "_id", "createdAt", "updatedAt"] {
        updates.remove(managed);
    }

    if updates.is_empty() {
        return Err(AppError::Validation(
            "updates must contain at least one field".to_string(),
        ));
    }

    Ok(updates)
}

/// Per-request collection override, else the configured default.
pub(crate) fn resolve_location(override_location: Option<String>, default_location: &str) -> String {
    override_location
        .filter(|location| !location.trim().is_empty())
        .unwrap_or_else(|| default_location.to_string())
}

/// Rewrite an adapter-level `NotFound` into the entity-level message the
/// frontend displays.
pub(crate) fn entity_not_found(entity: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::NotFound(_) => AppError::NotFound(format!("{} not found", entity)),
        other => other,
    }
}

/// Normalize a raw record and deserialize it into the typed entity model.
pub(crate) fn into_model<T: DeserializeOwned>(raw: RawRecord) -> Result<T, AppError> {
    serde_json::from_value(Value::Object(normalize_record(raw))).map_err(|e| {
        tracing::error!("stored record does not match the entity schema: {}", e);
        AppError::Backend(format!("stored record is malformed: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_id_rejects_missing_and_blank() {
        assert!(require_id(None).is_err());
        assert!(require_id(Some("   ".to_string())).is_err());
        assert_eq!(require_id(Some("abc".to_string())).unwrap(), "abc");
    }

    #[test]
    fn test_require_updates_strips_managed_fields() {
        let updates = json!({
            "name": "New",
            "id": "evil",
            "_id": "evil",
            "createdAt": 1,
            "updatedAt": 2
        });
        let updates = require_updates(updates.as_object().cloned()).unwrap();

        assert_eq!(updates.len(), 1);
        assert_eq!(updates["name"], json!("New"));
    }

    #[test]
    fn test_require_updates_rejects_empty_after_strip() {
        let updates = json!({ "id": "only-managed" });
        assert!(require_updates(updates.as_object().cloned()).is_err());
        assert!(require_updates(None).is_err());
    }

    #[test]
    fn test_resolve_location_prefers_override() {
        assert_eq!(
            resolve_location(Some("faqs-other".into()), "faqs-portal"),
            "faqs-other"
        );
        assert_eq!(resolve_location(None, "faqs-portal"), "faqs-portal");
        assert_eq!(resolve_location(Some("  ".into()), "faqs-portal"), "faqs-portal");
    }
}
