//! Entity schemas for the portal content backend.
//!
//! Each entity has a response model matching the frontend contract and a
//! create payload that is validated explicitly before any backend call.

mod banner;
mod category;
mod event;
mod faq;
mod logo;
mod news;
mod policy;
mod region;
mod settings;

pub use banner::*;
pub use category::*;
pub use event::*;
pub use faq::*;
pub use logo::*;
pub use news::*;
pub use policy::*;
pub use region::*;
pub use settings::*;

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::store::RawRecord;

/// Serialize a create payload into the field map handed to a record store.
pub(crate) fn to_fields<T: Serialize>(value: &T) -> Result<RawRecord, AppError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Backend(
            "entity did not serialize to an object".to_string(),
        )),
    }
}

/// Reject a missing or blank required text field.
pub(crate) fn require_text(value: &Option<String>, field: &str) -> Result<(), AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}
