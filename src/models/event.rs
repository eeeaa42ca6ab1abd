//! Promotional event model.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

/// A time-bounded event promoted on the portal.
///
/// `startDate` and `endDate` are client-owned epoch-millisecond values; the
/// backend stores them as given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    pub start_date: i64,
    pub end_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_details: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<i64>,
    #[serde(default)]
    pub end_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_details: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.title, "title")?;
        if self.start_date.is_none() || self.end_date.is_none() {
            return Err(AppError::Validation(
                "startDate and endDate are required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}
