//! Contact email settings, a singleton document.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    pub id: String,
    pub email1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email3: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating the email settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmailSettingsRequest {
    #[serde(default)]
    pub email1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email3: Option<String>,
}

impl CreateEmailSettingsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.email1, "email1")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}
