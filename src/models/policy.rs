//! Privacy policy model, effectively a singleton document.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

/// `lastUpdated` is the client-owned effective date of the policy text, not a
/// storage timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyPolicy {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating the privacy policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrivacyPolicyRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
}

impl CreatePrivacyPolicyRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.title, "title")?;
        require_text(&self.content, "content")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}
