//! FAQ models: the site-wide FAQ list and per-store FAQ entries.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    /// Display ordering; ties are permitted
    pub order: i64,
    /// Visibility flag, not a deletion
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating an FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateFaqRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.question, "question")?;
        require_text(&self.answer, "answer")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}

/// An FAQ entry scoped to a single store, grouped by `storeId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreFaq {
    pub id: String,
    pub store_id: String,
    pub question: String,
    pub answer: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating a store FAQ entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoreFaqRequest {
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateStoreFaqRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.store_id, "storeId")?;
        require_text(&self.question, "question")?;
        require_text(&self.answer, "answer")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}

fn default_active() -> bool {
    true
}
