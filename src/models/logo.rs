//! Partner logo model.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_position: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating a logo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogoRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_position: Option<i64>,
}

impl CreateLogoRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.name, "name")?;
        require_text(&self.logo_url, "logoUrl")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}
