//! Homepage banner model.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

/// A banner displayed on the portal landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub image_url: String,
    /// Display ordering; ties are permitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_position: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating a banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBannerRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_position: Option<i64>,
}

impl CreateBannerRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.title, "title")?;
        require_text(&self.image_url, "imageUrl")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}
