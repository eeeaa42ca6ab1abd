//! Network region model.

use serde::{Deserialize, Serialize};

use super::{require_text, to_fields};
use crate::errors::AppError;
use crate::store::RawRecord;

/// A region of the store network.
///
/// `networkId` is unique within the store; the document backend rejects
/// duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    pub name: String,
    pub network_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for creating a region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegionRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CreateRegionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text(&self.name, "name")?;
        require_text(&self.network_id, "networkId")
    }

    pub fn fields(&self) -> Result<RawRecord, AppError> {
        to_fields(self)
    }
}

fn default_active() -> bool {
    true
}
