//! Admin-privileged document store client.
//!
//! Talks to the hosted document API with a service token. Documents live at
//! `{base}/{collection}/{id}`; the service reports a missing target with 404,
//! which maps to `NotFound`. Without credentials every operation fails fast
//! with a configuration error before any network call.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::{backend_error, RawRecord, RecordStore};
use crate::errors::AppError;

pub struct AdminDocStore {
    credentials: Option<AdminCredentials>,
    client: reqwest::Client,
}

struct AdminCredentials {
    base_url: String,
    token: String,
}

impl AdminDocStore {
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        let credentials = match (base_url, token) {
            (Some(base_url), Some(token)) => Some(AdminCredentials {
                base_url: base_url.trim_end_matches('/').to_string(),
                token,
            }),
            _ => None,
        };

        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Result<&AdminCredentials, AppError> {
        self.credentials.as_ref().ok_or_else(|| {
            tracing::error!("admin document store called without credentials");
            AppError::Configuration("admin document store is not configured".to_string())
        })
    }

    async fn parse_document(
        response: reqwest::Response,
        context: &str,
    ) -> Result<RawRecord, AppError> {
        response
            .json::<RawRecord>()
            .await
            .map_err(|e| backend_error(context, e))
    }
}

#[async_trait]
impl RecordStore for AdminDocStore {
    async fn create(&self, location: &str, fields: RawRecord) -> Result<RawRecord, AppError> {
        let creds = self.credentials()?;
        let url = format!("{}/{}", creds.base_url, location);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&creds.token)
            .json(&fields)
            .send()
            .await
            .map_err(|e| backend_error("admin store create failed", e))?;

        if !response.status().is_success() {
            return Err(backend_error(
                "admin store create failed",
                format!("status {}", response.status()),
            ));
        }

        Self::parse_document(response, "admin store returned a malformed document").await
    }

    async fn find_by_id(&self, location: &str, id: &str) -> Result<Option<RawRecord>, AppError> {
        let creds = self.credentials()?;
        let url = format!("{}/{}/{}", creds.base_url, location, id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&creds.token)
            .send()
            .await
            .map_err(|e| backend_error("admin store read failed", e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(backend_error(
                "admin store read failed",
                format!("status {}", response.status()),
            ));
        }

        let document =
            Self::parse_document(response, "admin store returned a malformed document").await?;
        Ok(Some(document))
    }

    async fn update_by_id(
        &self,
        location: &str,
        id: &str,
        mut fields: RawRecord,
    ) -> Result<RawRecord, AppError> {
        let creds = self.credentials()?;
        let url = format!("{}/{}/{}", creds.base_url, location, id);
        fields.insert(
            "updatedAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&creds.token)
            .json(&fields)
            .send()
            .await
            .map_err(|e| backend_error("admin store update failed", e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("document {} not found", id)));
        }
        if !response.status().is_success() {
            return Err(backend_error(
                "admin store update failed",
                format!("status {}", response.status()),
            ));
        }

        Self::parse_document(response, "admin store returned a malformed document").await
    }

    async fn delete_by_id(&self, location: &str, id: &str) -> Result<(), AppError> {
        let creds = self.credentials()?;
        let url = format!("{}/{}/{}", creds.base_url, location, id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&creds.token)
            .send()
            .await
            .map_err(|e| backend_error("admin store delete failed", e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("document {} not found", id)));
        }
        if !response.status().is_success() {
            return Err(backend_error(
                "admin store delete failed",
                format!("status {}", response.status()),
            ));
        }

        Ok(())
    }
}
