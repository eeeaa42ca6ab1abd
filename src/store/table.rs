//! Relational REST backend client.
//!
//! Speaks the PostgREST dialect: rows are addressed with `id=eq.{id}` filters
//! under `{base}/rest/v1/{table}`, and writes ask for the updated
//! representation back. Deletes carry no existence signal, so a delete of a
//! missing row still reports success.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use super::{backend_error, RawRecord, RecordStore};
use crate::errors::AppError;

pub struct TableStore {
    credentials: Option<TableCredentials>,
    client: reqwest::Client,
}

struct TableCredentials {
    base_url: String,
    service_key: String,
}

impl TableStore {
    pub fn new(base_url: Option<String>, service_key: Option<String>) -> Self {
        let credentials = match (base_url, service_key) {
            (Some(base_url), Some(service_key)) => Some(TableCredentials {
                base_url: base_url.trim_end_matches('/').to_string(),
                service_key,
            }),
            _ => None,
        };

        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> Result<&TableCredentials, AppError> {
        self.credentials.as_ref().ok_or_else(|| {
            tracing::error!("table store called without credentials");
            AppError::Configuration("table store is not configured".to_string())
        })
    }

    fn request(
        &self,
        method: reqwest::Method,
        creds: &TableCredentials,
        table: &str,
    ) -> reqwest::RequestBuilder {
        let url = format!("{}/rest/v1/{}", creds.base_url, table);
        self.client
            .request(method, url)
            .header("apikey", &creds.service_key)
            .bearer_auth(&creds.service_key)
    }

    async fn parse_rows(
        response: reqwest::Response,
        context: &str,
    ) -> Result<Vec<RawRecord>, AppError> {
        response
            .json::<Vec<RawRecord>>()
            .await
            .map_err(|e| backend_error(context, e))
    }
}

#[async_trait]
impl RecordStore for TableStore {
    async fn create(&self, location: &str, fields: RawRecord) -> Result<RawRecord, AppError> {
        let creds = self.credentials()?;
        let response = self
            .request(reqwest::Method::POST, creds, location)
            .header("Prefer", "return=representation")
            .json(&fields)
            .send()
            .await
            .map_err(|e| backend_error("table store insert failed", e))?;

        if !response.status().is_success() {
            return Err(backend_error(
                "table store insert failed",
                format!("status {}", response.status()),
            ));
        }

        let rows = Self::parse_rows(response, "table store returned malformed rows").await?;
        rows.into_iter().next().ok_or_else(|| {
            backend_error("table store insert failed", "empty representation returned")
        })
    }

    async fn find_by_id(&self, location: &str, id: &str) -> Result<Option<RawRecord>, AppError> {
        let creds = self.credentials()?;
        let response = self
            .request(reqwest::Method::GET, creds, location)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| backend_error("table store read failed", e))?;

        if !response.status().is_success() {
            return Err(backend_error(
                "table store read failed",
                format!("status {}", response.status()),
            ));
        }

        let rows = Self::parse_rows(response, "table store returned malformed rows").await?;
        Ok(rows.into_iter().next())
    }

    async fn update_by_id(
        &self,
        location: &str,
        id: &str,
        mut fields: RawRecord,
    ) -> Result<RawRecord, AppError> {
        let creds = self.credentials()?;
        fields.insert(
            "updatedAt".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let response = self
            .request(reqwest::Method::PATCH, creds, location)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&fields)
            .send()
            .await
            .map_err(|e| backend_error("table store update failed", e))?;

        if !response.status().is_success() {
            return Err(backend_error(
                "table store update failed",
                format!("status {}", response.status()),
            ));
        }

        let rows = Self::parse_rows(response, "table store returned malformed rows").await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("row {} not found", id)))
    }

    async fn delete_by_id(&self, location: &str, id: &str) -> Result<(), AppError> {
        let creds = self.credentials()?;
        let response = self
            .request(reqwest::Method::DELETE, creds, location)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| backend_error("table store delete failed", e))?;

        if !response.status().is_success() {
            return Err(backend_error(
                "table store delete failed",
                format!("status {}", response.status()),
            ));
        }

        // the backend does not report whether a row matched the filter
        Ok(())
    }
}
