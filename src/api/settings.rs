//! Email settings routes, backed by the embedded document store.
//!
//! Reads go through the time-boxed cache slot; the slot is also cleared on
//! every mutation, including failed deletes, so a record is never cached
//! across a delete error.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreateEmailSettingsRequest, EmailSettings};
use crate::AppState;

/// POST /api/email-settings/create
pub async fn create_email_settings(
    State(state): State<AppState>,
    Json(request): Json<CreateEmailSettingsRequest>,
) -> ApiResult<EmailSettings> {
    request.validate()?;

    let location = state.config.collections.email_settings.clone();
    let result = state
        .stores
        .document
        .create(&location, request.fields()?)
        .await;
    state.caches.settings.clear();

    Ok(Envelope::record(into_model(result?)?))
}

/// POST /api/email-settings/get
pub async fn get_email_settings(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<EmailSettings> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.email_settings);

    if let Some(cached) = state.caches.settings.get() {
        let settings = serde_json::from_value(cached)?;
        return Ok(Envelope::record(settings));
    }

    let record = state
        .stores
        .document
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Email settings not found".to_string()))?;
    let settings: EmailSettings = into_model(record)?;

    state
        .caches
        .settings
        .put(serde_json::to_value(&settings)?);
    Ok(Envelope::record(settings))
}

/// POST /api/email-settings/update
pub async fn update_email_settings(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<EmailSettings> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.email_settings);

    let result = state
        .stores
        .document
        .update_by_id(&location, &id, updates)
        .await;
    state.caches.settings.clear();

    let record = result.map_err(entity_not_found("Email settings"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/email-settings/delete
pub async fn delete_email_settings(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.email_settings);

    let result = state.stores.document.delete_by_id(&location, &id).await;
    state.caches.settings.clear();

    result.map_err(entity_not_found("Email settings"))?;
    Ok(Ack::ok())
}
