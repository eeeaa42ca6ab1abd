//! Logo routes, backed by the admin document store.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreateLogoRequest, Logo};
use crate::AppState;

/// POST /api/logos/create
pub async fn create_logo(
    State(state): State<AppState>,
    Json(request): Json<CreateLogoRequest>,
) -> ApiResult<Logo> {
    request.validate()?;

    let location = state.config.collections.logos.clone();
    let record = state.stores.admin.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/logos/get
pub async fn get_logo(State(state): State<AppState>, Json(body): Json<IdBody>) -> ApiResult<Logo> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.logos);

    let record = state
        .stores
        .admin
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Logo not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/logos/update
pub async fn update_logo(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Logo> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.logos);

    let record = state
        .stores
        .admin
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("Logo"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/logos/delete
pub async fn delete_logo(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.logos);

    state
        .stores
        .admin
        .delete_by_id(&location, &id)
        .await
        .map_err(entity_not_found("Logo"))?;
    Ok(Ack::ok())
}
