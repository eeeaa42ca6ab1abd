//! Region routes, backed by the embedded document store.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreateRegionRequest, Region};
use crate::AppState;

/// POST /api/regions/create
pub async fn create_region(
    State(state): State<AppState>,
    Json(request): Json<CreateRegionRequest>,
) -> ApiResult<Region> {
    request.validate()?;

    let location = state.config.collections.regions.clone();
    let record = state
        .stores
        .document
        .create(&location, request.fields()?)
        .await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/regions/get
pub async fn get_region(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<Region> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.regions);

    let record = state
        .stores
        .document
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Region not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/regions/update
pub async fn update_region(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Region> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.regions);

    let record = state
        .stores
        .document
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("Region"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/regions/delete
pub async fn delete_region(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.regions);

    state
        .stores
        .document
        .delete_by_id(&location, &id)
        .await
        .map_err(entity_not_found("Region"))?;
    Ok(Ack::ok())
}
