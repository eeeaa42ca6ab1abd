//! Banner routes, backed by the relational table store.
//!
//! Deletes on this backend carry no existence signal, so deleting a missing
//! banner still answers success.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{Banner, CreateBannerRequest};
use crate::AppState;

/// POST /api/banners/create
pub async fn create_banner(
    State(state): State<AppState>,
    Json(request): Json<CreateBannerRequest>,
) -> ApiResult<Banner> {
    request.validate()?;

    let location = state.config.collections.banners.clone();
    let record = state.stores.table.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/banners/get
pub async fn get_banner(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<Banner> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.banners);

    let record = state
        .stores
        .table
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Banner not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/banners/update
pub async fn update_banner(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Banner> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.banners);

    let record = state
        .stores
        .table
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("Banner"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/banners/delete
pub async fn delete_banner(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.banners);

    state.stores.table.delete_by_id(&location, &id).await?;
    Ok(Ack::ok())
}
