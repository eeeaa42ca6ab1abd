//! Category routes, backed by the relational table store.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{Category, CreateCategoryRequest};
use crate::AppState;

/// POST /api/categories/create
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<Category> {
    request.validate()?;

    let location = state.config.collections.categories.clone();
    let record = state.stores.table.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/categories/get
pub async fn get_category(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<Category> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.categories);

    let record = state
        .stores
        .table
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/categories/update
pub async fn update_category(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Category> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.categories);

    let record = state
        .stores
        .table
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("Category"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/categories/delete
pub async fn delete_category(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.categories);

    // no existence check on this backend; success regardless
    state.stores.table.delete_by_id(&location, &id).await?;
    Ok(Ack::ok())
}
