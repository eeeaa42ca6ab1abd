//! News routes, backed by the relational table store.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreateNewsRequest, News};
use crate::AppState;

/// POST /api/news/create
pub async fn create_news(
    State(state): State<AppState>,
    Json(request): Json<CreateNewsRequest>,
) -> ApiResult<News> {
    request.validate()?;

    let location = state.config.collections.news.clone();
    let record = state.stores.table.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/news/get
pub async fn get_news(State(state): State<AppState>, Json(body): Json<IdBody>) -> ApiResult<News> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.news);

    let record = state
        .stores
        .table
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("News article not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/news/update
pub async fn update_news(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<News> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.news);

    let record = state
        .stores
        .table
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("News article"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/news/delete
pub async fn delete_news(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.news);

    state.stores.table.delete_by_id(&location, &id).await?;
    Ok(Ack::ok())
}
