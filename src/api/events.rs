//! Event routes, backed by the admin document store.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreateEventRequest, Event};
use crate::AppState;

/// POST /api/events/create
pub async fn create_event(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Event> {
    request.validate()?;

    let location = state.config.collections.events.clone();
    let record = state.stores.admin.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/events/get
pub async fn get_event(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<Event> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.events);

    let record = state
        .stores
        .admin
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/events/update
pub async fn update_event(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Event> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.events);

    let record = state
        .stores
        .admin
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("Event"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/events/delete
pub async fn delete_event(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.events);

    state
        .stores
        .admin
        .delete_by_id(&location, &id)
        .await
        .map_err(entity_not_found("Event"))?;
    Ok(Ack::ok())
}
