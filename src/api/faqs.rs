//! FAQ and store-FAQ routes, backed by the admin document store.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreateFaqRequest, CreateStoreFaqRequest, Faq, StoreFaq};
use crate::AppState;

/// POST /api/faqs/create
pub async fn create_faq(
    State(state): State<AppState>,
    Json(request): Json<CreateFaqRequest>,
) -> ApiResult<Faq> {
    request.validate()?;

    let location = state.config.collections.faqs.clone();
    let record = state.stores.admin.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/faqs/get
pub async fn get_faq(State(state): State<AppState>, Json(body): Json<IdBody>) -> ApiResult<Faq> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.faqs);

    let record = state
        .stores
        .admin
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/faqs/update
pub async fn update_faq(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<Faq> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.faqs);

    let record = state
        .stores
        .admin
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("FAQ"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/faqs/delete
pub async fn delete_faq(State(state): State<AppState>, Json(body): Json<IdBody>) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.faqs);

    state
        .stores
        .admin
        .delete_by_id(&location, &id)
        .await
        .map_err(entity_not_found("FAQ"))?;
    Ok(Ack::ok())
}

/// POST /api/store-faqs/create
pub async fn create_store_faq(
    State(state): State<AppState>,
    Json(request): Json<CreateStoreFaqRequest>,
) -> ApiResult<StoreFaq> {
    request.validate()?;

    let location = state.config.collections.store_faqs.clone();
    let record = state.stores.admin.create(&location, request.fields()?).await?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/store-faqs/get
pub async fn get_store_faq(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<StoreFaq> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.store_faqs);

    let record = state
        .stores
        .admin
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store FAQ not found".to_string()))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/store-faqs/update
pub async fn update_store_faq(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<StoreFaq> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.store_faqs);

    let record = state
        .stores
        .admin
        .update_by_id(&location, &id, updates)
        .await
        .map_err(entity_not_found("Store FAQ"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/store-faqs/delete
pub async fn delete_store_faq(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.store_faqs);

    state
        .stores
        .admin
        .delete_by_id(&location, &id)
        .await
        .map_err(entity_not_found("Store FAQ"))?;
    Ok(Ack::ok())
}
