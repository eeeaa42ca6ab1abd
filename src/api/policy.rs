//! Privacy policy routes, backed by the embedded document store.
//!
//! Reads go through the key-validated cache slot; every mutating route
//! clears it, which is the only thing that bounds its staleness.

use axum::{extract::State, Json};

use super::{
    entity_not_found, into_model, require_id, require_updates, resolve_location, Ack, AckResult,
    ApiResult, Envelope, IdBody, UpdateBody,
};
use crate::errors::AppError;
use crate::models::{CreatePrivacyPolicyRequest, PrivacyPolicy};
use crate::AppState;

/// POST /api/privacy-policy/create
pub async fn create_privacy_policy(
    State(state): State<AppState>,
    Json(request): Json<CreatePrivacyPolicyRequest>,
) -> ApiResult<PrivacyPolicy> {
    request.validate()?;

    let location = state.config.collections.privacy_policies.clone();
    let result = state
        .stores
        .document
        .create(&location, request.fields()?)
        .await;
    state.caches.policy.clear();

    Ok(Envelope::record(into_model(result?)?))
}

/// POST /api/privacy-policy/get
pub async fn get_privacy_policy(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> ApiResult<PrivacyPolicy> {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.privacy_policies);

    if let Some(cached) = state.caches.policy.get(&id) {
        let policy = serde_json::from_value(cached)?;
        return Ok(Envelope::record(policy));
    }

    let record = state
        .stores
        .document
        .find_by_id(&location, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Privacy policy not found".to_string()))?;
    let policy: PrivacyPolicy = into_model(record)?;

    state.caches.policy.put(&id, serde_json::to_value(&policy)?);
    Ok(Envelope::record(policy))
}

/// POST /api/privacy-policy/update
pub async fn update_privacy_policy(
    State(state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> ApiResult<PrivacyPolicy> {
    let id = require_id(body.id)?;
    let updates = require_updates(body.updates)?;
    let location = resolve_location(body.collection, &state.config.collections.privacy_policies);

    let result = state
        .stores
        .document
        .update_by_id(&location, &id, updates)
        .await;
    state.caches.policy.clear();

    let record = result.map_err(entity_not_found("Privacy policy"))?;
    Ok(Envelope::record(into_model(record)?))
}

/// POST /api/privacy-policy/delete
pub async fn delete_privacy_policy(
    State(state): State<AppState>,
    Json(body): Json<IdBody>,
) -> AckResult {
    let id = require_id(body.id)?;
    let location = resolve_location(body.collection, &state.config.collections.privacy_policies);

    // clear even when the delete fails, so a stale policy is never served
    // after a delete error
    let result = state.stores.document.delete_by_id(&location, &id).await;
    state.caches.policy.clear();

    result.map_err(entity_not_found("Privacy policy"))?;
    Ok(Ack::ok())
}
