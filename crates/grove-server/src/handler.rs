use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use grove_ledger::Ledger;
use grove_types::{IntentId, OrderId, Proof};

use crate::error::ApiError;
use crate::hooks::{spawn_after_confirm, ConfirmHook};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn Ledger>,
    pub hook: Arc<dyn ConfirmHook>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateIntentResponse {
    pub intent_id: IntentId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub intent_id: IntentId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub planting_id: OrderId,
}

#[derive(Debug, Deserialize)]
pub struct ProofQuery {
    pub planting_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub intents: usize,
    pub plantings: usize,
}

fn origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// POST /planting-intents
pub async fn create_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    let intent_id = state.ledger.create_intent(origin(&headers))?;
    Ok(Json(CreateIntentResponse { intent_id }))
}

/// POST /confirm
///
/// The body is parsed by hand so a missing or wrong `Content-Type` gets the
/// same treatment as any other unreadable payload.
pub async fn confirm_intent(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ConfirmResponse>, ApiError> {
    let request: ConfirmRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected confirmation payload");
        ApiError::InvalidInput(e.to_string())
    })?;

    let confirmation = state
        .ledger
        .confirm_intent(&request.intent_id, origin(&headers))?;

    // The order is committed at this point; a failed re-read only skips
    // the hook.
    if confirmation.newly_created {
        match state.ledger.order(&confirmation.order_id) {
            Ok(Some(order)) => spawn_after_confirm(Arc::clone(&state.hook), order),
            Ok(None) => tracing::warn!(
                order_id = %confirmation.order_id,
                "confirmed order vanished before hook dispatch"
            ),
            Err(e) => tracing::warn!(
                order_id = %confirmation.order_id,
                error = %e,
                "could not load confirmed order for hook dispatch"
            ),
        }
    }

    Ok(Json(ConfirmResponse {
        planting_id: confirmation.order_id,
    }))
}

/// GET /proofs?planting_id=
pub async fn get_proof(
    State(state): State<AppState>,
    Query(query): Query<ProofQuery>,
) -> Result<Json<Proof>, ApiError> {
    let order_id = query.planting_id.map(OrderId::from).ok_or(ApiError::OrderNotFound)?;
    Ok(Json(state.ledger.proof(&order_id)?))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        intents: state.ledger.intent_count()?,
        plantings: state.ledger.order_count()?,
    }))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
