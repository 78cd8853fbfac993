//! Tasting round HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::tanda::{CambiarEstadoInput, CreateTandaInput, TandaService, UpdateTandaInput};
use crate::AppState;

/// List all tasting rounds
pub async fn list_tandas(State(state): State<AppState>) -> impl IntoResponse {
    let service = TandaService::new(state.db.clone());

    match service.get_tandas().await {
        Ok(tandas) => {
            (StatusCode::OK, Json(serde_json::json!({ "tandas": tandas }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific tasting round
pub async fn get_tanda(
    State(state): State<AppState>,
    Path(tanda_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = TandaService::new(state.db.clone());

    match service.get_tanda(tanda_id).await {
        Ok(tanda) => (StatusCode::OK, Json(tanda)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new tasting round
pub async fn create_tanda(
    State(state): State<AppState>,
    Json(input): Json<CreateTandaInput>,
) -> impl IntoResponse {
    let service = TandaService::new(state.db.clone());

    match service.create_tanda(input).await {
        Ok(tanda) => (StatusCode::CREATED, Json(tanda)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a tasting round
pub async fn update_tanda(
    State(state): State<AppState>,
    Path(tanda_id): Path<Uuid>,
    Json(input): Json<UpdateTandaInput>,
) -> impl IntoResponse {
    let service = TandaService::new(state.db.clone());

    match service.update_tanda(tanda_id, input).await {
        Ok(tanda) => (StatusCode::OK, Json(tanda)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Transition a tasting round to a new state
pub async fn cambiar_estado(
    State(state): State<AppState>,
    Path(tanda_id): Path<Uuid>,
    Json(input): Json<CambiarEstadoInput>,
) -> impl IntoResponse {
    let service = TandaService::new(state.db.clone());

    match service.cambiar_estado(tanda_id, input.estado).await {
        Ok(tanda) => (StatusCode::OK, Json(tanda)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a tasting round
pub async fn delete_tanda(
    State(state): State<AppState>,
    Path(tanda_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = TandaService::new(state.db.clone());

    match service.delete_tanda(tanda_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
