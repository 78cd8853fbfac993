//! Taster roster HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::catador::{CatadorService, CreateCatadorInput, UpdateCatadorInput};
use crate::AppState;

/// List all tasters
pub async fn list_catadores(State(state): State<AppState>) -> impl IntoResponse {
    let service = CatadorService::new(state.db.clone());

    match service.get_catadores().await {
        Ok(catadores) => {
            (StatusCode::OK, Json(serde_json::json!({ "catadores": catadores }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific taster
pub async fn get_catador(
    State(state): State<AppState>,
    Path(catador_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CatadorService::new(state.db.clone());

    match service.get_catador(catador_id).await {
        Ok(catador) => (StatusCode::OK, Json(catador)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new taster
pub async fn create_catador(
    State(state): State<AppState>,
    Json(input): Json<CreateCatadorInput>,
) -> impl IntoResponse {
    let service = CatadorService::new(state.db.clone());

    match service.create_catador(input).await {
        Ok(catador) => (StatusCode::CREATED, Json(catador)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a taster
pub async fn update_catador(
    State(state): State<AppState>,
    Path(catador_id): Path<Uuid>,
    Json(input): Json<UpdateCatadorInput>,
) -> impl IntoResponse {
    let service = CatadorService::new(state.db.clone());

    match service.update_catador(catador_id, input).await {
        Ok(catador) => (StatusCode::OK, Json(catador)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a taster
pub async fn delete_catador(
    State(state): State<AppState>,
    Path(catador_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CatadorService::new(state.db.clone());

    match service.delete_catador(catador_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
