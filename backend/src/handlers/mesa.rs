//! Tasting table HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::mesa::{CreateMesaInput, MesaService, UpdateMesaInput};
use crate::AppState;

/// List all tables
pub async fn list_mesas(State(state): State<AppState>) -> impl IntoResponse {
    let service = MesaService::new(state.db.clone());

    match service.get_mesas().await {
        Ok(mesas) => {
            (StatusCode::OK, Json(serde_json::json!({ "mesas": mesas }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific table
pub async fn get_mesa(
    State(state): State<AppState>,
    Path(mesa_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MesaService::new(state.db.clone());

    match service.get_mesa(mesa_id).await {
        Ok(mesa) => (StatusCode::OK, Json(mesa)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new table
pub async fn create_mesa(
    State(state): State<AppState>,
    Json(input): Json<CreateMesaInput>,
) -> impl IntoResponse {
    let service = MesaService::new(state.db.clone());

    match service.create_mesa(input).await {
        Ok(mesa) => (StatusCode::CREATED, Json(mesa)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a table
pub async fn update_mesa(
    State(state): State<AppState>,
    Path(mesa_id): Path<Uuid>,
    Json(input): Json<UpdateMesaInput>,
) -> impl IntoResponse {
    let service = MesaService::new(state.db.clone());

    match service.update_mesa(mesa_id, input).await {
        Ok(mesa) => (StatusCode::OK, Json(mesa)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a table
pub async fn delete_mesa(
    State(state): State<AppState>,
    Path(mesa_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MesaService::new(state.db.clone());

    match service.delete_mesa(mesa_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
