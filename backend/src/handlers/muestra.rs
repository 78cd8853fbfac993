//! Sample management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::services::muestra::{CreateMuestraInput, MuestraService, UpdateMuestraInput};
use crate::AppState;

/// List all samples
pub async fn list_muestras(State(state): State<AppState>) -> impl IntoResponse {
    let service = MuestraService::new(state.db.clone());

    match service.get_muestras().await {
        Ok(muestras) => {
            (StatusCode::OK, Json(serde_json::json!({ "muestras": muestras }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Get a specific sample
pub async fn get_muestra(
    State(state): State<AppState>,
    Path(muestra_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MuestraService::new(state.db.clone());

    match service.get_muestra(muestra_id).await {
        Ok(muestra) => (StatusCode::OK, Json(muestra)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new sample
pub async fn create_muestra(
    State(state): State<AppState>,
    Json(input): Json<CreateMuestraInput>,
) -> impl IntoResponse {
    let service = MuestraService::new(state.db.clone());

    match service.create_muestra(input).await {
        Ok(muestra) => (StatusCode::CREATED, Json(muestra)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update a sample
pub async fn update_muestra(
    State(state): State<AppState>,
    Path(muestra_id): Path<Uuid>,
    Json(input): Json<UpdateMuestraInput>,
) -> impl IntoResponse {
    let service = MuestraService::new(state.db.clone());

    match service.update_muestra(muestra_id, input).await {
        Ok(muestra) => (StatusCode::OK, Json(muestra)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete a sample
pub async fn delete_muestra(
    State(state): State<AppState>,
    Path(muestra_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = MuestraService::new(state.db.clone());

    match service.delete_muestra(muestra_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
