//! Tasting sheet HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::services::cata::{CataFilter, CataService, SubmitCataInput};
use crate::AppState;
use shared::scoring::Discipline;

/// Submit a tasting sheet
pub async fn submit_cata(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<SubmitCataInput>,
) -> impl IntoResponse {
    let service = CataService::new(state.db.clone());

    match service.submit_cata(user.user_id, input).await {
        Ok(cata) => (StatusCode::CREATED, Json(cata)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get a specific tasting sheet
pub async fn get_cata(
    State(state): State<AppState>,
    Path(cata_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = CataService::new(state.db.clone());

    match service.get_cata(cata_id).await {
        Ok(cata) => (StatusCode::OK, Json(cata)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// List still wine sheets
pub async fn list_catas_vino(
    State(state): State<AppState>,
    Query(filter): Query<CataFilter>,
) -> impl IntoResponse {
    list_catas(state, Discipline::StillWine, filter).await
}

/// List spirits sheets
pub async fn list_catas_espirituosos(
    State(state): State<AppState>,
    Query(filter): Query<CataFilter>,
) -> impl IntoResponse {
    list_catas(state, Discipline::Spirits, filter).await
}

async fn list_catas(
    state: AppState,
    discipline: Discipline,
    filter: CataFilter,
) -> axum::response::Response {
    let service = CataService::new(state.db.clone());

    match service.get_catas(discipline, filter).await {
        Ok(catas) => {
            (StatusCode::OK, Json(serde_json::json!({ "catas": catas }))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
