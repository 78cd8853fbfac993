//! Statistics and results export handlers

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::estadisticas::{
    EstadisticasFases, EstadisticasService, ResultadosFilter, ResumenEstadisticas,
};
use crate::AppState;
use shared::scoring::Discipline;

#[derive(Deserialize)]
pub struct ResultadosQuery {
    pub tanda_id: Option<Uuid>,
    pub format: Option<String>, // "json" or "csv"
}

/// Get the dashboard summary
pub async fn get_resumen(State(state): State<AppState>) -> AppResult<Json<ResumenEstadisticas>> {
    let service = EstadisticasService::new(state.db.clone());
    let resumen = service.get_resumen().await?;
    Ok(Json(resumen))
}

/// Get aggregates grouped by sample type
pub async fn get_por_tipo(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = EstadisticasService::new(state.db.clone());
    let data = service.get_por_tipo().await?;
    Ok(Json(serde_json::json!({ "tipos": data })))
}

/// Get the best-scoring samples
pub async fn get_top_muestras(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = EstadisticasService::new(state.db.clone());
    let data = service.get_top_muestras().await?;
    Ok(Json(serde_json::json!({ "muestras": data })))
}

/// Get per-category averages for one discipline
pub async fn get_fases(
    State(state): State<AppState>,
    Path(disciplina): Path<String>,
) -> AppResult<Json<EstadisticasFases>> {
    let discipline = match disciplina.as_str() {
        "vinos" | "still_wine" => Discipline::StillWine,
        "espirituosos" | "spirits" => Discipline::Spirits,
        other => {
            return Err(AppError::ValidationError(format!(
                "unknown discipline '{}'",
                other
            )))
        }
    };

    let service = EstadisticasService::new(state.db.clone());
    let fases = service.get_fases(discipline).await?;
    Ok(Json(fases))
}

/// Get the results listing, optionally as CSV
pub async fn get_resultados(
    State(state): State<AppState>,
    Query(query): Query<ResultadosQuery>,
) -> AppResult<impl IntoResponse> {
    let service = EstadisticasService::new(state.db.clone());

    let filter = ResultadosFilter {
        tanda_id: query.tanda_id,
    };

    let data = service.get_resultados(&filter).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = EstadisticasService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"resultados.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(serde_json::json!({ "resultados": data })).into_response())
    }
}
