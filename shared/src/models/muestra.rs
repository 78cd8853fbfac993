//! Sample (muestra) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A wine or spirit entry being evaluated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Muestra {
    pub id: Uuid,
    /// Blind-tasting code printed on the bottle sleeve
    pub codigo: String,
    pub nombre: String,
    pub categoria: Option<String>,
    pub tipo: Option<String>,
    pub bodega: Option<String>,
    pub origen: Option<String>,
    /// Vintage year
    pub anada: Option<i32>,
    pub descripcion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
