//! Taster (catador) registry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered taster/judge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catador {
    pub id: Uuid,
    pub nombre: String,
    pub email: Option<String>,
    pub telefono: Option<String>,
    pub especialidad: Option<String>,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
