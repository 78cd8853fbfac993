//! Tasting table (mesa) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical tasting table / station in the hall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesa {
    pub id: Uuid,
    pub numero: i32,
    pub nombre: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
