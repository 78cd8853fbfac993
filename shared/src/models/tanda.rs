//! Tasting session (tanda) models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled tasting session grouping samples and tasters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tanda {
    pub id: Uuid,
    pub nombre: String,
    pub fecha: NaiveDate,
    pub hora: Option<String>,
    pub lugar: Option<String>,
    pub estado: TandaEstado,
    /// Samples in pouring order
    pub muestras_ids: Vec<Uuid>,
    pub numero_catadores: Option<i32>,
    pub notas: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tanda lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TandaEstado {
    Programada,
    EnCurso,
    Finalizada,
    Cancelada,
}

impl TandaEstado {
    pub fn as_str(&self) -> &'static str {
        match self {
            TandaEstado::Programada => "programada",
            TandaEstado::EnCurso => "en_curso",
            TandaEstado::Finalizada => "finalizada",
            TandaEstado::Cancelada => "cancelada",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "programada" => Some(TandaEstado::Programada),
            "en_curso" => Some(TandaEstado::EnCurso),
            "finalizada" => Some(TandaEstado::Finalizada),
            "cancelada" => Some(TandaEstado::Cancelada),
            _ => None,
        }
    }

    /// Allowed lifecycle transitions. Finalizada and Cancelada are terminal.
    pub fn can_transition_to(&self, next: TandaEstado) -> bool {
        matches!(
            (self, next),
            (TandaEstado::Programada, TandaEstado::EnCurso)
                | (TandaEstado::Programada, TandaEstado::Cancelada)
                | (TandaEstado::EnCurso, TandaEstado::Finalizada)
                | (TandaEstado::EnCurso, TandaEstado::Cancelada)
        )
    }
}

impl std::fmt::Display for TandaEstado {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
