//! Stored score-record (ficha de cata) models
//!
//! One record per submitted sheet. Records are append-only: a discarded
//! tasting is persisted with the flag set, never dropped. The discipline
//! tag keeps the two category sets apart on the wire, so a record is
//! validated against the right scale table by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::{classify_total, Discipline, Medal, SpiritsScores, StillWineScores};

/// A persisted score sheet, tagged by discipline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "disciplina")]
pub enum FichaCata {
    #[serde(rename = "still_wine")]
    StillWine(FichaVino),
    #[serde(rename = "spirits")]
    Spirits(FichaEspirituoso),
}

impl FichaCata {
    pub fn disciplina(&self) -> Discipline {
        match self {
            FichaCata::StillWine(_) => Discipline::StillWine,
            FichaCata::Spirits(_) => Discipline::Spirits,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            FichaCata::StillWine(f) => f.id,
            FichaCata::Spirits(f) => f.id,
        }
    }

    pub fn puntuacion_total(&self) -> i32 {
        match self {
            FichaCata::StillWine(f) => f.puntuacion_total,
            FichaCata::Spirits(f) => f.puntuacion_total,
        }
    }

    pub fn descartado(&self) -> bool {
        match self {
            FichaCata::StillWine(f) => f.descartado,
            FichaCata::Spirits(f) => f.descartado,
        }
    }

    pub fn medalla(&self) -> Option<Medal> {
        classify_total(self.disciplina(), self.puntuacion_total())
    }
}

/// Persisted still-wine sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FichaVino {
    pub id: Uuid,
    pub muestra_id: Uuid,
    pub tanda_id: Option<Uuid>,
    pub catador_numero: i32,
    pub orden: i32,
    #[serde(flatten)]
    pub puntuaciones: StillWineScores,
    pub puntuacion_total: i32,
    pub descartado: bool,
    pub usuario_id: Uuid,
    pub fecha_registro: DateTime<Utc>,
}

/// Persisted spirits sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FichaEspirituoso {
    pub id: Uuid,
    pub muestra_id: Uuid,
    pub tanda_id: Option<Uuid>,
    pub catador_numero: i32,
    pub orden: i32,
    #[serde(flatten)]
    pub puntuaciones: SpiritsScores,
    pub puntuacion_total: i32,
    pub descartado: bool,
    pub usuario_id: Uuid,
    pub fecha_registro: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ficha(total: i32, descartado: bool) -> FichaCata {
        FichaCata::Spirits(FichaEspirituoso {
            id: Uuid::new_v4(),
            muestra_id: Uuid::new_v4(),
            tanda_id: None,
            catador_numero: 1,
            orden: 1,
            puntuaciones: SpiritsScores::default(),
            puntuacion_total: total,
            descartado,
            usuario_id: Uuid::new_v4(),
            fecha_registro: Utc::now(),
        })
    }

    #[test]
    fn test_discipline_tag_on_wire() {
        let json = serde_json::to_value(ficha(90, false)).unwrap();
        assert_eq!(json["disciplina"], "spirits");
        assert_eq!(json["puntuacion_total"], 90);
        // Flattened sub-scores sit next to the record fields
        assert_eq!(json["juicio_global"], 0);
    }

    #[test]
    fn test_medalla_follows_total() {
        assert_eq!(ficha(95, false).medalla(), Some(Medal::GranOro));
        assert_eq!(ficha(86, false).medalla(), None);
    }

    #[test]
    fn test_discard_keeps_record_shape() {
        let normal = serde_json::to_value(ficha(76, false)).unwrap();
        let discarded = serde_json::to_value(ficha(76, true)).unwrap();
        let keys = |v: &serde_json::Value| {
            let mut k: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
            k.sort();
            k
        };
        assert_eq!(keys(&normal), keys(&discarded));
        assert_eq!(discarded["descartado"], true);
    }
}
