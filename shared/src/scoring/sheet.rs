//! Score sheets: one taster's category selections for one sample

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::scales::{CategoryScale, Discipline, SpiritsCategory, StillWineCategory};

/// Invariant violations inside the scoring engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The value is not one of the category's enumerated tiers. This points
    /// at a broken caller (the entry grid only ever offers listed values),
    /// so it is never silently corrected.
    #[error("value {value} is not selectable for {category}")]
    ValueNotInScale { category: &'static str, value: i32 },
}

/// Checks a wire value against a category scale. Zero means "not judged"
/// and is always accepted.
fn check_wire_value(scale: &CategoryScale, value: i32) -> Result<(), ScoringError> {
    if value == 0 {
        return Ok(());
    }
    let fits = u8::try_from(value).map(|v| scale.allows(v)).unwrap_or(false);
    if fits {
        Ok(())
    } else {
        Err(ScoringError::ValueNotInScale {
            category: scale.key,
            value,
        })
    }
}

/// A mutable score sheet for one discipline.
///
/// The total is always derived from the current selections, never stored,
/// and unjudged categories contribute zero.
pub trait ScoreSheet: Default {
    type Category: Copy + PartialEq;
    type Scores;

    const DISCIPLINE: Discipline;

    fn categories() -> &'static [Self::Category];

    fn scale(category: Self::Category) -> CategoryScale;

    fn get(&self, category: Self::Category) -> Option<u8>;

    /// Select a value for a category, fully replacing the prior selection.
    /// Values outside the category's scale are rejected and leave the sheet
    /// untouched.
    fn set(&mut self, category: Self::Category, value: u8) -> Result<(), ScoringError>;

    /// Back to "not judged"
    fn clear(&mut self, category: Self::Category);

    fn total(&self) -> i32;

    /// Clear every category
    fn reset(&mut self);

    /// Wire representation of the current selections (unjudged as 0)
    fn export_scores(&self) -> Self::Scores;
}

// ============================================================================
// Spirits / fortified discipline
// ============================================================================

/// In-memory sheet for the spirits discipline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpiritsSheet {
    pub vista_limpidez: Option<u8>,
    pub vista_color: Option<u8>,
    pub olfato_intensidad: Option<u8>,
    pub olfato_limpidez: Option<u8>,
    pub olfato_calidad: Option<u8>,
    pub sabor_tipicidad: Option<u8>,
    pub sabor_persistencia: Option<u8>,
    pub sabor_calidad: Option<u8>,
    pub juicio_global: Option<u8>,
}

impl SpiritsSheet {
    fn slot_mut(&mut self, category: SpiritsCategory) -> &mut Option<u8> {
        match category {
            SpiritsCategory::VistaLimpidez => &mut self.vista_limpidez,
            SpiritsCategory::VistaColor => &mut self.vista_color,
            SpiritsCategory::OlfatoIntensidad => &mut self.olfato_intensidad,
            SpiritsCategory::OlfatoLimpidez => &mut self.olfato_limpidez,
            SpiritsCategory::OlfatoCalidad => &mut self.olfato_calidad,
            SpiritsCategory::SaborTipicidad => &mut self.sabor_tipicidad,
            SpiritsCategory::SaborPersistencia => &mut self.sabor_persistencia,
            SpiritsCategory::SaborCalidad => &mut self.sabor_calidad,
            SpiritsCategory::JuicioGlobal => &mut self.juicio_global,
        }
    }
}

impl ScoreSheet for SpiritsSheet {
    type Category = SpiritsCategory;
    type Scores = SpiritsScores;

    const DISCIPLINE: Discipline = Discipline::Spirits;

    fn categories() -> &'static [SpiritsCategory] {
        &SpiritsCategory::ALL
    }

    fn scale(category: SpiritsCategory) -> CategoryScale {
        category.scale()
    }

    fn get(&self, category: SpiritsCategory) -> Option<u8> {
        match category {
            SpiritsCategory::VistaLimpidez => self.vista_limpidez,
            SpiritsCategory::VistaColor => self.vista_color,
            SpiritsCategory::OlfatoIntensidad => self.olfato_intensidad,
            SpiritsCategory::OlfatoLimpidez => self.olfato_limpidez,
            SpiritsCategory::OlfatoCalidad => self.olfato_calidad,
            SpiritsCategory::SaborTipicidad => self.sabor_tipicidad,
            SpiritsCategory::SaborPersistencia => self.sabor_persistencia,
            SpiritsCategory::SaborCalidad => self.sabor_calidad,
            SpiritsCategory::JuicioGlobal => self.juicio_global,
        }
    }

    fn set(&mut self, category: SpiritsCategory, value: u8) -> Result<(), ScoringError> {
        let scale = category.scale();
        if !scale.allows(value) {
            return Err(ScoringError::ValueNotInScale {
                category: scale.key,
                value: value as i32,
            });
        }
        *self.slot_mut(category) = Some(value);
        Ok(())
    }

    fn clear(&mut self, category: SpiritsCategory) {
        *self.slot_mut(category) = None;
    }

    fn total(&self) -> i32 {
        self.vista_limpidez.map_or(0, i32::from)
            + self.vista_color.map_or(0, i32::from)
            + self.olfato_intensidad.map_or(0, i32::from)
            + self.olfato_limpidez.map_or(0, i32::from)
            + self.olfato_calidad.map_or(0, i32::from)
            + self.sabor_tipicidad.map_or(0, i32::from)
            + self.sabor_persistencia.map_or(0, i32::from)
            + self.sabor_calidad.map_or(0, i32::from)
            + self.juicio_global.map_or(0, i32::from)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn export_scores(&self) -> SpiritsScores {
        SpiritsScores {
            vista_limpidez: self.vista_limpidez.map_or(0, i32::from),
            vista_color: self.vista_color.map_or(0, i32::from),
            olfato_intensidad: self.olfato_intensidad.map_or(0, i32::from),
            olfato_limpidez: self.olfato_limpidez.map_or(0, i32::from),
            olfato_calidad: self.olfato_calidad.map_or(0, i32::from),
            sabor_tipicidad: self.sabor_tipicidad.map_or(0, i32::from),
            sabor_persistencia: self.sabor_persistencia.map_or(0, i32::from),
            sabor_calidad: self.sabor_calidad.map_or(0, i32::from),
            juicio_global: self.juicio_global.map_or(0, i32::from),
        }
    }
}

/// Wire shape of a spirits sheet. Zero means the category was not judged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpiritsScores {
    pub vista_limpidez: i32,
    pub vista_color: i32,
    pub olfato_intensidad: i32,
    pub olfato_limpidez: i32,
    pub olfato_calidad: i32,
    pub sabor_tipicidad: i32,
    pub sabor_persistencia: i32,
    pub sabor_calidad: i32,
    pub juicio_global: i32,
}

impl SpiritsScores {
    pub fn total(&self) -> i32 {
        self.vista_limpidez
            + self.vista_color
            + self.olfato_intensidad
            + self.olfato_limpidez
            + self.olfato_calidad
            + self.sabor_tipicidad
            + self.sabor_persistencia
            + self.sabor_calidad
            + self.juicio_global
    }

    /// Check every value against its category scale (zero allowed)
    pub fn validate(&self) -> Result<(), ScoringError> {
        let fields = [
            (SpiritsCategory::VistaLimpidez, self.vista_limpidez),
            (SpiritsCategory::VistaColor, self.vista_color),
            (SpiritsCategory::OlfatoIntensidad, self.olfato_intensidad),
            (SpiritsCategory::OlfatoLimpidez, self.olfato_limpidez),
            (SpiritsCategory::OlfatoCalidad, self.olfato_calidad),
            (SpiritsCategory::SaborTipicidad, self.sabor_tipicidad),
            (SpiritsCategory::SaborPersistencia, self.sabor_persistencia),
            (SpiritsCategory::SaborCalidad, self.sabor_calidad),
            (SpiritsCategory::JuicioGlobal, self.juicio_global),
        ];
        for (category, value) in fields {
            check_wire_value(&category.scale(), value)?;
        }
        Ok(())
    }

    /// Validated conversion into an in-memory sheet (zero becomes unjudged)
    pub fn to_sheet(&self) -> Result<SpiritsSheet, ScoringError> {
        self.validate()?;
        let opt = |value: i32| (value != 0).then(|| value as u8);
        Ok(SpiritsSheet {
            vista_limpidez: opt(self.vista_limpidez),
            vista_color: opt(self.vista_color),
            olfato_intensidad: opt(self.olfato_intensidad),
            olfato_limpidez: opt(self.olfato_limpidez),
            olfato_calidad: opt(self.olfato_calidad),
            sabor_tipicidad: opt(self.sabor_tipicidad),
            sabor_persistencia: opt(self.sabor_persistencia),
            sabor_calidad: opt(self.sabor_calidad),
            juicio_global: opt(self.juicio_global),
        })
    }
}

// ============================================================================
// Still wine discipline
// ============================================================================

/// In-memory sheet for the still wine discipline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StillWineSheet {
    pub vista_aspecto: Option<u8>,
    pub olfato_intensidad: Option<u8>,
    pub olfato_calidad: Option<u8>,
    pub gusto_sabor: Option<u8>,
    pub armonia_final: Option<u8>,
}

impl StillWineSheet {
    fn slot_mut(&mut self, category: StillWineCategory) -> &mut Option<u8> {
        match category {
            StillWineCategory::VistaAspecto => &mut self.vista_aspecto,
            StillWineCategory::OlfatoIntensidad => &mut self.olfato_intensidad,
            StillWineCategory::OlfatoCalidad => &mut self.olfato_calidad,
            StillWineCategory::GustoSabor => &mut self.gusto_sabor,
            StillWineCategory::ArmoniaFinal => &mut self.armonia_final,
        }
    }
}

impl ScoreSheet for StillWineSheet {
    type Category = StillWineCategory;
    type Scores = StillWineScores;

    const DISCIPLINE: Discipline = Discipline::StillWine;

    fn categories() -> &'static [StillWineCategory] {
        &StillWineCategory::ALL
    }

    fn scale(category: StillWineCategory) -> CategoryScale {
        category.scale()
    }

    fn get(&self, category: StillWineCategory) -> Option<u8> {
        match category {
            StillWineCategory::VistaAspecto => self.vista_aspecto,
            StillWineCategory::OlfatoIntensidad => self.olfato_intensidad,
            StillWineCategory::OlfatoCalidad => self.olfato_calidad,
            StillWineCategory::GustoSabor => self.gusto_sabor,
            StillWineCategory::ArmoniaFinal => self.armonia_final,
        }
    }

    fn set(&mut self, category: StillWineCategory, value: u8) -> Result<(), ScoringError> {
        let scale = category.scale();
        if !scale.allows(value) {
            return Err(ScoringError::ValueNotInScale {
                category: scale.key,
                value: value as i32,
            });
        }
        *self.slot_mut(category) = Some(value);
        Ok(())
    }

    fn clear(&mut self, category: StillWineCategory) {
        *self.slot_mut(category) = None;
    }

    fn total(&self) -> i32 {
        self.vista_aspecto.map_or(0, i32::from)
            + self.olfato_intensidad.map_or(0, i32::from)
            + self.olfato_calidad.map_or(0, i32::from)
            + self.gusto_sabor.map_or(0, i32::from)
            + self.armonia_final.map_or(0, i32::from)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn export_scores(&self) -> StillWineScores {
        StillWineScores {
            vista_aspecto: self.vista_aspecto.map_or(0, i32::from),
            olfato_intensidad: self.olfato_intensidad.map_or(0, i32::from),
            olfato_calidad: self.olfato_calidad.map_or(0, i32::from),
            gusto_sabor: self.gusto_sabor.map_or(0, i32::from),
            armonia_final: self.armonia_final.map_or(0, i32::from),
        }
    }
}

/// Wire shape of a still wine sheet. Zero means the category was not judged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StillWineScores {
    pub vista_aspecto: i32,
    pub olfato_intensidad: i32,
    pub olfato_calidad: i32,
    pub gusto_sabor: i32,
    pub armonia_final: i32,
}

impl StillWineScores {
    pub fn total(&self) -> i32 {
        self.vista_aspecto
            + self.olfato_intensidad
            + self.olfato_calidad
            + self.gusto_sabor
            + self.armonia_final
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let fields = [
            (StillWineCategory::VistaAspecto, self.vista_aspecto),
            (StillWineCategory::OlfatoIntensidad, self.olfato_intensidad),
            (StillWineCategory::OlfatoCalidad, self.olfato_calidad),
            (StillWineCategory::GustoSabor, self.gusto_sabor),
            (StillWineCategory::ArmoniaFinal, self.armonia_final),
        ];
        for (category, value) in fields {
            check_wire_value(&category.scale(), value)?;
        }
        Ok(())
    }

    pub fn to_sheet(&self) -> Result<StillWineSheet, ScoringError> {
        self.validate()?;
        let opt = |value: i32| (value != 0).then(|| value as u8);
        Ok(StillWineSheet {
            vista_aspecto: opt(self.vista_aspecto),
            olfato_intensidad: opt(self.olfato_intensidad),
            olfato_calidad: opt(self.olfato_calidad),
            gusto_sabor: opt(self.gusto_sabor),
            armonia_final: opt(self.armonia_final),
        })
    }
}
