//! Tasting station submission protocol.
//!
//! A station drives exactly one sheet at a time. While a submission is in
//! flight the station locks out edits and further submissions, so the orden
//! counter advances strictly one successful submission at a time. A failed
//! submission keeps every entered value for a manual retry.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::scoring::{classify_total, Medal, ScoreSheet, ScoringError};

/// Station lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationPhase {
    /// Accepting selections
    Editing,
    /// A create-record call is in flight; edits and re-submission are locked
    Submitting,
}

impl StationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            StationPhase::Editing => "editing",
            StationPhase::Submitting => "submitting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no submission is in flight")]
    NotSubmitting,
    #[error("no sample selected")]
    NoSampleSelected,
    #[error("no authenticated actor; sign in before submitting")]
    IdentityMissing,
}

/// The record handed to the store for one submission or discard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionDraft<P> {
    pub muestra_id: Uuid,
    pub tanda_id: Option<Uuid>,
    pub codigo: Option<String>,
    pub catador_numero: i32,
    pub orden: i32,
    pub puntuaciones: P,
    pub puntuacion_total: i32,
    pub descartado: bool,
}

/// One tasting station bound to one sheet discipline.
#[derive(Debug)]
pub struct TastingStation<S: ScoreSheet> {
    sheet: S,
    phase: StationPhase,
    muestra_id: Option<Uuid>,
    tanda_id: Option<Uuid>,
    codigo: Option<String>,
    catador_numero: i32,
    orden: i32,
}

impl<S: ScoreSheet> TastingStation<S> {
    pub fn new(catador_numero: i32) -> Self {
        Self {
            sheet: S::default(),
            phase: StationPhase::Editing,
            muestra_id: None,
            tanda_id: None,
            codigo: None,
            catador_numero,
            orden: 1,
        }
    }

    pub fn phase(&self) -> StationPhase {
        self.phase
    }

    pub fn orden(&self) -> i32 {
        self.orden
    }

    pub fn catador_numero(&self) -> i32 {
        self.catador_numero
    }

    pub fn sheet(&self) -> &S {
        &self.sheet
    }

    pub fn total(&self) -> i32 {
        self.sheet.total()
    }

    pub fn medal(&self) -> Option<Medal> {
        classify_total(S::DISCIPLINE, self.total())
    }

    fn editable(&self) -> Result<(), StationError> {
        match self.phase {
            StationPhase::Editing => Ok(()),
            StationPhase::Submitting => Err(StationError::SubmissionInFlight),
        }
    }

    /// Point the station at the next sample to taste
    pub fn select_muestra(
        &mut self,
        muestra_id: Uuid,
        codigo: Option<String>,
    ) -> Result<(), StationError> {
        self.editable()?;
        self.muestra_id = Some(muestra_id);
        self.codigo = codigo;
        Ok(())
    }

    pub fn select_tanda(&mut self, tanda_id: Option<Uuid>) -> Result<(), StationError> {
        self.editable()?;
        self.tanda_id = tanda_id;
        Ok(())
    }

    pub fn set_catador_numero(&mut self, catador_numero: i32) -> Result<(), StationError> {
        self.editable()?;
        self.catador_numero = catador_numero;
        Ok(())
    }

    pub fn score(&mut self, category: S::Category, value: u8) -> Result<(), StationError> {
        self.editable()?;
        self.sheet.set(category, value)?;
        Ok(())
    }

    pub fn clear_score(&mut self, category: S::Category) -> Result<(), StationError> {
        self.editable()?;
        self.sheet.clear(category);
        Ok(())
    }

    /// Start a submission (or a discard, which is submitted all the same
    /// with the flag set). Requires an authenticated actor and a selected
    /// sample, checked before anything leaves the station. On success the
    /// station locks until `complete_submit` or `fail_submit` is called.
    pub fn begin_submit(
        &mut self,
        descartado: bool,
        actor: Option<Uuid>,
    ) -> Result<SubmissionDraft<S::Scores>, StationError> {
        self.editable()?;
        if actor.is_none() {
            return Err(StationError::IdentityMissing);
        }
        let muestra_id = self.muestra_id.ok_or(StationError::NoSampleSelected)?;

        self.phase = StationPhase::Submitting;
        Ok(SubmissionDraft {
            muestra_id,
            tanda_id: self.tanda_id,
            codigo: self.codigo.clone(),
            catador_numero: self.catador_numero,
            orden: self.orden,
            puntuaciones: self.sheet.export_scores(),
            puntuacion_total: self.sheet.total(),
            descartado,
        })
    }

    /// The store acknowledged the record: clear the sheet for the next
    /// sample and advance orden by exactly one. Sample, tanda and catador
    /// context carry over until the operator changes them.
    pub fn complete_submit(&mut self) -> Result<i32, StationError> {
        if self.phase != StationPhase::Submitting {
            return Err(StationError::NotSubmitting);
        }
        self.sheet.reset();
        self.orden += 1;
        self.phase = StationPhase::Editing;
        Ok(self.orden)
    }

    /// The store rejected the record (or the call timed out): unlock with
    /// every entered value intact so the operator can retry. Orden does not
    /// advance.
    pub fn fail_submit(&mut self) -> Result<(), StationError> {
        if self.phase != StationPhase::Submitting {
            return Err(StationError::NotSubmitting);
        }
        self.phase = StationPhase::Editing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{SpiritsCategory, SpiritsSheet, StillWineCategory, StillWineSheet};

    fn loaded_station() -> (TastingStation<SpiritsSheet>, Uuid, Uuid) {
        let mut station = TastingStation::<SpiritsSheet>::new(115);
        let muestra = Uuid::new_v4();
        let tanda = Uuid::new_v4();
        station
            .select_muestra(muestra, Some("4975".to_string()))
            .unwrap();
        station.select_tanda(Some(tanda)).unwrap();
        station.score(SpiritsCategory::VistaLimpidez, 5).unwrap();
        station.score(SpiritsCategory::VistaColor, 4).unwrap();
        station.score(SpiritsCategory::OlfatoIntensidad, 7).unwrap();
        station.score(SpiritsCategory::OlfatoLimpidez, 5).unwrap();
        station.score(SpiritsCategory::OlfatoCalidad, 13).unwrap();
        station.score(SpiritsCategory::SaborTipicidad, 6).unwrap();
        station.score(SpiritsCategory::SaborPersistencia, 8).unwrap();
        station.score(SpiritsCategory::SaborCalidad, 14).unwrap();
        station.score(SpiritsCategory::JuicioGlobal, 14).unwrap();
        (station, muestra, tanda)
    }

    #[test]
    fn test_successful_submission_resets_and_advances_orden() {
        let (mut station, muestra, tanda) = loaded_station();
        let actor = Some(Uuid::new_v4());

        let draft = station.begin_submit(false, actor).unwrap();
        assert_eq!(draft.muestra_id, muestra);
        assert_eq!(draft.tanda_id, Some(tanda));
        assert_eq!(draft.codigo.as_deref(), Some("4975"));
        assert_eq!(draft.catador_numero, 115);
        assert_eq!(draft.orden, 1);
        assert_eq!(draft.puntuacion_total, 76);
        assert!(!draft.descartado);
        assert_eq!(station.phase(), StationPhase::Submitting);

        assert_eq!(station.complete_submit().unwrap(), 2);
        assert_eq!(station.phase(), StationPhase::Editing);
        assert_eq!(station.orden(), 2);
        assert_eq!(station.total(), 0);
        assert_eq!(station.sheet(), &SpiritsSheet::default());
    }

    #[test]
    fn test_failed_submission_keeps_values_and_orden() {
        let (mut station, _, _) = loaded_station();
        let actor = Some(Uuid::new_v4());

        station.begin_submit(false, actor).unwrap();
        station.fail_submit().unwrap();

        assert_eq!(station.phase(), StationPhase::Editing);
        assert_eq!(station.orden(), 1);
        assert_eq!(station.total(), 76);

        // Manual retry works without re-entering scores
        let retry = station.begin_submit(false, actor).unwrap();
        assert_eq!(retry.orden, 1);
        assert_eq!(retry.puntuacion_total, 76);
    }

    #[test]
    fn test_submitting_locks_out_everything() {
        let (mut station, _, _) = loaded_station();
        let actor = Some(Uuid::new_v4());
        station.begin_submit(false, actor).unwrap();

        assert_eq!(
            station.score(SpiritsCategory::VistaColor, 5),
            Err(StationError::SubmissionInFlight)
        );
        assert_eq!(
            station.clear_score(SpiritsCategory::VistaColor),
            Err(StationError::SubmissionInFlight)
        );
        assert_eq!(
            station.select_muestra(Uuid::new_v4(), None),
            Err(StationError::SubmissionInFlight)
        );
        assert_eq!(
            station.set_catador_numero(7),
            Err(StationError::SubmissionInFlight)
        );
        assert!(matches!(
            station.begin_submit(false, actor),
            Err(StationError::SubmissionInFlight)
        ));
    }

    #[test]
    fn test_discard_is_submitted_with_flag() {
        let (mut station, _, _) = loaded_station();
        let normal = station.begin_submit(false, Some(Uuid::new_v4())).unwrap();
        station.fail_submit().unwrap();
        let discard = station.begin_submit(true, Some(Uuid::new_v4())).unwrap();

        assert!(discard.descartado);
        assert_eq!(discard.puntuaciones, normal.puntuaciones);
        assert_eq!(discard.puntuacion_total, normal.puntuacion_total);
        assert_eq!(discard.orden, normal.orden);
    }

    #[test]
    fn test_submission_requires_actor() {
        let (mut station, _, _) = loaded_station();
        assert_eq!(
            station.begin_submit(false, None).unwrap_err(),
            StationError::IdentityMissing
        );
        // Refused before the phase changed
        assert_eq!(station.phase(), StationPhase::Editing);
    }

    #[test]
    fn test_submission_requires_sample() {
        let mut station = TastingStation::<StillWineSheet>::new(1);
        station.score(StillWineCategory::GustoSabor, 17).unwrap();
        assert_eq!(
            station.begin_submit(false, Some(Uuid::new_v4())).unwrap_err(),
            StationError::NoSampleSelected
        );
    }

    #[test]
    fn test_acknowledgements_require_inflight_submission() {
        let (mut station, _, _) = loaded_station();
        assert_eq!(station.complete_submit(), Err(StationError::NotSubmitting));
        assert_eq!(station.fail_submit(), Err(StationError::NotSubmitting));
    }

    #[test]
    fn test_orden_advances_once_per_success() {
        let (mut station, _, _) = loaded_station();
        for expected_orden in 1..=5 {
            assert_eq!(station.orden(), expected_orden);
            station.score(SpiritsCategory::VistaColor, 3).unwrap();
            station.begin_submit(false, Some(Uuid::new_v4())).unwrap();
            station.complete_submit().unwrap();
        }
        assert_eq!(station.orden(), 6);
    }

    #[test]
    fn test_medal_tracks_running_total() {
        let mut station = TastingStation::<SpiritsSheet>::new(115);
        assert_eq!(station.medal(), None);
        station.score(SpiritsCategory::VistaLimpidez, 5).unwrap();
        station.score(SpiritsCategory::VistaColor, 5).unwrap();
        station.score(SpiritsCategory::OlfatoIntensidad, 9).unwrap();
        station.score(SpiritsCategory::OlfatoLimpidez, 6).unwrap();
        station.score(SpiritsCategory::OlfatoCalidad, 15).unwrap();
        station.score(SpiritsCategory::SaborTipicidad, 8).unwrap();
        station.score(SpiritsCategory::SaborPersistencia, 12).unwrap();
        station.score(SpiritsCategory::SaborCalidad, 20).unwrap();
        station.score(SpiritsCategory::JuicioGlobal, 20).unwrap();
        assert_eq!(station.total(), 100);
        assert_eq!(station.medal(), Some(Medal::GranOro));
    }
}
