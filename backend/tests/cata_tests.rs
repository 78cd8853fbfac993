//! Scoring engine and station protocol tests
//!
//! Covers total derivation from category selections, scale membership of
//! wire values, the medal cascade, the discipline-tagged record format,
//! and the submission lifecycle of a tasting station.

use proptest::prelude::*;
use uuid::Uuid;

use shared::scoring::{
    classify_total, scale_table, tier_label, Discipline, Medal, ScoreSheet, SpiritsCategory,
    SpiritsScores, SpiritsSheet, StillWineCategory, StillWineScores, StillWineSheet,
};
use shared::station::{StationError, StationPhase, TastingStation};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_medal_cascade_boundaries() {
        for discipline in [Discipline::StillWine, Discipline::Spirits] {
            assert_eq!(classify_total(discipline, 100), Some(Medal::GranOro));
            assert_eq!(classify_total(discipline, 94), Some(Medal::GranOro));
            assert_eq!(classify_total(discipline, 93), Some(Medal::Oro));
            assert_eq!(classify_total(discipline, 90), Some(Medal::Oro));
            assert_eq!(classify_total(discipline, 89), Some(Medal::Plata));
            assert_eq!(classify_total(discipline, 87), Some(Medal::Plata));
            assert_eq!(classify_total(discipline, 86), None);
            assert_eq!(classify_total(discipline, 0), None);
        }
    }

    #[test]
    fn test_tier_labels() {
        assert_eq!(tier_label(Discipline::StillWine, 96), "GRAN ORO 94-100");
        assert_eq!(tier_label(Discipline::Spirits, 91), "90-93 ORO");
        assert_eq!(tier_label(Discipline::Spirits, 88), "87-89 PLATA");
        assert_eq!(tier_label(Discipline::StillWine, 70), "");
    }

    #[test]
    fn test_both_disciplines_top_out_at_one_hundred() {
        assert_eq!(Discipline::StillWine.maximum_total(), 100);
        assert_eq!(Discipline::Spirits.maximum_total(), 100);
    }

    #[test]
    fn test_scale_tables_cover_every_category() {
        assert_eq!(scale_table(Discipline::StillWine).len(), 5);
        assert_eq!(scale_table(Discipline::Spirits).len(), 9);
        // Every category offers at least two selectable tiers
        for scale in scale_table(Discipline::StillWine)
            .into_iter()
            .chain(scale_table(Discipline::Spirits))
        {
            assert!(scale.allowed_values().count() >= 2, "{}", scale.key);
        }
    }

    #[test]
    fn test_wire_total_matches_sheet_total() {
        let scores = StillWineScores {
            vista_aspecto: 12,
            olfato_intensidad: 15,
            olfato_calidad: 17,
            gusto_sabor: 21,
            armonia_final: 25,
        };
        let sheet = scores.to_sheet().unwrap();
        assert_eq!(sheet.total(), scores.total());
        assert_eq!(scores.total(), 90);
    }

    #[test]
    fn test_off_scale_wire_value_names_the_category() {
        let scores = StillWineScores {
            gusto_sabor: 22,
            ..Default::default()
        };
        let err = scores.validate().unwrap_err();
        assert!(err.to_string().contains("gusto_sabor"));
        assert!(err.to_string().contains("22"));
    }

    #[test]
    fn test_zero_is_unjudged_not_an_error() {
        assert!(SpiritsScores::default().validate().is_ok());
        assert_eq!(SpiritsScores::default().total(), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Wire value for one category: a selectable tier or 0 for "not judged"
    fn spirits_wire_value(category: SpiritsCategory) -> impl Strategy<Value = i32> {
        let mut values: Vec<i32> = category.scale().allowed_values().map(i32::from).collect();
        values.push(0);
        prop::sample::select(values)
    }

    fn still_wine_wire_value(category: StillWineCategory) -> impl Strategy<Value = i32> {
        let mut values: Vec<i32> = category.scale().allowed_values().map(i32::from).collect();
        values.push(0);
        prop::sample::select(values)
    }

    fn spirits_scores_strategy() -> impl Strategy<Value = SpiritsScores> {
        (
            spirits_wire_value(SpiritsCategory::VistaLimpidez),
            spirits_wire_value(SpiritsCategory::VistaColor),
            spirits_wire_value(SpiritsCategory::OlfatoIntensidad),
            spirits_wire_value(SpiritsCategory::OlfatoLimpidez),
            spirits_wire_value(SpiritsCategory::OlfatoCalidad),
            spirits_wire_value(SpiritsCategory::SaborTipicidad),
            spirits_wire_value(SpiritsCategory::SaborPersistencia),
            spirits_wire_value(SpiritsCategory::SaborCalidad),
            spirits_wire_value(SpiritsCategory::JuicioGlobal),
        )
            .prop_map(
                |(
                    vista_limpidez,
                    vista_color,
                    olfato_intensidad,
                    olfato_limpidez,
                    olfato_calidad,
                    sabor_tipicidad,
                    sabor_persistencia,
                    sabor_calidad,
                    juicio_global,
                )| SpiritsScores {
                    vista_limpidez,
                    vista_color,
                    olfato_intensidad,
                    olfato_limpidez,
                    olfato_calidad,
                    sabor_tipicidad,
                    sabor_persistencia,
                    sabor_calidad,
                    juicio_global,
                },
            )
    }

    fn still_wine_scores_strategy() -> impl Strategy<Value = StillWineScores> {
        (
            still_wine_wire_value(StillWineCategory::VistaAspecto),
            still_wine_wire_value(StillWineCategory::OlfatoIntensidad),
            still_wine_wire_value(StillWineCategory::OlfatoCalidad),
            still_wine_wire_value(StillWineCategory::GustoSabor),
            still_wine_wire_value(StillWineCategory::ArmoniaFinal),
        )
            .prop_map(
                |(vista_aspecto, olfato_intensidad, olfato_calidad, gusto_sabor, armonia_final)| {
                    StillWineScores {
                        vista_aspecto,
                        olfato_intensidad,
                        olfato_calidad,
                        gusto_sabor,
                        armonia_final,
                    }
                },
            )
    }

    proptest! {
        /// On-scale wire values always pass validation
        #[test]
        fn prop_on_scale_spirits_scores_validate(scores in spirits_scores_strategy()) {
            prop_assert!(scores.validate().is_ok());
        }

        /// The total never leaves the discipline's range
        #[test]
        fn prop_spirits_total_within_range(scores in spirits_scores_strategy()) {
            let total = scores.total();
            prop_assert!(total >= 0);
            prop_assert!(total <= Discipline::Spirits.maximum_total());
        }

        #[test]
        fn prop_still_wine_total_within_range(scores in still_wine_scores_strategy()) {
            let total = scores.total();
            prop_assert!(total >= 0);
            prop_assert!(total <= Discipline::StillWine.maximum_total());
        }

        /// Wire scores and the sheet they build always agree on the total
        #[test]
        fn prop_sheet_total_matches_wire_total(scores in spirits_scores_strategy()) {
            let sheet = scores.to_sheet().unwrap();
            prop_assert_eq!(sheet.total(), scores.total());
            prop_assert_eq!(sheet.export_scores(), scores);
        }

        /// A value off the category scale (other than 0) is always rejected
        #[test]
        fn prop_off_scale_value_rejected(
            scores in still_wine_scores_strategy(),
            raw in 1i32..=127i32,
            category in prop::sample::select(StillWineCategory::ALL.to_vec()),
        ) {
            prop_assume!(!category.scale().allows(raw as u8));
            let mut scores = scores;
            match category {
                StillWineCategory::VistaAspecto => scores.vista_aspecto = raw,
                StillWineCategory::OlfatoIntensidad => scores.olfato_intensidad = raw,
                StillWineCategory::OlfatoCalidad => scores.olfato_calidad = raw,
                StillWineCategory::GustoSabor => scores.gusto_sabor = raw,
                StillWineCategory::ArmoniaFinal => scores.armonia_final = raw,
            }
            prop_assert!(scores.validate().is_err());
        }

        /// The medal cascade is consistent with the score bands
        #[test]
        fn prop_medal_bands(total in 0i32..=100i32) {
            match classify_total(Discipline::Spirits, total) {
                Some(Medal::GranOro) => prop_assert!(total >= 94),
                Some(Medal::Oro) => prop_assert!((90..=93).contains(&total)),
                Some(Medal::Plata) => prop_assert!((87..=89).contains(&total)),
                None => prop_assert!(total < 87),
            }
        }

        /// Both disciplines share one cascade
        #[test]
        fn prop_disciplines_share_cascade(total in 0i32..=100i32) {
            prop_assert_eq!(
                classify_total(Discipline::StillWine, total),
                classify_total(Discipline::Spirits, total)
            );
        }

        /// A completed submission advances orden by exactly one and clears
        /// the sheet; a failed one changes nothing.
        #[test]
        fn prop_orden_advances_only_on_success(
            scores in spirits_scores_strategy(),
            failures in 0usize..4usize,
        ) {
            let mut station = TastingStation::<SpiritsSheet>::new(7);
            station.select_muestra(Uuid::new_v4(), None).unwrap();
            for (category, value) in SpiritsCategory::ALL.iter().zip([
                scores.vista_limpidez,
                scores.vista_color,
                scores.olfato_intensidad,
                scores.olfato_limpidez,
                scores.olfato_calidad,
                scores.sabor_tipicidad,
                scores.sabor_persistencia,
                scores.sabor_calidad,
                scores.juicio_global,
            ]) {
                if value != 0 {
                    station.score(*category, value as u8).unwrap();
                }
            }
            let actor = Some(Uuid::new_v4());

            for _ in 0..failures {
                let draft = station.begin_submit(false, actor).unwrap();
                prop_assert_eq!(draft.orden, 1);
                prop_assert_eq!(draft.puntuacion_total, scores.total());
                station.fail_submit().unwrap();
                prop_assert_eq!(station.total(), scores.total());
            }

            station.begin_submit(false, actor).unwrap();
            prop_assert_eq!(station.complete_submit().unwrap(), 2);
            prop_assert_eq!(station.orden(), 2);
            prop_assert_eq!(station.total(), 0);
        }

        /// A discard carries the same scores as a submission would have
        #[test]
        fn prop_discard_preserves_scores(scores in still_wine_scores_strategy()) {
            let mut station = TastingStation::<StillWineSheet>::new(1);
            station.select_muestra(Uuid::new_v4(), Some("4975".into())).unwrap();
            for (category, value) in StillWineCategory::ALL.iter().zip([
                scores.vista_aspecto,
                scores.olfato_intensidad,
                scores.olfato_calidad,
                scores.gusto_sabor,
                scores.armonia_final,
            ]) {
                if value != 0 {
                    station.score(*category, value as u8).unwrap();
                }
            }
            let draft = station.begin_submit(true, Some(Uuid::new_v4())).unwrap();
            prop_assert!(draft.descartado);
            prop_assert_eq!(draft.puntuaciones, scores.clone());
            prop_assert_eq!(draft.puntuacion_total, scores.total());
        }

        /// While a submission is in flight every edit is refused
        #[test]
        fn prop_submitting_station_is_locked(value in 1u8..=5u8) {
            let mut station = TastingStation::<SpiritsSheet>::new(3);
            station.select_muestra(Uuid::new_v4(), None).unwrap();
            station.begin_submit(false, Some(Uuid::new_v4())).unwrap();
            prop_assert_eq!(station.phase(), StationPhase::Submitting);

            prop_assert_eq!(
                station.score(SpiritsCategory::VistaColor, value),
                Err(StationError::SubmissionInFlight)
            );
            prop_assert_eq!(
                station.select_tanda(Some(Uuid::new_v4())),
                Err(StationError::SubmissionInFlight)
            );
        }
    }
}
