//! Category scale tables for the tasting disciplines
//!
//! Each discipline evaluates a fixed, ordered list of sensory categories.
//! Every category offers a discrete, descending set of point values; a
//! taster picks exactly one of them (or leaves the category unjudged).
//! Scale tables are static data and the grading rules depend entirely on
//! them being exact, so they are enumerated here and covered by tests.

use serde::{Deserialize, Serialize};

/// Tasting discipline, fixed per score sheet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    StillWine,
    Spirits,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::StillWine => "still_wine",
            Discipline::Spirits => "spirits",
        }
    }

    /// Highest total a sheet of this discipline can reach
    pub fn maximum_total(&self) -> i32 {
        match self {
            Discipline::StillWine => StillWineCategory::ALL
                .iter()
                .map(|c| c.scale().top_value() as i32)
                .sum(),
            Discipline::Spirits => SpiritsCategory::ALL
                .iter()
                .map(|c| c.scale().top_value() as i32)
                .sum(),
        }
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point scale of one category: five grid slots, highest first.
/// A `None` slot is a non-selectable placeholder, so a category may offer
/// fewer than five tiers while the entry grid stays five slots wide.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryScale {
    pub key: &'static str,
    pub label: &'static str,
    pub slots: [Option<u8>; 5],
}

impl CategoryScale {
    /// Selectable values, highest first
    pub fn allowed_values(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn allows(&self, value: u8) -> bool {
        self.allowed_values().any(|v| v == value)
    }

    pub fn top_value(&self) -> u8 {
        self.allowed_values().max().unwrap_or(0)
    }
}

/// Categories of the spirits / fortified discipline, in entry order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpiritsCategory {
    VistaLimpidez,
    VistaColor,
    OlfatoIntensidad,
    OlfatoLimpidez,
    OlfatoCalidad,
    SaborTipicidad,
    SaborPersistencia,
    SaborCalidad,
    JuicioGlobal,
}

impl SpiritsCategory {
    pub const ALL: [SpiritsCategory; 9] = [
        SpiritsCategory::VistaLimpidez,
        SpiritsCategory::VistaColor,
        SpiritsCategory::OlfatoIntensidad,
        SpiritsCategory::OlfatoLimpidez,
        SpiritsCategory::OlfatoCalidad,
        SpiritsCategory::SaborTipicidad,
        SpiritsCategory::SaborPersistencia,
        SpiritsCategory::SaborCalidad,
        SpiritsCategory::JuicioGlobal,
    ];

    pub fn scale(&self) -> CategoryScale {
        match self {
            // Limpidity is all or nothing: only the extremes are selectable
            SpiritsCategory::VistaLimpidez => CategoryScale {
                key: "vista_limpidez",
                label: "Limpidez",
                slots: [Some(5), None, None, None, Some(1)],
            },
            SpiritsCategory::VistaColor => CategoryScale {
                key: "vista_color",
                label: "Color",
                slots: [Some(5), Some(4), Some(3), Some(2), Some(1)],
            },
            SpiritsCategory::OlfatoIntensidad => CategoryScale {
                key: "olfato_intensidad",
                label: "Intensidad positiva",
                slots: [Some(9), Some(7), Some(5), Some(3), Some(1)],
            },
            SpiritsCategory::OlfatoLimpidez => CategoryScale {
                key: "olfato_limpidez",
                label: "Limpidez",
                slots: [Some(6), Some(5), Some(4), Some(3), Some(2)],
            },
            SpiritsCategory::OlfatoCalidad => CategoryScale {
                key: "olfato_calidad",
                label: "Calidad",
                slots: [Some(15), Some(13), Some(11), Some(9), Some(7)],
            },
            SpiritsCategory::SaborTipicidad => CategoryScale {
                key: "sabor_tipicidad",
                label: "Tipicidad",
                slots: [Some(8), Some(7), Some(6), Some(5), Some(4)],
            },
            SpiritsCategory::SaborPersistencia => CategoryScale {
                key: "sabor_persistencia",
                label: "Persistencia Aromática",
                slots: [Some(12), Some(10), Some(8), Some(6), Some(4)],
            },
            SpiritsCategory::SaborCalidad => CategoryScale {
                key: "sabor_calidad",
                label: "Calidad",
                slots: [Some(20), Some(18), Some(14), Some(10), Some(6)],
            },
            SpiritsCategory::JuicioGlobal => CategoryScale {
                key: "juicio_global",
                label: "Juicio Global",
                slots: [Some(20), Some(18), Some(14), Some(10), Some(6)],
            },
        }
    }

    pub fn key(&self) -> &'static str {
        self.scale().key
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

/// Categories of the still wine discipline, in entry order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StillWineCategory {
    VistaAspecto,
    OlfatoIntensidad,
    OlfatoCalidad,
    GustoSabor,
    ArmoniaFinal,
}

impl StillWineCategory {
    pub const ALL: [StillWineCategory; 5] = [
        StillWineCategory::VistaAspecto,
        StillWineCategory::OlfatoIntensidad,
        StillWineCategory::OlfatoCalidad,
        StillWineCategory::GustoSabor,
        StillWineCategory::ArmoniaFinal,
    ];

    pub fn scale(&self) -> CategoryScale {
        match self {
            StillWineCategory::VistaAspecto => CategoryScale {
                key: "vista_aspecto",
                label: "Aspecto visual",
                slots: [Some(15), Some(12), Some(9), Some(6), Some(3)],
            },
            StillWineCategory::OlfatoIntensidad => CategoryScale {
                key: "olfato_intensidad",
                label: "Intensidad aromática",
                slots: [Some(15), Some(12), Some(9), Some(6), Some(3)],
            },
            StillWineCategory::OlfatoCalidad => CategoryScale {
                key: "olfato_calidad",
                label: "Calidad aromática",
                slots: [Some(20), Some(17), Some(14), Some(11), Some(8)],
            },
            StillWineCategory::GustoSabor => CategoryScale {
                key: "gusto_sabor",
                label: "Sabor",
                slots: [Some(25), Some(21), Some(17), Some(13), Some(9)],
            },
            StillWineCategory::ArmoniaFinal => CategoryScale {
                key: "armonia_final",
                label: "Armonía y final",
                slots: [Some(25), Some(21), Some(17), Some(13), Some(9)],
            },
        }
    }

    pub fn key(&self) -> &'static str {
        self.scale().key
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

/// Scale table of a discipline in entry order, for form rendering
pub fn scale_table(discipline: Discipline) -> Vec<CategoryScale> {
    match discipline {
        Discipline::StillWine => StillWineCategory::ALL.iter().map(|c| c.scale()).collect(),
        Discipline::Spirits => SpiritsCategory::ALL.iter().map(|c| c.scale()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spirits_table_is_exact() {
        let expected: [(&str, [Option<u8>; 5]); 9] = [
            ("vista_limpidez", [Some(5), None, None, None, Some(1)]),
            ("vista_color", [Some(5), Some(4), Some(3), Some(2), Some(1)]),
            ("olfato_intensidad", [Some(9), Some(7), Some(5), Some(3), Some(1)]),
            ("olfato_limpidez", [Some(6), Some(5), Some(4), Some(3), Some(2)]),
            ("olfato_calidad", [Some(15), Some(13), Some(11), Some(9), Some(7)]),
            ("sabor_tipicidad", [Some(8), Some(7), Some(6), Some(5), Some(4)]),
            ("sabor_persistencia", [Some(12), Some(10), Some(8), Some(6), Some(4)]),
            ("sabor_calidad", [Some(20), Some(18), Some(14), Some(10), Some(6)]),
            ("juicio_global", [Some(20), Some(18), Some(14), Some(10), Some(6)]),
        ];

        let table = scale_table(Discipline::Spirits);
        assert_eq!(table.len(), expected.len());
        for (scale, (key, slots)) in table.iter().zip(expected.iter()) {
            assert_eq!(scale.key, *key);
            assert_eq!(scale.slots, *slots);
        }
    }

    #[test]
    fn test_still_wine_table_is_exact() {
        let expected: [(&str, [Option<u8>; 5]); 5] = [
            ("vista_aspecto", [Some(15), Some(12), Some(9), Some(6), Some(3)]),
            ("olfato_intensidad", [Some(15), Some(12), Some(9), Some(6), Some(3)]),
            ("olfato_calidad", [Some(20), Some(17), Some(14), Some(11), Some(8)]),
            ("gusto_sabor", [Some(25), Some(21), Some(17), Some(13), Some(9)]),
            ("armonia_final", [Some(25), Some(21), Some(17), Some(13), Some(9)]),
        ];

        let table = scale_table(Discipline::StillWine);
        assert_eq!(table.len(), expected.len());
        for (scale, (key, slots)) in table.iter().zip(expected.iter()) {
            assert_eq!(scale.key, *key);
            assert_eq!(scale.slots, *slots);
        }
    }

    #[test]
    fn test_maximum_totals() {
        assert_eq!(Discipline::Spirits.maximum_total(), 100);
        assert_eq!(Discipline::StillWine.maximum_total(), 100);
    }

    #[test]
    fn test_limpidez_only_two_tiers() {
        let scale = SpiritsCategory::VistaLimpidez.scale();
        let values: Vec<u8> = scale.allowed_values().collect();
        assert_eq!(values, vec![5, 1]);
        assert!(scale.allows(5));
        assert!(scale.allows(1));
        assert!(!scale.allows(4));
        assert!(!scale.allows(3));
        assert!(!scale.allows(2));
    }

    #[test]
    fn test_scales_are_descending() {
        for scale in scale_table(Discipline::Spirits)
            .into_iter()
            .chain(scale_table(Discipline::StillWine))
        {
            let values: Vec<u8> = scale.allowed_values().collect();
            let mut sorted = values.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(values, sorted, "scale {} must be descending", scale.key);
            assert!(!values.contains(&0), "scale {} cannot offer zero", scale.key);
        }
    }

    #[test]
    fn test_from_key_roundtrip() {
        for category in SpiritsCategory::ALL {
            assert_eq!(SpiritsCategory::from_key(category.key()), Some(category));
        }
        for category in StillWineCategory::ALL {
            assert_eq!(StillWineCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(SpiritsCategory::from_key("no_such_category"), None);
        assert_eq!(StillWineCategory::from_key("vista_color"), None);
    }
}
