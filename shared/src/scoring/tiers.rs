//! Medal tier classification from a sheet's total score

use serde::{Deserialize, Serialize};

use super::scales::Discipline;

/// Medal tier awarded by a competition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    GranOro,
    Oro,
    Plata,
}

impl Medal {
    /// Display label exactly as printed on the tasting form
    pub fn label(&self) -> &'static str {
        match self {
            Medal::GranOro => "GRAN ORO 94-100",
            Medal::Oro => "90-93 ORO",
            Medal::Plata => "87-89 PLATA",
        }
    }
}

impl std::fmt::Display for Medal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a total score into a medal tier.
///
/// Intervals are checked highest first and the first match wins; each tier
/// is inclusive at its low end. Totals below the lowest tier earn no medal.
/// Both disciplines grade out of 100 points and share one medal rule.
pub fn classify_total(discipline: Discipline, total: i32) -> Option<Medal> {
    match discipline {
        Discipline::StillWine | Discipline::Spirits => {
            if total >= 94 {
                Some(Medal::GranOro)
            } else if total >= 90 {
                Some(Medal::Oro)
            } else if total >= 87 {
                Some(Medal::Plata)
            } else {
                None
            }
        }
    }
}

/// Label for display next to the running total, empty when no tier applies
pub fn tier_label(discipline: Discipline, total: i32) -> &'static str {
    classify_total(discipline, total).map_or("", |medal| medal.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(classify_total(Discipline::Spirits, 86), None);
        assert_eq!(classify_total(Discipline::Spirits, 87), Some(Medal::Plata));
        assert_eq!(classify_total(Discipline::Spirits, 89), Some(Medal::Plata));
        assert_eq!(classify_total(Discipline::Spirits, 90), Some(Medal::Oro));
        assert_eq!(classify_total(Discipline::Spirits, 93), Some(Medal::Oro));
        assert_eq!(classify_total(Discipline::Spirits, 94), Some(Medal::GranOro));
        assert_eq!(classify_total(Discipline::Spirits, 100), Some(Medal::GranOro));
    }

    #[test]
    fn test_labels_are_literal() {
        assert_eq!(tier_label(Discipline::Spirits, 94), "GRAN ORO 94-100");
        assert_eq!(tier_label(Discipline::Spirits, 90), "90-93 ORO");
        assert_eq!(tier_label(Discipline::Spirits, 87), "87-89 PLATA");
        assert_eq!(tier_label(Discipline::Spirits, 0), "");
    }

    #[test]
    fn test_still_wine_shares_the_cascade() {
        for total in 0..=100 {
            assert_eq!(
                classify_total(Discipline::StillWine, total),
                classify_total(Discipline::Spirits, total)
            );
        }
    }

    #[test]
    fn test_negative_totals_have_no_tier() {
        assert_eq!(classify_total(Discipline::Spirits, -10), None);
    }
}
