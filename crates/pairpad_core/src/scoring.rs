//! crates/pairpad_core/src/scoring.rs
//!
//! The client-side fallback compatibility score.
//!
//! The backend computes the authoritative, weighted score (personality, lifestyle,
//! communication, location). This module only covers the five Big-Five traits and is
//! used when a backend response carries no score of its own.

use crate::domain::{ScoreBreakdown, TraitVector};
use serde::Serialize;

/// Points lost per point of trait distance.
const DISTANCE_PENALTY: i32 = 2;

/// Scores one trait pair: 100 for equal values, 0 once they diverge by 50 or more.
fn trait_score(a: u8, b: u8) -> i32 {
    let diff = (i32::from(a) - i32::from(b)).abs();
    (100 - diff * DISTANCE_PENALTY).max(0)
}

/// Computes the unweighted Big-Five similarity of two trait vectors.
///
/// Each trait scores `max(0, 100 - |a - b| * 2)`; the result is the mean of the five
/// trait scores rounded to the nearest integer. Symmetric and pure.
pub fn compatibility_score(a: &TraitVector, b: &TraitVector) -> u8 {
    let total: i32 = a
        .as_array()
        .iter()
        .zip(b.as_array().iter())
        .map(|(&x, &y)| trait_score(x, y))
        .sum();

    let mean = f64::from(total) / 5.0;
    // Each trait score lies in [0,100], so the rounded mean does too.
    mean.round() as u8
}

/// Where a displayed score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Server,
    Fallback,
}

/// A 0–100 score plus the backend's breakdown when one was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompatibilityScore {
    pub value: u8,
    pub breakdown: Option<ScoreBreakdown>,
    pub source: ScoreSource,
}

/// Picks the score to show for another user.
///
/// A backend-provided score always wins. The local formula is used only when the
/// backend sent none and both trait vectors are known; otherwise there is nothing
/// to show.
pub fn resolve_score(
    server_score: Option<f64>,
    breakdown: Option<ScoreBreakdown>,
    mine: Option<&TraitVector>,
    theirs: Option<&TraitVector>,
) -> Option<CompatibilityScore> {
    if let Some(score) = server_score {
        return Some(CompatibilityScore {
            value: score.round().clamp(0.0, 100.0) as u8,
            breakdown,
            source: ScoreSource::Server,
        });
    }

    match (mine, theirs) {
        (Some(a), Some(b)) => Some(CompatibilityScore {
            value: compatibility_score(a, b),
            breakdown: None,
            source: ScoreSource::Fallback,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_a() -> TraitVector {
        TraitVector::new(80, 60, 40, 70, 30)
    }

    #[test]
    fn identical_profiles_score_100() {
        assert_eq!(compatibility_score(&profile_a(), &profile_a()), 100);
    }

    #[test]
    fn opposite_extremes_score_0() {
        let zeros = TraitVector::uniform(0);
        let hundreds = TraitVector::uniform(100);
        assert_eq!(compatibility_score(&zeros, &hundreds), 0);
    }

    #[test]
    fn divergence_of_fifty_zeroes_a_trait() {
        assert_eq!(trait_score(25, 75), 0);
        assert_eq!(trait_score(25, 74), 2);
        assert_eq!(trait_score(74, 25), 2);
    }

    #[test]
    fn mean_is_rounded_to_nearest() {
        // Trait scores 100, 100, 100, 100, 98 -> mean 99.6 -> 100
        let a = TraitVector::new(50, 50, 50, 50, 50);
        let b = TraitVector::new(50, 50, 50, 50, 51);
        assert_eq!(compatibility_score(&a, &b), 100);

        // Trait scores 80, 80, 100, 100, 100 -> mean 92
        let c = TraitVector::new(60, 40, 50, 50, 50);
        assert_eq!(compatibility_score(&a, &c), 92);

        // Trait scores 100, 100, 100, 100, 2 -> mean 80.4 -> 80
        let d = TraitVector::new(50, 50, 50, 50, 99);
        assert_eq!(compatibility_score(&a, &d), 80);
    }

    #[test]
    fn score_is_symmetric_and_bounded_over_a_grid() {
        let values = [0u8, 1, 13, 25, 49, 50, 51, 74, 99, 100];
        for &x in &values {
            for &y in &values {
                let a = TraitVector::new(x, y, x, y, x);
                let b = TraitVector::new(y, x, 100 - x, x, y);
                let ab = compatibility_score(&a, &b);
                let ba = compatibility_score(&b, &a);
                assert_eq!(ab, ba, "asymmetric for {:?} / {:?}", a, b);
                assert!(ab <= 100);
            }
        }
    }

    #[test]
    fn out_of_range_inputs_stay_within_bounds() {
        let a = TraitVector::uniform(255);
        let b = TraitVector::uniform(0);
        assert_eq!(compatibility_score(&a, &b), 0);
    }

    #[test]
    fn server_score_takes_precedence_over_fallback() {
        let breakdown = ScoreBreakdown {
            lifestyle: 70,
            basic_lifestyle: 65,
            personality: 90,
            communication: 80,
            location: 100,
        };
        let resolved = resolve_score(
            Some(83.6),
            Some(breakdown),
            Some(&profile_a()),
            Some(&TraitVector::uniform(0)),
        )
        .unwrap();

        assert_eq!(resolved.value, 84);
        assert_eq!(resolved.source, ScoreSource::Server);
        assert_eq!(resolved.breakdown, Some(breakdown));
    }

    #[test]
    fn fallback_needs_both_profiles() {
        let resolved = resolve_score(None, None, Some(&profile_a()), Some(&profile_a())).unwrap();
        assert_eq!(resolved.value, 100);
        assert_eq!(resolved.source, ScoreSource::Fallback);

        assert!(resolve_score(None, None, Some(&profile_a()), None).is_none());
    }
}
