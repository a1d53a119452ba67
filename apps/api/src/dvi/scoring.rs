//! DVI scoring — the two weighted-index calculators and the text heuristic.
//!
//! Two formula variants live here on purpose:
//! - the 5-pillar "record" formula (`compute_overall_and_level`), persisted per user
//! - the 4-pillar "pilot" formula (`compute_pilot_dvi`), stateless scoring + commentary
//!
//! They use different weight sets and different band thresholds per call site.
//! Do not unify them behind one parameterized function.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The four DVI pillars, all on a 0–100 scale.
///
/// Used both as the heuristic suggestion payload (soft-clamped to [10, 95])
/// and as the pilot score breakdown (hard-clamped to [0, 100]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DviPillars {
    pub stability: f64,
    pub growth: f64,
    pub wellbeing_load: f64,
    pub social_support: f64,
}

/// Input for the 5-pillar record formula. All scores expected in [0, 100];
/// range is validated at the HTTP boundary, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct DviCalculationInput {
    pub finance_score: f64,
    pub logistics_score: f64,
    pub health_score: f64,
    pub education_score: f64,
    pub wellbeing_score: f64,
}

/// Discrete level derived from the record formula's overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DviLevel {
    Low,
    Medium,
    High,
}

impl DviLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DviLevel::Low => "Low",
            DviLevel::Medium => "Medium",
            DviLevel::High => "High",
        }
    }
}

impl fmt::Display for DviLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the 4-pillar pilot formula.
#[derive(Debug, Clone, Serialize)]
pub struct PilotDvi {
    pub overall: f64,
    pub breakdown: DviPillars,
    pub commentary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared utilities
// ────────────────────────────────────────────────────────────────────────────

/// Keeps a score within a declared range: `max(min, min(max, value))`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Rounds to one decimal place (the pilot formula's output precision).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ────────────────────────────────────────────────────────────────────────────
// Text heuristic
// ────────────────────────────────────────────────────────────────────────────

// Trigger substrings, matched case-insensitively against the raw text.
// Substring containment (not whole-word) is deliberate: "can't pay" and
// "no job" would not survive naive tokenization.
const FINANCIAL_STRESS: &[&str] = &[
    "rent", "bills", "money", "debt", "can't pay", "unemployed", "no job",
];
const ACADEMIC_PRESSURE: &[&str] = &[
    "exam", "session", "thesis", "deadline", "university", "study",
];
const DISTRESS: &[&str] = &[
    "anxiety", "panic", "burnout", "tired", "exhausted", "overwhelmed", "stressed",
];
const ISOLATION: &[&str] = &["alone", "no friends", "isolated", "lonely", "nobody"];

fn mentions_any(text: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| text.contains(t))
}

/// Converts free text into a rough DVI suggestion.
///
/// A simple keyword heuristic for the pilot: each category adjusts its pillar(s)
/// additively and independently, then every pillar is soft-clamped to [10, 95].
/// Deterministic, total; an empty string yields the 70.0 baseline on all pillars.
pub fn infer_dvi_from_text(text: &str) -> DviPillars {
    let t = text.to_lowercase();

    let mut stability = 70.0;
    let mut growth = 70.0;
    let mut wellbeing_load = 70.0;
    let mut social_support = 70.0;

    // Money / rent / job stress hurts stability
    if mentions_any(&t, FINANCIAL_STRESS) {
        stability -= 20.0;
        wellbeing_load += 10.0; // more pressure
    }

    // Exams / study / deadlines: growth pressure + wellbeing load
    if mentions_any(&t, ACADEMIC_PRESSURE) {
        growth -= 10.0;
        wellbeing_load += 10.0;
    }

    // Stress / burnout / anxiety: higher wellbeing load
    if mentions_any(&t, DISTRESS) {
        wellbeing_load += 15.0;
    }

    // Social isolation: lower social support
    if mentions_any(&t, ISOLATION) {
        social_support -= 15.0;
    }

    DviPillars {
        stability: clamp(stability, 10.0, 95.0),
        growth: clamp(growth, 10.0, 95.0),
        wellbeing_load: clamp(wellbeing_load, 10.0, 95.0),
        social_support: clamp(social_support, 10.0, 95.0),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 5-pillar record formula
// ────────────────────────────────────────────────────────────────────────────

const FINANCE_WEIGHT: f64 = 0.25;
const LOGISTICS_WEIGHT: f64 = 0.20;
const HEALTH_WEIGHT: f64 = 0.20;
const EDUCATION_WEIGHT: f64 = 0.20;
const WELLBEING_WEIGHT: f64 = 0.15;

/// Weighted sum of the five record pillars plus the level band.
///
/// Inputs are trusted to be in [0, 100] (validated by the calling handler);
/// this variant applies no clamping of its own.
pub fn compute_overall_and_level(input: &DviCalculationInput) -> (f64, DviLevel) {
    let overall = input.finance_score * FINANCE_WEIGHT
        + input.logistics_score * LOGISTICS_WEIGHT
        + input.health_score * HEALTH_WEIGHT
        + input.education_score * EDUCATION_WEIGHT
        + input.wellbeing_score * WELLBEING_WEIGHT;

    let level = if overall >= 80.0 {
        DviLevel::High
    } else if overall >= 50.0 {
        DviLevel::Medium
    } else {
        DviLevel::Low
    };

    (overall, level)
}

// ────────────────────────────────────────────────────────────────────────────
// 4-pillar pilot formula
// ────────────────────────────────────────────────────────────────────────────

fn commentary_for(overall: f64) -> &'static str {
    if overall >= 80.0 {
        "You are in a strong development zone. Let’s keep reinforcing what already works."
    } else if overall >= 60.0 {
        "You have a solid base with some pressure points. We should prioritise 1–2 weaker pillars."
    } else if overall >= 40.0 {
        "You are in a fragile phase. We should design a concrete plan across stability, growth, and support."
    } else {
        "Critical support needed. VitaAvanza should activate all available tools, services, and mentors for you."
    }
}

/// DVI = [Stability, Growth, Wellbeing Load, Social Support] → 0–100 index.
///
/// Clamps each pillar defensively to [0, 100], inverts wellbeing load (higher
/// load means more pressure, so it subtracts from the positive index), applies
/// the pilot weight set, and rounds the overall to one decimal place.
pub fn compute_pilot_dvi(input: &DviPillars) -> PilotDvi {
    let stability = clamp(input.stability, 0.0, 100.0);
    let growth = clamp(input.growth, 0.0, 100.0);
    let wellbeing_load = clamp(input.wellbeing_load, 0.0, 100.0);
    let social_support = clamp(input.social_support, 0.0, 100.0);

    let normalized_wellbeing = 100.0 - wellbeing_load;

    let overall = 0.30 * stability
        + 0.30 * growth
        + 0.25 * normalized_wellbeing
        + 0.15 * social_support;

    PilotDvi {
        overall: round1(overall),
        breakdown: DviPillars {
            stability,
            growth,
            wellbeing_load,
            social_support,
        },
        commentary: commentary_for(overall).to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn calc5(f: f64, l: f64, h: f64, e: f64, w: f64) -> (f64, DviLevel) {
        compute_overall_and_level(&DviCalculationInput {
            finance_score: f,
            logistics_score: l,
            health_score: h,
            education_score: e,
            wellbeing_score: w,
        })
    }

    fn pillars(s: f64, g: f64, wl: f64, ss: f64) -> DviPillars {
        DviPillars {
            stability: s,
            growth: g,
            wellbeing_load: wl,
            social_support: ss,
        }
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(150.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(-5.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
    }

    #[test]
    fn test_heuristic_is_deterministic() {
        let text = "I'm exhausted, exams coming up and I can't pay rent";
        assert_eq!(infer_dvi_from_text(text), infer_dvi_from_text(text));
    }

    #[test]
    fn test_heuristic_empty_string_is_baseline() {
        let p = infer_dvi_from_text("");
        assert_eq!(p, pillars(70.0, 70.0, 70.0, 70.0));
    }

    #[test]
    fn test_heuristic_stays_in_range() {
        // Every category fires: wellbeing_load would reach 70+10+10+15 = 105
        // without the soft clamp.
        let p = infer_dvi_from_text(
            "no job, can't pay rent, thesis deadline, burnout, lonely and isolated",
        );
        for v in [p.stability, p.growth, p.wellbeing_load, p.social_support] {
            assert!((10.0..=95.0).contains(&v), "pillar out of range: {v}");
        }
        assert_eq!(p.wellbeing_load, 95.0);
    }

    #[test]
    fn test_heuristic_is_case_insensitive() {
        let p = infer_dvi_from_text("ANXIETY about my RENT");
        assert_eq!(p.stability, 50.0);
        assert_eq!(p.wellbeing_load, 95.0); // 70 + 10 + 15
    }

    #[test]
    fn test_heuristic_categories_are_additive() {
        let p = infer_dvi_from_text("I'm alone and can't pay rent");
        assert_eq!(p.stability, 50.0); // 70 - 20
        assert_eq!(p.social_support, 55.0); // 70 - 15
        assert_eq!(p.growth, 70.0);
        assert_eq!(p.wellbeing_load, 80.0); // financial category adds load too
    }

    #[test]
    fn test_heuristic_substring_not_whole_word() {
        // "studying" contains "study"; matching is substring containment
        let p = infer_dvi_from_text("studying late again");
        assert_eq!(p.growth, 60.0);
    }

    #[test]
    fn test_record_weights_sum_to_one() {
        let sum = FINANCE_WEIGHT
            + LOGISTICS_WEIGHT
            + HEALTH_WEIGHT
            + EDUCATION_WEIGHT
            + WELLBEING_WEIGHT;
        assert!((sum - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_perfect_scores() {
        let (overall, level) = calc5(100.0, 100.0, 100.0, 100.0, 100.0);
        assert!((overall - 100.0).abs() < 1e-9, "overall was {overall}");
        assert_eq!(level, DviLevel::High);
    }

    #[test]
    fn test_record_level_boundaries() {
        assert_eq!(calc5(80.0, 80.0, 80.0, 80.0, 80.0).1, DviLevel::High);
        assert_eq!(
            calc5(79.999, 79.999, 79.999, 79.999, 79.999).1,
            DviLevel::Medium
        );
        assert_eq!(calc5(50.0, 50.0, 50.0, 50.0, 50.0).1, DviLevel::Medium);
        assert_eq!(
            calc5(49.999, 49.999, 49.999, 49.999, 49.999).1,
            DviLevel::Low
        );
    }

    #[test]
    fn test_record_no_internal_clamp() {
        // The record path trusts caller-validated input; out-of-range values
        // flow straight through the weighted sum.
        let (overall, _) = calc5(200.0, 200.0, 200.0, 200.0, 200.0);
        assert!((overall - 200.0).abs() < 1e-9, "overall was {overall}");
    }

    #[test]
    fn test_pilot_inverts_wellbeing_load() {
        let result = compute_pilot_dvi(&pillars(0.0, 0.0, 0.0, 0.0));
        // Only the inverted wellbeing term contributes: 0.25 * 100
        assert!((result.overall - 25.0).abs() < 1e-9);
        assert!(result.commentary.starts_with("Critical support needed"));
    }

    #[test]
    fn test_pilot_clamps_before_computing() {
        let result = compute_pilot_dvi(&pillars(150.0, -50.0, 50.0, 50.0));
        assert_eq!(result.breakdown, pillars(100.0, 0.0, 50.0, 50.0));
        // 30 + 0 + 12.5 + 7.5
        assert!((result.overall - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_pilot_rounds_to_one_decimal() {
        let result = compute_pilot_dvi(&pillars(33.33, 47.19, 58.21, 12.87));
        let scaled = result.overall * 10.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-9,
            "overall not rounded: {}",
            result.overall
        );
    }

    #[test]
    fn test_pilot_commentary_bands() {
        // wellbeing_load = 100 zeroes the inverted term, so overall tracks the
        // other three weights directly.
        let high = compute_pilot_dvi(&pillars(100.0, 100.0, 0.0, 100.0));
        assert!((high.overall - 100.0).abs() < 1e-9);
        assert!(high.commentary.contains("strong development zone"));

        let solid = compute_pilot_dvi(&pillars(70.0, 70.0, 30.0, 70.0));
        assert!((solid.overall - 70.0).abs() < 1e-9);
        assert!(solid.commentary.contains("solid base"));

        let fragile = compute_pilot_dvi(&pillars(50.0, 50.0, 50.0, 50.0));
        assert!((fragile.overall - 50.0).abs() < 1e-9);
        assert!(fragile.commentary.contains("fragile phase"));
    }

    #[test]
    fn test_pilot_commentary_lower_bounds() {
        // pillars(x, x, 100-x, x) makes the overall come out to exactly x:
        // 0.30x + 0.30x + 0.25x + 0.15x. Band lower bounds are inclusive.
        let exactly = |x: f64| compute_pilot_dvi(&pillars(x, x, 100.0 - x, x));

        let at_80 = exactly(80.0);
        assert!((at_80.overall - 80.0).abs() < 1e-9);
        assert!(at_80.commentary.contains("strong development zone"));

        let at_60 = exactly(60.0);
        assert!((at_60.overall - 60.0).abs() < 1e-9);
        assert!(at_60.commentary.contains("solid base"));

        let at_40 = exactly(40.0);
        assert!((at_40.overall - 40.0).abs() < 1e-9);
        assert!(at_40.commentary.contains("fragile phase"));

        // Just below each breakpoint falls into the next band down
        assert!(exactly(79.999).commentary.contains("solid base"));
        assert!(exactly(59.999).commentary.contains("fragile phase"));
        assert!(exactly(39.999)
            .commentary
            .starts_with("Critical support needed"));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(DviLevel::High.to_string(), "High");
        assert_eq!(DviLevel::Medium.as_str(), "Medium");
        assert_eq!(DviLevel::Low.as_str(), "Low");
    }
}
