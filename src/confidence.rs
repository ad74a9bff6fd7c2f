//! Confidence policy
//!
//! Two rules applied after synthesis:
//! - Boost: scraped news/earnings in the context raises the synthesis
//!   confidence by a fixed step, capped below 1.0. The boost also applies
//!   when synthesis itself degraded to its failure confidence.
//! - Clarification floor: below the threshold the displayed text is swapped
//!   for a fixed clarification prompt. The numeric confidence is reported
//!   as computed, never clamped to the threshold.

/// Confidence increment when scraped data backed the context.
pub const SCRAPED_DATA_BOOST: f64 = 0.10;

/// Upper bound after boosting.
pub const CONFIDENCE_CAP: f64 = 0.95;

/// Displayed when confidence falls below the threshold.
pub const CLARIFICATION_MESSAGE: &str = "I need more specific information to provide an accurate response. Could you please clarify your question?";

/// Apply the scraped-data boost: `min(0.95, base + 0.10)` when news or
/// earnings were non-empty, otherwise `base` unchanged.
pub fn boost(base: f64, has_scraped_data: bool) -> f64 {
    if has_scraped_data {
        (base + SCRAPED_DATA_BOOST).min(CONFIDENCE_CAP)
    } else {
        base
    }
}

/// Strict less-than comparison against the threshold. A confidence exactly
/// at the threshold does not trigger the clarification fallback.
pub fn needs_clarification(confidence: f64, threshold: f64) -> bool {
    confidence < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boost_applies_with_scraped_data() {
        assert!((boost(0.6, true) - 0.7).abs() < 1e-9);
        assert!((boost(0.5, true) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_boost_capped() {
        assert_eq!(boost(0.9, true), 0.95);
        assert_eq!(boost(0.95, true), 0.95);
    }

    #[test]
    fn test_no_boost_without_scraped_data() {
        assert_eq!(boost(0.6, false), 0.6);
        assert_eq!(boost(0.0, false), 0.0);
    }

    #[test]
    fn test_boost_on_failure_confidence() {
        // Synthesis degraded to 0.0; the boost still applies and the result
        // stays under the clarification threshold.
        let boosted = boost(0.0, true);
        assert_eq!(boosted, 0.1);
        assert!(needs_clarification(boosted, 0.7));
    }

    #[test]
    fn test_boost_monotonic() {
        let mut previous = 0.0;
        for i in 0..=10 {
            let base = f64::from(i) / 10.0;
            let boosted = boost(base, true);
            assert!(boosted >= previous);
            assert!((0.0..=CONFIDENCE_CAP).contains(&boosted));
            previous = boosted;
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!needs_clarification(0.7, 0.7));
        assert!(needs_clarification(0.699, 0.7));
        assert!(!needs_clarification(0.71, 0.7));
    }
}
