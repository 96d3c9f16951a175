//! Verdict decision policy.
//!
//! A pure mapping from the classifier's label distribution to the binary
//! verdict and normalized confidence returned by the API. The truthful-news
//! score is located **by label name**; the verdict boundary is strict
//! (`p > 0.5`), so a tie at exactly 0.5 resolves to `"false"`.

pub mod error;
pub mod types;


pub use error::PolicyError;
pub use types::{Prediction, Verdict};

use crate::classifier::Classification;
use crate::constants::{LABEL_TRUTHFUL, PROBABILITY_DECIMALS, TRUTH_THRESHOLD};

/// Maps a classification to the prediction returned to the caller.
///
/// Deterministic and side-effect free; identical input always yields an
/// identical prediction. Fails if the `"truthful news"` candidate is absent
/// from `result`.
pub fn decide(result: &Classification) -> Result<Prediction, PolicyError> {
    let truth_score = result
        .score_for(LABEL_TRUTHFUL)
        .ok_or_else(|| PolicyError::MissingLabel {
            label: LABEL_TRUTHFUL.to_string(),
        })?;

    // The verdict is taken on the raw score; rounding applies only to the
    // reported probability.
    let label = if truth_score > TRUTH_THRESHOLD {
        Verdict::True
    } else {
        Verdict::False
    };

    Ok(Prediction {
        truth_probability: round_probability(truth_score),
        label,
    })
}

fn round_probability(score: f32) -> f64 {
    let factor = 10f64.powi(PROBABILITY_DECIMALS);
    (f64::from(score) * factor).round() / factor
}
