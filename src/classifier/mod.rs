//! Zero-shot classification.
//!
//! [`ZeroShotClassifier`] wraps an NLI checkpoint (candle) behind the
//! [`Classify`] trait so the gateway can be exercised with a test double.
//! Without a configured model path it runs in stub mode with a deterministic
//! heuristic distribution.

pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// NLI model wrapper (BERT/RoBERTa encoder + 3-way head).
pub mod nli;
pub mod types;
pub mod zero_shot;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use config::{MAX_SEQ_LEN, ZeroShotConfig};
pub use error::ClassifierError;
pub use nli::{NLI_NUM_LABELS, NliClassifier};
pub use types::{Classification, LabelScore};
pub use zero_shot::ZeroShotClassifier;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockClassifier;

/// The classification seam consumed by the gateway.
///
/// Implementations score `text` against each candidate label, returning a
/// probability distribution over the labels. `hypothesis_template` must
/// contain a `{}` placeholder for the label. Calls are independent and take
/// `&self` only; one instance is shared read-only for the process lifetime.
pub trait Classify: Send + Sync {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        hypothesis_template: &str,
    ) -> Result<Classification, ClassifierError>;

    /// `true` when real model weights are loaded (stub mode returns `false`).
    fn is_model_loaded(&self) -> bool;
}
