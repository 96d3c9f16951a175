//! Mock classifier for tests.

use super::Classify;
use super::error::ClassifierError;
use super::types::Classification;

/// Test double implementing [`Classify`] with a canned outcome.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    outcome: MockOutcome,
    model_loaded: bool,
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Result(Classification),
    Error(String),
}

impl MockClassifier {
    /// Always returns the given classification, ignoring the input text.
    pub fn with_result(result: Classification) -> Self {
        Self {
            outcome: MockOutcome::Result(result),
            model_loaded: true,
        }
    }

    /// Always fails with an inference error carrying `reason`.
    pub fn with_error(reason: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Error(reason.into()),
            model_loaded: true,
        }
    }

    pub fn with_model_loaded(mut self, loaded: bool) -> Self {
        self.model_loaded = loaded;
        self
    }
}

impl Classify for MockClassifier {
    fn classify(
        &self,
        _text: &str,
        _candidate_labels: &[&str],
        _hypothesis_template: &str,
    ) -> Result<Classification, ClassifierError> {
        match &self.outcome {
            MockOutcome::Result(result) => Ok(result.clone()),
            MockOutcome::Error(reason) => Err(ClassifierError::InferenceFailed {
                reason: reason.clone(),
            }),
        }
    }

    fn is_model_loaded(&self) -> bool {
        self.model_loaded
    }
}
