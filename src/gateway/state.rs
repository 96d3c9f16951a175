use std::sync::Arc;

use crate::classifier::Classify;

/// Shared handler state.
///
/// The classifier is loaded once at startup and shared read-only for the
/// process lifetime; `None` records a failed initialization, in which case
/// the service stays up but every prediction returns a server error until
/// restart (matching the liveness/identity endpoints remaining available).
pub struct HandlerState<C: Classify + 'static> {
    pub classifier: Option<Arc<C>>,
}

impl<C: Classify + 'static> Clone for HandlerState<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
        }
    }
}

impl<C: Classify + 'static> HandlerState<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// State for a process whose classifier failed to initialize.
    pub fn unavailable() -> Self {
        Self { classifier: None }
    }

    /// `"real"`, `"stub"`, or `"unavailable"` for health reporting.
    pub fn classifier_mode(&self) -> &'static str {
        match &self.classifier {
            Some(classifier) if classifier.is_model_loaded() => "real",
            Some(_) => "stub",
            None => "unavailable",
        }
    }
}
