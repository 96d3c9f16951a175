//! Classifier output types.

/// One scored candidate label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// The candidate label text.
    pub label: String,
    /// Probability mass assigned to the label, in [0, 1].
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// A probability distribution over candidate labels, ordered by descending
/// score (the model's native ordering).
///
/// Consumers must look scores up **by label name** via [`Classification::score_for`];
/// positional access would silently break if the candidate ordering changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pairs: Vec<LabelScore>,
}

impl Classification {
    pub fn new(pairs: Vec<LabelScore>) -> Self {
        Self { pairs }
    }

    /// Builds a classification from `(label, score)` pairs, preserving order.
    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f32)>) -> Self {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(label, score)| LabelScore::new(label, score))
                .collect(),
        }
    }

    /// Returns the score for `label`, or `None` if the label is absent.
    pub fn score_for(&self, label: &str) -> Option<f32> {
        self.pairs
            .iter()
            .find(|pair| pair.label == label)
            .map(|pair| pair.score)
    }

    /// The scored pairs in descending-score order.
    pub fn pairs(&self) -> &[LabelScore] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
