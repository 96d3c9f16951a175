use serde::{Deserialize, Serialize};

/// Binary verdict over the input text, serialized as `"true"` / `"false"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "true")]
    True,
    #[serde(rename = "false")]
    False,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "true",
            Verdict::False => "false",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The response body of a successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Likelihood that the text is truthful news, rounded to 4 decimals.
    pub truth_probability: f64,

    /// `"true"` when the raw truth probability strictly exceeds 0.5.
    pub label: Verdict,
}
