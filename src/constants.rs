//! Shared constants for the serving path.

/// Identity of the checkpoint this service is built around. Reported by the
/// root endpoint even when running in stub mode.
pub const MODEL_NAME: &str = "roberta-large-mnli";

/// Candidate label whose score becomes the truth probability.
pub const LABEL_TRUTHFUL: &str = "truthful news";

/// The opposing candidate label.
pub const LABEL_FAKE: &str = "fake news";

/// Hypothesis template for zero-shot NLI scoring. `{}` is replaced with the
/// candidate label before encoding.
pub const HYPOTHESIS_TEMPLATE: &str = "This text is {}.";

/// Verdict boundary. Strictly greater than this value maps to `"true"`;
/// a score of exactly 0.5 maps to `"false"`.
pub const TRUTH_THRESHOLD: f32 = 0.5;

/// Decimal places kept in the reported truth probability.
pub const PROBABILITY_DECIMALS: i32 = 4;

/// Response header naming the outcome class of every gateway response.
pub const VERIDICT_STATUS_HEADER: &str = "x-veridict-status";

pub const VERIDICT_STATUS_OK: &str = "ok";
pub const VERIDICT_STATUS_HEALTHY: &str = "healthy";
pub const VERIDICT_STATUS_ERROR: &str = "error";

/// Frontend dev origins allowed by the CORS layer.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];
