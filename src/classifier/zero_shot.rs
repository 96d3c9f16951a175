use candle_core::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::Classify;
use super::config::{MAX_SEQ_LEN, ZeroShotConfig};
use super::device::select_device;
use super::error::ClassifierError;
use super::nli::NliClassifier;
use super::types::{Classification, LabelScore};

/// Zero-shot text classifier backed by an NLI checkpoint.
///
/// Each candidate label is scored by entailment of the rendered hypothesis
/// against the input text; the entailment logits are then softmaxed across
/// candidates to form the final distribution. Without a configured model
/// path the classifier runs in stub mode with a deterministic heuristic.
pub struct ZeroShotClassifier {
    device: candle_core::Device,
    config: ZeroShotConfig,
    model_loaded: bool,
    model: Option<NliClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for ZeroShotClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroShotClassifier")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model_loaded)
            .finish()
    }
}

impl ZeroShotClassifier {
    pub fn load(config: ZeroShotConfig) -> Result<Self, ClassifierError> {
        if let Err(msg) = config.validate() {
            return Err(ClassifierError::InvalidConfig { reason: msg });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for classifier");

        let Some(model_path) = config.model_path.clone() else {
            info!("No model path configured, operating in stub mode");
            return Ok(Self {
                device,
                config,
                model_loaded: false,
                model: None,
                tokenizer: None,
            });
        };

        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound { path: model_path });
        }

        for required in ["config.json", "model.safetensors", "tokenizer.json"] {
            if !model_path.join(required).exists() {
                return Err(ClassifierError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        info!(model_path = %model_path.display(), "Loading NLI model");

        let model = NliClassifier::load(&model_path, &device).map_err(|e| {
            ClassifierError::ModelLoadFailed {
                reason: format!("Failed to load NLI model: {}", e),
            }
        })?;

        let tokenizer = load_tokenizer(&model_path)?;

        info!("NLI model loaded successfully");

        Ok(Self {
            device,
            config,
            model_loaded: true,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, ClassifierError> {
        Self::load(ZeroShotConfig::stub())
    }

    pub fn config(&self) -> &ZeroShotConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    fn entailment_logit(
        &self,
        model: &NliClassifier,
        tokenizer: &Tokenizer,
        premise: &str,
        hypothesis: &str,
    ) -> Result<f32, ClassifierError> {
        let tokens = tokenizer.encode((premise, hypothesis), true).map_err(|e| {
            ClassifierError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let token_ids = Tensor::new(tokens.get_ids(), &self.device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(tokens.get_type_ids(), &self.device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(tokens.get_attention_mask(), &self.device)?.unsqueeze(0)?;

        let logits = model
            .forward(&token_ids, &type_ids, Some(&attention_mask))
            .map_err(|e| ClassifierError::InferenceFailed {
                reason: e.to_string(),
            })?;

        let logits = logits.flatten_all()?.to_vec1::<f32>()?;
        logits.get(model.entailment_index()).copied().ok_or_else(|| {
            ClassifierError::InferenceFailed {
                reason: format!(
                    "entailment index {} out of range for {} logits",
                    model.entailment_index(),
                    logits.len()
                ),
            }
        })
    }

    /// Deterministic stand-in distribution used when no model is loaded.
    ///
    /// Labels mentioning "fake" or "false" absorb the sensationalism evidence
    /// found in the text; the remaining labels share the complement. The
    /// result is normalized so scores sum to 1.
    fn stub_classification(&self, text: &str, candidate_labels: &[&str]) -> Classification {
        let fake_evidence = sensationalism_evidence(text);

        let weights: Vec<f32> = candidate_labels
            .iter()
            .map(|label| {
                let lower = label.to_lowercase();
                if lower.contains("fake") || lower.contains("false") {
                    fake_evidence
                } else {
                    1.0 - fake_evidence
                }
            })
            .collect();

        let total: f32 = weights.iter().sum();
        let mut pairs: Vec<LabelScore> = candidate_labels
            .iter()
            .zip(weights)
            .map(|(label, weight)| LabelScore::new(*label, weight / total.max(f32::EPSILON)))
            .collect();

        pairs.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(fake_evidence = fake_evidence, "Computed classification (stub)");

        Classification::new(pairs)
    }
}

impl Classify for ZeroShotClassifier {
    fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        hypothesis_template: &str,
    ) -> Result<Classification, ClassifierError> {
        if candidate_labels.is_empty() {
            return Err(ClassifierError::InvalidConfig {
                reason: "at least one candidate label is required".to_string(),
            });
        }

        if !hypothesis_template.contains("{}") {
            return Err(ClassifierError::InvalidConfig {
                reason: format!(
                    "hypothesis template has no {{}} placeholder: {hypothesis_template}"
                ),
            });
        }

        debug!(
            text_len = text.len(),
            num_labels = candidate_labels.len(),
            model_loaded = self.model_loaded,
            "Classifying text"
        );

        let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) else {
            return Ok(self.stub_classification(text, candidate_labels));
        };

        let mut entailment_logits = Vec::with_capacity(candidate_labels.len());
        for label in candidate_labels {
            let hypothesis = hypothesis_template.replace("{}", label);
            entailment_logits.push(self.entailment_logit(model, tokenizer, text, &hypothesis)?);
        }

        let scores = softmax(&entailment_logits);

        let mut pairs: Vec<LabelScore> = candidate_labels
            .iter()
            .zip(scores)
            .map(|(label, score)| LabelScore::new(*label, score))
            .collect();

        pairs.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Classification::new(pairs))
    }

    fn is_model_loaded(&self) -> bool {
        self.model_loaded
    }
}

fn load_tokenizer(model_path: &std::path::Path) -> Result<Tokenizer, ClassifierError> {
    let tokenizer_path = model_path.join("tokenizer.json");

    let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
        ClassifierError::ModelLoadFailed {
            reason: format!("Failed to load tokenizer: {}", e),
        }
    })?;

    // Cross-encoder inputs must fit the model's fixed sequence length.
    let truncation = TruncationParams {
        max_length: MAX_SEQ_LEN,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| ClassifierError::ModelLoadFailed {
            reason: format!("Failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}

/// Numerically stable softmax over a small logit slice.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|logit| (logit - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum.max(f32::EPSILON)).collect()
}

/// Scores how sensational the text reads, in [0, 1]. Deterministic.
fn sensationalism_evidence(text: &str) -> f32 {
    const MARKERS: [&str; 14] = [
        "shocking",
        "secret",
        "miracle",
        "they don't want",
        "cover-up",
        "hoax",
        "exposed",
        "wake up",
        "big pharma",
        "conspiracy",
        "government is hiding",
        "you won't believe",
        "doctors hate",
        "cure for everything",
    ];

    let lower = text.to_lowercase();

    let marker_hits = MARKERS
        .iter()
        .filter(|marker| lower.contains(*marker))
        .count();

    let exclamations = text.matches('!').count();

    let words: Vec<&str> = text.split_whitespace().collect();
    let caps_words = words
        .iter()
        .filter(|w| w.len() >= 3 && w.chars().all(|c| c.is_ascii_uppercase()))
        .count();
    let caps_ratio = caps_words as f32 / words.len().max(1) as f32;

    let raw = 0.5 * (marker_hits.min(4) as f32 / 4.0)
        + 0.3 * (exclamations.min(5) as f32 / 5.0)
        + 0.2 * (caps_ratio * 4.0).min(1.0);

    let normalized = 1.0 / (1.0 + (-6.0 * (raw - 0.5)).exp());

    normalized.clamp(0.0, 1.0)
}
