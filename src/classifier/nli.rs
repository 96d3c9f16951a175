use candle_core::{DType, Device, IndexOp, Result, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// MNLI checkpoints emit three logits (contradiction / neutral / entailment).
pub const NLI_NUM_LABELS: usize = 3;

/// Subset of the HuggingFace config.json we read beyond the encoder config.
#[derive(serde::Deserialize)]
struct HubLabelConfig {
    #[serde(default)]
    label2id: Option<HashMap<String, usize>>,
}

/// Sequence-classification heads found on MNLI checkpoints. RoBERTa exports
/// a two-layer head (`classifier.dense` + `classifier.out_proj`); BERT-style
/// exports a single linear `classifier`.
enum ClassificationHead {
    Linear(Linear),
    Roberta { dense: Linear, out_proj: Linear },
}

impl ClassificationHead {
    fn load(vb: &VarBuilder, hidden_size: usize) -> Result<Self> {
        if vb.contains_tensor("classifier.out_proj.weight") {
            let dense = candle_nn::linear(hidden_size, hidden_size, vb.pp("classifier.dense"))?;
            let out_proj =
                candle_nn::linear(hidden_size, NLI_NUM_LABELS, vb.pp("classifier.out_proj"))?;
            Ok(Self::Roberta { dense, out_proj })
        } else {
            let classifier = candle_nn::linear(hidden_size, NLI_NUM_LABELS, vb.pp("classifier"))?;
            Ok(Self::Linear(classifier))
        }
    }

    fn forward(&self, cls_token: &Tensor) -> Result<Tensor> {
        match self {
            Self::Linear(classifier) => classifier.forward(cls_token),
            Self::Roberta { dense, out_proj } => {
                let hidden = dense.forward(cls_token)?.tanh()?;
                out_proj.forward(&hidden)
            }
        }
    }
}

struct NliClassifierImpl {
    encoder: BertModel,
    head: ClassificationHead,
    entailment_index: usize,
}

impl NliClassifierImpl {
    fn load(vb: VarBuilder, config: &Config, entailment_index: usize) -> Result<Self> {
        let encoder = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("bert"), config)?
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            BertModel::load(vb.pp("roberta"), config)?
        } else {
            BertModel::load(vb.clone(), config)?
        };

        let head = ClassificationHead::load(&vb, config.hidden_size)?;

        Ok(Self {
            encoder,
            head,
            entailment_index,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        let output = self
            .encoder
            .forward(input_ids, token_type_ids, attention_mask)?;
        let cls_token = output.i((.., 0, ..))?;
        self.head.forward(&cls_token)
    }
}

/// NLI sequence-classification model (BERT/RoBERTa encoder + 3-way head)
/// loaded from a safetensors checkpoint directory.
#[derive(Clone)]
pub struct NliClassifier(std::sync::Arc<NliClassifierImpl>);

impl NliClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| candle_core::Error::Msg(format!("Failed to parse config: {}", e)))?;

        let entailment_index = entailment_index_from(&config_content);

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        let model = NliClassifierImpl::load(vb, &config, entailment_index)?;

        Ok(Self(std::sync::Arc::new(model)))
    }

    /// Raw logits with shape `[batch, 3]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }

    /// Index of the entailment logit within the model output.
    pub fn entailment_index(&self) -> usize {
        self.0.entailment_index
    }
}

/// Resolves the entailment logit index from `label2id` in config.json,
/// matching the label by name (case-insensitive) rather than by position.
fn entailment_index_from(config_content: &str) -> usize {
    let fallback = NLI_NUM_LABELS - 1;

    let labels: HubLabelConfig = match serde_json::from_str(config_content) {
        Ok(labels) => labels,
        Err(_) => return fallback,
    };

    let Some(label2id) = labels.label2id else {
        warn!("config.json has no label2id, assuming entailment is the last logit");
        return fallback;
    };

    match label2id
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("entailment"))
    {
        Some((_, index)) => *index,
        None => {
            warn!("label2id has no entailment entry, assuming the last logit");
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entailment_index_reads_label2id_by_name() {
        let config = r#"{"label2id": {"CONTRADICTION": 0, "NEUTRAL": 1, "ENTAILMENT": 2}}"#;
        assert_eq!(entailment_index_from(config), 2);

        let shuffled = r#"{"label2id": {"entailment": 0, "neutral": 1, "contradiction": 2}}"#;
        assert_eq!(entailment_index_from(shuffled), 0);
    }

    #[test]
    fn entailment_index_falls_back_to_last_logit() {
        assert_eq!(entailment_index_from("{}"), NLI_NUM_LABELS - 1);
        assert_eq!(
            entailment_index_from(r#"{"label2id": {"yes": 0, "no": 1}}"#),
            NLI_NUM_LABELS - 1
        );
        assert_eq!(entailment_index_from("not json"), NLI_NUM_LABELS - 1);
    }
}
