use std::path::PathBuf;

/// Maximum token length for a (premise, hypothesis) pair. Longer inputs are
/// truncated by the tokenizer.
pub const MAX_SEQ_LEN: usize = 512;

#[derive(Debug, Clone, Default)]
pub struct ZeroShotConfig {
    /// Directory with config.json, model.safetensors and tokenizer.json.
    /// `None` selects stub mode.
    pub model_path: Option<PathBuf>,
}

impl ZeroShotConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
        }
    }

    pub fn stub() -> Self {
        Self { model_path: None }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}

impl From<&crate::config::Config> for ZeroShotConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            model_path: config.model_path.clone(),
        }
    }
}
