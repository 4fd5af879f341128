//! One-shot artifact loading for both pipelines
//!
//! Each pipeline loads independently: a failure here is fatal to that
//! pipeline's readiness only and never blocks the other pipeline from
//! being published.

use crate::artifact::{ArtifactSource, DeviceType};
use crate::email::{EmailClassifier, DEFAULT_MAX_LENGTH};
use crate::url::UrlClassifier;
use phishguard_core::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem locations of the URL pipeline's paired artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlArtifactPaths {
    /// Linear model artifact (JSON)
    pub model: PathBuf,
    /// Fitted vectorizer artifact (JSON)
    pub vectorizer: PathBuf,
}

/// Location and runtime settings for the email pipeline's checkpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailArtifactPaths {
    /// Directory holding config.json, tokenizer.json, model.safetensors
    pub model_dir: PathBuf,

    /// Fetch the checkpoint files from this Hugging Face repo instead of
    /// `model_dir`
    #[serde(default)]
    pub hub_repo: Option<String>,

    #[serde(default)]
    pub hub_revision: Option<String>,

    #[serde(default)]
    pub device: DeviceType,

    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

impl EmailArtifactPaths {
    fn source_for(&self, filename: &str) -> ArtifactSource {
        match &self.hub_repo {
            Some(repo_id) => ArtifactSource::HuggingFace {
                repo_id: repo_id.clone(),
                revision: self.hub_revision.clone(),
                filename: filename.to_string(),
            },
            None => ArtifactSource::Local(self.model_dir.join(filename)),
        }
    }
}

/// Load the URL pipeline from its artifacts
pub fn load_url_pipeline(paths: &UrlArtifactPaths) -> Result<UrlClassifier> {
    tracing::info!(
        model = %paths.model.display(),
        vectorizer = %paths.vectorizer.display(),
        "loading url classifier"
    );
    let classifier = UrlClassifier::load(&paths.model, &paths.vectorizer)?;
    tracing::info!("url classifier loaded");
    Ok(classifier)
}

/// Load the email pipeline from its checkpoint
pub fn load_email_pipeline(paths: &EmailArtifactPaths) -> Result<EmailClassifier> {
    tracing::info!(model_dir = %paths.model_dir.display(), "loading email classifier");

    let config_path = paths.source_for("config.json").resolve("email model config")?;
    let tokenizer_path = paths.source_for("tokenizer.json").resolve("email tokenizer")?;
    let weights_path = paths
        .source_for("model.safetensors")
        .resolve("email model weights")?;

    let classifier = EmailClassifier::load(
        &config_path,
        &tokenizer_path,
        &weights_path,
        paths.device,
        paths.max_length,
    )?;
    tracing::info!(max_length = paths.max_length, "email classifier loaded");
    Ok(classifier)
}
