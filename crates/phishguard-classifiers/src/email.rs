//! Email classifier pipeline: tokenizer + BERT-family sequence classifier
//!
//! The artifact is a fine-tuned sequence-classification checkpoint: a
//! `config.json`, a `tokenizer.json`, and `model.safetensors` holding the
//! encoder weights under `bert.*`, the pooler under `bert.pooler.dense.*`,
//! and the classification head under `classifier.*`.
//!
//! Inputs longer than the maximum sequence length are truncated from the
//! end before encoding. Truncation is lossy: the decision is computed on
//! the surviving prefix. Identical input on an unchanged model produces
//! identical output regardless of device placement.

use crate::artifact::DeviceType;
use crate::pipeline::Pipeline;
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use chrono::Utc;
use phishguard_core::{Error, Label, PipelineKind, PredictionResult, Result};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokenizers::{Tokenizer, TruncationParams};

/// Maximum number of tokens fed to the sequence classifier
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// The slice of `config.json` the classification head needs. The encoder
/// itself deserializes the full config separately.
#[derive(Debug, Clone, Deserialize)]
struct HeadConfig {
    hidden_size: usize,
    #[serde(default)]
    num_labels: Option<usize>,
    #[serde(default)]
    id2label: Option<std::collections::HashMap<String, String>>,
}

impl HeadConfig {
    fn num_labels(&self) -> usize {
        self.num_labels
            .or_else(|| self.id2label.as_ref().map(|m| m.len()))
            .unwrap_or(2)
    }
}

/// The loaded network: encoder, pooler, and classification head.
/// Read-only after load; shared by every in-flight request.
struct EmailModel {
    tokenizer: Tokenizer,
    encoder: BertModel,
    pooler: Linear,
    classifier: Linear,
    device: Device,
}

fn tensor_err(e: candle_core::Error) -> Error {
    Error::inference(e.to_string())
}

impl EmailModel {
    /// Tokenize, run the encoder, pool the first-token hidden state, and
    /// softmax the head's logits into a class distribution.
    fn forward(&self, text: &str) -> Result<(Label, f32)> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::inference(format!("tokenization failed: {e}")))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .map_err(tensor_err)?
            .unsqueeze(0)
            .map_err(tensor_err)?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
            .map_err(tensor_err)?
            .unsqueeze(0)
            .map_err(tensor_err)?;

        let hidden = self
            .encoder
            .forward(&input_ids, &token_type_ids, None)
            .map_err(tensor_err)?;

        // [batch, seq, hidden] -> first-token state -> tanh(dense) pooling
        let cls = hidden
            .narrow(1, 0, 1)
            .map_err(tensor_err)?
            .squeeze(1)
            .map_err(tensor_err)?;
        let pooled = self
            .pooler
            .forward(&cls)
            .map_err(tensor_err)?
            .tanh()
            .map_err(tensor_err)?;

        let logits = self.classifier.forward(&pooled).map_err(tensor_err)?;
        let probs = softmax(&logits, D::Minus1)
            .map_err(tensor_err)?
            .squeeze(0)
            .map_err(tensor_err)?
            .to_vec1::<f32>()
            .map_err(tensor_err)?;

        let (index, confidence) = argmax(&probs);
        Ok((Label::from_index(index), confidence))
    }
}

/// Load a tokenizer and configure it to truncate at `max_length` tokens.
///
/// Truncation keeps the left-to-right prefix and drops the tail, so the
/// classifier sees the start of a long body, not its end.
pub fn load_tokenizer(path: &Path, max_length: usize) -> Result<Tokenizer> {
    let mut tokenizer = Tokenizer::from_file(path)
        .map_err(|e| Error::artifact("email tokenizer", format!("{}: {e}", path.display())))?;
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| Error::artifact("email tokenizer", format!("invalid truncation: {e}")))?;
    Ok(tokenizer)
}

/// Arg-max over a class distribution: (class index, probability mass)
fn argmax(probs: &[f32]) -> (usize, f32) {
    probs
        .iter()
        .copied()
        .enumerate()
        .fold(
            (0, f32::NEG_INFINITY),
            |best, (idx, p)| if p > best.1 { (idx, p) } else { best },
        )
}

/// Email phishing classifier.
///
/// The decision is computed from the email body alone; sender and subject
/// are request context, not model input. Inference runs on the blocking
/// pool so slow forward passes never stall unrelated requests; when the
/// configured device is an exclusive accelerator, requests queue for it
/// FIFO behind a fair lock.
pub struct EmailClassifier {
    name: String,
    model: Arc<EmailModel>,
    max_length: usize,
    gate: Option<tokio::sync::Mutex<()>>,
}

impl EmailClassifier {
    /// Load the classifier from a sequence-classification checkpoint.
    pub fn load(
        config_path: &Path,
        tokenizer_path: &Path,
        weights_path: &Path,
        device: DeviceType,
        max_length: usize,
    ) -> Result<Self> {
        let config_content = std::fs::read_to_string(config_path).map_err(|e| {
            Error::artifact("email model config", format!("{}: {e}", config_path.display()))
        })?;
        let bert_config: BertConfig = serde_json::from_str(&config_content).map_err(|e| {
            Error::artifact("email model config", format!("{}: {e}", config_path.display()))
        })?;
        let head_config: HeadConfig = serde_json::from_str(&config_content).map_err(|e| {
            Error::artifact("email model config", format!("{}: {e}", config_path.display()))
        })?;

        let num_labels = head_config.num_labels();
        if num_labels != 2 {
            return Err(Error::artifact(
                "email model config",
                format!("expected a binary classifier, checkpoint has {num_labels} labels"),
            ));
        }

        let tokenizer = load_tokenizer(tokenizer_path, max_length)?;

        let candle_device = device.create_device()?;
        if !weights_path.exists() {
            return Err(Error::artifact(
                "email model weights",
                format!("file not found: {}", weights_path.display()),
            ));
        }

        tracing::info!(path = %weights_path.display(), ?device, "loading email model weights");
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(
                &[weights_path.to_path_buf()],
                DType::F32,
                &candle_device,
            )
            .map_err(|e| Error::artifact("email model weights", e.to_string()))?
        };

        let encoder = BertModel::load(vb.pp("bert"), &bert_config)
            .map_err(|e| Error::artifact("email model weights", e.to_string()))?;
        let pooler = candle_nn::linear(
            head_config.hidden_size,
            head_config.hidden_size,
            vb.pp("bert").pp("pooler").pp("dense"),
        )
        .map_err(|e| Error::artifact("email model weights", e.to_string()))?;
        let classifier = candle_nn::linear(head_config.hidden_size, num_labels, vb.pp("classifier"))
            .map_err(|e| Error::artifact("email model weights", e.to_string()))?;

        Ok(Self {
            name: "email-bert-sequence".to_string(),
            model: Arc::new(EmailModel {
                tokenizer,
                encoder,
                pooler,
                classifier,
                device: candle_device,
            }),
            max_length,
            gate: device
                .is_exclusive()
                .then(|| tokio::sync::Mutex::new(())),
        })
    }

    /// Maximum token count before truncation applies
    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[async_trait]
impl Pipeline for EmailClassifier {
    async fn predict(&self, body: &str) -> Result<PredictionResult> {
        let start = Instant::now();

        // Fair queue: exclusive accelerators serve one request at a time.
        let _gate = match &self.gate {
            Some(gate) => Some(gate.lock().await),
            None => None,
        };

        let model = Arc::clone(&self.model);
        let text = body.to_string();
        let (label, confidence) = tokio::task::spawn_blocking(move || model.forward(&text))
            .await
            .map_err(|e| Error::inference(format!("inference task failed: {e}")))??;

        tracing::debug!(%label, confidence, "email decision computed");

        Ok(PredictionResult {
            label,
            confidence: Some(confidence),
            timestamp: Utc::now(),
            latency_us: start.elapsed().as_micros() as u64,
            model: Some(self.name.clone()),
        })
    }

    fn kind(&self) -> PipelineKind {
        PipelineKind::Email
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_picks_the_winning_class() {
        assert_eq!(argmax(&[0.3, 0.7]), (1, 0.7));
        assert_eq!(argmax(&[0.9, 0.1]), (0, 0.9));
        // two-class arg-max confidence is always at least half the mass
        let (_, confidence) = argmax(&[0.5, 0.5]);
        assert!(confidence >= 0.5);
    }

    #[test]
    fn test_head_config_defaults_to_binary() {
        let head: HeadConfig = serde_json::from_str(r#"{"hidden_size": 768}"#).unwrap();
        assert_eq!(head.num_labels(), 2);

        let head: HeadConfig = serde_json::from_str(
            r#"{"hidden_size": 768, "id2label": {"0": "legitimate", "1": "phishing"}}"#,
        )
        .unwrap();
        assert_eq!(head.num_labels(), 2);

        let head: HeadConfig =
            serde_json::from_str(r#"{"hidden_size": 256, "num_labels": 4}"#).unwrap();
        assert_eq!(head.num_labels(), 4);
    }

    #[test]
    fn test_load_rejects_missing_checkpoint() {
        let missing = Path::new("/nonexistent/model");
        let err = EmailClassifier::load(
            &missing.join("config.json"),
            &missing.join("tokenizer.json"),
            &missing.join("model.safetensors"),
            DeviceType::Cpu,
            DEFAULT_MAX_LENGTH,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("email model config"));
    }
}
