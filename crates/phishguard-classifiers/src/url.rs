//! URL classifier pipeline: TF-IDF features + linear decision boundary

use crate::artifact::ArtifactSource;
use crate::pipeline::Pipeline;
use crate::vectorizer::UrlVectorizer;
use async_trait::async_trait;
use chrono::Utc;
use phishguard_core::{Error, Label, PipelineKind, PredictionResult, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Serialized form of the fitted linear classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    /// One weight per vectorizer feature column
    pub weights: Vec<f32>,
    pub intercept: f32,
}

/// URL phishing classifier.
///
/// Maps a raw URL string through the paired vectorizer to a fixed-size
/// feature representation and applies a learned linear boundary:
/// label = phishing iff w·x + b > 0. The model emits a hard decision
/// only; no confidence is attached to results.
pub struct UrlClassifier {
    name: String,
    vectorizer: UrlVectorizer,
    weights: Vec<f32>,
    intercept: f32,
}

impl UrlClassifier {
    /// Load the classifier from its model and vectorizer artifacts.
    ///
    /// The two artifacts are paired 1:1: a weight vector whose length
    /// does not match the vectorizer's feature count is rejected here,
    /// at load time, never at predict time.
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self> {
        let model_path =
            ArtifactSource::Local(model_path.to_path_buf()).resolve("url classifier model")?;
        let vectorizer_path =
            ArtifactSource::Local(vectorizer_path.to_path_buf()).resolve("url vectorizer")?;

        tracing::info!(path = %model_path.display(), "loading url classifier model");
        let content = std::fs::read_to_string(&model_path).map_err(|e| {
            Error::artifact("url classifier model", format!("{}: {e}", model_path.display()))
        })?;
        let model: LinearModelArtifact = serde_json::from_str(&content).map_err(|e| {
            Error::artifact("url classifier model", format!("{}: {e}", model_path.display()))
        })?;

        tracing::info!(path = %vectorizer_path.display(), "loading url vectorizer");
        let vectorizer = UrlVectorizer::from_path(&vectorizer_path)?;

        Self::from_parts(model, vectorizer)
    }

    /// Assemble a classifier from already-deserialized artifacts
    pub fn from_parts(model: LinearModelArtifact, vectorizer: UrlVectorizer) -> Result<Self> {
        if model.weights.len() != vectorizer.dimension() {
            return Err(Error::artifact(
                "url classifier model",
                format!(
                    "weight vector length {} does not match vectorizer dimension {}",
                    model.weights.len(),
                    vectorizer.dimension()
                ),
            ));
        }

        Ok(Self {
            name: "url-tfidf-linear".to_string(),
            vectorizer,
            weights: model.weights,
            intercept: model.intercept,
        })
    }

    fn decision(&self, features: &[(usize, f32)]) -> f32 {
        features
            .iter()
            .map(|&(idx, value)| self.weights[idx] * value)
            .sum::<f32>()
            + self.intercept
    }
}

#[async_trait]
impl Pipeline for UrlClassifier {
    async fn predict(&self, url: &str) -> Result<PredictionResult> {
        let start = Instant::now();

        let features = self.vectorizer.transform(url);
        let decision = self.decision(&features);
        let label = if decision > 0.0 {
            Label::Phishing
        } else {
            Label::Legitimate
        };

        tracing::debug!(decision, %label, "url decision computed");

        Ok(PredictionResult {
            label,
            confidence: None,
            timestamp: Utc::now(),
            latency_us: start.elapsed().as_micros() as u64,
            model: Some(self.name.clone()),
        })
    }

    fn kind(&self) -> PipelineKind {
        PipelineKind::Url
    }

    fn name(&self) -> &str {
        &self.name
    }
}
