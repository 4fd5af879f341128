//! Pipeline trait shared by both classifiers

use async_trait::async_trait;
use phishguard_core::{PipelineKind, PredictionResult, Result};

/// Capability interface for a loaded classifier pipeline.
///
/// A pipeline pairs a preprocessing transform with a classifier and maps
/// raw text to a label. Implementations are read-only after load and safe
/// to share across concurrent requests.
#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Classify the given text
    async fn predict(&self, text: &str) -> Result<PredictionResult>;

    /// Which request variant this pipeline serves
    fn kind(&self) -> PipelineKind;

    /// Get the pipeline name
    fn name(&self) -> &str;
}
