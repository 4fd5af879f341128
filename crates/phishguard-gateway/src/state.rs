//! Process-wide serving state
//!
//! One `ServingState` is created at startup and cloned (Arc-backed) into
//! every request handler. Each pipeline occupies a slot that moves
//! `Unloaded -> Loading -> Ready` or `-> Failed` exactly once; there is no
//! path back to `Unloaded` short of a process restart. The artifacts
//! themselves are immutable once published, so readers never lock around
//! inference; the lock only guards the slot transition.

use parking_lot::RwLock;
use phishguard_classifiers::Pipeline;
use phishguard_core::{Error, PipelineKind, Readiness, Result};
use std::sync::Arc;

/// Lifecycle of a single pipeline's artifacts
pub enum PipelineSlot {
    Unloaded,
    Loading,
    Ready(Arc<dyn Pipeline>),
    Failed(String),
}

impl PipelineSlot {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Shared application state
#[derive(Clone)]
pub struct ServingState {
    url: Arc<RwLock<PipelineSlot>>,
    email: Arc<RwLock<PipelineSlot>>,
}

impl ServingState {
    /// Create the state with both pipelines unloaded
    pub fn new() -> Self {
        Self {
            url: Arc::new(RwLock::new(PipelineSlot::Unloaded)),
            email: Arc::new(RwLock::new(PipelineSlot::Unloaded)),
        }
    }

    fn slot(&self, kind: PipelineKind) -> &Arc<RwLock<PipelineSlot>> {
        match kind {
            PipelineKind::Url => &self.url,
            PipelineKind::Email => &self.email,
        }
    }

    /// Mark a pipeline as loading
    pub fn begin_loading(&self, kind: PipelineKind) {
        *self.slot(kind).write() = PipelineSlot::Loading;
    }

    /// Publish a load outcome for a pipeline. `Ready` and `Failed` are
    /// terminal; failure of one pipeline never touches the other slot.
    pub fn publish(&self, kind: PipelineKind, outcome: Result<Arc<dyn Pipeline>>) {
        let slot = match outcome {
            Ok(pipeline) => {
                tracing::info!(pipeline = %kind, name = pipeline.name(), "pipeline ready");
                PipelineSlot::Ready(pipeline)
            }
            Err(err) => {
                tracing::error!(pipeline = %kind, error = %err, "pipeline failed to load");
                PipelineSlot::Failed(err.to_string())
            }
        };
        *self.slot(kind).write() = slot;
    }

    /// Get the ready pipeline for a request, or the not-ready outcome
    pub fn pipeline(&self, kind: PipelineKind) -> Result<Arc<dyn Pipeline>> {
        match &*self.slot(kind).read() {
            PipelineSlot::Ready(pipeline) => Ok(Arc::clone(pipeline)),
            _ => Err(Error::not_ready(kind)),
        }
    }

    /// Readiness is a pure function of the two slots
    pub fn readiness(&self) -> Readiness {
        Readiness {
            url_ready: self.url.read().is_ready(),
            email_ready: self.email.read().is_ready(),
        }
    }
}

impl Default for ServingState {
    fn default() -> Self {
        Self::new()
    }
}
