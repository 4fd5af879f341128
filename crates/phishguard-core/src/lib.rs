//! PhishGuard Core
//!
//! Core types shared across the PhishGuard prediction gateway:
//! - The prediction request/result model and label mapping
//! - Error types and result handling
//! - The readiness snapshot used by the health contract

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Label, PipelineKind, PredictionRequest, PredictionResult, Readiness};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Label, PipelineKind, PredictionRequest, PredictionResult, Readiness};
}
