//! Error types for PhishGuard

use crate::types::PipelineKind;

/// Result type alias using PhishGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for PhishGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pipeline's artifacts are not loaded; the caller gets an
    /// "unavailable" outcome rather than a guessed label.
    #[error("{pipeline} pipeline is not ready")]
    NotReady { pipeline: PipelineKind },

    /// An artifact is missing, unreadable, or incompatible with its
    /// expected format. Fatal to that pipeline's readiness only.
    #[error("failed to load {artifact}: {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    /// The numeric computation itself failed. Recovered per request.
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new not-ready error for the given pipeline
    pub fn not_ready(pipeline: PipelineKind) -> Self {
        Self::NotReady { pipeline }
    }

    /// Create a new artifact load error
    pub fn artifact(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error means a pipeline was unavailable (as opposed to
    /// a per-request failure).
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_display() {
        let err = Error::not_ready(PipelineKind::Email);
        assert_eq!(err.to_string(), "email pipeline is not ready");
        assert!(err.is_not_ready());
    }

    #[test]
    fn test_artifact_display_names_the_artifact() {
        let err = Error::artifact("url vectorizer", "file not found: ./missing.json");
        assert_eq!(
            err.to_string(),
            "failed to load url vectorizer: file not found: ./missing.json"
        );
        assert!(!err.is_not_ready());
    }
}
