//! Prediction request/result model shared across pipelines and the gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete output class of both classifiers.
///
/// The integer and textual mappings are fixed wire contract:
/// 0 → "legitimate", 1 → "phishing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    /// Textual form used in responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legitimate => "legitimate",
            Self::Phishing => "phishing",
        }
    }

    /// Integer form used in responses
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Legitimate => 0,
            Self::Phishing => 1,
        }
    }

    /// Map a class index (arg-max output) to a label.
    /// Index 0 is legitimate; anything else is phishing.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Legitimate
        } else {
            Self::Phishing
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pipeline a request, readiness flag, or error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineKind {
    Url,
    Email,
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url => f.write_str("url"),
            Self::Email => f.write_str("email"),
        }
    }
}

/// A single inbound prediction item, tagged by pipeline.
///
/// Transient: created per call, never persisted.
#[derive(Debug, Clone)]
pub enum PredictionRequest {
    Url {
        url: String,
    },
    Email {
        sender: String,
        subject: String,
        body: String,
    },
}

impl PredictionRequest {
    /// The pipeline this request routes to
    pub fn kind(&self) -> PipelineKind {
        match self {
            Self::Url { .. } => PipelineKind::Url,
            Self::Email { .. } => PipelineKind::Email,
        }
    }

    /// The text the classifier decision is computed from.
    ///
    /// For emails this is the body alone; sender and subject are carried
    /// for logging context only.
    pub fn text(&self) -> &str {
        match self {
            Self::Url { url } => url,
            Self::Email { body, .. } => body,
        }
    }
}

/// Result of a single prediction
#[derive(Debug, Clone)]
pub struct PredictionResult {
    /// Predicted class
    pub label: Label,

    /// Probability mass of the predicted class, when the model produces
    /// one (email pipeline). Absent for hard-decision models.
    pub confidence: Option<f32>,

    /// When the prediction was computed
    pub timestamp: DateTime<Utc>,

    /// Inference latency in microseconds
    pub latency_us: u64,

    /// Model name or version that produced the result
    pub model: Option<String>,
}

impl PredictionResult {
    /// Create a new result stamped with the current time
    pub fn new(label: Label, confidence: Option<f32>) -> Self {
        Self {
            label,
            confidence,
            timestamp: Utc::now(),
            latency_us: 0,
            model: None,
        }
    }
}

/// Snapshot of per-pipeline readiness, derived on demand from the serving
/// state and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    pub url_ready: bool,
    pub email_ready: bool,
}

impl Readiness {
    /// Whether the given pipeline is ready to serve
    pub fn ready_for(&self, kind: PipelineKind) -> bool {
        match kind {
            PipelineKind::Url => self.url_ready,
            PipelineKind::Email => self.email_ready,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping_is_fixed() {
        assert_eq!(Label::Legitimate.as_u8(), 0);
        assert_eq!(Label::Phishing.as_u8(), 1);
        assert_eq!(Label::Legitimate.as_str(), "legitimate");
        assert_eq!(Label::Phishing.as_str(), "phishing");
        assert_eq!(Label::from_index(0), Label::Legitimate);
        assert_eq!(Label::from_index(1), Label::Phishing);
    }

    #[test]
    fn test_request_routing_and_decision_text() {
        let req = PredictionRequest::Email {
            sender: "a@example.com".to_string(),
            subject: "hello".to_string(),
            body: "the body".to_string(),
        };
        assert_eq!(req.kind(), PipelineKind::Email);
        assert_eq!(req.text(), "the body");

        let req = PredictionRequest::Url {
            url: "http://example.com".to_string(),
        };
        assert_eq!(req.kind(), PipelineKind::Url);
        assert_eq!(req.text(), "http://example.com");
    }

    #[test]
    fn test_readiness_per_pipeline() {
        let readiness = Readiness {
            url_ready: true,
            email_ready: false,
        };
        assert!(readiness.ready_for(PipelineKind::Url));
        assert!(!readiness.ready_for(PipelineKind::Email));
    }
}
