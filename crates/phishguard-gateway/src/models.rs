//! Wire types for the gateway's request/response contract

use chrono::{DateTime, Utc};
use phishguard_core::PredictionResult;
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    pub sender: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UrlBatchRequest {
    pub urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailBatchRequest {
    pub emails: Vec<EmailRequest>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub url_ready: bool,
    pub email_ready: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UrlPredictionResponse {
    pub url: String,
    /// "legitimate" or "phishing"
    pub prediction: &'static str,
    /// 0 or 1
    pub label: u8,
    pub timestamp: DateTime<Utc>,
}

impl UrlPredictionResponse {
    pub fn new(url: String, result: &PredictionResult) -> Self {
        Self {
            url,
            prediction: result.label.as_str(),
            label: result.label.as_u8(),
            timestamp: result.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmailPredictionResponse {
    pub prediction: &'static str,
    pub confidence: Option<f32>,
    pub label: u8,
    pub processed_date: String,
}

impl EmailPredictionResponse {
    pub fn new(result: &PredictionResult) -> Self {
        Self {
            prediction: result.label.as_str(),
            confidence: result.confidence.map(round4),
            label: result.label.as_u8(),
            processed_date: result.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

fn round4(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}

/// A batch item either carries the per-item response or its own error;
/// one item's failure never fails the surrounding batch.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem<T> {
    Ok(T),
    Err { error: String },
}

#[derive(Debug, Serialize)]
pub struct UrlBatchResponse {
    pub predictions: Vec<BatchItem<UrlPredictionResponse>>,
    pub total: usize,
    pub phishing_count: usize,
    pub legitimate_count: usize,
    pub failed_count: usize,
}

#[derive(Debug, Serialize)]
pub struct EmailBatchResponse {
    pub predictions: Vec<BatchItem<EmailPredictionResponse>>,
    pub total: usize,
    pub failed_count: usize,
}
