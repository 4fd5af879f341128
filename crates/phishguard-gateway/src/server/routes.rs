use crate::models::{
    BatchItem, EmailBatchRequest, EmailBatchResponse, EmailPredictionResponse, EmailRequest,
    HealthResponse, UrlBatchRequest, UrlBatchResponse, UrlPredictionResponse, UrlRequest,
};
use crate::state::ServingState;
use crate::{route, route_batch};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use phishguard_core::{Error, PipelineKind, PredictionRequest};

/// Map an error to its response: not-ready pipelines are a distinct
/// unavailable outcome, everything else is an internal error.
fn error_response(err: &Error) -> Response {
    let status = if err.is_not_ready() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

// ============================================================================
// Health endpoints
// ============================================================================

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "running",
        "service": "PhishGuard Prediction Gateway",
        "models": {
            "url": "TF-IDF + linear classifier",
            "email": "BERT sequence classifier"
        },
        "endpoints": {
            "health": "/health",
            "predict_url": "/predict/url",
            "predict_email": "/predict/email",
            "predict_url_batch": "/predict/url/batch",
            "predict_email_batch": "/predict/email/batch"
        }
    }))
}

pub async fn health(State(state): State<ServingState>) -> impl IntoResponse {
    let readiness = state.readiness();
    Json(HealthResponse {
        status: "healthy",
        url_ready: readiness.url_ready,
        email_ready: readiness.email_ready,
        timestamp: Utc::now(),
    })
}

// ============================================================================
// Single prediction endpoints
// ============================================================================

pub async fn predict_url(
    State(state): State<ServingState>,
    Json(req): Json<UrlRequest>,
) -> Response {
    let request = PredictionRequest::Url {
        url: req.url.clone(),
    };
    match route(&state, request).await {
        Ok(result) => Json(UrlPredictionResponse::new(req.url, &result)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "url prediction failed");
            error_response(&err)
        }
    }
}

pub async fn predict_email(
    State(state): State<ServingState>,
    Json(req): Json<EmailRequest>,
) -> Response {
    let request = PredictionRequest::Email {
        sender: req.sender,
        subject: req.subject,
        body: req.body,
    };
    match route(&state, request).await {
        Ok(result) => Json(EmailPredictionResponse::new(&result)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "email prediction failed");
            error_response(&err)
        }
    }
}

// ============================================================================
// Batch endpoints
// ============================================================================

pub async fn predict_url_batch(
    State(state): State<ServingState>,
    Json(req): Json<UrlBatchRequest>,
) -> Response {
    // An unready pipeline fails the batch as a whole; per-item errors do not.
    if !state.readiness().url_ready {
        return error_response(&Error::not_ready(PipelineKind::Url));
    }

    tracing::info!(count = req.urls.len(), "processing url batch");

    let requests = req
        .urls
        .iter()
        .map(|url| PredictionRequest::Url { url: url.clone() })
        .collect();
    let outcome = route_batch(&state, requests).await;

    let predictions = req
        .urls
        .into_iter()
        .zip(outcome.results)
        .map(|(url, result)| match result {
            Ok(result) => BatchItem::Ok(UrlPredictionResponse::new(url, &result)),
            Err(err) => BatchItem::Err {
                error: err.to_string(),
            },
        })
        .collect();

    Json(UrlBatchResponse {
        predictions,
        total: outcome.total,
        phishing_count: outcome.phishing_count,
        legitimate_count: outcome.legitimate_count,
        failed_count: outcome.failed_count,
    })
    .into_response()
}

pub async fn predict_email_batch(
    State(state): State<ServingState>,
    Json(req): Json<EmailBatchRequest>,
) -> Response {
    if !state.readiness().email_ready {
        return error_response(&Error::not_ready(PipelineKind::Email));
    }

    tracing::info!(count = req.emails.len(), "processing email batch");

    let requests = req
        .emails
        .into_iter()
        .map(|email| PredictionRequest::Email {
            sender: email.sender,
            subject: email.subject,
            body: email.body,
        })
        .collect();
    let outcome = route_batch(&state, requests).await;

    let predictions = outcome
        .results
        .into_iter()
        .map(|result| match result {
            Ok(result) => BatchItem::Ok(EmailPredictionResponse::new(&result)),
            Err(err) => BatchItem::Err {
                error: err.to_string(),
            },
        })
        .collect();

    Json(EmailBatchResponse {
        predictions,
        total: outcome.total,
        failed_count: outcome.failed_count,
    })
    .into_response()
}
