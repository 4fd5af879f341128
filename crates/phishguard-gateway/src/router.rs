//! Request routing and batch fan-out over the serving state

use crate::state::ServingState;
use futures::future::join_all;
use phishguard_core::{Label, PredictionRequest, PredictionResult, Result};

/// Dispatch a single request to the pipeline matching its variant
pub async fn route(state: &ServingState, request: PredictionRequest) -> Result<PredictionResult> {
    let pipeline = state.pipeline(request.kind())?;

    match &request {
        PredictionRequest::Url { url } => {
            tracing::info!(url = %url, "processing url prediction");
        }
        PredictionRequest::Email { sender, subject, .. } => {
            tracing::info!(sender = %sender, subject = %subject, "processing email prediction");
        }
    }

    pipeline.predict(request.text()).await
}

/// Outcome of a batch: per-item results in input order plus aggregates
pub struct BatchOutcome {
    /// One entry per input item, positionally matching the input
    pub results: Vec<Result<PredictionResult>>,
    pub total: usize,
    pub phishing_count: usize,
    pub legitimate_count: usize,
    pub failed_count: usize,
}

/// Process a batch item-by-item. One item's failure never aborts the
/// batch; items may run concurrently but results keep input ordering.
///
/// Counts always satisfy `phishing + legitimate + failed == total`.
pub async fn route_batch(
    state: &ServingState,
    requests: Vec<PredictionRequest>,
) -> BatchOutcome {
    let total = requests.len();
    let results = join_all(
        requests
            .into_iter()
            .map(|request| async move { route(state, request).await }),
    )
    .await;

    let mut phishing_count = 0;
    let mut legitimate_count = 0;
    let mut failed_count = 0;
    for result in &results {
        match result {
            Ok(prediction) if prediction.label == Label::Phishing => phishing_count += 1,
            Ok(_) => legitimate_count += 1,
            Err(err) => {
                tracing::warn!(error = %err, "batch item failed");
                failed_count += 1;
            }
        }
    }

    tracing::info!(
        total,
        phishing_count,
        legitimate_count,
        failed_count,
        "batch complete"
    );

    BatchOutcome {
        results,
        total,
        phishing_count,
        legitimate_count,
        failed_count,
    }
}
