//! PhishGuard Gateway
//!
//! The serving layer in front of the URL and email phishing classifiers:
//! process-wide serving state with per-pipeline readiness, request
//! routing, batch fan-out with partial-failure isolation, and the HTTP
//! contract used by the browser extension.

pub mod cli;
pub mod config;
pub mod models;
pub mod router;
pub mod server;
pub mod state;

pub use cli::Cli;
pub use config::GatewayConfig;
pub use router::{route, route_batch, BatchOutcome};
pub use state::{PipelineSlot, ServingState};
