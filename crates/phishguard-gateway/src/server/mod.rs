//! HTTP boundary: router construction and request handlers

pub mod app;
pub mod routes;

pub use app::{build_app, run_server};
