//! Classify email bodies from the command line against an on-disk
//! checkpoint.
//!
//! Usage:
//!   cargo run --example predict_email -- <model-dir> <body> [<body> ...]
//!
//! The model directory must hold `config.json`, `tokenizer.json`, and
//! `model.safetensors`.

use phishguard_classifiers::email::DEFAULT_MAX_LENGTH;
use phishguard_classifiers::{load_email_pipeline, DeviceType, EmailArtifactPaths, Pipeline};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let model_dir = PathBuf::from(
        args.next()
            .ok_or_else(|| anyhow::anyhow!("usage: predict_email <model-dir> <body>..."))?,
    );

    let classifier = load_email_pipeline(&EmailArtifactPaths {
        model_dir,
        hub_repo: None,
        hub_revision: None,
        device: DeviceType::Cpu,
        max_length: DEFAULT_MAX_LENGTH,
    })?;

    for body in args {
        let result = classifier.predict(&body).await?;
        let confidence = result.confidence.unwrap_or(0.0);
        println!(
            "{} (confidence {confidence:.4}, {}us): {body}",
            result.label, result.latency_us
        );
    }

    Ok(())
}
