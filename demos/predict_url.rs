//! Classify URLs from the command line against on-disk artifacts.
//!
//! Usage:
//!   cargo run --example predict_url -- <artifact-dir> <url> [<url> ...]
//!
//! The artifact directory must hold `url_classifier.json` and
//! `url_vectorizer.json`.

use phishguard_classifiers::{load_url_pipeline, Pipeline, UrlArtifactPaths};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(
        args.next()
            .ok_or_else(|| anyhow::anyhow!("usage: predict_url <artifact-dir> <url>..."))?,
    );

    let classifier = load_url_pipeline(&UrlArtifactPaths {
        model: dir.join("url_classifier.json"),
        vectorizer: dir.join("url_vectorizer.json"),
    })?;

    for url in args {
        let result = classifier.predict(&url).await?;
        println!(
            "{url} -> {} (label {}, {}us)",
            result.label,
            result.label.as_u8(),
            result.latency_us
        );
    }

    Ok(())
}
