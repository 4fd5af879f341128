//! Command line interface for the gateway binary

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phishguard-gateway")]
#[command(about = "PhishGuard phishing prediction gateway", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Directory holding url_classifier.json and url_vectorizer.json
    #[arg(long)]
    pub url_model_dir: Option<PathBuf>,

    /// Directory holding the email checkpoint (config.json,
    /// tokenizer.json, model.safetensors)
    #[arg(long)]
    pub email_model_dir: Option<PathBuf>,

    /// Inference device for the email pipeline: cpu, cuda[:N], metal[:N]
    #[arg(short, long)]
    pub device: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
