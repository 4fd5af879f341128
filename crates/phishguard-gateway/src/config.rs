//! Gateway configuration

use crate::cli::Cli;
use phishguard_classifiers::email::DEFAULT_MAX_LENGTH;
use phishguard_classifiers::{DeviceType, EmailArtifactPaths, UrlArtifactPaths};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// URL pipeline artifacts; omit to run without the URL pipeline
    #[serde(default = "default_url_model")]
    pub url_model: Option<UrlArtifactPaths>,

    /// Email pipeline checkpoint; omit to run without the email pipeline
    #[serde(default = "default_email_model")]
    pub email_model: Option<EmailArtifactPaths>,
}

impl GatewayConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(dir) = &cli.url_model_dir {
            config.url_model = Some(url_paths_in(dir));
        }
        if let Some(dir) = &cli.email_model_dir {
            let mut paths = config
                .email_model
                .take()
                .unwrap_or_else(|| email_paths_in(dir));
            paths.model_dir = dir.clone();
            config.email_model = Some(paths);
        }
        if let Some(device) = &cli.device {
            let device: DeviceType = device.parse()?;
            if let Some(email) = config.email_model.as_mut() {
                email.device = device;
            }
        }

        Ok(config)
    }

    /// The socket address to bind
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.listen, self.port).parse()?)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            url_model: default_url_model(),
            email_model: default_email_model(),
        }
    }
}

fn url_paths_in(dir: &Path) -> UrlArtifactPaths {
    UrlArtifactPaths {
        model: dir.join("url_classifier.json"),
        vectorizer: dir.join("url_vectorizer.json"),
    }
}

fn email_paths_in(dir: &Path) -> EmailArtifactPaths {
    EmailArtifactPaths {
        model_dir: dir.to_path_buf(),
        hub_repo: None,
        hub_revision: None,
        device: DeviceType::Cpu,
        max_length: DEFAULT_MAX_LENGTH,
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_url_model() -> Option<UrlArtifactPaths> {
    Some(url_paths_in(&PathBuf::from("./models/url-classifier")))
}

fn default_email_model() -> Option<EmailArtifactPaths> {
    Some(email_paths_in(&PathBuf::from("./models/email-classifier")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 8000);
        assert!(config.url_model.is_some());
        assert!(config.email_model.is_some());
        assert!(config.addr().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_with_partial_file() {
        let yaml = r#"
port: 9000
email_model:
  model_dir: ./checkpoints/email
  device: cpu
  max_length: 256
"#;
        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.listen, "0.0.0.0");
        let email = config.email_model.unwrap();
        assert_eq!(email.max_length, 256);
        assert_eq!(email.device, DeviceType::Cpu);
        // url_model falls back to its default paths
        assert!(config.url_model.is_some());
    }

    #[test]
    fn test_pipeline_can_be_disabled_in_config() {
        let yaml = r#"
url_model: null
"#;
        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.url_model.is_none());
    }
}
