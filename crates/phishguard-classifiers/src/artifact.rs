//! Artifact sources and device selection for the classifier pipelines

use candle_core::Device;
use hf_hub::{api::sync::Api, Repo, RepoType};
use phishguard_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Source location for a model or vectorizer/tokenizer artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactSource {
    /// Load from local file system
    Local(PathBuf),

    /// Download from Hugging Face Hub
    HuggingFace {
        repo_id: String,
        revision: Option<String>,
        filename: String,
    },
}

impl ArtifactSource {
    /// Resolve the source to a local path, downloading when the source is
    /// a Hub reference. `artifact` names the artifact in error messages.
    pub fn resolve(&self, artifact: &str) -> Result<PathBuf> {
        match self {
            Self::Local(path) => {
                if !path.exists() {
                    return Err(Error::artifact(
                        artifact,
                        format!("file not found: {}", path.display()),
                    ));
                }
                Ok(path.clone())
            }
            Self::HuggingFace {
                repo_id,
                revision,
                filename,
            } => {
                let api = Api::new().map_err(|e| {
                    Error::artifact(artifact, format!("failed to initialize HF API: {e}"))
                })?;

                let repo = api.repo(Repo::with_revision(
                    repo_id.clone(),
                    RepoType::Model,
                    revision.clone().unwrap_or_else(|| "main".to_string()),
                ));

                repo.get(filename).map_err(|e| {
                    Error::artifact(
                        artifact,
                        format!("failed to download {filename} from {repo_id}: {e}"),
                    )
                })
            }
        }
    }
}

/// Device type for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// CPU inference (always available)
    #[default]
    Cpu,
    /// CUDA GPU inference (if available)
    Cuda(usize),
    /// Metal (Apple Silicon)
    Metal(usize),
}

impl DeviceType {
    /// Create a Candle device from this device type
    pub fn create_device(&self) -> Result<Device> {
        match self {
            Self::Cpu => Ok(Device::Cpu),
            Self::Cuda(idx) => Device::new_cuda(*idx)
                .map_err(|e| Error::config(format!("failed to create CUDA device: {e}"))),
            Self::Metal(idx) => Device::new_metal(*idx)
                .map_err(|e| Error::config(format!("failed to create Metal device: {e}"))),
        }
    }

    /// Whether the device is an exclusive compute resource that requests
    /// must queue for (FIFO), rather than one the runtime can multiplex.
    pub fn is_exclusive(&self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    /// Parse "cpu", "cuda", "cuda:1", "metal", or "metal:0"
    fn from_str(s: &str) -> Result<Self> {
        let (name, index) = match s.split_once(':') {
            Some((name, index)) => {
                let index = index
                    .parse::<usize>()
                    .map_err(|_| Error::config(format!("invalid device index in '{s}'")))?;
                (name, index)
            }
            None => (s, 0),
        };

        match name {
            "cpu" => Ok(Self::Cpu),
            "cuda" => Ok(Self::Cuda(index)),
            "metal" => Ok(Self::Metal(index)),
            _ => Err(Error::config(format!("unknown device '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_missing_local_path() {
        let source = ArtifactSource::Local(PathBuf::from("/definitely/not/here.json"));
        let err = source.resolve("url classifier model").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("url classifier model"), "got: {msg}");
        assert!(msg.contains("/definitely/not/here.json"), "got: {msg}");
    }

    #[test]
    fn test_device_parsing() {
        assert_eq!("cpu".parse::<DeviceType>().unwrap(), DeviceType::Cpu);
        assert_eq!("cuda".parse::<DeviceType>().unwrap(), DeviceType::Cuda(0));
        assert_eq!("cuda:1".parse::<DeviceType>().unwrap(), DeviceType::Cuda(1));
        assert_eq!(
            "metal:2".parse::<DeviceType>().unwrap(),
            DeviceType::Metal(2)
        );
        assert!("tpu".parse::<DeviceType>().is_err());
        assert!("cuda:x".parse::<DeviceType>().is_err());
    }

    #[test]
    fn test_exclusive_devices() {
        assert!(!DeviceType::Cpu.is_exclusive());
        assert!(DeviceType::Cuda(0).is_exclusive());
        assert!(DeviceType::Metal(0).is_exclusive());
    }
}
