use anyhow::{Context, Result};
use serde::Deserialize;

use crate::voice::InterviewerConfig;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,

    /// How long a finished, dispatched session stays readable before removal
    pub session_retention_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "prepwise".to_string(),
            http: HttpConfig::default(),
            session_retention_secs: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// NATS server the voice-agent relay is attached to
    pub nats_url: String,

    /// Workflow started for generate-mode calls
    pub workflow_id: String,

    pub interviewer: InterviewerConfig,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            nats_url: "nats://localhost:4222".to_string(),
            workflow_id: String::new(),
            interviewer: InterviewerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash-001".to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Firestore,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            project_id: String::new(),
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Load from `path` (extension optional, file optional) with `PREPWISE__*` overrides
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("PREPWISE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let cfg = Config::load("does/not/exist/prepwise").unwrap();
        assert_eq!(cfg.service.http.port, 3000);
        assert_eq!(cfg.service.session_retention_secs, 300);
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.generation.model, "gemini-2.0-flash-001");
    }

    #[test]
    fn test_store_backend_is_lowercase() {
        let backend: StoreBackend = serde_json::from_str("\"firestore\"").unwrap();
        assert_eq!(backend, StoreBackend::Firestore);
    }
}
