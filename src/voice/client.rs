use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::assistant::InterviewerConfig;

/// Call configuration passed to [`VoiceClient::start`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartConfig {
    /// Run a hosted workflow (generate mode)
    Workflow {
        workflow_id: String,
        variable_values: BTreeMap<String, String>,
    },
    /// Run an inline assistant (interview mode)
    Assistant {
        assistant: InterviewerConfig,
        variable_values: BTreeMap<String, String>,
    },
}

impl StartConfig {
    pub fn variable_values(&self) -> &BTreeMap<String, String> {
        match self {
            StartConfig::Workflow { variable_values, .. } => variable_values,
            StartConfig::Assistant { variable_values, .. } => variable_values,
        }
    }
}

/// Voice agent call control
///
/// Events for the call are delivered separately, through the
/// `mpsc::Receiver<VoiceEvent>` handed to the session controller.
///
/// Implementations:
/// - NATS: bridge to a voice-agent relay (production)
/// - Scripted/in-memory clients in tests
#[async_trait::async_trait]
pub trait VoiceClient: Send + Sync {
    /// Begin a call; `call-start` follows on the event stream once connected
    async fn start(&self, config: StartConfig) -> Result<()>;

    /// End the call. Fire-and-forget from the controller's point of view.
    async fn stop(&self) -> Result<()>;

    /// Read a variable the agent collected during the call, if supported
    async fn variable(&self, _name: &str) -> Option<String> {
        None
    }

    /// Client name for logging
    fn name(&self) -> &str;
}
