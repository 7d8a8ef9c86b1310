use crate::voice::StartConfig;
use serde::{Deserialize, Serialize};

/// Call control command published to the voice-agent relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ControlMessage {
    Start {
        session_id: String,
        config: StartConfig,
        timestamp: String, // RFC3339 timestamp
    },
    Stop {
        session_id: String,
        timestamp: String,
    },
}

/// Variable lookup sent as a NATS request
#[derive(Debug, Serialize, Deserialize)]
pub struct VariableRequest {
    pub session_id: String,
    pub name: String,
}

/// Relay reply to a [`VariableRequest`]
#[derive(Debug, Serialize, Deserialize)]
pub struct VariableReply {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}
