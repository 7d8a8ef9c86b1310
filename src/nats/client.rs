use anyhow::{Context, Result};
use async_nats::Client;
use tracing::{debug, info};

use super::messages::{ControlMessage, VariableReply, VariableRequest};
use crate::voice::StartConfig;

/// NATS connection scoped to one voice session
///
/// Subjects:
/// - `voice.control.<session>`: start/stop commands (publish)
/// - `voice.event.<session>`: call events from the relay (subscribe)
/// - `voice.variables.<session>`: variable lookups (request/reply)
pub struct NatsClient {
    client: Client,
    session_id: String,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str, session_id: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client, session_id })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Ask the relay to start a call
    pub async fn publish_start(&self, config: StartConfig) -> Result<()> {
        let message = ControlMessage::Start {
            session_id: self.session_id.clone(),
            config,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.publish_control(&message).await
    }

    /// Ask the relay to hang up
    pub async fn publish_stop(&self) -> Result<()> {
        let message = ControlMessage::Stop {
            session_id: self.session_id.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.publish_control(&message).await
    }

    async fn publish_control(&self, message: &ControlMessage) -> Result<()> {
        let subject = format!("voice.control.{}", self.session_id);
        let payload = serde_json::to_vec(message)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish control message")?;

        info!("Published control message to {}", subject);

        Ok(())
    }

    /// Subscribe to call events for this session
    pub async fn subscribe_events(&self) -> Result<async_nats::Subscriber> {
        let subject = format!("voice.event.{}", self.session_id);

        info!("Subscribing to voice events on {}", subject);

        let subscriber = self
            .client
            .subscribe(subject.clone())
            .await
            .context("Failed to subscribe to voice events")?;

        info!("Subscribed to {}", subject);

        Ok(subscriber)
    }

    /// Look up a variable the agent collected; `None` when the relay has no value
    pub async fn request_variable(&self, name: &str) -> Result<Option<String>> {
        let subject = format!("voice.variables.{}", self.session_id);
        let request = VariableRequest {
            session_id: self.session_id.clone(),
            name: name.to_string(),
        };
        let payload = serde_json::to_vec(&request)?;

        let reply = self
            .client
            .request(subject, payload.into())
            .await
            .context("Variable request failed")?;

        let reply: VariableReply =
            serde_json::from_slice(&reply.payload).context("Malformed variable reply")?;
        debug!("Variable {} = {:?}", reply.name, reply.value);

        Ok(reply.value.filter(|v| !v.trim().is_empty()))
    }
}
