use std::sync::Arc;
use tokio::sync::mpsc;

use super::client::VoiceClient;
use super::events::VoiceEvent;
use super::nats::NatsVoiceClient;
use crate::error::{Error, Result};

/// Opens a voice client plus its event stream for a new session
#[async_trait::async_trait]
pub trait VoiceConnector: Send + Sync {
    async fn connect(
        &self,
        session_id: &str,
    ) -> Result<(Arc<dyn VoiceClient>, mpsc::Receiver<VoiceEvent>)>;
}

/// One NATS connection per session
pub struct NatsVoiceConnector {
    url: String,
}

impl NatsVoiceConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait::async_trait]
impl VoiceConnector for NatsVoiceConnector {
    async fn connect(
        &self,
        session_id: &str,
    ) -> Result<(Arc<dyn VoiceClient>, mpsc::Receiver<VoiceEvent>)> {
        let (client, events) = NatsVoiceClient::connect(&self.url, session_id.to_string())
            .await
            .map_err(|e| Error::VoiceClient(format!("{:#}", e)))?;
        Ok((Arc::new(client), events))
    }
}
