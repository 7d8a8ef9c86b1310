use anyhow::Result;
use futures::stream::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::client::{StartConfig, VoiceClient};
use super::events::VoiceEvent;
use crate::error::Error;
use crate::nats::NatsClient;

/// Voice client bridged to a voice-agent relay over NATS
pub struct NatsVoiceClient {
    nats_client: Arc<NatsClient>,
    listener: JoinHandle<()>,
}

impl NatsVoiceClient {
    /// Connect and start forwarding relay events for `session_id`
    ///
    /// Returns the client and the receiving end of the event stream.
    pub async fn connect(
        url: &str,
        session_id: String,
    ) -> Result<(Self, mpsc::Receiver<VoiceEvent>)> {
        let nats_client = Arc::new(NatsClient::connect(url, session_id).await?);
        let mut subscriber = nats_client.subscribe_events().await?;
        let (event_tx, event_rx) = mpsc::channel(100);

        let listener = tokio::spawn(async move {
            info!("Voice event listener started");

            while let Some(msg) = subscriber.next().await {
                match serde_json::from_slice::<VoiceEvent>(&msg.payload) {
                    Ok(event) => {
                        if event_tx.send(event).await.is_err() {
                            // Controller dropped its receiver
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to parse voice event: {}", e);
                    }
                }
            }

            info!("Voice event listener stopped");
        });

        Ok((
            Self {
                nats_client,
                listener,
            },
            event_rx,
        ))
    }
}

impl Drop for NatsVoiceClient {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

#[async_trait::async_trait]
impl VoiceClient for NatsVoiceClient {
    async fn start(&self, config: StartConfig) -> crate::Result<()> {
        self.nats_client
            .publish_start(config)
            .await
            .map_err(|e| Error::VoiceClient(format!("{:#}", e)))
    }

    async fn stop(&self) -> crate::Result<()> {
        self.nats_client
            .publish_stop()
            .await
            .map_err(|e| Error::VoiceClient(format!("{:#}", e)))
    }

    async fn variable(&self, name: &str) -> Option<String> {
        match self.nats_client.request_variable(name).await {
            Ok(value) => value,
            Err(e) => {
                error!("Variable lookup for {} failed: {:#}", name, e);
                None
            }
        }
    }

    fn name(&self) -> &str {
        "nats"
    }
}
