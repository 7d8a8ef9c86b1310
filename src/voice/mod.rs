//! Voice agent boundary
//!
//! Call control goes through the [`VoiceClient`] trait; call events arrive
//! on an `mpsc` channel of [`VoiceEvent`] in delivery order.

mod assistant;
mod client;
mod connector;
mod events;
mod nats;

pub use assistant::{InterviewerConfig, ModelConfig, ProviderConfig};
pub use client::{StartConfig, VoiceClient};
pub use connector::{NatsVoiceConnector, VoiceConnector};
pub use events::{Role, VoiceEvent, VoiceMessage};
pub use nats::NatsVoiceClient;
