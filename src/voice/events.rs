use serde::{Deserialize, Serialize};

/// Speaker of a transcript line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::System => "system",
            Role::Assistant => "assistant",
        }
    }
}

/// Event emitted by the voice agent over the lifetime of one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VoiceEvent {
    CallStart,
    CallEnd,
    Message { message: VoiceMessage },
    SpeechStart,
    SpeechEnd,
    Error { error: String },
}

impl VoiceEvent {
    /// Finalized transcript event, mostly for tests and relays
    pub fn final_transcript(role: Role, text: impl Into<String>) -> Self {
        VoiceEvent::Message {
            message: VoiceMessage {
                kind: "transcript".to_string(),
                transcript_type: Some("final".to_string()),
                role: Some(role),
                transcript: Some(text.into()),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VoiceEvent::CallStart => "call-start",
            VoiceEvent::CallEnd => "call-end",
            VoiceEvent::Message { .. } => "message",
            VoiceEvent::SpeechStart => "speech-start",
            VoiceEvent::SpeechEnd => "speech-end",
            VoiceEvent::Error { .. } => "error",
        }
    }
}

/// Payload of a `message` event
///
/// The agent sends many message kinds (status updates, function calls,
/// partial transcripts); only finalized transcripts carry conversation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceMessage {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "transcriptType", default, skip_serializing_if = "Option::is_none")]
    pub transcript_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl VoiceMessage {
    /// Role and text when this is a finalized transcript line
    pub fn as_final_transcript(&self) -> Option<(Role, &str)> {
        if self.kind != "transcript" || self.transcript_type.as_deref() != Some("final") {
            return None;
        }
        Some((self.role?, self.transcript.as_deref()?))
    }
}
