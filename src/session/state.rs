use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::extract::CollectedFields;
use crate::error::{Error, Result};
use crate::voice::{Role, VoiceEvent};

/// Call lifecycle. The only forward path is
/// Inactive → Connecting → Active → Finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallStatus {
    Inactive,
    Connecting,
    Active,
    Finished,
}

/// One finalized line of conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the post-call procedure for this session
    Dispatch,
}

/// Mutable state of one session, driven only through the transition methods
#[derive(Debug, Clone)]
pub struct SessionState {
    status: CallStatus,
    transcript: Vec<TranscriptEntry>,
    collected: CollectedFields,
    collect_fields: bool,
    is_speaking: bool,
    dispatched: bool,
    start_failed: bool,
}

impl SessionState {
    /// `collect_fields` enables transcript field extraction (generate mode)
    pub fn new(collect_fields: bool) -> Self {
        Self {
            status: CallStatus::Inactive,
            transcript: Vec::new(),
            collected: CollectedFields::default(),
            collect_fields,
            is_speaking: false,
            dispatched: false,
            start_failed: false,
        }
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn collected(&self) -> &CollectedFields {
        &self.collected
    }

    pub fn is_speaking(&self) -> bool {
        self.is_speaking
    }

    pub fn last_message(&self) -> Option<&str> {
        self.transcript.last().map(|e| e.content.as_str())
    }

    pub fn start_failed(&self) -> bool {
        self.start_failed
    }

    /// User asked to place a call: Inactive/Finished → Connecting
    ///
    /// Calling again after Finished starts a fresh session instance. A
    /// Connecting session whose start was rejected may be called again.
    pub fn begin_call(&mut self) -> Result<()> {
        match self.status {
            CallStatus::Inactive => {}
            CallStatus::Connecting if self.start_failed => {
                self.start_failed = false;
            }
            CallStatus::Finished => {
                *self = Self::new(self.collect_fields);
            }
            other => {
                return Err(Error::InvalidState(format!(
                    "cannot start a call while {:?}",
                    other
                )))
            }
        }
        self.status = CallStatus::Connecting;
        Ok(())
    }

    /// The voice client refused to start; the session stays Connecting
    pub fn reject_start(&mut self) {
        if self.status == CallStatus::Connecting {
            self.start_failed = true;
        }
    }

    /// User hung up: Active → Finished
    pub fn disconnect(&mut self) -> Result<Option<Effect>> {
        if self.status != CallStatus::Active {
            return Err(Error::InvalidState(format!(
                "cannot disconnect while {:?}",
                self.status
            )));
        }
        Ok(self.finish())
    }

    /// Apply one voice event; returns the effect the controller must run
    pub fn apply(&mut self, event: &VoiceEvent) -> Option<Effect> {
        if matches!(self.status, CallStatus::Inactive | CallStatus::Finished) {
            debug!("Ignoring {} while {:?}", event.name(), self.status);
            return None;
        }

        match event {
            VoiceEvent::CallStart => {
                if self.status == CallStatus::Connecting {
                    self.status = CallStatus::Active;
                } else {
                    warn!("Ignoring call-start while {:?}", self.status);
                }
                None
            }
            VoiceEvent::CallEnd => {
                if self.status == CallStatus::Active {
                    self.finish()
                } else {
                    warn!("Ignoring call-end while {:?}", self.status);
                    None
                }
            }
            VoiceEvent::SpeechStart => {
                self.is_speaking = true;
                None
            }
            VoiceEvent::SpeechEnd => {
                self.is_speaking = false;
                None
            }
            VoiceEvent::Message { message } => {
                if let Some((role, text)) = message.as_final_transcript() {
                    self.transcript.push(TranscriptEntry {
                        role,
                        content: text.to_string(),
                    });
                    if self.collect_fields {
                        self.collected.observe(text);
                    }
                }
                None
            }
            VoiceEvent::Error { .. } => None,
        }
    }

    fn finish(&mut self) -> Option<Effect> {
        self.status = CallStatus::Finished;
        self.is_speaking = false;

        if self.dispatched {
            None
        } else {
            self.dispatched = true;
            Some(Effect::Dispatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active(collect_fields: bool) -> SessionState {
        let mut state = SessionState::new(collect_fields);
        state.begin_call().unwrap();
        state.apply(&VoiceEvent::CallStart);
        state
    }

    #[test]
    fn test_forward_path() {
        let mut state = SessionState::new(false);
        assert_eq!(state.status(), CallStatus::Inactive);

        state.begin_call().unwrap();
        assert_eq!(state.status(), CallStatus::Connecting);

        assert_eq!(state.apply(&VoiceEvent::CallStart), None);
        assert_eq!(state.status(), CallStatus::Active);

        assert_eq!(state.apply(&VoiceEvent::CallEnd), Some(Effect::Dispatch));
        assert_eq!(state.status(), CallStatus::Finished);
    }

    #[test]
    fn test_no_skips_or_reversals() {
        let mut state = SessionState::new(false);

        // Nothing happens before a call is placed
        assert_eq!(state.apply(&VoiceEvent::CallStart), None);
        assert_eq!(state.status(), CallStatus::Inactive);

        state.begin_call().unwrap();
        // Connecting cannot jump to Finished
        assert_eq!(state.apply(&VoiceEvent::CallEnd), None);
        assert_eq!(state.status(), CallStatus::Connecting);
        assert!(state.disconnect().is_err());
        assert!(state.begin_call().is_err());

        state.apply(&VoiceEvent::CallStart);
        // A second call-start does not reverse anything
        state.apply(&VoiceEvent::CallStart);
        assert_eq!(state.status(), CallStatus::Active);
    }

    #[test]
    fn test_disconnect_dispatches_once() {
        let mut state = active(false);

        assert_eq!(state.disconnect().unwrap(), Some(Effect::Dispatch));
        assert_eq!(state.status(), CallStatus::Finished);

        // call-end arriving after stop() is ignored
        assert_eq!(state.apply(&VoiceEvent::CallEnd), None);
        assert_eq!(state.status(), CallStatus::Finished);
    }

    #[test]
    fn test_events_after_finish_are_ignored() {
        let mut state = active(true);
        state.apply(&VoiceEvent::CallEnd);

        state.apply(&VoiceEvent::final_transcript(Role::User, "role: backend"));
        state.apply(&VoiceEvent::SpeechStart);

        assert!(state.transcript().is_empty());
        assert!(state.collected().role.is_none());
        assert!(!state.is_speaking());
    }

    #[test]
    fn test_transcript_appends_in_order() {
        let mut state = active(false);
        state.apply(&VoiceEvent::final_transcript(Role::Assistant, "Welcome"));
        state.apply(&VoiceEvent::final_transcript(Role::User, "Thanks"));
        state.apply(&VoiceEvent::final_transcript(Role::User, "Thanks"));

        let contents: Vec<&str> = state.transcript().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["Welcome", "Thanks", "Thanks"]);
        assert_eq!(state.last_message(), Some("Thanks"));
        // Interview mode never collects fields
        assert!(state.collected().role.is_none());
    }

    #[test]
    fn test_speaking_flag_does_not_touch_status() {
        let mut state = active(false);
        state.apply(&VoiceEvent::SpeechStart);
        assert!(state.is_speaking());
        state.apply(&VoiceEvent::SpeechEnd);
        assert!(!state.is_speaking());
        state.apply(&VoiceEvent::Error {
            error: "jitter".to_string(),
        });
        assert_eq!(state.status(), CallStatus::Active);
    }

    #[test]
    fn test_new_call_after_finish_starts_fresh() {
        let mut state = active(true);
        state.apply(&VoiceEvent::final_transcript(Role::User, "the job is SRE"));
        state.apply(&VoiceEvent::CallEnd);

        state.begin_call().unwrap();
        assert_eq!(state.status(), CallStatus::Connecting);
        assert!(state.transcript().is_empty());
        assert!(state.collected().role.is_none());

        state.apply(&VoiceEvent::CallStart);
        assert_eq!(state.apply(&VoiceEvent::CallEnd), Some(Effect::Dispatch));
    }

    #[test]
    fn test_call_retry_after_rejected_start() {
        let mut state = SessionState::new(false);
        state.begin_call().unwrap();
        state.reject_start();
        assert!(state.start_failed());
        assert_eq!(state.status(), CallStatus::Connecting);

        state.begin_call().unwrap();
        assert!(!state.start_failed());
        assert_eq!(state.status(), CallStatus::Connecting);

        // Only one retry per rejection
        assert!(state.begin_call().is_err());

        state.apply(&VoiceEvent::CallStart);
        assert_eq!(state.status(), CallStatus::Active);
        // A late rejection cannot drag an active call back
        state.reject_start();
        assert!(!state.start_failed());
    }
}
