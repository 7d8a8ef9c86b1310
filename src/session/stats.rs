use chrono::{DateTime, Utc};
use serde::Serialize;

use super::dispatch::Route;
use super::extract::CollectedFields;
use super::state::{CallStatus, TranscriptEntry};

/// Point-in-time view of a session, published after every handled input
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,

    /// `generate` or `interview`
    pub mode: &'static str,

    pub status: CallStatus,

    /// Whether the agent is currently talking
    pub is_speaking: bool,

    /// Post-call generation/feedback is in flight
    pub is_dispatching: bool,

    /// Post-call procedure ran to completion (with or without a route)
    pub dispatch_complete: bool,

    /// Navigation target chosen by the post-call procedure
    pub route: Option<Route>,

    pub last_message: Option<String>,

    pub transcript_entries: usize,

    pub collected: CollectedFields,

    /// Most recent call-control failure, if any
    pub last_error: Option<String>,

    pub started_at: DateTime<Utc>,

    #[serde(skip)]
    pub transcript: Vec<TranscriptEntry>,
}
