//! Interview session control
//!
//! This module provides the `SessionController` that manages:
//! - Call lifecycle (Inactive → Connecting → Active → Finished)
//! - Transcript collection from finalized voice messages
//! - Field extraction for generate-mode calls
//! - Post-call dispatch to question generation or feedback synthesis

mod config;
mod controller;
mod dispatch;
mod extract;
mod state;
mod stats;

pub use config::{format_questions, SessionConfig, SessionMode};
pub use controller::{SessionController, SessionHandle};
pub use dispatch::{resolve_generate_request, DispatchJob, Dispatcher, Route, DEFAULT_INTERVIEW_TYPE};
pub use extract::{extract_amount, extract_level, extract_role, extract_techstack, CollectedFields};
pub use state::{CallStatus, Effect, SessionState, TranscriptEntry};
pub use stats::SessionSnapshot;
