use crate::generation::InterviewGenerator;
use crate::session::{Dispatcher, SessionHandle};
use crate::store::InterviewStore;
use crate::voice::{InterviewerConfig, VoiceConnector};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live sessions (session_id → controller handle)
    pub sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,

    /// Backs `POST /generate-questions`
    pub generator: InterviewGenerator,

    pub store: InterviewStore,

    /// Post-call procedures handed to every new session
    pub dispatcher: Dispatcher,

    /// Opens the voice client for a new session
    pub voice: Arc<dyn VoiceConnector>,

    /// Workflow started by generate-mode sessions
    pub workflow_id: String,

    pub interviewer: InterviewerConfig,

    /// Finished sessions are dropped this long after their dispatch completes
    pub session_retention: Duration,
}

impl AppState {
    pub fn new(
        generator: InterviewGenerator,
        store: InterviewStore,
        dispatcher: Dispatcher,
        voice: Arc<dyn VoiceConnector>,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            generator,
            store,
            dispatcher,
            voice,
            workflow_id: String::new(),
            interviewer: InterviewerConfig::default(),
            session_retention: Duration::from_secs(300),
        }
    }

    pub fn with_workflow(mut self, workflow_id: impl Into<String>) -> Self {
        self.workflow_id = workflow_id.into();
        self
    }

    pub fn with_interviewer(mut self, interviewer: InterviewerConfig) -> Self {
        self.interviewer = interviewer;
        self
    }

    pub fn with_session_retention(mut self, retention: Duration) -> Self {
        self.session_retention = retention;
        self
    }
}
