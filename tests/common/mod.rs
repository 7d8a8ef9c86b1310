// Scripted collaborators shared by the integration tests
#![allow(dead_code)]

use prepwise::feedback::{FeedbackOutcome, FeedbackRequest, FeedbackService};
use prepwise::generation::{GenerateRequest, QuestionGenerator, TextGenerator};
use prepwise::voice::{StartConfig, VoiceClient, VoiceConnector, VoiceEvent};
use prepwise::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, Notify};

/// Voice client that records control calls and serves fixed variables
#[derive(Default)]
pub struct ScriptedVoice {
    pub starts: Mutex<Vec<StartConfig>>,
    pub stops: Mutex<usize>,
    pub variables: HashMap<String, String>,
    /// Number of upcoming starts to reject
    pub rejected_starts: Mutex<usize>,
}

impl ScriptedVoice {
    pub fn with_variables(variables: &[(&str, &str)]) -> Self {
        Self {
            variables: variables
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn rejecting(starts: usize) -> Self {
        Self {
            rejected_starts: Mutex::new(starts),
            ..Self::default()
        }
    }

    pub fn start_count(&self) -> usize {
        self.starts.lock().unwrap().len()
    }

    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl VoiceClient for ScriptedVoice {
    async fn start(&self, config: StartConfig) -> Result<()> {
        {
            let mut rejected = self.rejected_starts.lock().unwrap();
            if *rejected > 0 {
                *rejected -= 1;
                return Err(Error::VoiceClient("microphone permission denied".to_string()));
            }
        }
        self.starts.lock().unwrap().push(config);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        *self.stops.lock().unwrap() += 1;
        Ok(())
    }

    async fn variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Connector that hands out [`ScriptedVoice`] clients and keeps their event senders
#[derive(Default)]
pub struct ScriptedConnector {
    pub clients: Mutex<HashMap<String, (Arc<ScriptedVoice>, mpsc::Sender<VoiceEvent>)>>,
}

impl ScriptedConnector {
    pub fn events(&self, session_id: &str) -> mpsc::Sender<VoiceEvent> {
        self.clients.lock().unwrap()[session_id].1.clone()
    }

    pub fn client(&self, session_id: &str) -> Arc<ScriptedVoice> {
        Arc::clone(&self.clients.lock().unwrap()[session_id].0)
    }
}

#[async_trait::async_trait]
impl VoiceConnector for ScriptedConnector {
    async fn connect(
        &self,
        session_id: &str,
    ) -> Result<(Arc<dyn VoiceClient>, mpsc::Receiver<VoiceEvent>)> {
        let voice = Arc::new(ScriptedVoice::default());
        let (tx, rx) = mpsc::channel(100);
        self.clients
            .lock()
            .unwrap()
            .insert(session_id.to_string(), (Arc::clone(&voice), tx));
        Ok((voice, rx))
    }
}

/// Text generator returning canned replies in order (the last one repeats)
pub struct CannedText {
    replies: Vec<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedText {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| r.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TextGenerator for CannedText {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        let index = (prompts.len() - 1).min(self.replies.len().saturating_sub(1));
        self.replies
            .get(index)
            .cloned()
            .ok_or_else(|| Error::Generation("no canned reply".to_string()))
    }

    fn model(&self) -> &str {
        "canned"
    }
}

/// Question generator that records requests
#[derive(Default)]
pub struct RecordingQuestions {
    pub requests: Mutex<Vec<GenerateRequest>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl QuestionGenerator for RecordingQuestions {
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            Err(Error::Generation("model unavailable".to_string()))
        } else {
            Ok("interview-42".to_string())
        }
    }
}

/// Feedback service that records requests
///
/// With a `gate`, each request waits for one permit before answering.
#[derive(Default)]
pub struct RecordingFeedback {
    pub requests: Mutex<Vec<FeedbackRequest>>,
    pub fail: bool,
    pub gate: Option<Arc<Notify>>,
}

#[async_trait::async_trait]
impl FeedbackService for RecordingFeedback {
    async fn create_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackOutcome> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(Error::Persistence("write rejected".to_string()));
        }
        Ok(FeedbackOutcome {
            success: true,
            feedback_id: Some("feedback-7".to_string()),
        })
    }
}

pub const FEEDBACK_JSON: &str = r#"{
    "totalScore": 78,
    "categoryScores": [
        {"name": "Communication Skills", "score": 80, "comment": "Clear"},
        {"name": "Technical Knowledge", "score": 75, "comment": "Solid"}
    ],
    "strengths": ["Structured answers"],
    "areasForImprovement": ["More depth on concurrency"],
    "finalAssessment": "Good candidate"
}"#;
