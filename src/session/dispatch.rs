use serde::{Serialize, Serializer};
use std::sync::Arc;
use tracing::{error, info};

use super::extract::CollectedFields;
use super::state::TranscriptEntry;
use crate::error::{Error, Result};
use crate::feedback::{FeedbackRequest, FeedbackService};
use crate::generation::{GenerateRequest, QuestionGenerator};
use crate::voice::VoiceClient;

/// Interview `type` sent from a generate-mode call unless the agent set one
pub const DEFAULT_INTERVIEW_TYPE: &str = "generate";

/// Where the user is sent once a call has been dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Interview(String),
    Feedback(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Interview(id) => format!("/Interview/{}", id),
            Route::Feedback(id) => format!("/Interview/{}/feedback", id),
        }
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

/// Post-call work captured when the call finishes
#[derive(Debug, Clone)]
pub enum DispatchJob {
    Generate {
        user_id: String,
        collected: CollectedFields,
    },
    Feedback(FeedbackRequest),
}

impl DispatchJob {
    pub fn feedback(
        interview_id: &str,
        user_id: &str,
        feedback_id: Option<&str>,
        transcript: &[TranscriptEntry],
    ) -> Self {
        DispatchJob::Feedback(FeedbackRequest {
            interview_id: interview_id.to_string(),
            user_id: user_id.to_string(),
            transcript: transcript.to_vec(),
            feedback_id: feedback_id.map(str::to_string),
        })
    }
}

/// Runs the post-call procedure: one attempt, no retry
#[derive(Clone)]
pub struct Dispatcher {
    questions: Arc<dyn QuestionGenerator>,
    feedback: Arc<dyn FeedbackService>,
}

impl Dispatcher {
    pub fn new(questions: Arc<dyn QuestionGenerator>, feedback: Arc<dyn FeedbackService>) -> Self {
        Self { questions, feedback }
    }

    /// `None` means stay on the current screen
    pub async fn run(&self, job: DispatchJob, voice: &dyn VoiceClient) -> Option<Route> {
        match job {
            DispatchJob::Generate { user_id, collected } => {
                self.dispatch_generate(voice, &collected, &user_id).await
            }
            DispatchJob::Feedback(request) => Some(self.dispatch_feedback(&request).await),
        }
    }

    async fn dispatch_generate(
        &self,
        voice: &dyn VoiceClient,
        collected: &CollectedFields,
        user_id: &str,
    ) -> Option<Route> {
        let request = match resolve_generate_request(voice, collected, user_id).await {
            Ok(request) => request,
            Err(e) => {
                error!("Missing collected inputs before generation: {}", e);
                return None;
            }
        };

        match self.questions.generate_questions(&request).await {
            Ok(id) => {
                info!("Interview {} generated", id);
                Some(Route::Interview(id))
            }
            Err(e) => {
                error!("Error generating interview: {}", e);
                Some(Route::Home)
            }
        }
    }

    async fn dispatch_feedback(&self, request: &FeedbackRequest) -> Route {
        info!(
            "Saving feedback for interview {} ({} transcript entries)",
            request.interview_id,
            request.transcript.len()
        );

        match self.feedback.create_feedback(request).await {
            Ok(outcome) if outcome.success && outcome.feedback_id.is_some() => {
                Route::Feedback(request.interview_id.clone())
            }
            Ok(_) => {
                error!("Error saving feedback");
                Route::Home
            }
            Err(e) => {
                error!("Error during feedback creation: {}", e);
                Route::Home
            }
        }
    }
}

/// Live variables from the voice client win over transcript heuristics
pub async fn resolve_generate_request(
    voice: &dyn VoiceClient,
    collected: &CollectedFields,
    user_id: &str,
) -> Result<GenerateRequest> {
    let role = live_or_collected(voice, "role", &collected.role).await;
    let level = live_or_collected(voice, "level", &collected.level).await;
    let techstack = live_or_collected(voice, "techstack", &collected.techstack).await;
    let amount = live_or_collected(voice, "amount", &collected.amount).await;

    let resolved = CollectedFields {
        role,
        level,
        techstack,
        amount,
    };
    let missing = resolved.missing();
    let (Some(role), Some(level), Some(techstack), Some(amount)) = (
        resolved.role,
        resolved.level,
        resolved.techstack,
        resolved.amount,
    ) else {
        return Err(Error::MissingCollectedField(missing));
    };

    let interview_type = voice
        .variable("type")
        .await
        .unwrap_or_else(|| DEFAULT_INTERVIEW_TYPE.to_string());

    Ok(GenerateRequest {
        interview_type,
        role,
        level,
        techstack,
        amount,
        userid: user_id.to_string(),
    })
}

async fn live_or_collected(
    voice: &dyn VoiceClient,
    name: &str,
    collected: &Option<String>,
) -> Option<String> {
    match voice.variable(name).await {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => collected.clone().filter(|v| !v.is_empty()),
    }
}
