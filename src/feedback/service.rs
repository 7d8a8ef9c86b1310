use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::assessment::{build_feedback_prompt, parse_assessment};
use crate::error::Result;
use crate::generation::TextGenerator;
use crate::session::TranscriptEntry;
use crate::store::{FeedbackRecord, InterviewStore};

/// Everything needed to assess one finished interview call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub interview_id: String,
    pub user_id: String,
    pub transcript: Vec<TranscriptEntry>,
    /// Existing feedback to overwrite instead of creating a new one
    #[serde(default)]
    pub feedback_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOutcome {
    pub success: bool,
    pub feedback_id: Option<String>,
}

/// Feedback synthesis and persistence
#[async_trait::async_trait]
pub trait FeedbackService: Send + Sync {
    async fn create_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackOutcome>;
}

/// Asks the text generator to grade the transcript, then stores the result
#[derive(Clone)]
pub struct LlmFeedbackService {
    generator: Arc<dyn TextGenerator>,
    store: InterviewStore,
}

impl LlmFeedbackService {
    pub fn new(generator: Arc<dyn TextGenerator>, store: InterviewStore) -> Self {
        Self { generator, store }
    }
}

#[async_trait::async_trait]
impl FeedbackService for LlmFeedbackService {
    async fn create_feedback(&self, request: &FeedbackRequest) -> Result<FeedbackOutcome> {
        info!(
            "Synthesizing feedback for interview {} ({} transcript entries)",
            request.interview_id,
            request.transcript.len()
        );

        let text = self
            .generator
            .generate_text(&build_feedback_prompt(&request.transcript))
            .await?;
        let assessment = parse_assessment(&text).map_err(|e| {
            error!("Unparseable feedback output: {}", text);
            e
        })?;

        let record = FeedbackRecord {
            interview_id: request.interview_id.clone(),
            user_id: request.user_id.clone(),
            total_score: assessment.total_score,
            category_scores: assessment.category_scores,
            strengths: assessment.strengths,
            areas_for_improvement: assessment.areas_for_improvement,
            final_assessment: assessment.final_assessment,
            created_at: Utc::now(),
        };

        let id = self
            .store
            .save_feedback(&record, request.feedback_id.as_deref())
            .await?;

        Ok(FeedbackOutcome {
            success: true,
            feedback_id: Some(id),
        })
    }
}
