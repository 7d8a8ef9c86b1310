use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use super::covers::random_cover;
use super::gemini::TextGenerator;
use super::parse::parse_questions;
use super::prompt::build_prompt;
use super::request::GenerateRequest;
use crate::error::Result;
use crate::store::{InterviewRecord, InterviewStore};

/// Question generation as seen by a finished generate-mode session
#[async_trait::async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generate and persist an interview, returning its identifier
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<String>;
}

/// Prompts the model once, parses the question list and stores the interview
#[derive(Clone)]
pub struct InterviewGenerator {
    generator: Arc<dyn TextGenerator>,
    store: InterviewStore,
}

impl InterviewGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, store: InterviewStore) -> Self {
        Self { generator, store }
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<String> {
        info!(
            "Generating {} questions for {} ({}) with {}",
            req.amount,
            req.role,
            req.level,
            self.generator.model()
        );

        let text = self.generator.generate_text(&build_prompt(req)).await?;
        let questions = parse_questions(&text).map_err(|e| {
            error!("Unparseable model output: {}", text);
            e
        })?;

        let interview = InterviewRecord {
            role: req.role.clone(),
            interview_type: req.interview_type.clone(),
            level: req.level.clone(),
            techstack: req.techstack_list(),
            questions,
            user_id: req.userid.clone(),
            finalized: true,
            cover_image: random_cover(),
            created_at: Utc::now(),
        };

        self.store.create_interview(&interview).await
    }
}

#[async_trait::async_trait]
impl QuestionGenerator for InterviewGenerator {
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<String> {
        self.generate(request).await
    }
}
