use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

use super::backend::DocumentStore;
use super::records::{FeedbackRecord, InterviewRecord, UserRecord, FEEDBACK, INTERVIEWS, USERS};
use crate::error::{Error, Result};

/// Typed access to the interview, feedback and user collections
#[derive(Clone)]
pub struct InterviewStore {
    backend: Arc<dyn DocumentStore>,
}

impl InterviewStore {
    pub fn new(backend: Arc<dyn DocumentStore>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub async fn create_interview(&self, interview: &InterviewRecord) -> Result<String> {
        let id = self
            .backend
            .create(INTERVIEWS, serde_json::to_value(interview)?)
            .await?;
        info!("Interview created in {} with ID: {}", self.backend.name(), id);
        Ok(id)
    }

    pub async fn get_interview(&self, id: &str) -> Result<Option<InterviewRecord>> {
        self.get_typed(INTERVIEWS, id).await
    }

    /// Like [`get_interview`](Self::get_interview), but a missing document is an error
    pub async fn require_interview(&self, id: &str) -> Result<InterviewRecord> {
        self.get_interview(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("interview {}", id)))
    }

    /// Overwrite `feedback_id` when given, otherwise create a new document
    pub async fn save_feedback(
        &self,
        feedback: &FeedbackRecord,
        feedback_id: Option<&str>,
    ) -> Result<String> {
        let data = serde_json::to_value(feedback)?;
        let id = match feedback_id {
            Some(id) => {
                self.backend.set(FEEDBACK, id, data).await?;
                id.to_string()
            }
            None => self.backend.create(FEEDBACK, data).await?,
        };
        info!(
            "Feedback {} saved for interview {}",
            id, feedback.interview_id
        );
        Ok(id)
    }

    pub async fn get_feedback(&self, id: &str) -> Result<Option<FeedbackRecord>> {
        self.get_typed(FEEDBACK, id).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<UserRecord>> {
        self.get_typed(USERS, id).await
    }

    async fn get_typed<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        match self.backend.get(collection, id).await? {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }
}
