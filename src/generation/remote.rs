use reqwest::Client;
use tracing::{error, info};

use super::request::{GenerateRequest, GenerateResponse};
use super::service::QuestionGenerator;
use crate::error::{Error, Result};

/// Calls a remote `/generate-questions` endpoint
#[derive(Clone)]
pub struct HttpQuestionGenerator {
    client: Client,
    endpoint: String,
}

impl HttpQuestionGenerator {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/generate-questions", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait::async_trait]
impl QuestionGenerator for HttpQuestionGenerator {
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<String> {
        info!("Requesting question generation from {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body: GenerateResponse = response.json().await?;

        match body.id {
            Some(id) if status.is_success() && body.success => Ok(id),
            _ => {
                let reason = body.error.unwrap_or_else(|| format!("status {}", status));
                error!("Generation failed response: {}", reason);
                Err(Error::Generation(reason))
            }
        }
    }
}
