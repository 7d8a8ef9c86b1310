use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::feedback::LlmFeedbackService;
use crate::generation::{GeminiClient, InterviewGenerator, TextGenerator};
use crate::http::AppState;
use crate::session::Dispatcher;
use crate::store::{DocumentStore, FirestoreStore, InterviewStore, MemoryStore};
use crate::voice::NatsVoiceConnector;

/// Document store selected by configuration
pub fn build_store(cfg: &Config) -> InterviewStore {
    let backend: Arc<dyn DocumentStore> = match cfg.store.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Firestore => Arc::new(FirestoreStore::new(&cfg.store)),
    };
    info!("Using {} document store", backend.name());
    InterviewStore::new(backend)
}

/// Wire every collaborator from configuration
pub fn build_state(cfg: &Config) -> AppState {
    let store = build_store(cfg);
    let text: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(&cfg.generation));

    let generator = InterviewGenerator::new(Arc::clone(&text), store.clone());
    let feedback = LlmFeedbackService::new(text, store.clone());
    let dispatcher = Dispatcher::new(Arc::new(generator.clone()), Arc::new(feedback));
    let voice = Arc::new(NatsVoiceConnector::new(cfg.voice.nats_url.clone()));

    AppState::new(generator, store, dispatcher, voice)
        .with_workflow(cfg.voice.workflow_id.clone())
        .with_interviewer(cfg.voice.interviewer.clone())
        .with_session_retention(Duration::from_secs(cfg.service.session_retention_secs))
}
