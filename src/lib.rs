pub mod app;
pub mod config;
pub mod error;
pub mod feedback;
pub mod generation;
pub mod http;
pub mod nats;
pub mod session;
pub mod store;
pub mod voice;

pub use config::Config;
pub use error::{Error, Result};
pub use feedback::{FeedbackOutcome, FeedbackRequest, FeedbackService, LlmFeedbackService};
pub use generation::{
    GenerateRequest, GenerateResponse, GeminiClient, HttpQuestionGenerator, InterviewGenerator,
    QuestionGenerator, TextGenerator,
};
pub use http::{create_router, AppState};
pub use nats::NatsClient;
pub use session::{
    CallStatus, CollectedFields, Dispatcher, Route, SessionConfig, SessionController,
    SessionHandle, SessionMode, SessionSnapshot, SessionState, TranscriptEntry,
};
pub use store::{DocumentStore, FirestoreStore, InterviewRecord, InterviewStore, MemoryStore};
pub use voice::{Role, StartConfig, VoiceClient, VoiceConnector, VoiceEvent};
