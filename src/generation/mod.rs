//! Interview question generation
//!
//! One model call per request, lenient parsing of the returned list, then
//! a single write of the new interview.

mod covers;
mod gemini;
mod parse;
mod prompt;
mod remote;
mod request;
mod service;

pub use covers::random_cover;
pub use gemini::{GeminiClient, TextGenerator};
pub use parse::parse_questions;
pub(crate) use parse::bracketed_region;
pub use prompt::build_prompt;
pub use remote::HttpQuestionGenerator;
pub use request::{GenerateRequest, GenerateResponse};
pub use service::{InterviewGenerator, QuestionGenerator};
