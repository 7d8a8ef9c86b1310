//! Post-interview feedback synthesis

mod assessment;
mod service;

pub use assessment::{build_feedback_prompt, format_transcript, parse_assessment, Assessment, CATEGORIES};
pub use service::{FeedbackOutcome, FeedbackRequest, FeedbackService, LlmFeedbackService};
