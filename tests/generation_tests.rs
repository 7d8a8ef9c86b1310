// Integration tests for question generation and feedback synthesis
//
// Both run against canned model output and the in-memory document store.

mod common;

use common::{CannedText, FEEDBACK_JSON};
use prepwise::feedback::{FeedbackRequest, FeedbackService, LlmFeedbackService};
use prepwise::generation::{GenerateRequest, InterviewGenerator};
use prepwise::session::TranscriptEntry;
use prepwise::store::{InterviewStore, MemoryStore, FEEDBACK, INTERVIEWS};
use prepwise::voice::Role;
use prepwise::Error;
use std::sync::Arc;

fn request() -> GenerateRequest {
    GenerateRequest {
        interview_type: "technical".to_string(),
        role: "Backend Engineer".to_string(),
        level: "Senior".to_string(),
        techstack: "Rust,Tokio,Postgres".to_string(),
        amount: "2".to_string(),
        userid: "user-1".to_string(),
    }
}

fn setup(replies: &[&str]) -> (InterviewGenerator, Arc<CannedText>, MemoryStore) {
    let text = Arc::new(CannedText::new(replies));
    let memory = MemoryStore::new();
    let store = InterviewStore::new(Arc::new(memory.clone()));
    (InterviewGenerator::new(text.clone(), store), text, memory)
}

#[tokio::test]
async fn test_generate_stores_interview() {
    let (generator, text, memory) = setup(&[r#"["Q1","Q2"]"#]);

    let id = generator.generate(&request()).await.unwrap();
    assert_eq!(text.calls(), 1);
    assert!(text.prompts.lock().unwrap()[0].contains("The job role is Backend Engineer."));

    let store = InterviewStore::new(Arc::new(memory.clone()));
    let interview = store.get_interview(&id).await.unwrap().unwrap();
    assert_eq!(interview.questions, vec!["Q1", "Q2"]);
    assert_eq!(interview.techstack, vec!["Rust", "Tokio", "Postgres"]);
    assert_eq!(interview.role, "Backend Engineer");
    assert_eq!(interview.interview_type, "technical");
    assert_eq!(interview.user_id, "user-1");
    assert!(interview.finalized);
    assert!(interview.cover_image.starts_with("/covers/"));
}

#[tokio::test]
async fn test_generate_extracts_list_from_prose() {
    let (generator, _, memory) =
        setup(&["Here you go:\n[\"Q1\", \"Q2\"]\nLet me know if you need more."]);

    let id = generator.generate(&request()).await.unwrap();
    let raw = prepwise::store::DocumentStore::get(&memory, INTERVIEWS, &id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(raw["questions"], serde_json::json!(["Q1", "Q2"]));
}

#[tokio::test]
async fn test_unparseable_output_fails_without_storing() {
    let (generator, text, memory) = setup(&["Sorry, I can't do that."]);

    let err = generator.generate(&request()).await.unwrap_err();
    assert!(matches!(err, Error::GenerationParse(_)));
    assert_eq!(text.calls(), 1);
    assert_eq!(memory.count(INTERVIEWS).await, 0);
}

fn feedback_request(feedback_id: Option<&str>) -> FeedbackRequest {
    FeedbackRequest {
        interview_id: "iv-1".to_string(),
        user_id: "user-1".to_string(),
        transcript: vec![
            TranscriptEntry {
                role: Role::Assistant,
                content: "What is a trait object?".to_string(),
            },
            TranscriptEntry {
                role: Role::User,
                content: "Dynamic dispatch through a vtable.".to_string(),
            },
        ],
        feedback_id: feedback_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_feedback_is_synthesized_and_stored() {
    let text = Arc::new(CannedText::new(&[FEEDBACK_JSON]));
    let memory = MemoryStore::new();
    let store = InterviewStore::new(Arc::new(memory.clone()));
    let service = LlmFeedbackService::new(text.clone(), store.clone());

    let outcome = service.create_feedback(&feedback_request(None)).await.unwrap();
    assert!(outcome.success);

    let prompt = text.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("- assistant: What is a trait object?\n- user: Dynamic dispatch through a vtable."));

    let id = outcome.feedback_id.unwrap();
    let feedback = store.get_feedback(&id).await.unwrap().unwrap();
    assert_eq!(feedback.interview_id, "iv-1");
    assert_eq!(feedback.total_score, 78);
    assert_eq!(feedback.category_scores.len(), 2);
    assert_eq!(feedback.final_assessment, "Good candidate");
}

#[tokio::test]
async fn test_feedback_overwrites_existing_id() {
    let text = Arc::new(CannedText::new(&[FEEDBACK_JSON]));
    let memory = MemoryStore::new();
    let service = LlmFeedbackService::new(text, InterviewStore::new(Arc::new(memory.clone())));

    let outcome = service
        .create_feedback(&feedback_request(Some("fb-existing")))
        .await
        .unwrap();

    assert_eq!(outcome.feedback_id.as_deref(), Some("fb-existing"));
    assert_eq!(memory.count(FEEDBACK).await, 1);
}

#[tokio::test]
async fn test_feedback_parse_failure_is_an_error() {
    let text = Arc::new(CannedText::new(&["The candidate did fine."]));
    let memory = MemoryStore::new();
    let service = LlmFeedbackService::new(text, InterviewStore::new(Arc::new(memory.clone())));

    let err = service.create_feedback(&feedback_request(None)).await.unwrap_err();
    assert!(matches!(err, Error::GenerationParse(_)));
    assert_eq!(memory.count(FEEDBACK).await, 0);
}
