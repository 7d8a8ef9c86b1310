use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::voice::{InterviewerConfig, StartConfig};

/// What a session is for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionMode {
    /// Collect role/level/techstack/amount by voice, then generate an interview
    Generate { user_name: String, user_id: String },
    /// Run an existing interview, then produce feedback
    Interview {
        user_name: String,
        user_id: String,
        interview_id: String,
        #[serde(default)]
        feedback_id: Option<String>,
        questions: Vec<String>,
    },
}

impl SessionMode {
    pub fn is_generate(&self) -> bool {
        matches!(self, SessionMode::Generate { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionMode::Generate { .. } => "generate",
            SessionMode::Interview { .. } => "interview",
        }
    }
}

/// Configuration for one session controller
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier
    pub session_id: String,

    pub mode: SessionMode,

    /// Workflow run for generate-mode calls
    pub workflow_id: String,

    /// Assistant run for interview-mode calls
    pub interviewer: InterviewerConfig,
}

impl SessionConfig {
    pub fn new(mode: SessionMode) -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            mode,
            workflow_id: String::new(),
            interviewer: InterviewerConfig::default(),
        }
    }

    /// Mode-specific configuration for the voice client
    pub fn start_config(&self) -> StartConfig {
        match &self.mode {
            SessionMode::Generate { user_name, user_id } => StartConfig::Workflow {
                workflow_id: self.workflow_id.clone(),
                variable_values: BTreeMap::from([
                    ("username".to_string(), user_name.clone()),
                    ("userid".to_string(), user_id.clone()),
                ]),
            },
            SessionMode::Interview { questions, .. } => StartConfig::Assistant {
                assistant: self.interviewer.clone(),
                variable_values: BTreeMap::from([(
                    "questions".to_string(),
                    format_questions(questions),
                )]),
            },
        }
    }
}

/// One `- question` per line
pub fn format_questions(questions: &[String]) -> String {
    questions
        .iter()
        .map(|q| format!("- {}", q))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_mode_runs_workflow() {
        let mut config = SessionConfig::new(SessionMode::Generate {
            user_name: "Ada".to_string(),
            user_id: "u1".to_string(),
        });
        config.workflow_id = "wf-123".to_string();

        let StartConfig::Workflow {
            workflow_id,
            variable_values,
        } = config.start_config()
        else {
            panic!("expected workflow config");
        };
        assert_eq!(workflow_id, "wf-123");
        assert_eq!(variable_values["username"], "Ada");
        assert_eq!(variable_values["userid"], "u1");
    }

    #[test]
    fn test_interview_mode_formats_questions() {
        let config = SessionConfig::new(SessionMode::Interview {
            user_name: "Ada".to_string(),
            user_id: "u1".to_string(),
            interview_id: "iv1".to_string(),
            feedback_id: None,
            questions: vec!["Why Rust?".to_string(), "What is ownership?".to_string()],
        });

        let start = config.start_config();
        assert!(matches!(start, StartConfig::Assistant { .. }));
        assert_eq!(
            start.variable_values()["questions"],
            "- Why Rust?\n- What is ownership?"
        );
    }

    #[test]
    fn test_no_questions_formats_empty() {
        assert_eq!(format_questions(&[]), "");
    }
}
