use serde::Deserialize;

use crate::error::{Error, Result};
use crate::generation::bracketed_region;
use crate::session::TranscriptEntry;
use crate::store::CategoryScore;

pub const CATEGORIES: [&str; 5] = [
    "Communication Skills",
    "Technical Knowledge",
    "Problem Solving",
    "Cultural Fit",
    "Confidence and Clarity",
];

/// Model verdict before it is attached to an interview
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub total_score: u32,
    pub category_scores: Vec<CategoryScore>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

/// `- role: content` per line, in transcript order
pub fn format_transcript(transcript: &[TranscriptEntry]) -> String {
    transcript
        .iter()
        .map(|entry| format!("- {}: {}\n", entry.role.as_str(), entry.content))
        .collect()
}

pub fn build_feedback_prompt(transcript: &[TranscriptEntry]) -> String {
    format!(
        "You are an AI interviewer analyzing a mock interview. Your task is to evaluate the candidate based on structured categories. \
Be thorough and detailed in your analysis. Don't be lenient with the candidate. If there are mistakes or areas for improvement, point them out.
Transcript:
{transcript}
Please score the candidate from 0 to 100 in the following areas. Do not add categories other than the ones provided:
{categories}

Respond with only a JSON object of this shape:
{{\"totalScore\": 0, \"categoryScores\": [{{\"name\": \"\", \"score\": 0, \"comment\": \"\"}}], \"strengths\": [\"\"], \"areasForImprovement\": [\"\"], \"finalAssessment\": \"\"}}
",
        transcript = format_transcript(transcript),
        categories = CATEGORIES
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Same fallback policy as question lists, over braces
pub fn parse_assessment(text: &str) -> Result<Assessment> {
    let mut assessment: Assessment = match serde_json::from_str(text.trim()) {
        Ok(a) => a,
        Err(_) => {
            let region = bracketed_region(text, '{', '}').ok_or_else(|| {
                Error::GenerationParse("no assessment object found in model output".to_string())
            })?;
            serde_json::from_str(region)
                .map_err(|e| Error::GenerationParse(format!("assessment object is malformed: {}", e)))?
        }
    };

    assessment.total_score = assessment.total_score.min(100);
    for category in &mut assessment.category_scores {
        category.score = category.score.min(100);
    }

    Ok(assessment)
}
