//! Best-effort field extraction from finalized transcript lines
//!
//! Each extractor is a substring heuristic over the lower-cased line. A hit
//! keeps the whole original line as the value, except `amount`, which keeps
//! the first one- or two-digit number when there is one.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const ROLE_TRIGGERS: &[&str] = &["role", "position", "job"];
const LEVEL_TRIGGERS: &[&str] = &["experience", "level", "years"];
const TECHSTACK_TRIGGERS: &[&str] = &["tech", "stack", "technologies"];
const AMOUNT_TRIGGERS: &[&str] = &["questions", "amount"];

// Literal patterns: compilation cannot depend on input, and
// test_number_patterns_compile forces both.
static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\b").expect("literal number pattern"));
static SHORT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\b").expect("literal amount pattern"));

fn mentions(lower: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| lower.contains(t))
}

pub fn extract_role(line: &str) -> Option<String> {
    mentions(&line.to_lowercase(), ROLE_TRIGGERS).then(|| line.to_string())
}

pub fn extract_level(line: &str) -> Option<String> {
    mentions(&line.to_lowercase(), LEVEL_TRIGGERS).then(|| line.to_string())
}

pub fn extract_techstack(line: &str) -> Option<String> {
    mentions(&line.to_lowercase(), TECHSTACK_TRIGGERS).then(|| line.to_string())
}

pub fn extract_amount(line: &str) -> Option<String> {
    let lower = line.to_lowercase();
    if !ANY_NUMBER.is_match(&lower) && !mentions(&lower, AMOUNT_TRIGGERS) {
        return None;
    }
    Some(
        SHORT_NUMBER
            .captures(&lower)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| line.to_string()),
    )
}

/// Values picked up from the conversation in generate mode
///
/// Every slot is write-once: the first matching line wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectedFields {
    pub role: Option<String>,
    pub level: Option<String>,
    pub techstack: Option<String>,
    pub amount: Option<String>,
}

impl CollectedFields {
    /// Run every extractor for the slots still empty
    pub fn observe(&mut self, line: &str) {
        fill(&mut self.role, || extract_role(line));
        fill(&mut self.level, || extract_level(line));
        fill(&mut self.techstack, || extract_techstack(line));
        fill(&mut self.amount, || extract_amount(line));
    }

    /// Names of the empty slots
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("role", &self.role),
            ("level", &self.level),
            ("techstack", &self.techstack),
            ("amount", &self.amount),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().map_or(true, str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }
}

fn fill(slot: &mut Option<String>, extract: impl FnOnce() -> Option<String>) {
    if slot.is_none() {
        *slot = extract();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_keeps_original_case_line() {
        assert_eq!(
            extract_role("I'm applying for a Backend JOB"),
            Some("I'm applying for a Backend JOB".to_string())
        );
        assert_eq!(extract_role("Hello there"), None);
    }

    #[test]
    fn test_level_and_techstack_triggers() {
        assert!(extract_level("About five Years in industry").is_some());
        assert!(extract_level("senior LEVEL").is_some());
        assert!(extract_techstack("Mostly React and Node technologies").is_some());
        assert!(extract_techstack("a full stack").is_some());
        assert_eq!(extract_techstack("nothing relevant"), None);
    }

    #[test]
    fn test_number_patterns_compile() {
        assert!(ANY_NUMBER.is_match("2019"));
        assert_eq!(&SHORT_NUMBER.captures("about 12 or so").unwrap()[1], "12");
    }

    #[test]
    fn test_amount_prefers_short_number() {
        assert_eq!(extract_amount("Let's do 5 questions"), Some("5".to_string()));
        assert_eq!(extract_amount("maybe 12"), Some("12".to_string()));
    }

    #[test]
    fn test_amount_falls_back_to_line() {
        // Triggered by a long number, but no 1-2 digit token to keep
        assert_eq!(extract_amount("since 2019"), Some("since 2019".to_string()));
        assert_eq!(
            extract_amount("A handful of Questions please"),
            Some("A handful of Questions please".to_string())
        );
        assert_eq!(extract_amount("no digits here"), None);
    }

    #[test]
    fn test_fields_are_write_once() {
        let mut fields = CollectedFields::default();
        fields.observe("The role is frontend developer");
        fields.observe("Actually the role is data scientist");

        assert_eq!(fields.role.as_deref(), Some("The role is frontend developer"));
        assert_eq!(fields.missing(), vec!["level", "techstack", "amount"]);
    }

    #[test]
    fn test_one_line_can_fill_several_slots() {
        let mut fields = CollectedFields::default();
        fields.observe("Senior level job, tech stack is Rust, 3 questions");

        assert!(fields.missing().is_empty());
        assert_eq!(fields.amount.as_deref(), Some("3"));
    }
}
