use crate::error::{Error, Result};

/// Read model output as an ordered list of questions
///
/// The whole text is tried as a JSON array first; failing that, the region
/// from the first `[` to the last `]` is parsed.
pub fn parse_questions(text: &str) -> Result<Vec<String>> {
    let questions: Vec<String> = match serde_json::from_str(text.trim()) {
        Ok(questions) => questions,
        Err(_) => {
            let region = bracketed_region(text, '[', ']').ok_or_else(|| {
                Error::GenerationParse("no question list found in model output".to_string())
            })?;
            serde_json::from_str(region)
                .map_err(|e| Error::GenerationParse(format!("bracketed region is not a list: {}", e)))?
        }
    };

    if questions.is_empty() {
        return Err(Error::GenerationParse("model returned no questions".to_string()));
    }

    Ok(questions)
}

/// Greedy `open`..`close` span, inclusive
pub(crate) fn bracketed_region(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..end + close.len_utf8()])
}
