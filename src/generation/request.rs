use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /generate-questions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Behavioural/technical focus
    #[serde(rename = "type")]
    pub interview_type: String,
    pub role: String,
    pub level: String,
    /// Comma-joined technologies
    pub techstack: String,
    /// Number of questions; spoken input arrives as text, form input as a number
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    pub userid: String,
}

impl GenerateRequest {
    /// Techstack as an ordered list
    pub fn techstack_list(&self) -> Vec<String> {
        self.techstack
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Response of `POST /generate-questions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn created(id: String) -> Self {
        Self {
            success: true,
            id: Some(id),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(error.to_string()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(s) => s,
        Amount::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_accepts_number_or_string() {
        let body = r#"{"type":"technical","role":"SRE","level":"senior","techstack":"Go, Kubernetes","amount":5,"userid":"u1"}"#;
        let req: GenerateRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.amount, "5");

        let body = r#"{"type":"technical","role":"SRE","level":"senior","techstack":"Go","amount":"10","userid":"u1"}"#;
        let req: GenerateRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.amount, "10");
    }

    #[test]
    fn test_techstack_list_splits_on_comma() {
        let req = GenerateRequest {
            interview_type: "mixed".to_string(),
            role: "Backend".to_string(),
            level: "mid".to_string(),
            techstack: "Rust, Tokio,,Postgres".to_string(),
            amount: "3".to_string(),
            userid: "u1".to_string(),
        };
        assert_eq!(req.techstack_list(), vec!["Rust", "Tokio", "Postgres"]);
    }

    #[test]
    fn test_failed_response_omits_id() {
        let json = serde_json::to_string(&GenerateResponse::failed("boom")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"boom"}"#);
    }
}
