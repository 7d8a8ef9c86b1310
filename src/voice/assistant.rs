use serde::{Deserialize, Serialize};

/// Assistant definition sent with interview-mode calls
///
/// `{{questions}}` in the system prompt is substituted by the voice agent
/// from the call's variable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerConfig {
    pub name: String,
    pub first_message: String,
    pub transcriber: ProviderConfig,
    pub voice: ProviderConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    pub system_prompt: String,
}

const INTERVIEWER_PROMPT: &str = "You are a professional job interviewer conducting a real-time voice interview with a candidate. \
Your goal is to assess their qualifications, motivation, and fit for the role.

Interview Guidelines:
Follow the structured question flow:
{{questions}}

Engage naturally and react appropriately. Listen actively to responses and acknowledge them before moving forward. \
Ask brief follow-up questions if a response is vague or requires more detail. \
Keep the conversation flowing smoothly while maintaining control.

Be professional, yet warm and welcoming. Keep all your responses short and simple, \
this is a voice conversation so avoid long answers.

Conclude the interview properly. Thank the candidate for their time and let them know \
the company will reach out soon with feedback.";

impl Default for InterviewerConfig {
    fn default() -> Self {
        Self {
            name: "Interviewer".to_string(),
            first_message: "Hello! Thank you for taking the time to speak with me today. \
                I'm excited to learn more about you and your experience."
                .to_string(),
            transcriber: ProviderConfig {
                provider: "deepgram".to_string(),
                model: "nova-2".to_string(),
                language: Some("en".to_string()),
                voice_id: None,
            },
            voice: ProviderConfig {
                provider: "11labs".to_string(),
                model: "eleven_turbo_v2_5".to_string(),
                language: None,
                voice_id: Some("sarah".to_string()),
            },
            model: ModelConfig {
                provider: "openai".to_string(),
                model: "gpt-4".to_string(),
                system_prompt: INTERVIEWER_PROMPT.to_string(),
            },
        }
    }
}
