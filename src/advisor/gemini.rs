//! Gemini-backed advisor over the `generateContent` REST endpoint.

use std::time::Duration;

use jiff::tz::TimeZone;
use serde_json::{Value, json};

use crate::config::AdvisorConfig;
use crate::model::{ChatMessage, CoachContext, Language, LoggedEvent, Phase, Role, TriggerAnalysis};

use super::{Advisor, AdvisorError, prompt};

/// Advisor that calls Google's Generative Language API.
pub struct GeminiAdvisor {
    config: AdvisorConfig,
    api_key: String,
    language: Language,
    tz: TimeZone,
    client: reqwest::blocking::Client,
}

impl GeminiAdvisor {
    /// Builds a client. Fails with [`AdvisorError::Disabled`] when no API
    /// key is configured.
    pub fn new(config: &AdvisorConfig, language: Language) -> Result<Self, AdvisorError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AdvisorError::Disabled(config.api_key_env.clone()))?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdvisorError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: config.clone(),
            api_key,
            language,
            tz: TimeZone::system(),
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Posts a request body and returns the reply text.
    fn generate(&self, body: &Value) -> Result<String, AdvisorError> {
        log::debug!("calling {}", self.url());
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisorError::Timeout(self.config.timeout_secs)
                } else {
                    AdvisorError::Http(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Http(format!("HTTP {status} from advisor")));
        }

        let json: Value = response
            .json()
            .map_err(|e| AdvisorError::InvalidJson(format!("failed to parse response: {e}")))?;
        extract_text(&json)
    }
}

impl Advisor for GeminiAdvisor {
    fn analyze(
        &self,
        events: &[LoggedEvent],
        phase: Phase,
    ) -> Result<TriggerAnalysis, AdvisorError> {
        let body = analysis_request(&prompt::analysis_prompt(
            events,
            phase,
            self.language,
            &self.tz,
        ));
        let text = self.generate(&body)?;
        parse_analysis(&text)
    }

    fn coach(&self, history: &[ChatMessage], context: CoachContext) -> Result<String, AdvisorError> {
        let body = coach_request(&prompt::coach_instruction(context, self.language), history)?;
        self.generate(&body)
    }
}

fn analysis_request(prompt: &str) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": prompt::analysis_schema(),
        }
    })
}

/// A single-turn request carrying the latest user message.
///
/// Earlier turns stay local; each reply is steered by the system instruction
/// alone.
fn coach_request(instruction: &str, history: &[ChatMessage]) -> Result<Value, AdvisorError> {
    let last_user = history
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .ok_or(AdvisorError::NoUserMessage)?;

    Ok(json!({
        "systemInstruction": { "parts": [{ "text": instruction }] },
        "contents": [{ "role": "user", "parts": [{ "text": last_user.text }] }],
    }))
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: &Value) -> Result<String, AdvisorError> {
    let parts = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(Value::as_array)
        .ok_or(AdvisorError::EmptyResponse)?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }
    Ok(text)
}

fn parse_analysis(text: &str) -> Result<TriggerAnalysis, AdvisorError> {
    serde_json::from_str(text)
        .map_err(|e| AdvisorError::InvalidJson(format!("analysis does not match schema: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(role: Role, text: &str) -> ChatMessage {
        ChatMessage {
            role,
            text: text.into(),
            timestamp: 0,
        }
    }

    #[test]
    fn extract_text_joins_parts() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hold on, " }, { "text": "you can do this." }] }
            }]
        });

        assert_eq!(extract_text(&response).unwrap(), "Hold on, you can do this.");
    }

    #[test]
    fn extract_text_without_candidates_is_empty_response() {
        assert_eq!(
            extract_text(&json!({ "candidates": [] })).unwrap_err(),
            AdvisorError::EmptyResponse
        );
        assert_eq!(
            extract_text(&json!({
                "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
            }))
            .unwrap_err(),
            AdvisorError::EmptyResponse
        );
    }

    #[test]
    fn parse_analysis_accepts_schema_output() {
        let text = r#"{"topTriggers":[{"name":"Stress","count":5}],"doublesCount":1,
            "advice":"Notice the stress spikes.","suggestedAction":"Take a walk instead."}"#;
        let analysis = parse_analysis(text).unwrap();

        assert_eq!(analysis.top_triggers[0].name, "Stress");
        assert_eq!(analysis.doubles_count, 1);
    }

    #[test]
    fn parse_analysis_rejects_free_text() {
        let err = parse_analysis("You smoke a lot after coffee.").unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidJson(_)));
    }

    #[test]
    fn analysis_request_asks_for_json() {
        let body = analysis_request("prompt text");

        assert_eq!(body["contents"][0]["parts"][0]["text"], "prompt text");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn coach_request_sends_latest_user_message() {
        let history = [
            message(Role::Model, "Hello!"),
            message(Role::User, "I slipped."),
            message(Role::Model, "That's okay."),
            message(Role::User, "What now?"),
        ];
        let body = coach_request("be kind", &history).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "What now?");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be kind");
    }

    #[test]
    fn coach_request_needs_a_user_message() {
        let history = [message(Role::Model, "Hello!")];
        assert_eq!(
            coach_request("be kind", &history).unwrap_err(),
            AdvisorError::NoUserMessage
        );
    }

    #[test]
    fn new_without_key_is_disabled() {
        let config = AdvisorConfig {
            api_key_env: "FREEDOMPATH_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..AdvisorConfig::default()
        };
        let err = GeminiAdvisor::new(&config, Language::En).err().unwrap();
        assert!(matches!(err, AdvisorError::Disabled(_)));
    }
}
