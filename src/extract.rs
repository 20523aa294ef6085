use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ExternalServiceError;
use crate::types::Insight;

const INSIGHT_PROMPT: &str = r#"You are a relationship insight extractor. Given this memory text, extract the following:
- People mentioned (with names)
- Locations (e.g., cities, schools, places)
- Emotions (positive or negative feelings expressed)
- Social intent (e.g., reconnect, argument, bonding)

Return JSON only, in this shape:
{
  "people": [...],
  "locations": [...],
  "emotions": [...],
  "social_intent": "..."
}"#;

const SUMMARY_PROMPT: &str = r#"You are a relationship analyst. Based on the extracted insights and the original conversation, create a concise, structured summary of the social interaction.

Create a very concise summary in this EXACT format without any line breaks:

📊 Social Intelligence: People: [key people] | Location: [location] | Emotions: [emotions] | Intent: [intent] | 🔥 Key insight: [brief insight]

Keep it extremely brief but insightful. Do not use any newlines or special characters that might cause formatting issues when displayed in a mobile app."#;

/// Text in, text out. `json_mode` asks the model for a bare JSON object.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, json_mode: bool)
        -> Result<String, ExternalServiceError>;
}

/// OpenAI-compatible chat completions client.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/chat/completions", config.api_base),
            timeout: config.request_timeout,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        prompt: &str,
        json_mode: bool,
    ) -> Result<String, ExternalServiceError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ExternalServiceError::Status { status, body });
        }

        let raw = resp.text().await?;
        parse_chat_response(&raw)
    }
}

fn parse_chat_response(raw: &str) -> Result<String, ExternalServiceError> {
    let data: ChatResponse = serde_json::from_str(raw)
        .map_err(|e| ExternalServiceError::MalformedResponse(e.to_string()))?;

    data.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ExternalServiceError::MalformedResponse("no message content".into()))
}

/// Ask the model for people, locations, emotions and intent in `memory_text`.
/// The returned insight has an empty `uid`.
pub async fn extract_insights(
    client: &dyn CompletionClient,
    memory_text: &str,
) -> Result<Insight, ExternalServiceError> {
    let prompt = format!("{}\n\nText:\n\"{}\"", INSIGHT_PROMPT, memory_text);
    let content = client.complete(&prompt, true).await?;

    let mut insight: Insight = serde_json::from_str(content.trim()).map_err(|e| {
        ExternalServiceError::MalformedResponse(format!("insight is not the expected JSON: {}", e))
    })?;
    insight.uid.clear();
    Ok(insight)
}

/// One-line summary for the voice app. Not checked against the template.
pub async fn generate_summary(
    client: &dyn CompletionClient,
    insight: &Insight,
    memory_text: &str,
) -> Result<String, ExternalServiceError> {
    let prompt = format!(
        "{}\n\nOriginal conversation:\n\"{}\"\n\nExtracted insights:\n\
         People: {}\nLocations: {}\nEmotions: {}\nSocial intent: {}",
        SUMMARY_PROMPT,
        memory_text,
        json_list(&insight.people),
        json_list(&insight.locations),
        json_list(&insight.emotions),
        insight.social_intent,
    );

    let summary = client.complete(&prompt, false).await?;
    tracing::info!(summary = %summary, "new social intelligence summary");
    Ok(summary)
}

fn json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".into())
}
