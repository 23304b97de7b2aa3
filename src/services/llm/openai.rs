use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CompletionRequest, GenerationError, StructuredCompletion};
use crate::config::LlmConfig;

const LLM_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    refusal: Option<String>,
}

/// Chat-completions client using `json_schema` response formats.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Self {
        if config.api_key.is_none() {
            warn!("OPENAI_API_KEY not set, trip generation will fail");
        }

        Self {
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StructuredCompletion for OpenAiClient {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system",
                    content: request.system,
                },
                WireMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: request.schema_name,
                    strict: true,
                    schema: request.schema,
                },
            },
        };

        debug!("OpenAI structured request with model {}", self.model);

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(LLM_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::Api { status, body });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        parse_choice(chat)
    }
}

fn parse_choice(chat: ChatResponse) -> Result<serde_json::Value, GenerationError> {
    let message = chat
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| GenerationError::MalformedResponse("No choices returned".to_string()))?;

    if let Some(refusal) = message.refusal {
        return Err(GenerationError::MalformedResponse(format!(
            "Model refused: {}",
            refusal
        )));
    }

    let content = message
        .content
        .ok_or_else(|| GenerationError::MalformedResponse("Empty message content".to_string()))?;

    serde_json::from_str(&content).map_err(|e| GenerationError::MalformedResponse(e.to_string()))
}
