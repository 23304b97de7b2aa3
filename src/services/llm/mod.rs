//! Structured completions: a prompt goes in, a JSON object matching a schema
//! comes out.

pub mod openai;
pub mod schema;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt;

pub use openai::OpenAiClient;

#[derive(Debug)]
pub enum GenerationError {
    MissingCredential,
    Request(reqwest::Error),
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    MalformedResponse(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::MissingCredential => write!(f, "OpenAI API Key not configured"),
            GenerationError::Request(err) => write!(f, "LLM request failed: {}", err),
            GenerationError::Api { status, body } => {
                write!(f, "LLM API error ({}): {}", status, body)
            }
            GenerationError::MalformedResponse(msg) => {
                write!(f, "LLM response could not be parsed: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err)
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub schema_name: String,
    pub schema: serde_json::Value,
}

#[async_trait]
pub trait StructuredCompletion: Send + Sync {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<serde_json::Value, GenerationError>;
}

/// Requests an object shaped like `T` and decodes it.
pub async fn complete_as<T>(
    llm: &dyn StructuredCompletion,
    system: &str,
    prompt: &str,
) -> Result<T, GenerationError>
where
    T: JsonSchema + DeserializeOwned,
{
    let request = CompletionRequest {
        system: system.to_string(),
        prompt: prompt.to_string(),
        schema_name: <T as JsonSchema>::schema_name(),
        schema: schema::structured_schema::<T>(),
    };

    let value = llm.complete(request).await?;
    serde_json::from_value(value).map_err(|e| GenerationError::MalformedResponse(e.to_string()))
}
