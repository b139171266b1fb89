//! Chat-completion client for Azure OpenAI deployments

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use crate::config::ModelEndpoint;
use crate::error::ModelError;

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Structured output contract attached to a request
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject,
    JsonSchema { json_schema: JsonValue },
}

impl ResponseFormat {
    /// Constrain output to `schema`, named after the document it describes
    pub fn schema_hint(name: &str, schema: JsonValue) -> Self {
        ResponseFormat::JsonSchema {
            json_schema: json!({ "name": name, "schema": schema, "strict": false }),
        }
    }
}

/// Request body for the chat completions API
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

/// Anything that can complete a chat request and hand back the assistant's
/// message content.
pub trait ChatTransport: Send + Sync {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<String, ModelError>> + Send;
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error detail from the chat completions API
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for one Azure OpenAI chat deployment
#[derive(Clone)]
pub struct AzureChatClient {
    http: reqwest::Client,
    endpoint: ModelEndpoint,
}

impl AzureChatClient {
    pub fn new(endpoint: ModelEndpoint) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=…`
    pub fn completions_url(&self) -> Result<reqwest::Url, ModelError> {
        let path = format!(
            "openai/deployments/{}/chat/completions",
            self.endpoint.deployment
        );
        let mut url = self
            .endpoint
            .endpoint
            .join(&path)
            .map_err(|e| ModelError::Configuration(format!("Invalid endpoint URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.endpoint.api_version);
        Ok(url)
    }
}

impl ChatTransport for AzureChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
        let url = self.completions_url()?;

        let response = self
            .http
            .post(url)
            .header("api-key", &self.endpoint.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        map_response(status, &body)
    }
}

/// Turn an HTTP status and body into the assistant's message content.
///
/// Non-2xx statuses become `Status`, carrying the API's error message when
/// the body has one. A 2xx with no body or no content is `EmptyResponse`.
fn map_response(status: u16, body: &str) -> Result<String, ModelError> {
    if !(200..300).contains(&status) {
        let body = match serde_json::from_str::<ApiError>(body) {
            Ok(api_err) => api_err.error.message,
            Err(_) => body.to_string(),
        };
        return Err(ModelError::Status { status, body });
    }

    if body.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }

    let parsed: ApiResponse = serde_json::from_str(body)
        .map_err(|e| ModelError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ModelError::EmptyResponse)
}
