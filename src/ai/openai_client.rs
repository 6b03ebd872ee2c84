// OpenAI-compatible chat-completion client
//
// One POST per call, bearer auth, no retry. The response mode decides whether
// the provider is asked for a JSON object (structured output) or plain text.

use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Message we author ourselves. Caller-supplied turns stay as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String, // "system", "user" or "assistant"
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl From<Message> for Value {
    fn from(message: Message) -> Self {
        json!({ "role": message.role, "content": message.content })
    }
}

/// How the provider should shape the completion text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Free conversational text.
    Text,
    /// Content is forced to be a syntactically valid JSON object.
    JsonObject,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Request to the chat-completion endpoint
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

/// Response from the chat-completion endpoint. Every level may be missing.
#[derive(Debug, Default, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Error)]
pub enum LlmError {
    /// The request never produced an HTTP response.
    #[error("failed to reach provider: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}")]
    Upstream { status: StatusCode, body: String },

    /// The provider answered 2xx but the body is not a completion envelope.
    #[error("provider returned a malformed completion")]
    Malformed { raw: String },
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    api_url: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// Create a client for the given credential, endpoint and model
    pub fn new(api_key: String, api_url: String, model: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("livemix/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_key,
            api_url,
            model,
            client,
        })
    }

    /// Send one completion request and return the first choice's content,
    /// if the provider produced any.
    pub async fn complete(
        &self,
        messages: &[Value],
        mode: ResponseMode,
    ) -> Result<Option<String>, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            response_format: match mode {
                ResponseMode::JsonObject => Some(ResponseFormat {
                    format_type: "json_object",
                }),
                ResponseMode::Text => None,
            },
        };

        info!(
            model = %self.model,
            messages = messages.len(),
            mode = ?mode,
            "calling provider"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "provider request failed");
                LlmError::Transport(e)
            })?;

        let status = response.status();
        let raw = response.text().await.map_err(LlmError::Transport)?;
        info!(status = status.as_u16(), bytes = raw.len(), "provider responded");

        if !status.is_success() {
            return Err(LlmError::Upstream { status, body: raw });
        }

        let completion: CompletionResponse =
            serde_json::from_str(&raw).map_err(|e| {
                debug!(error = %e, "completion envelope did not parse");
                LlmError::Malformed { raw: raw.clone() }
            })?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_mode_sets_response_format() {
        let messages: Vec<Value> = vec![Message::user("hi").into()];
        let request = CompletionRequest {
            model: "gpt-5.1",
            messages: &messages,
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"], json!({ "type": "json_object" }));
        assert_eq!(value["messages"][0], json!({ "role": "user", "content": "hi" }));
    }

    #[test]
    fn test_authored_message_converts_to_plain_turn() {
        let value: Value = Message::system("be brief").into();
        assert_eq!(value, json!({ "role": "system", "content": "be brief" }));
    }

    #[test]
    fn test_text_mode_omits_response_format() {
        let request = CompletionRequest {
            model: "gpt-5.1",
            messages: &[],
            response_format: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn test_completion_tolerates_missing_content() {
        let parsed: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(parsed.choices[0].message.as_ref().unwrap().content.is_none());

        let empty: CompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.choices.is_empty());
    }
}
