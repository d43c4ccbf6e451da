//! OpenAI-style chat-completions binding (OpenRouter by default).
//!
//! The instruction travels as a system message; the image as a `data:` URL
//! inside the user message's content-parts array, which is how
//! OpenAI-compatible gateways accept inline images.

use super::{ImagePayload, VisionProvider};
use crate::error::ExtractError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct ChatCompletionsProvider {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

impl ChatCompletionsProvider {
    pub fn new(
        api_base: String,
        api_key: String,
        model: String,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        // No explicit timeout: the transport default is the only bound on
        // the single outbound call.
        Self {
            api_base,
            api_key,
            model,
            temperature,
            max_tokens,
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }

    fn upstream(&self, message: impl Into<String>) -> ExtractError {
        ExtractError::Upstream {
            provider: self.name().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl VisionProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn extract_text(
        &self,
        instruction: &str,
        image: &ImagePayload,
    ) -> Result<String, ExtractError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text(instruction),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_url(),
                        },
                    }]),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            model = %self.model,
            image_bytes = image.data.len(),
            "sending chat-completions request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.upstream(format!("status {status}: {error_text}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.upstream(format!("unreadable response body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| self.upstream("no completion choices returned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> ChatCompletionsProvider {
        ChatCompletionsProvider::new(
            "https://openrouter.ai/api/v1".into(),
            "sk-test".into(),
            "openai/gpt-oss-20b".into(),
            0.2,
            1024,
        )
    }

    #[test]
    fn url_joins_without_double_slash() {
        let p = ChatCompletionsProvider::new(
            "http://localhost:9999/v1/".into(),
            "k".into(),
            "m".into(),
            0.0,
            16,
        );
        assert_eq!(p.completions_url(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn request_body_uses_content_parts_for_the_image() {
        let image = ImagePayload::new("aGVsbG8=", "image/jpeg");
        let body = ChatRequest {
            model: "openai/gpt-oss-20b",
            messages: vec![
                Message {
                    role: "system",
                    content: MessageContent::Text("extract fields"),
                },
                Message {
                    role: "user",
                    content: MessageContent::Parts(vec![ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_url(),
                        },
                    }]),
                },
            ],
            temperature: 0.2,
            max_tokens: 1024,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["messages"][0]["role"], json!("system"));
        assert_eq!(v["messages"][0]["content"], json!("extract fields"));
        assert_eq!(v["messages"][1]["content"][0]["type"], json!("image_url"));
        assert_eq!(
            v["messages"][1]["content"][0]["image_url"]["url"],
            json!("data:image/jpeg;base64,aGVsbG8=")
        );
        assert_eq!(v["max_tokens"], json!(1024));
    }

    #[test]
    fn response_body_parses_first_choice() {
        let parsed: ChatResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"a\":1}"},
                 "finish_reason": "stop"}
            ]
        }))
        .unwrap();
        assert_eq!(parsed.choices[0].message.content, "{\"a\":1}");
    }

    #[test]
    fn provider_reports_name() {
        assert_eq!(provider().name(), "openrouter");
    }
}
