//! Gemini-style generate-content binding.
//!
//! The instruction and the image travel together as parts of a single
//! content: a text part followed by an `inline_data` part carrying the
//! base64 payload and its mime type.

use super::{ImagePayload, VisionProvider};
use crate::error::ExtractError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct GenerateContentProvider {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentProvider {
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

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    fn upstream(&self, message: impl Into<String>) -> ExtractError {
        ExtractError::Upstream {
            provider: self.name().to_string(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl VisionProvider for GenerateContentProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn extract_text(
        &self,
        instruction: &str,
        image: &ImagePayload,
    ) -> Result<String, ExtractError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: instruction.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };

        debug!(
            model = %self.model,
            image_bytes = image.data.len(),
            "sending generate-content request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
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

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| self.upstream(format!("unreadable response body: {e}")))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(self.upstream("no candidates returned"));
        }
        Ok(text)
    }
}
