//! Vision-model providers.
//!
//! A provider is one capability: given an instruction and an image, return
//! the model's text. Two bindings exist behind the [`VisionProvider`] trait —
//! an OpenAI-style chat-completions endpoint and a Gemini-style
//! generate-content endpoint — selected by [`ProviderKind`] in the config.
//! The pipeline holds an `Arc<dyn VisionProvider>` and never learns which
//! wire format carried the call.
//!
//! Each invocation is exactly one outbound request: no retry, and no
//! application-level timeout beyond what the HTTP transport applies by
//! default. Low-volume interactive use tolerates this; a throughput-bound
//! deployment would want both.

mod chat_completions;
mod generate_content;

pub use chat_completions::ChatCompletionsProvider;
pub use generate_content::GenerateContentProvider;

use crate::config::{ExtractionConfig, ProviderKind};
use crate::error::ExtractError;
use async_trait::async_trait;
use std::sync::Arc;

/// A base64-encoded image together with its mime type, as received from the
/// caller and as embedded into provider request bodies.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Base64-encoded image bytes.
    pub data: String,
    /// Mime type, e.g. `image/jpeg`. Always starts with `image/` by the time
    /// a provider sees it.
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Render as a `data:` URL for chat-completions content parts.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The single external capability the pipeline depends on.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Short provider name for logs and error messages.
    fn name(&self) -> &str;

    /// Submit the instruction and image, return the model's text verbatim.
    async fn extract_text(
        &self,
        instruction: &str,
        image: &ImagePayload,
    ) -> Result<String, ExtractError>;
}

/// Build the provider the config selects.
///
/// Fails with [`ExtractError::ProviderNotConfigured`] when the API key is
/// missing; the hint names the environment variable the server binary reads.
pub fn provider_from_config(
    config: &ExtractionConfig,
) -> Result<Arc<dyn VisionProvider>, ExtractError> {
    let api_key = config.api_key.clone().filter(|k| !k.is_empty()).ok_or_else(|| {
        ExtractError::ProviderNotConfigured {
            provider: config.provider.to_string(),
            hint: format!(
                "Set {} or pass an API key in the configuration.",
                config.provider.api_key_env()
            ),
        }
    })?;

    let provider: Arc<dyn VisionProvider> = match config.provider {
        ProviderKind::OpenRouter => Arc::new(ChatCompletionsProvider::new(
            config.resolved_api_base().to_string(),
            api_key,
            config.resolved_model().to_string(),
            config.temperature,
            config.max_tokens,
        )),
        ProviderKind::Gemini => Arc::new(GenerateContentProvider::new(
            config.resolved_api_base().to_string(),
            api_key,
            config.resolved_model().to_string(),
            config.temperature,
            config.max_tokens,
        )),
    };
    Ok(provider)
}
