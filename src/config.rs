//! Configuration for the extraction pipeline.
//!
//! Everything an extraction needs beyond the request itself lives in
//! [`ExtractionConfig`], built via its builder. Setters clamp obviously
//! out-of-range numeric values; `build()` rejects combinations that cannot
//! work at all.

use crate::error::ExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which provider binding carries the model call.
///
/// The two bindings are the same capability behind different wire formats:
/// an OpenAI-style `/chat/completions` endpoint and a Gemini-style
/// `:generateContent` endpoint. The pipeline never sees the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions (OpenRouter by default).
    #[default]
    OpenRouter,
    /// Google Gemini multimodal generation.
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Model used when the config does not name one.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "openai/gpt-oss-20b",
            ProviderKind::Gemini => "gemini-2.0-flash-exp",
        }
    }

    /// API base used when the config does not name one.
    pub fn default_api_base(&self) -> &'static str {
        match self {
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openrouter" | "openai" | "chat_completions" => Ok(ProviderKind::OpenRouter),
            "gemini" | "generate_content" => Ok(ProviderKind::Gemini),
            other => Err(format!(
                "unknown provider '{other}' (expected 'openrouter' or 'gemini')"
            )),
        }
    }
}

/// Configuration for one extraction pipeline instance.
///
/// # Example
/// ```rust
/// use cardscan::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .api_key("sk-...")
///     .model("openai/gpt-4o-mini")
///     .temperature(0.0)
///     .build()
///     .unwrap();
/// # let _ = config;
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Which provider binding to use. Default: OpenRouter.
    pub provider: ProviderKind,

    /// API key for the provider. Required before any call is made; the
    /// factory rejects a missing key with a hint naming the env var.
    pub api_key: Option<String>,

    /// Override the provider's API base URL (self-hosted gateways, tests).
    pub api_base: Option<String>,

    /// Model identifier. If None, the provider default applies.
    pub model: Option<String>,

    /// Sampling temperature. Default: 0.2 — low enough that the model
    /// transcribes what it sees instead of inventing plausible fields.
    pub temperature: f32,

    /// Maximum tokens the model may generate. Default: 1024; the largest
    /// target schema serialises well under that.
    pub max_tokens: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            api_base: None,
            model: None,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

impl ExtractionConfig {
    /// Create a new builder.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }

    /// The model this config resolves to.
    pub fn resolved_model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// The API base this config resolves to.
    pub fn resolved_api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.provider.default_api_base())
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn provider(mut self, kind: ProviderKind) -> Self {
        self.config.provider = kind;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = Some(base.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(ExtractError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if let Some(base) = &c.api_base {
            if !base.starts_with("http://") && !base.starts_with("https://") {
                return Err(ExtractError::InvalidConfig(format!(
                    "api_base must be an HTTP(S) URL, got '{base}'"
                )));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_openrouter() {
        let c = ExtractionConfig::default();
        assert_eq!(c.provider, ProviderKind::OpenRouter);
        assert_eq!(c.resolved_model(), "openai/gpt-oss-20b");
        assert!(c.resolved_api_base().contains("openrouter.ai"));
        assert_eq!(c.max_tokens, 1024);
    }

    #[test]
    fn gemini_defaults() {
        let c = ExtractionConfig::builder()
            .provider(ProviderKind::Gemini)
            .build()
            .unwrap();
        assert_eq!(c.resolved_model(), "gemini-2.0-flash-exp");
        assert!(c.resolved_api_base().contains("generativelanguage"));
    }

    #[test]
    fn temperature_is_clamped() {
        let c = ExtractionConfig::builder().temperature(9.0).build().unwrap();
        assert_eq!(c.temperature, 2.0);
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let err = ExtractionConfig::builder().max_tokens(0).build();
        assert!(matches!(err, Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn non_http_api_base_is_rejected() {
        let err = ExtractionConfig::builder().api_base("ftp://nope").build();
        assert!(matches!(err, Err(ExtractError::InvalidConfig(_))));
    }

    #[test]
    fn provider_kind_parses_aliases() {
        assert_eq!(
            "openrouter".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenRouter
        );
        assert_eq!(
            "GEMINI".parse::<ProviderKind>().unwrap(),
            ProviderKind::Gemini
        );
        assert!("palm".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn model_override_wins() {
        let c = ExtractionConfig::builder()
            .model("google/gemini-flash-1.5")
            .build()
            .unwrap();
        assert_eq!(c.resolved_model(), "google/gemini-flash-1.5");
    }
}
