//! Server binary for cardscan.
//!
//! A thin shim over the library crate: maps CLI flags and environment
//! variables to an `ExtractionConfig`, builds the provider, and serves the
//! axum router.

use anyhow::{Context, Result};
use cardscan::{provider_from_config, AppState, ExtractionConfig, ProviderKind};
use clap::Parser;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "cardscan",
    version,
    about = "Identity-document field extraction over HTTP, backed by a vision language model"
)]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0", env = "CARDSCAN_HOST")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8102, env = "CARDSCAN_PORT")]
    port: u16,

    /// Provider binding: openrouter or gemini.
    #[arg(long, default_value = "openrouter", env = "CARDSCAN_PROVIDER")]
    provider: ProviderKind,

    /// Model identifier; the provider default applies when omitted.
    #[arg(long, env = "CARDSCAN_MODEL")]
    model: Option<String>,

    /// API key. Falls back to the provider's own env var
    /// (OPENROUTER_API_KEY or GEMINI_API_KEY).
    #[arg(long, env = "CARDSCAN_API_KEY")]
    api_key: Option<String>,

    /// Override the provider API base URL.
    #[arg(long, env = "CARDSCAN_API_BASE")]
    api_base: Option<String>,

    /// Comma-separated list of allowed CORS origins. Allows any origin when
    /// omitted.
    #[arg(long, env = "CARDSCAN_ALLOWED_ORIGINS", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.2)]
    temperature: f32,

    /// Maximum tokens the model may generate.
    #[arg(long, default_value_t = 1024)]
    max_tokens: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let api_key = args
        .api_key
        .or_else(|| std::env::var(args.provider.api_key_env()).ok());

    let mut builder = ExtractionConfig::builder()
        .provider(args.provider)
        .temperature(args.temperature)
        .max_tokens(args.max_tokens);
    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    if let Some(model) = args.model {
        builder = builder.model(model);
    }
    if let Some(base) = args.api_base {
        builder = builder.api_base(base);
    }
    let config = builder.build()?;

    let provider = provider_from_config(&config)?;
    info!(
        provider = %config.provider,
        model = config.resolved_model(),
        "provider configured"
    );

    let app = cardscan::router(AppState::new(provider), &args.allowed_origins);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", args.host, args.port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
