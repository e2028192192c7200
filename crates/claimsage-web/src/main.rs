//! Claimsage web server.
//!
//! Run with: cargo run -p claimsage-web

use std::sync::Arc;
use std::time::Duration;

use claimsage_corpus::PatentCorpus;
use claimsage_llm::{AnswerSynthesizer, GroqBackend, ModelChain};
use claimsage_web::config::Config;
use claimsage_web::router::build_router;
use claimsage_web::state::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let corpus = match PatentCorpus::load(&config.corpus.path) {
        Ok(corpus) => corpus,
        Err(err) => {
            warn!(path = %config.corpus.path, %err, "no corpus loaded, starting empty");
            PatentCorpus::empty()
        }
    };

    let backend = Arc::new(GroqBackend::new(
        &config.llm.base_url,
        config.api_key()?,
        Duration::from_secs(config.llm.timeout_secs),
    ));
    let synthesizer = AnswerSynthesizer::new(backend, ModelChain::new(config.llm.models()))
        .with_temperature(config.llm.temperature)
        .with_max_tokens(config.llm.max_tokens);

    let state = AppState::new(corpus, synthesizer);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(%addr, "claimsage listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
