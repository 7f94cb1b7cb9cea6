mod config;
mod evaluator;
mod llm_client;
mod models;
mod notifier;
mod scheduler;
mod search;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::evaluator::Evaluator;
use crate::llm_client::LlmClient;
use crate::notifier::Notifier;
use crate::scheduler::Scheduler;
use crate::search::SearchClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (exits listing every missing variable)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job search agent v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Profile: {} / {} / {} (minimum match score {:.2})",
        config.preferences.job_title,
        config.preferences.experience_level,
        config.preferences.location,
        config.preferences.minimum_match_score
    );

    let search = SearchClient::new(config.tavily_api_key.clone());

    let llm = LlmClient::new(config.llm_api_key.clone(), config.llm_api_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let evaluator = Evaluator::new(llm);

    let notifier = Notifier::new(
        config.gmail_user.clone(),
        config.gmail_app_password.clone(),
    )?;
    info!("Mail transport initialized for {}", config.gmail_user);

    Scheduler::new(search, evaluator, notifier, config).run().await;

    Ok(())
}
