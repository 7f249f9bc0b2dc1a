use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use llm_eval_api::AppState;
use llm_eval_core::{catalog, CostEstimator, Evaluator};
use llm_eval_metrics::{JudgeClient, JudgeConfig, LlmJudgeScorer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "llm_eval_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LLM evaluation gateway");

    // Load configuration
    let config = config::Config::load()?;
    tracing::info!(model = %config.eval_model, "Configuration loaded");

    // The catalog is a startup invariant; refuse to serve if it is broken.
    catalog::verify_integrity()?;
    tracing::info!("Metric catalog verified");

    if config.eval_api_key.is_empty() {
        tracing::warn!("Judge API key is NOT set; scoring calls will fail");
    } else {
        tracing::info!(key = %config.masked_api_key(), "Judge API key is configured");
    }

    // Build the judge-backed scorer and application state
    let judge = JudgeClient::new(JudgeConfig::new(
        config.eval_base_url.as_str(),
        config.eval_api_key.as_str(),
        config.eval_model.as_str(),
    ))?;
    let state = AppState {
        evaluator: Arc::new(Evaluator::new(
            Arc::new(LlmJudgeScorer::new(judge)),
            config.default_threshold,
        )),
        estimator: Arc::new(CostEstimator::new(config.cost_per_1k_tokens)),
    };

    let app = llm_eval_api::routes(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
