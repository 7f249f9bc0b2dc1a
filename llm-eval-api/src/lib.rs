pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use llm_eval_core::{CostEstimator, Evaluator};

#[derive(Clone)]
pub struct AppState {
    pub evaluator: Arc<Evaluator>,
    pub estimator: Arc<CostEstimator>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/evaluate/", post(handlers::evaluate::evaluate))
        .route("/modes/", get(handlers::catalog::modes))
        .route("/estimate/", get(handlers::catalog::estimate))
        .route(
            "/token-tracking-info/",
            get(handlers::catalog::token_tracking_info),
        )
        .route("/health", get(handlers::health::health))
        .with_state(state)
}
