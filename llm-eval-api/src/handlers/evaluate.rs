use axum::extract::State;
use axum::Json;
use llm_eval_core::{assemble, EvaluationResponse};
use validator::Validate;

use crate::dto::EvaluateRequest;
use crate::error::ApiResult;
use crate::AppState;

/// Evaluate an LLM response with the metrics of the requested mode.
/// Validation failures are 400s; a single metric failure is surfaced in
/// its detail entry and never fails the request.
pub async fn evaluate(
    State(state): State<AppState>,
    Json(payload): Json<EvaluateRequest>,
) -> ApiResult<Json<EvaluationResponse>> {
    payload.validate()?;

    let request = payload.into_domain()?;
    tracing::info!(
        app_name = %request.app_name,
        mode = %request.mode,
        "received evaluation request"
    );

    let normalized = llm_eval_core::validator::validate(&request)?;
    let results = state.evaluator.evaluate(&normalized).await?;

    Ok(Json(assemble(&normalized, results)))
}
