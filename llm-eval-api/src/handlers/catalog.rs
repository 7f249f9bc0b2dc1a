use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use llm_eval_core::{catalog, CostEstimate, MetricId, Mode};
use serde_json::{json, Value};

use crate::dto::{EstimateQuery, ModeInfo, ModesResponse};
use crate::error::ApiResult;
use crate::AppState;

/// List every registered evaluation mode with its metrics and the
/// parameters it requires. The ids here are exactly the set `/evaluate/`
/// accepts.
pub async fn modes() -> ApiResult<Json<ModesResponse>> {
    let mut available_modes = BTreeMap::new();

    for definition in catalog::modes() {
        let required = catalog::required_fields_for(definition.id)?;
        available_modes.insert(
            definition.id.to_string(),
            ModeInfo {
                description: definition.description.to_string(),
                metrics: definition.metric_ids.iter().map(|m| m.to_string()).collect(),
                required_parameters: required.iter().map(|f| f.to_string()).collect(),
            },
        );
    }

    Ok(Json(ModesResponse {
        available_modes,
        default_mode: Mode::default().to_string(),
    }))
}

/// Estimate underlying model calls, tokens, and cost for a mode without
/// running it.
pub async fn estimate(
    State(state): State<AppState>,
    Query(query): Query<EstimateQuery>,
) -> ApiResult<Json<CostEstimate>> {
    let mode = match query.mode.as_deref() {
        Some(raw) => raw.parse::<Mode>()?,
        None => Mode::default(),
    };

    Ok(Json(state.estimator.estimate(mode)?))
}

/// Static documentation of how `/estimate/` numbers are produced and why
/// they are not billing-accurate.
pub async fn token_tracking_info(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let mut token_weights = BTreeMap::new();
    for id in MetricId::ALL {
        let metric = catalog::metric(id)?;
        token_weights.insert(
            id.to_string(),
            json!({
                "underlying_calls": metric.underlying_call_weight,
                "tokens_per_call": metric.token_weight,
            }),
        );
    }

    Ok(Json(json!({
        "methodology": {
            "underlying_call_count": "sum of each metric's underlying call weight for the mode",
            "estimated_tokens": "sum of tokens_per_call x underlying_calls over the mode's metrics",
            "estimated_cost_usd": "estimated_tokens x cost_per_1k_tokens / 1000",
        },
        "per_metric_weights": token_weights,
        "cost_per_1k_tokens": state.estimator.cost_per_1k_tokens(),
        "limitations": [
            "Token weights are static heuristics, not measured usage.",
            "Actual judge prompts vary with input length; no accuracy bound is defined.",
            "Cost scaling is linear and ignores provider-side pricing tiers.",
        ],
    })))
}
