use serde::{Deserialize, Serialize};

use crate::catalog::MetricId;
use crate::domain::Mode;

/// Approximate resource cost of running a mode once. Computed from static
/// per-metric weights; documented as an estimate, not a billing contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub mode: Mode,
    pub metrics: Vec<MetricId>,
    #[serde(rename = "estimated_api_calls")]
    pub underlying_call_count: u32,
    pub estimated_tokens: u32,
    #[serde(rename = "estimated_cost_usd")]
    pub estimated_cost: f64,
}
