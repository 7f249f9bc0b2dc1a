//! Static cost estimation for a mode, independent of the evaluate path.

use crate::catalog::metrics_for;
use crate::domain::{CostEstimate, Mode};
use crate::error::Result;

pub const DEFAULT_COST_PER_1K_TOKENS: f64 = 0.0015;

/// Estimates underlying model calls, tokens, and dollar cost for a mode
/// from the catalog's static per-metric weights. Linear scaling only;
/// intentionally approximate.
#[derive(Debug, Clone)]
pub struct CostEstimator {
    cost_per_1k_tokens: f64,
}

impl CostEstimator {
    pub fn new(cost_per_1k_tokens: f64) -> Self {
        Self { cost_per_1k_tokens }
    }

    pub fn cost_per_1k_tokens(&self) -> f64 {
        self.cost_per_1k_tokens
    }

    pub fn estimate(&self, mode: Mode) -> Result<CostEstimate> {
        let metrics = metrics_for(mode)?;

        let underlying_call_count: u32 =
            metrics.iter().map(|m| m.underlying_call_weight).sum();
        let estimated_tokens: u32 = metrics
            .iter()
            .map(|m| m.token_weight * m.underlying_call_weight)
            .sum();
        let estimated_cost =
            round4(f64::from(estimated_tokens) * self.cost_per_1k_tokens / 1000.0);

        Ok(CostEstimate {
            mode,
            metrics: metrics.iter().map(|m| m.id).collect(),
            underlying_call_count,
            estimated_tokens,
            estimated_cost,
        })
    }
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_COST_PER_1K_TOKENS)
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn call_count_is_monotonic_with_metric_count() {
        let estimator = CostEstimator::default();
        let quick = estimator.estimate(Mode::Quick).unwrap();
        let standard = estimator.estimate(Mode::Standard).unwrap();
        let complete = estimator.estimate(Mode::Complete).unwrap();
        assert!(quick.underlying_call_count <= standard.underlying_call_count);
        assert!(standard.underlying_call_count <= complete.underlying_call_count);
    }

    #[test]
    fn cost_scales_linearly_with_token_price() {
        let cheap = CostEstimator::new(0.001).estimate(Mode::Standard).unwrap();
        let pricey = CostEstimator::new(0.002).estimate(Mode::Standard).unwrap();
        assert_eq!(cheap.estimated_tokens, pricey.estimated_tokens);
        assert!((pricey.estimated_cost - 2.0 * cheap.estimated_cost).abs() < 1e-9);
    }

    #[test]
    fn estimate_lists_the_mode_metrics_in_order() {
        let estimate = CostEstimator::default().estimate(Mode::Safety).unwrap();
        let ids: Vec<&str> = estimate.metrics.iter().map(|m| m.as_str()).collect();
        assert_eq!(ids, vec!["bias", "toxicity"]);
    }

    #[test]
    fn cost_is_rounded_to_four_decimals() {
        let estimate = CostEstimator::default().estimate(Mode::Complete).unwrap();
        let scaled = estimate.estimated_cost * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-9);
    }
}
