//! Sequential metric evaluation with partial-failure isolation.

use std::sync::Arc;

use crate::catalog::{metrics_for, MetricDefinition};
use crate::domain::{MetricResult, MetricResults, NormalizedRequest};
use crate::error::Result;
use crate::traits::MetricScorer;

pub const GLOBAL_DEFAULT_THRESHOLD: f64 = 0.5;

pub struct Evaluator {
    scorer: Arc<dyn MetricScorer>,
    default_threshold: f64,
}

impl Evaluator {
    pub fn new(scorer: Arc<dyn MetricScorer>, default_threshold: f64) -> Self {
        Self {
            scorer,
            default_threshold,
        }
    }

    /// Request threshold overrides the metric default, which overrides the
    /// configured global default.
    fn resolve_threshold(&self, metric: &MetricDefinition, request: &NormalizedRequest) -> f64 {
        request
            .threshold
            .or(metric.default_threshold)
            .unwrap_or(self.default_threshold)
    }

    /// Score every metric of the request's mode, one at a time, in the
    /// mode's declared order. A failed underlying call is recorded as a
    /// failed entry and the remaining metrics still run; it never aborts
    /// the whole mode.
    pub async fn evaluate(&self, request: &NormalizedRequest) -> Result<MetricResults> {
        let metrics = metrics_for(request.mode)?;
        let mut results = MetricResults::new();

        for metric in metrics {
            let threshold = self.resolve_threshold(metric, request);
            match self.scorer.score(metric, request, threshold).await {
                Ok(scored) => {
                    let score = scored.score.clamp(0.0, 1.0);
                    let success = if metric.lower_is_better {
                        score <= threshold
                    } else {
                        score >= threshold
                    };
                    tracing::debug!(
                        metric = %metric.id,
                        score,
                        success,
                        "metric scored"
                    );
                    results.push(MetricResult {
                        metric_id: metric.id,
                        score: Some(score),
                        success,
                        reason: scored.reason,
                    });
                }
                Err(err) => {
                    tracing::error!(metric = %metric.id, error = %err, "metric scoring failed");
                    results.push(MetricResult {
                        metric_id: metric.id,
                        score: None,
                        success: false,
                        reason: format!("Evaluation failed: {err}"),
                    });
                }
            }
        }

        Ok(results)
    }
}
