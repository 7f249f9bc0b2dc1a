use async_trait::async_trait;

use crate::catalog::MetricDefinition;
use crate::domain::NormalizedRequest;
use crate::error::Result;

/// Raw outcome of one underlying scoring call, before the evaluator
/// applies the threshold direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMetric {
    pub score: f64,
    pub reason: String,
}

/// Boundary to the external model-backed scoring collaborator. One call
/// scores one metric against one request.
#[async_trait]
pub trait MetricScorer: Send + Sync {
    async fn score(
        &self,
        metric: &MetricDefinition,
        request: &NormalizedRequest,
        threshold: f64,
    ) -> Result<ScoredMetric>;
}
