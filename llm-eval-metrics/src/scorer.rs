use async_trait::async_trait;
use llm_eval_core::{
    CoreError, MetricDefinition, MetricScorer, NormalizedRequest, Result, ScoredMetric,
};

use crate::judge::JudgeClient;
use crate::prompts;

/// `MetricScorer` implementation backed by an LLM judge. The judge does
/// not see the threshold; pass/fail is applied by the evaluator.
#[derive(Debug, Clone)]
pub struct LlmJudgeScorer {
    client: JudgeClient,
}

impl LlmJudgeScorer {
    pub fn new(client: JudgeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricScorer for LlmJudgeScorer {
    async fn score(
        &self,
        metric: &MetricDefinition,
        request: &NormalizedRequest,
        _threshold: f64,
    ) -> Result<ScoredMetric> {
        let prompt = prompts::prompt_for(metric, request);

        tracing::debug!(metric = %metric.id, model = %self.client.model(), "judging metric");

        let verdict = self
            .client
            .judge(&prompt.system, &prompt.user)
            .await
            .map_err(|err| CoreError::MetricExecution(err.to_string()))?;

        Ok(ScoredMetric {
            score: verdict.score.clamp(0.0, 1.0),
            reason: verdict.reasoning,
        })
    }
}
