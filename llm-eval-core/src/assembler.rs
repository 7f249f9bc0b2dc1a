//! Deterministic merge of a normalized request and its per-metric results
//! into the outward response document.

use crate::catalog::MetricId;
use crate::domain::{EvaluationResponse, MetricResults, NormalizedRequest};

/// Echo the request fields verbatim, attach the ordered details, and lift
/// the answer relevancy and faithfulness scores to their legacy top-level
/// keys when present.
pub fn assemble(request: &NormalizedRequest, details: MetricResults) -> EvaluationResponse {
    EvaluationResponse {
        app_name: request.app_name.clone(),
        user: request.user.clone(),
        user_request: request.user_request.clone(),
        actual_output: request.app_actual_response.clone(),
        expected_output: request.expected_response.clone(),
        context: request.context.clone(),
        mode: request.mode,
        answer_relevancy_score: details.score_of(MetricId::AnswerRelevancy),
        faithfulness_score: details.score_of(MetricId::Faithfulness),
        details,
    }
}
