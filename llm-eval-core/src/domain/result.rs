use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::catalog::MetricId;
use crate::domain::Mode;

/// Outcome of scoring one metric. A failed underlying call is recorded
/// with `score: None` and `success: false` rather than aborting the mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricResult {
    pub metric_id: MetricId,
    pub score: Option<f64>,
    pub success: bool,
    pub reason: String,
}

#[derive(Serialize)]
struct MetricResultBody<'a> {
    score: Option<f64>,
    success: bool,
    reason: &'a str,
}

/// Per-metric results in the mode's declared order. Serializes as a JSON
/// object keyed by metric id, preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricResults(Vec<MetricResult>);

impl MetricResults {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, result: MetricResult) {
        self.0.push(result);
    }

    pub fn get(&self, id: MetricId) -> Option<&MetricResult> {
        self.0.iter().find(|r| r.metric_id == id)
    }

    pub fn score_of(&self, id: MetricId) -> Option<f64> {
        self.get(id).and_then(|r| r.score)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricResult> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for MetricResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for result in &self.0 {
            map.serialize_entry(
                result.metric_id.as_str(),
                &MetricResultBody {
                    score: result.score,
                    success: result.success,
                    reason: &result.reason,
                },
            )?;
        }
        map.end()
    }
}

/// The outward response document. Echoes the request, carries the
/// per-metric details, and lifts commonly used scores to top-level keys
/// for backward compatibility with older API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    #[serde(rename = "App Name")]
    pub app_name: String,
    #[serde(rename = "User")]
    pub user: String,
    #[serde(rename = "User Request")]
    pub user_request: String,
    #[serde(rename = "Actual Output")]
    pub actual_output: String,
    #[serde(rename = "Expected Output")]
    pub expected_output: Option<String>,
    #[serde(rename = "Context")]
    pub context: Option<String>,
    #[serde(rename = "Evaluation Mode")]
    pub mode: Mode,
    #[serde(rename = "Answer Relevancy Score", skip_serializing_if = "Option::is_none")]
    pub answer_relevancy_score: Option<f64>,
    #[serde(rename = "Faithfulness Score", skip_serializing_if = "Option::is_none")]
    pub faithfulness_score: Option<f64>,
    #[serde(rename = "Evaluation Details")]
    pub details: MetricResults,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_results() -> MetricResults {
        let mut results = MetricResults::new();
        results.push(MetricResult {
            metric_id: MetricId::Faithfulness,
            score: Some(0.9),
            success: true,
            reason: "grounded".to_string(),
        });
        results.push(MetricResult {
            metric_id: MetricId::AnswerRelevancy,
            score: None,
            success: false,
            reason: "judge call failed".to_string(),
        });
        results
    }

    #[test]
    fn details_serialize_in_insertion_order() {
        let json = serde_json::to_string(&sample_results()).unwrap();
        let faithfulness = json.find("faithfulness").unwrap();
        let relevancy = json.find("answer_relevancy").unwrap();
        assert!(faithfulness < relevancy);
    }

    #[test]
    fn failed_metric_serializes_null_score() {
        let value = serde_json::to_value(sample_results()).unwrap();
        assert_eq!(value["answer_relevancy"]["score"], serde_json::Value::Null);
        assert_eq!(value["answer_relevancy"]["success"], false);
        assert_eq!(value["faithfulness"]["score"], 0.9);
    }

    #[test]
    fn response_uses_outward_key_names() {
        let response = EvaluationResponse {
            app_name: "demo".to_string(),
            user: "alice".to_string(),
            user_request: "q".to_string(),
            actual_output: "a".to_string(),
            expected_output: None,
            context: None,
            mode: Mode::Standard,
            answer_relevancy_score: Some(0.8),
            faithfulness_score: Some(0.9),
            details: sample_results(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["App Name"], "demo");
        assert_eq!(value["Evaluation Mode"], "standard");
        assert_eq!(value["Answer Relevancy Score"], 0.8);
        assert_eq!(value["Faithfulness Score"], 0.9);
        assert!(value["Evaluation Details"].is_object());
    }
}
