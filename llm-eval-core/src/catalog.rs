//! Static metric catalog and mode registry.
//!
//! Both tables are immutable lookup structures built once at process start
//! and exposed only through read accessors. `verify_integrity` must pass
//! before the server accepts traffic; a violation here is a programming
//! error, not a runtime condition.

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::Mode;
use crate::error::{CoreError, Result};

/// Identifier of a single quality/safety dimension scored in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    AnswerRelevancy,
    Faithfulness,
    Hallucination,
    ContextualRelevancy,
    ContextualPrecision,
    ContextualRecall,
    Bias,
    Toxicity,
}

impl MetricId {
    pub const ALL: [MetricId; 8] = [
        MetricId::AnswerRelevancy,
        MetricId::Faithfulness,
        MetricId::Hallucination,
        MetricId::ContextualRelevancy,
        MetricId::ContextualPrecision,
        MetricId::ContextualRecall,
        MetricId::Bias,
        MetricId::Toxicity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::AnswerRelevancy => "answer_relevancy",
            MetricId::Faithfulness => "faithfulness",
            MetricId::Hallucination => "hallucination",
            MetricId::ContextualRelevancy => "contextual_relevancy",
            MetricId::ContextualPrecision => "contextual_precision",
            MetricId::ContextualRecall => "contextual_recall",
            MetricId::Bias => "bias",
            MetricId::Toxicity => "toxicity",
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request fields a metric may consume. Variant order is the order fields
/// are reported in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    UserRequest,
    AppActualResponse,
    ExpectedResponse,
    Context,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::UserRequest => "user_request",
            RequestField::AppActualResponse => "app_actual_response",
            RequestField::ExpectedResponse => "expected_response",
            RequestField::Context => "context",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability descriptor for one metric: which fields it needs, which it
/// can use opportunistically, and its static cost weights.
#[derive(Debug, Clone)]
pub struct MetricDefinition {
    pub id: MetricId,
    pub display_name: &'static str,
    pub required_fields: &'static [RequestField],
    pub optional_fields: &'static [RequestField],
    /// Underlying model calls per evaluation of this metric.
    pub underlying_call_weight: u32,
    /// Approximate tokens consumed per underlying call.
    pub token_weight: u32,
    pub default_threshold: Option<f64>,
    pub lower_is_better: bool,
}

#[derive(Debug, Clone)]
pub struct ModeDefinition {
    pub id: Mode,
    /// Order matters: metrics are evaluated and displayed in this order.
    pub metric_ids: &'static [MetricId],
    pub description: &'static str,
}

/// Fields every mode requires regardless of its metric set.
pub const BASE_REQUIRED_FIELDS: [RequestField; 2] =
    [RequestField::UserRequest, RequestField::AppActualResponse];

static METRICS: Lazy<Vec<MetricDefinition>> = Lazy::new(|| {
    vec![
        MetricDefinition {
            id: MetricId::AnswerRelevancy,
            display_name: "Answer Relevancy",
            required_fields: &[RequestField::UserRequest, RequestField::AppActualResponse],
            optional_fields: &[],
            underlying_call_weight: 1,
            token_weight: 700,
            default_threshold: Some(0.5),
            lower_is_better: false,
        },
        MetricDefinition {
            id: MetricId::Faithfulness,
            display_name: "Faithfulness",
            required_fields: &[RequestField::UserRequest, RequestField::AppActualResponse],
            optional_fields: &[RequestField::ExpectedResponse, RequestField::Context],
            underlying_call_weight: 1,
            token_weight: 800,
            default_threshold: Some(0.5),
            lower_is_better: false,
        },
        MetricDefinition {
            id: MetricId::Hallucination,
            display_name: "Hallucination",
            required_fields: &[RequestField::UserRequest, RequestField::AppActualResponse],
            optional_fields: &[RequestField::Context],
            underlying_call_weight: 1,
            token_weight: 800,
            default_threshold: Some(0.5),
            lower_is_better: true,
        },
        MetricDefinition {
            id: MetricId::ContextualRelevancy,
            display_name: "Contextual Relevancy",
            required_fields: &[
                RequestField::UserRequest,
                RequestField::AppActualResponse,
                RequestField::Context,
            ],
            optional_fields: &[],
            underlying_call_weight: 1,
            token_weight: 850,
            default_threshold: Some(0.5),
            lower_is_better: false,
        },
        MetricDefinition {
            id: MetricId::ContextualPrecision,
            display_name: "Contextual Precision",
            required_fields: &[
                RequestField::UserRequest,
                RequestField::AppActualResponse,
                RequestField::Context,
            ],
            optional_fields: &[RequestField::ExpectedResponse],
            underlying_call_weight: 1,
            token_weight: 900,
            default_threshold: Some(0.5),
            lower_is_better: false,
        },
        MetricDefinition {
            id: MetricId::ContextualRecall,
            display_name: "Contextual Recall",
            required_fields: &[
                RequestField::UserRequest,
                RequestField::AppActualResponse,
                RequestField::Context,
            ],
            optional_fields: &[RequestField::ExpectedResponse],
            underlying_call_weight: 1,
            token_weight: 900,
            default_threshold: Some(0.5),
            lower_is_better: false,
        },
        MetricDefinition {
            id: MetricId::Bias,
            display_name: "Bias",
            required_fields: &[RequestField::UserRequest, RequestField::AppActualResponse],
            optional_fields: &[],
            underlying_call_weight: 1,
            token_weight: 600,
            default_threshold: Some(0.5),
            lower_is_better: true,
        },
        MetricDefinition {
            id: MetricId::Toxicity,
            display_name: "Toxicity",
            required_fields: &[RequestField::UserRequest, RequestField::AppActualResponse],
            optional_fields: &[],
            underlying_call_weight: 1,
            token_weight: 600,
            default_threshold: Some(0.5),
            lower_is_better: true,
        },
    ]
});

static MODES: Lazy<Vec<ModeDefinition>> = Lazy::new(|| {
    vec![
        ModeDefinition {
            id: Mode::Quick,
            metric_ids: &[MetricId::AnswerRelevancy],
            description: "Minimal, fast evaluation when you just need basic quality assessment",
        },
        ModeDefinition {
            id: Mode::Standard,
            metric_ids: &[MetricId::AnswerRelevancy, MetricId::Faithfulness],
            description: "Balanced evaluation for general LLM responses without context",
        },
        ModeDefinition {
            id: Mode::Rag,
            metric_ids: &[
                MetricId::ContextualRelevancy,
                MetricId::Faithfulness,
                MetricId::Hallucination,
            ],
            description: "Evaluate retrieval-augmented generation systems",
        },
        ModeDefinition {
            id: Mode::Agent,
            metric_ids: &[
                MetricId::AnswerRelevancy,
                MetricId::Faithfulness,
                MetricId::Hallucination,
            ],
            description: "Evaluate agentic systems that may use tools or reasoning",
        },
        ModeDefinition {
            id: Mode::Complete,
            metric_ids: &[
                MetricId::AnswerRelevancy,
                MetricId::Faithfulness,
                MetricId::Hallucination,
                MetricId::ContextualRelevancy,
                MetricId::ContextualPrecision,
                MetricId::ContextualRecall,
                MetricId::Bias,
                MetricId::Toxicity,
            ],
            description: "Comprehensive evaluation using all available metrics",
        },
        ModeDefinition {
            id: Mode::Safety,
            metric_ids: &[MetricId::Bias, MetricId::Toxicity],
            description: "Evaluate content for harmful or biased language",
        },
    ]
});

/// Look up a metric definition by id.
pub fn metric(id: MetricId) -> Result<&'static MetricDefinition> {
    METRICS.iter().find(|m| m.id == id).ok_or_else(|| {
        CoreError::CatalogIntegrity(format!("metric '{id}' is not registered in the catalog"))
    })
}

/// Look up a mode definition.
pub fn mode(id: Mode) -> Result<&'static ModeDefinition> {
    MODES.iter().find(|m| m.id == id).ok_or_else(|| {
        CoreError::CatalogIntegrity(format!("mode '{id}' is not registered in the registry"))
    })
}

/// All registered mode definitions, in registration order.
pub fn modes() -> &'static [ModeDefinition] {
    MODES.as_slice()
}

/// The mode's metric definitions, in evaluation/display order.
pub fn metrics_for(id: Mode) -> Result<Vec<&'static MetricDefinition>> {
    mode(id)?.metric_ids.iter().map(|&m| metric(m)).collect()
}

/// Union of required fields over the mode's metrics, plus the base fields
/// every mode requires. Deterministic and independent of request content.
pub fn required_fields_for(id: Mode) -> Result<BTreeSet<RequestField>> {
    let mut fields: BTreeSet<RequestField> = BASE_REQUIRED_FIELDS.into_iter().collect();
    for metric in metrics_for(id)? {
        fields.extend(metric.required_fields.iter().copied());
    }
    Ok(fields)
}

/// Startup gate: every mode must reference only registered metrics, with no
/// duplicates, and every metric's weights must be sane. The process must not
/// serve traffic if this fails.
pub fn verify_integrity() -> Result<()> {
    for metric in METRICS.iter() {
        if metric.underlying_call_weight < 1 {
            return Err(CoreError::CatalogIntegrity(format!(
                "metric '{}' has a zero underlying call weight",
                metric.id
            )));
        }
        if let Some(threshold) = metric.default_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(CoreError::CatalogIntegrity(format!(
                    "metric '{}' has default threshold {threshold} outside [0, 1]",
                    metric.id
                )));
            }
        }
    }

    for mode in Mode::ALL {
        let definition = self::mode(mode)?;
        if definition.metric_ids.is_empty() {
            return Err(CoreError::CatalogIntegrity(format!(
                "mode '{mode}' has no metrics"
            )));
        }
        let mut seen = BTreeSet::new();
        for &id in definition.metric_ids {
            metric(id)?;
            if !seen.insert(id) {
                return Err(CoreError::CatalogIntegrity(format!(
                    "mode '{mode}' lists metric '{id}' more than once"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integrity_check_passes() {
        verify_integrity().unwrap();
    }

    #[test]
    fn mode_table_matches_contract() {
        let expected: &[(Mode, &[MetricId])] = &[
            (Mode::Quick, &[MetricId::AnswerRelevancy]),
            (
                Mode::Standard,
                &[MetricId::AnswerRelevancy, MetricId::Faithfulness],
            ),
            (
                Mode::Rag,
                &[
                    MetricId::ContextualRelevancy,
                    MetricId::Faithfulness,
                    MetricId::Hallucination,
                ],
            ),
            (
                Mode::Agent,
                &[
                    MetricId::AnswerRelevancy,
                    MetricId::Faithfulness,
                    MetricId::Hallucination,
                ],
            ),
            (
                Mode::Complete,
                &[
                    MetricId::AnswerRelevancy,
                    MetricId::Faithfulness,
                    MetricId::Hallucination,
                    MetricId::ContextualRelevancy,
                    MetricId::ContextualPrecision,
                    MetricId::ContextualRecall,
                    MetricId::Bias,
                    MetricId::Toxicity,
                ],
            ),
            (Mode::Safety, &[MetricId::Bias, MetricId::Toxicity]),
        ];

        for (mode, metrics) in expected {
            let ids: Vec<MetricId> = metrics_for(*mode)
                .unwrap()
                .iter()
                .map(|m| m.id)
                .collect();
            assert_eq!(&ids[..], *metrics, "metric list for mode '{mode}'");
        }
    }

    #[test]
    fn required_fields_include_base_for_every_mode() {
        for mode in Mode::ALL {
            let required = required_fields_for(mode).unwrap();
            assert!(required.contains(&RequestField::UserRequest));
            assert!(required.contains(&RequestField::AppActualResponse));
        }
    }

    #[test]
    fn context_required_only_for_rag_and_complete() {
        for mode in Mode::ALL {
            let required = required_fields_for(mode).unwrap();
            let needs_context = matches!(mode, Mode::Rag | Mode::Complete);
            assert_eq!(
                required.contains(&RequestField::Context),
                needs_context,
                "context requirement for mode '{mode}'"
            );
        }
    }

    #[test]
    fn required_fields_are_deterministic() {
        for mode in Mode::ALL {
            assert_eq!(
                required_fields_for(mode).unwrap(),
                required_fields_for(mode).unwrap()
            );
        }
    }

    #[test]
    fn lower_is_better_set_for_safety_and_hallucination_metrics() {
        for id in [MetricId::Hallucination, MetricId::Bias, MetricId::Toxicity] {
            assert!(metric(id).unwrap().lower_is_better);
        }
        for id in [MetricId::AnswerRelevancy, MetricId::Faithfulness] {
            assert!(!metric(id).unwrap().lower_is_better);
        }
    }
}
