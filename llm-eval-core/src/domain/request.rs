use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::RequestField;
use crate::error::CoreError;

/// A named bundle of metrics plus their combined required-input set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Quick,
    #[default]
    Standard,
    Rag,
    Agent,
    Complete,
    Safety,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Quick,
        Mode::Standard,
        Mode::Rag,
        Mode::Agent,
        Mode::Complete,
        Mode::Safety,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Quick => "quick",
            Mode::Standard => "standard",
            Mode::Rag => "rag",
            Mode::Agent => "agent",
            Mode::Complete => "complete",
            Mode::Safety => "safety",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::UnknownMode {
                mode: s.to_string(),
            })
    }
}

/// A single evaluation request as received from the caller, before
/// per-mode required-field validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub app_name: String,
    pub user: String,
    pub user_request: String,
    pub app_actual_response: String,
    pub expected_response: Option<String>,
    pub context: Option<String>,
    pub mode: Mode,
    /// Overrides the per-metric default threshold when provided.
    pub threshold: Option<f64>,
}

impl EvaluationRequest {
    pub fn field(&self, field: RequestField) -> Option<&str> {
        match field {
            RequestField::UserRequest => Some(&self.user_request),
            RequestField::AppActualResponse => Some(&self.app_actual_response),
            RequestField::ExpectedResponse => self.expected_response.as_deref(),
            RequestField::Context => self.context.as_deref(),
        }
    }
}

/// A request that passed validation: required fields are trimmed and
/// non-empty, optional fields are `None` when absent or blank.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRequest {
    pub app_name: String,
    pub user: String,
    pub user_request: String,
    pub app_actual_response: String,
    pub expected_response: Option<String>,
    pub context: Option<String>,
    pub mode: Mode,
    pub threshold: Option<f64>,
}

impl NormalizedRequest {
    pub fn field(&self, field: RequestField) -> Option<&str> {
        match field {
            RequestField::UserRequest => Some(&self.user_request),
            RequestField::AppActualResponse => Some(&self.app_actual_response),
            RequestField::ExpectedResponse => self.expected_response.as_deref(),
            RequestField::Context => self.context.as_deref(),
        }
    }
}
