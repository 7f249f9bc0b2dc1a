use llm_eval_core::{EvaluationRequest, Mode};
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;

/// Inbound evaluate payload. Fields default to empty so that per-mode
/// required-field checking can report every missing field with a 400
/// instead of failing at deserialization.
#[derive(Debug, Deserialize, Validate)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub user_request: String,
    #[serde(default)]
    pub app_actual_response: String,
    pub expected_response: Option<String>,
    pub context: Option<String>,
    /// Parsed against the mode registry; absent means `standard`.
    pub mode: Option<String>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: Option<f64>,
}

impl EvaluateRequest {
    pub fn into_domain(self) -> Result<EvaluationRequest, ApiError> {
        let mode = match self.mode.as_deref() {
            Some(raw) => raw.parse::<Mode>()?,
            None => Mode::default(),
        };

        Ok(EvaluationRequest {
            app_name: self.app_name,
            user: self.user,
            user_request: self.user_request,
            app_actual_response: self.app_actual_response,
            expected_response: self.expected_response,
            context: self.context,
            mode,
            threshold: self.threshold,
        })
    }
}
