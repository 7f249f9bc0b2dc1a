//! Per-mode required-field validation.
//!
//! Pure: no side effects, deterministic for a given request. All missing
//! fields are reported at once rather than failing on the first.

use crate::catalog::required_fields_for;
use crate::domain::{EvaluationRequest, NormalizedRequest};
use crate::error::{CoreError, Result};

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Check that every field the mode requires is a non-empty string after
/// trimming, and produce the normalized request the evaluator consumes.
pub fn validate(request: &EvaluationRequest) -> Result<NormalizedRequest> {
    let required = required_fields_for(request.mode)?;

    let missing: Vec<_> = required
        .iter()
        .copied()
        .filter(|&field| {
            request
                .field(field)
                .map(str::trim)
                .unwrap_or_default()
                .is_empty()
        })
        .collect();

    if !missing.is_empty() {
        return Err(CoreError::Validation {
            mode: request.mode,
            missing_fields: missing,
        });
    }

    Ok(NormalizedRequest {
        app_name: request.app_name.trim().to_string(),
        user: request.user.trim().to_string(),
        user_request: request.user_request.trim().to_string(),
        app_actual_response: request.app_actual_response.trim().to_string(),
        expected_response: normalize_optional(&request.expected_response),
        context: normalize_optional(&request.context),
        mode: request.mode,
        threshold: request.threshold,
    })
}
