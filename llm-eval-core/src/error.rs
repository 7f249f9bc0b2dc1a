use thiserror::Error;

use crate::catalog::RequestField;
use crate::domain::Mode;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid mode: {mode}. Valid modes are: {}", valid_mode_list())]
    UnknownMode { mode: String },

    #[error("Mode '{mode}' requires {} which were not provided.", join_fields(.missing_fields))]
    Validation {
        mode: Mode,
        missing_fields: Vec<RequestField>,
    },

    #[error("Metric execution failed: {0}")]
    MetricExecution(String),

    #[error("Catalog integrity violation: {0}")]
    CatalogIntegrity(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

fn join_fields(fields: &[RequestField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn valid_mode_list() -> String {
    Mode::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
