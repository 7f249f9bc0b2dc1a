use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ModeInfo {
    pub description: String,
    pub metrics: Vec<String>,
    pub required_parameters: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModesResponse {
    pub available_modes: BTreeMap<String, ModeInfo>,
    pub default_mode: String,
}

#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    pub mode: Option<String>,
}
