use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub port: u16,
    pub eval_model: String,
    pub eval_base_url: String,
    pub eval_api_key: String,
    pub default_threshold: f64,
    pub cost_per_1k_tokens: f64,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let defaults = Config::default();

        let config = ConfigLoader::builder()
            .set_default("port", defaults.port)?
            .set_default("eval_model", defaults.eval_model)?
            .set_default("eval_base_url", defaults.eval_base_url)?
            .set_default("eval_api_key", defaults.eval_api_key)?
            .set_default("default_threshold", defaults.default_threshold)?
            .set_default("cost_per_1k_tokens", defaults.cost_per_1k_tokens)?
            .set_default("log_level", defaults.log_level)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("LLM_EVAL"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Key fingerprint safe for logs.
    pub fn masked_api_key(&self) -> String {
        let key = self.eval_api_key.as_str();
        if key.len() > 8 {
            format!("{}...{}", &key[..4], &key[key.len() - 4..])
        } else if key.is_empty() {
            "<unset>".to_string()
        } else {
            "***".to_string()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            eval_model: "gpt-4o-mini".to_string(),
            eval_base_url: "https://api.openai.com/v1".to_string(),
            eval_api_key: String::new(),
            default_threshold: 0.5,
            cost_per_1k_tokens: 0.0015,
            log_level: "info".to_string(),
        }
    }
}
