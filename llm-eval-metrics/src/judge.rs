//! HTTP client for the model-backed judge.
//!
//! Talks to an OpenAI-compatible chat completions endpoint and turns the
//! judge's reply into a `{score, reasoning}` verdict. The reply is asked
//! for as JSON; when the model ignores that, a salvage pass extracts a
//! bare `score:` number so one chatty judge does not fail the metric.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const JUDGE_TEMPERATURE: f64 = 0.1;

#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider error ({status}): {message}")]
    Provider { status: StatusCode, message: String },

    #[error("Judge reply was empty")]
    EmptyReply,

    #[error("Could not parse judge reply: {0}")]
    MalformedReply(String),

    #[error("Invalid judge configuration: {0}")]
    Config(String),
}

pub type JudgeResult<T> = std::result::Result<T, JudgeError>;

#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl JudgeConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn validate(&self) -> JudgeResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(JudgeError::Config("base_url must not be empty".to_string()));
        }
        if self.model.trim().is_empty() {
            return Err(JudgeError::Config("model must not be empty".to_string()));
        }
        Ok(())
    }
}

/// The score and explanation extracted from one judge call.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeVerdict {
    pub score: f64,
    pub reasoning: String,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct VerdictBody {
    score: f64,
    #[serde(default)]
    reasoning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JudgeClient {
    client: Client,
    config: JudgeConfig,
}

impl JudgeClient {
    pub fn new(config: JudgeConfig) -> JudgeResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Run one judge call with the given system and user messages.
    pub async fn judge(&self, system: &str, user: &str) -> JudgeResult<JudgeVerdict> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: JUDGE_TEMPERATURE,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "judge provider returned an error");
            return Err(JudgeError::Provider { status, message });
        }

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(JudgeError::EmptyReply)?;

        parse_verdict(&content)
    }
}

static SCORE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"score["']?\s*:\s*([0-9]*\.?[0-9]+)"#).expect("score pattern is valid")
});

/// Strip a markdown code fence if the judge wrapped its JSON in one.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

pub(crate) fn parse_verdict(text: &str) -> JudgeResult<JudgeVerdict> {
    let body = strip_fences(text);

    if let Ok(parsed) = serde_json::from_str::<VerdictBody>(body) {
        return Ok(JudgeVerdict {
            score: parsed.score,
            reasoning: parsed
                .reasoning
                .unwrap_or_else(|| "No reasoning provided".to_string()),
        });
    }

    // Salvage: the judge answered in prose but still named a score.
    if let Some(captures) = SCORE_PATTERN.captures(body) {
        if let Ok(score) = captures[1].parse::<f64>() {
            tracing::warn!("judge reply was not valid JSON, salvaged bare score");
            return Ok(JudgeVerdict {
                score,
                reasoning: "Failed to parse detailed reasoning".to_string(),
            });
        }
    }

    Err(JudgeError::MalformedReply(body.chars().take(200).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_well_formed_json_verdict() {
        let verdict =
            parse_verdict(r#"{"score": 0.85, "reasoning": "The answer is on topic."}"#).unwrap();
        assert_eq!(verdict.score, 0.85);
        assert_eq!(verdict.reasoning, "The answer is on topic.");
    }

    #[test]
    fn parses_fenced_json_verdict() {
        let verdict =
            parse_verdict("```json\n{\"score\": 0.4, \"reasoning\": \"meh\"}\n```").unwrap();
        assert_eq!(verdict.score, 0.4);
    }

    #[test]
    fn missing_reasoning_gets_a_placeholder() {
        let verdict = parse_verdict(r#"{"score": 1.0}"#).unwrap();
        assert_eq!(verdict.reasoning, "No reasoning provided");
    }

    #[test]
    fn salvages_score_from_prose_reply() {
        let verdict =
            parse_verdict("The response looks fine overall, score: 0.7 on relevance.").unwrap();
        assert_eq!(verdict.score, 0.7);
        assert_eq!(verdict.reasoning, "Failed to parse detailed reasoning");
    }

    #[test]
    fn reply_without_any_score_is_rejected() {
        let err = parse_verdict("I cannot evaluate this.").unwrap_err();
        assert!(matches!(err, JudgeError::MalformedReply(_)));
    }

    #[test]
    fn blank_base_url_is_a_config_error() {
        let err = JudgeClient::new(JudgeConfig::new("", "key", "gpt-4o-mini")).unwrap_err();
        assert!(matches!(err, JudgeError::Config(_)));
    }
}
