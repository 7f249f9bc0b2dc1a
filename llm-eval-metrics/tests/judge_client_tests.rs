use llm_eval_core::{catalog, MetricId, MetricScorer, Mode, NormalizedRequest};
use llm_eval_metrics::{JudgeClient, JudgeConfig, JudgeError, LlmJudgeScorer};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

fn client_for(server: &MockServer) -> JudgeClient {
    JudgeClient::new(JudgeConfig::new(server.uri(), "test-key", "gpt-4o-mini")).unwrap()
}

fn sample_request() -> NormalizedRequest {
    NormalizedRequest {
        app_name: "chatbot".to_string(),
        user: "alice".to_string(),
        user_request: "What is the capital of France?".to_string(),
        app_actual_response: "The capital of France is Paris.".to_string(),
        expected_response: None,
        context: None,
        mode: Mode::Quick,
        threshold: None,
    }
}

#[tokio::test]
async fn judge_returns_parsed_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            r#"{"score": 0.92, "reasoning": "Directly answers the question."}"#,
        )))
        .mount(&server)
        .await;

    let verdict = client_for(&server)
        .judge("system prompt", "user prompt")
        .await
        .unwrap();

    assert_eq!(verdict.score, 0.92);
    assert_eq!(verdict.reasoning, "Directly answers the question.");
}

#[tokio::test]
async fn provider_error_surfaces_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "upstream overloaded"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .judge("system", "user")
        .await
        .unwrap_err();

    match err {
        JudgeError::Provider { status, message } => {
            assert_eq!(status.as_u16(), 500);
            assert!(message.contains("upstream overloaded"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn prose_reply_with_bare_score_is_salvaged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            "I would rate this response a score: 0.65 because it is mostly on topic.",
        )))
        .mount(&server)
        .await;

    let verdict = client_for(&server).judge("system", "user").await.unwrap();
    assert_eq!(verdict.score, 0.65);
    assert_eq!(verdict.reasoning, "Failed to parse detailed reasoning");
}

#[tokio::test]
async fn empty_choices_is_an_empty_reply_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .judge("system", "user")
        .await
        .unwrap_err();
    assert!(matches!(err, JudgeError::EmptyReply));
}

#[tokio::test]
async fn scorer_clamps_out_of_range_judge_scores() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            r#"{"score": 1.4, "reasoning": "overenthusiastic judge"}"#,
        )))
        .mount(&server)
        .await;

    let scorer = LlmJudgeScorer::new(client_for(&server));
    let metric = catalog::metric(MetricId::AnswerRelevancy).unwrap();
    let scored = scorer
        .score(metric, &sample_request(), 0.5)
        .await
        .unwrap();

    assert_eq!(scored.score, 1.0);
}

#[tokio::test]
async fn scorer_maps_judge_failures_to_metric_execution_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let scorer = LlmJudgeScorer::new(client_for(&server));
    let metric = catalog::metric(MetricId::Toxicity).unwrap();
    let err = scorer
        .score(metric, &sample_request(), 0.5)
        .await
        .unwrap_err();

    assert!(matches!(err, llm_eval_core::CoreError::MetricExecution(_)));
}
