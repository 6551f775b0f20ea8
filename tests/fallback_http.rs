//! End-to-end fallback behavior against a mocked chat completions endpoint.

use fchat::core::error::ChatError;
use fchat::fallback::FallbackDispatcher;
use fchat::models::ModelChain;
use fchat::providers::openrouter::OpenRouterProvider;
use fchat::providers::{CompletionProvider, Message};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OpenRouterProvider {
    OpenRouterProvider::new(
        format!("{}/api/v1", server.uri()),
        "sk-or-test".to_string(),
        "http://localhost:3000",
        "AI Chat Assistant",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "gen-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    }))
}

fn for_model(model: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(body_partial_json(json!({ "model": model })))
}

fn chain(models: &[&str]) -> ModelChain {
    ModelChain::new(models.iter().map(|m| m.to_string()).collect()).unwrap()
}

#[tokio::test]
async fn request_carries_credentials_site_headers_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-or-test"))
        .and(header("http-referer", "http://localhost:3000"))
        .and(header("x-title", "AI Chat Assistant"))
        .and(body_partial_json(json!({
            "model": "a/one",
            "messages": [
                {"role": "assistant", "content": "Hello! How can I help you today?"},
                {"role": "user", "content": "hi"}
            ]
        })))
        .respond_with(completion("Hi there!"))
        .expect(1)
        .mount(&server)
        .await;

    let history = [Message::assistant("Hello! How can I help you today?")];
    let dispatcher = FallbackDispatcher::new(Box::new(provider(&server)), chain(&["a/one"]));

    let reply = dispatcher.attempt("hi", &history, 0, |_| {}).await.unwrap();

    assert_eq!(reply, "Hi there!");
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;
    for_model("a/one")
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .complete("a/one", &[Message::user("hi")])
        .await
        .unwrap_err();

    match err {
        ChatError::Api(msg) => {
            assert!(msg.contains("429"), "{msg}");
            assert!(msg.contains("rate limited"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn every_kind_of_failure_falls_through_to_the_next_model() {
    let server = MockServer::start().await;
    for_model("a/server-error")
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    for_model("b/no-choices")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .expect(1)
        .mount(&server)
        .await;
    for_model("c/malformed")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;
    for_model("d/works")
        .respond_with(completion("1. first\n2. second"))
        .expect(1)
        .mount(&server)
        .await;
    for_model("e/never")
        .respond_with(completion("unreachable"))
        .expect(0)
        .mount(&server)
        .await;

    let models = chain(&[
        "a/server-error",
        "b/no-choices",
        "c/malformed",
        "d/works",
        "e/never",
    ]);
    let dispatcher = FallbackDispatcher::new(Box::new(provider(&server)), models);
    let mut selected = Vec::new();

    let reply = dispatcher
        .attempt("list two things", &[], 0, |m| selected.push(m.to_string()))
        .await
        .unwrap();

    assert_eq!(reply, "1. first\n2. second");
    assert_eq!(
        selected,
        vec!["a/server-error", "b/no-choices", "c/malformed", "d/works"]
    );
}

#[tokio::test]
async fn exhausted_chain_tries_every_model_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let dispatcher = FallbackDispatcher::new(
        Box::new(provider(&server)),
        chain(&["a/one", "b/two", "c/three"]),
    );
    let mut selected = 0;

    let err = dispatcher
        .attempt("hi", &[], 0, |_| selected += 1)
        .await
        .unwrap_err();

    assert_eq!(selected, 3);
    match err {
        ChatError::Exhausted {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert!(matches!(last_error.as_deref(), Some(ChatError::Api(_))));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_still_walks_the_whole_chain() {
    let server = MockServer::start().await;
    let base = format!("{}/api/v1", server.uri());
    drop(server);

    let provider = OpenRouterProvider::new(
        base,
        "sk-or-test".to_string(),
        "http://localhost:3000",
        "AI Chat Assistant",
        Duration::from_secs(5),
    )
    .unwrap();
    let dispatcher = FallbackDispatcher::new(Box::new(provider), chain(&["a/one", "b/two"]));
    let mut selected = Vec::new();

    let err = dispatcher
        .attempt("hi", &[], 0, |m| selected.push(m.to_string()))
        .await
        .unwrap_err();

    assert!(err.is_exhausted());
    assert_eq!(selected, vec!["a/one", "b/two"]);
}
