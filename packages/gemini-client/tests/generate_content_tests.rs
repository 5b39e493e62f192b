//! Tests for `GeminiClient` against a local HTTP server standing in for the API.

use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use gemini_client::{Content, GeminiClient, GeminiError, GenerateContentRequest, Part};
use serde_json::{json, Value};

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Client pointed at a server that answers every call with `status` and `body`.
async fn client_answering(status: StatusCode, body: &'static str) -> GeminiClient {
    let app = Router::new().route(
        "/models/:call",
        post(move || async move { (status, body) }),
    );
    GeminiClient::new("test-key").with_base_url(serve(app).await)
}

fn request() -> GenerateContentRequest {
    GenerateContentRequest::new().content(Content::user(vec![
        Part::text("Read this certificate"),
        Part::inline_data("image/png", b"not really a png"),
    ]))
}

#[tokio::test]
async fn test_text_parts_are_concatenated() {
    let app = Router::new().route(
        "/models/:call",
        post(
            |Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(call, "gemini-2.5-flash:generateContent");
                assert_eq!(headers["x-goog-api-key"], "test-key");
                assert_eq!(body["contents"][0]["parts"][0]["text"], "Read this certificate");

                Json(json!({
                    "candidates": [{
                        "content": {"parts": [{"text": "{\"name\":"}, {"text": "\"Asha\"}"}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"totalTokenCount": 42}
                }))
            },
        ),
    );
    let client = GeminiClient::new("test-key").with_base_url(serve(app).await);

    let text = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap();

    assert_eq!(text, r#"{"name":"Asha"}"#);
}

#[tokio::test]
async fn test_error_envelope_message_is_used() {
    let client = client_answering(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
    )
    .await;

    let err = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_error_body_is_kept_verbatim() {
    let client = client_answering(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;

    let err = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    match err {
        GeminiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream exploded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blocked_prompt_reports_block_reason() {
    let client = client_answering(
        StatusCode::OK,
        r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#,
    )
    .await;

    let err = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::EmptyResponse(ref r) if r == "prompt blocked: SAFETY"));
}

#[tokio::test]
async fn test_textless_candidate_reports_finish_reason() {
    let client = client_answering(
        StatusCode::OK,
        r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#,
    )
    .await;

    let err = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::EmptyResponse(ref r) if r == "finish reason: MAX_TOKENS"));
}

#[tokio::test]
async fn test_no_candidates() {
    let client = client_answering(StatusCode::OK, "{}").await;

    let err = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::EmptyResponse(ref r) if r == "no candidates"));
    assert!(err.is_remote());
}

#[tokio::test]
async fn test_malformed_success_body_is_parse_error() {
    let client = client_answering(StatusCode::OK, "{\"candidates\": [").await;

    let err = client
        .generate_content("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::Parse(_)));
    assert!(!err.is_remote());
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a port, then free it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = GeminiClient::new("test-key").with_base_url(format!("http://127.0.0.1:{}", port));

    let err = client
        .generate_text("gemini-2.5-flash", &request())
        .await
        .unwrap_err();

    assert!(matches!(err, GeminiError::Network(_)));
    assert!(err.is_remote());
}
