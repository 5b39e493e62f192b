//! Test harness driving the real router in-process.
//!
//! The document model is a scripted `MockDocumentModel` and certificates go
//! to a `MemoryCertificateStore`, so no network or database is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use server_core::domains::certificates::{CertificateStore, MemoryCertificateStore};
use server_core::kernel::{MockDocumentModel, ServerDeps};
use server_core::server::{build_app, AppOptions};
use tower::ServiceExt;

pub const BOUNDARY: &str = "certificate-verifier-test-boundary";

/// One part of a multipart upload
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: Option<&'a str>,
    pub bytes: &'a [u8],
}

impl<'a> FilePart<'a> {
    /// A `file` part with the given declared type
    pub fn file(content_type: &'a str, bytes: &'a [u8]) -> Self {
        Self {
            field: "file",
            file_name: "certificate",
            content_type: Some(content_type),
            bytes,
        }
    }
}

pub fn multipart_body(part: &FilePart<'_>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            part.field, part.file_name
        )
        .as_bytes(),
    );
    if let Some(content_type) = part.content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(part.bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Decoded response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    TestResponse { status, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("build GET request");
    send(app, request).await
}

pub async fn upload(app: &Router, part: FilePart<'_>) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(&part)))
        .expect("build upload request");
    send(app, request).await
}

/// Router over an arbitrary store
pub fn app_with_store(model: Arc<MockDocumentModel>, store: Arc<dyn CertificateStore>) -> Router {
    build_app(ServerDeps::new(model, store), AppOptions::default())
}

pub struct TestHarness {
    pub app: Router,
    pub model: Arc<MockDocumentModel>,
    pub store: Arc<MemoryCertificateStore>,
}

impl TestHarness {
    pub fn new(model: MockDocumentModel) -> Self {
        Self::with_options(model, AppOptions::default())
    }

    pub fn with_options(model: MockDocumentModel, options: AppOptions) -> Self {
        let model = Arc::new(model);
        let store = Arc::new(MemoryCertificateStore::new());
        let app = build_app(ServerDeps::new(model.clone(), store.clone()), options);
        Self { app, model, store }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        get(&self.app, uri).await
    }

    pub async fn upload(&self, part: FilePart<'_>) -> TestResponse {
        upload(&self.app, part).await
    }
}
