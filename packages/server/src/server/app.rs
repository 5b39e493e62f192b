//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    certificate_by_number_handler, certificates_by_student_handler, health_handler,
    list_certificates_handler, root_handler, upload_handler,
};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    pub max_file_size: usize,
}

/// Router options taken from `Config`
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub max_file_size: usize,
    /// Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            max_file_size: crate::DEFAULT_MAX_FILE_SIZE,
            allowed_origins: Vec::new(),
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
        max_file_size: options.max_file_size,
    };

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/upload", post(upload_handler))
        .route("/api/certificates", get(list_certificates_handler))
        .route(
            "/api/certificates/student/:student_name",
            get(certificates_by_student_handler),
        )
        .route(
            "/api/certificates/:certificate_id",
            get(certificate_by_number_handler),
        )
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(
            options.max_file_size.saturating_add(MULTIPART_OVERHEAD),
        ))
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
