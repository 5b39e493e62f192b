use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use super::ApiResponse;
use crate::domains::certificates::store::clamp_limit;
use crate::domains::certificates::StoredCertificate;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

/// GET /api/certificates?limit=N
pub async fn list_certificates_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<StoredCertificate>>>, ApiError> {
    let rows = state.deps.store.list(clamp_limit(query.limit)).await?;

    Ok(Json(ApiResponse::list(
        format!("Retrieved {} certificates", rows.len()),
        rows,
    )))
}

/// GET /api/certificates/:certificate_id
pub async fn certificate_by_number_handler(
    Extension(state): Extension<AppState>,
    Path(certificate_id): Path<String>,
) -> Result<Json<ApiResponse<StoredCertificate>>, ApiError> {
    let row = state
        .deps
        .store
        .find_by_certificate_number(&certificate_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Certificate {} not found", certificate_id)))?;

    Ok(Json(ApiResponse::ok("Certificate found", row)))
}

/// GET /api/certificates/student/:student_name
pub async fn certificates_by_student_handler(
    Extension(state): Extension<AppState>,
    Path(student_name): Path<String>,
) -> Result<Json<ApiResponse<Vec<StoredCertificate>>>, ApiError> {
    let rows = state.deps.store.find_by_student(&student_name).await?;

    Ok(Json(ApiResponse::list(
        format!("Found {} certificates for {}", rows.len(), student_name),
        rows,
    )))
}
