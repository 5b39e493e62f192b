use axum::{
    extract::{multipart::MultipartError, Extension, Multipart},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::ApiResponse;
use crate::common::utils::generate_file_hash;
use crate::domains::certificates::extraction::{ExtractionOutcome, ExtractionRequest};
use crate::domains::certificates::{
    ExtractionMethod, FieldConfidences, MediaKind, UploadedFile, ACCEPTED_CONTENT_TYPES,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Multipart field carrying the document
pub const UPLOAD_FIELD: &str = "file";

/// Extracted fields plus storage metadata for one upload
#[derive(Debug, Serialize)]
pub struct UploadData {
    pub student_name: String,
    pub roll_number: String,
    pub certificate_number: Option<String>,
    pub course_name: String,
    pub year: String,
    pub grade: String,
    pub institution: String,
    pub issue_date: String,
    pub extraction_method: ExtractionMethod,
    pub field_confidences: FieldConfidences,
    pub database_id: Uuid,
    pub file_hash: String,
    pub file_type: String,
    pub extraction_status: ExtractionOutcome,
}

struct ReceivedFile {
    content_type: String,
    file_name: Option<String>,
    bytes: Vec<u8>,
}

fn multipart_error(err: MultipartError, max_file_size: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge {
            max_bytes: max_file_size,
        }
    } else {
        ApiError::InvalidUpload(err.body_text())
    }
}

async fn read_file_field(
    multipart: &mut Multipart,
    max_file_size: usize,
) -> Result<ReceivedFile, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_file_size))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, max_file_size))?;

        return Ok(ReceivedFile {
            content_type,
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::MissingFile)
}

/// POST /api/upload
///
/// Validates the file, reads its fields with the document model and stores
/// the result. A model failure still answers 200 with an empty record and an
/// `extraction_status` other than `extracted`.
pub async fn upload_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadData>>, ApiError> {
    let file = read_file_field(&mut multipart, state.max_file_size).await?;

    let kind = MediaKind::from_content_type(&file.content_type).ok_or_else(|| {
        let declared = if file.content_type.is_empty() {
            "<none>"
        } else {
            file.content_type.as_str()
        };
        ApiError::UnsupportedMediaType(format!(
            "{} (accepted: {})",
            declared,
            ACCEPTED_CONTENT_TYPES.join(", ")
        ))
    })?;

    if file.bytes.len() > state.max_file_size {
        return Err(ApiError::PayloadTooLarge {
            max_bytes: state.max_file_size,
        });
    }
    if file.bytes.is_empty() {
        return Err(ApiError::InvalidUpload("file is empty".to_string()));
    }

    let file_hash = generate_file_hash(&file.bytes);

    tracing::info!(
        file_name = ?file.file_name,
        content_type = %file.content_type,
        size = file.bytes.len(),
        file_hash = %file_hash,
        "Processing certificate upload"
    );

    let request = ExtractionRequest::new(&file.bytes, kind)
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;

    let (record, outcome) = state.deps.extractor.extract_with_outcome(&request).await;

    let upload = UploadedFile {
        file_hash,
        content_type: file.content_type,
        file_name: file.file_name,
        size_bytes: file.bytes.len() as i64,
    };
    let stored = state.deps.store.save(&record, &upload).await?;

    tracing::info!(
        database_id = %stored.id,
        extraction_status = ?outcome,
        "Certificate stored"
    );

    let message = if outcome.is_extracted() {
        "Certificate processed successfully"
    } else {
        "Certificate stored, but no fields could be extracted"
    };

    Ok(Json(ApiResponse::ok(
        message,
        UploadData {
            student_name: record.name,
            roll_number: record.roll_number,
            certificate_number: record.certificate_id,
            course_name: record.course_name,
            year: record.year,
            grade: record.grade,
            institution: record.institution,
            issue_date: record.issue_date,
            extraction_method: record.extraction_method,
            field_confidences: record.field_confidences,
            database_id: stored.id,
            file_hash: stored.file_hash,
            file_type: stored.file_type,
            extraction_status: outcome,
        },
    )))
}
