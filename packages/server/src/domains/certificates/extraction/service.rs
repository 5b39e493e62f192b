use std::io::Cursor;
use std::sync::Arc;

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::normalize::normalize;
use super::prompt::extraction_prompt;
use super::recovery::{parse_model_fields, recover_json_object};
use crate::domains::certificates::models::{ExtractedRecord, MediaKind, PDF_MIME_TYPE};
use crate::kernel::{Attachment, BaseDocumentModel};

/// Media type every image is converted to before it reaches the model.
const IMAGE_MIME_TYPE: &str = "image/png";

/// The uploaded bytes could not be turned into a model attachment.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Could not decode image: {0}")]
    UnreadableImage(#[from] image::ImageError),
}

/// A document ready to be sent to the model.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub kind: MediaKind,
    pub attachment: Attachment,
}

impl ExtractionRequest {
    /// Prepare uploaded bytes for extraction.
    ///
    /// Images are decoded and re-encoded as PNG so the model always sees one
    /// raster format; PDFs are passed through untouched.
    pub fn new(payload: &[u8], kind: MediaKind) -> Result<Self, DocumentError> {
        let attachment = match kind {
            MediaKind::Image => {
                let decoded = image::load_from_memory(payload)?;
                let mut png = Cursor::new(Vec::new());
                decoded.write_to(&mut png, ImageFormat::Png)?;
                Attachment::new(IMAGE_MIME_TYPE, png.into_inner())
            }
            MediaKind::Pdf => Attachment::new(PDF_MIME_TYPE, payload.to_vec()),
        };

        Ok(Self { kind, attachment })
    }
}

/// Why an extraction produced no fields.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Document model call failed: {0:#}")]
    Model(#[source] anyhow::Error),

    #[error("No JSON object found in model response")]
    NoJsonFound { raw_response: String },

    #[error("Model response is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        raw_response: String,
    },
}

impl ExtractionError {
    pub fn outcome(&self) -> ExtractionOutcome {
        match self {
            ExtractionError::Model(_) => ExtractionOutcome::ModelUnavailable,
            ExtractionError::NoJsonFound { .. } => ExtractionOutcome::NoJsonFound,
            ExtractionError::InvalidJson { .. } => ExtractionOutcome::InvalidJson,
        }
    }
}

/// How an extraction ended, reported alongside the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionOutcome {
    Extracted,
    NoJsonFound,
    InvalidJson,
    ModelUnavailable,
}

impl ExtractionOutcome {
    pub fn is_extracted(&self) -> bool {
        matches!(self, ExtractionOutcome::Extracted)
    }
}

/// Reads certificate fields from documents using a document model.
///
/// One model call per extraction, no retries.
#[derive(Clone)]
pub struct CertificateExtractor {
    model: Arc<dyn BaseDocumentModel>,
}

impl CertificateExtractor {
    pub fn new(model: Arc<dyn BaseDocumentModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Run the extraction and surface every failure.
    pub async fn try_extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<ExtractedRecord, ExtractionError> {
        let prompt = extraction_prompt(request.kind);

        let raw = self
            .model
            .generate(&prompt, &request.attachment)
            .await
            .map_err(ExtractionError::Model)?;

        debug!(kind = %request.kind, response_len = raw.len(), "Model responded");

        let Some(json) = recover_json_object(&raw) else {
            return Err(ExtractionError::NoJsonFound { raw_response: raw });
        };

        let fields = match parse_model_fields(json) {
            Ok(fields) => fields,
            Err(source) => {
                return Err(ExtractionError::InvalidJson {
                    source,
                    raw_response: raw,
                })
            }
        };

        Ok(normalize(fields))
    }

    /// Run the extraction, degrading any failure to an empty record.
    pub async fn extract_with_outcome(
        &self,
        request: &ExtractionRequest,
    ) -> (ExtractedRecord, ExtractionOutcome) {
        match self.try_extract(request).await {
            Ok(record) => {
                info!(
                    kind = %request.kind,
                    has_certificate_number = record.certificate_id.is_some(),
                    "Certificate fields extracted"
                );
                (record, ExtractionOutcome::Extracted)
            }
            Err(err) => {
                match &err {
                    ExtractionError::Model(e) => {
                        error!(kind = %request.kind, error = %format!("{:#}", e), "Document model unavailable");
                    }
                    ExtractionError::NoJsonFound { raw_response } => {
                        warn!(kind = %request.kind, raw_response = %raw_response, "No JSON object in model response");
                    }
                    ExtractionError::InvalidJson {
                        source,
                        raw_response,
                    } => {
                        error!(
                            kind = %request.kind,
                            error = %source,
                            raw_response = %raw_response,
                            "Failed to parse model response"
                        );
                    }
                }
                (ExtractedRecord::empty(), err.outcome())
            }
        }
    }

    /// Run the extraction; never fails.
    pub async fn extract(&self, request: &ExtractionRequest) -> ExtractedRecord {
        self.extract_with_outcome(request).await.0
    }
}
