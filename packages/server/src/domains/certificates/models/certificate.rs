use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use super::{ExtractedRecord, FieldConfidences};

/// The uploaded file an extraction came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Hex SHA-256 of the original bytes
    pub file_hash: String,
    /// Declared content type, as received
    pub content_type: String,
    pub file_name: Option<String>,
    pub size_bytes: i64,
}

/// StoredCertificate - one persisted extraction, unique per uploaded file
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredCertificate {
    pub id: Uuid,
    pub student_name: String,
    pub roll_number: String,
    pub certificate_number: Option<String>,
    pub course_name: String,
    pub institution: String,
    pub year: String,
    pub grade: String,
    pub issue_date: String,
    pub extraction_method: String,
    pub field_confidences: Json<FieldConfidences>,

    // Source file
    pub file_hash: String,
    pub file_type: String,
    pub file_name: Option<String>,
    pub file_size: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredCertificate {
    /// Build a new row (not yet persisted) from an extraction.
    pub fn from_extraction(record: &ExtractedRecord, upload: &UploadedFile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            student_name: record.name.clone(),
            roll_number: record.roll_number.clone(),
            certificate_number: record.certificate_id.clone(),
            course_name: record.course_name.clone(),
            institution: record.institution.clone(),
            year: record.year.clone(),
            grade: record.grade.clone(),
            issue_date: record.issue_date.clone(),
            extraction_method: record.extraction_method.to_string(),
            field_confidences: Json(record.field_confidences.clone()),
            file_hash: upload.file_hash.clone(),
            file_type: upload.content_type.clone(),
            file_name: upload.file_name.clone(),
            file_size: upload.size_bytes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the extracted fields with a newer extraction of the same file.
    pub fn apply_extraction(&mut self, newer: StoredCertificate) {
        let StoredCertificate {
            student_name,
            roll_number,
            certificate_number,
            course_name,
            institution,
            year,
            grade,
            issue_date,
            extraction_method,
            field_confidences,
            file_type,
            file_name,
            file_size,
            updated_at,
            ..
        } = newer;

        self.student_name = student_name;
        self.roll_number = roll_number;
        self.certificate_number = certificate_number;
        self.course_name = course_name;
        self.institution = institution;
        self.year = year;
        self.grade = grade;
        self.issue_date = issue_date;
        self.extraction_method = extraction_method;
        self.field_confidences = field_confidences;
        self.file_type = file_type;
        self.file_name = file_name;
        self.file_size = file_size;
        self.updated_at = updated_at;
    }
}
