//! Certificate persistence.
//!
//! `PostgresCertificateStore` is the production backend;
//! `MemoryCertificateStore` backs tests and database-less local runs.

mod memory;
mod postgres;

pub use memory::MemoryCertificateStore;
pub use postgres::PostgresCertificateStore;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{ExtractedRecord, StoredCertificate, UploadedFile};

pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 500;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Clamp a requested page size into `1..=MAX_LIST_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Persist an extraction, replacing any earlier one for the same file.
    ///
    /// Keyed on `upload.file_hash`; an existing row keeps its `id` and
    /// `created_at`.
    async fn save(
        &self,
        record: &ExtractedRecord,
        upload: &UploadedFile,
    ) -> Result<StoredCertificate, StoreError>;

    /// Newest first. `limit` must already be clamped.
    async fn list(&self, limit: i64) -> Result<Vec<StoredCertificate>, StoreError>;

    async fn find_by_certificate_number(
        &self,
        certificate_number: &str,
    ) -> Result<Option<StoredCertificate>, StoreError>;

    /// Case-insensitive exact match on the student name, newest first.
    async fn find_by_student(
        &self,
        student_name: &str,
    ) -> Result<Vec<StoredCertificate>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend label for health output
    fn backend_name(&self) -> &'static str;
}
