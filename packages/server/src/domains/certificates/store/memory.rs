use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CertificateStore, StoreError};
use crate::domains::certificates::models::{ExtractedRecord, StoredCertificate, UploadedFile};

/// In-process store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryCertificateStore {
    // Insertion order; reads reverse it for newest-first.
    rows: RwLock<Vec<StoredCertificate>>,
}

impl MemoryCertificateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CertificateStore for MemoryCertificateStore {
    async fn save(
        &self,
        record: &ExtractedRecord,
        upload: &UploadedFile,
    ) -> Result<StoredCertificate, StoreError> {
        let fresh = StoredCertificate::from_extraction(record, upload);
        let mut rows = self.rows.write().await;

        if let Some(existing) = rows.iter_mut().find(|r| r.file_hash == upload.file_hash) {
            existing.apply_extraction(fresh);
            return Ok(existing.clone());
        }

        rows.push(fresh.clone());
        Ok(fresh)
    }

    async fn list(&self, limit: i64) -> Result<Vec<StoredCertificate>, StoreError> {
        let take = usize::try_from(limit).unwrap_or(0);
        Ok(self.rows.read().await.iter().rev().take(take).cloned().collect())
    }

    async fn find_by_certificate_number(
        &self,
        certificate_number: &str,
    ) -> Result<Option<StoredCertificate>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.certificate_number.as_deref() == Some(certificate_number))
            .cloned())
    }

    async fn find_by_student(
        &self,
        student_name: &str,
    ) -> Result<Vec<StoredCertificate>, StoreError> {
        let wanted = student_name.to_lowercase();
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| r.student_name.to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
