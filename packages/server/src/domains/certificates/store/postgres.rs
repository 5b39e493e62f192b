use async_trait::async_trait;
use sqlx::PgPool;

use super::{CertificateStore, StoreError};
use crate::domains::certificates::models::{ExtractedRecord, StoredCertificate, UploadedFile};

/// Postgres-backed certificate store
#[derive(Debug, Clone)]
pub struct PostgresCertificateStore {
    pool: PgPool,
}

impl PostgresCertificateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply pending migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CertificateStore for PostgresCertificateStore {
    async fn save(
        &self,
        record: &ExtractedRecord,
        upload: &UploadedFile,
    ) -> Result<StoredCertificate, StoreError> {
        let row = StoredCertificate::from_extraction(record, upload);

        let saved = sqlx::query_as::<_, StoredCertificate>(
            r#"
            INSERT INTO certificates (
                id, student_name, roll_number, certificate_number, course_name,
                institution, year, grade, issue_date, extraction_method,
                field_confidences, file_hash, file_type, file_name, file_size
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (file_hash) DO UPDATE SET
                student_name = EXCLUDED.student_name,
                roll_number = EXCLUDED.roll_number,
                certificate_number = EXCLUDED.certificate_number,
                course_name = EXCLUDED.course_name,
                institution = EXCLUDED.institution,
                year = EXCLUDED.year,
                grade = EXCLUDED.grade,
                issue_date = EXCLUDED.issue_date,
                extraction_method = EXCLUDED.extraction_method,
                field_confidences = EXCLUDED.field_confidences,
                file_type = EXCLUDED.file_type,
                file_name = EXCLUDED.file_name,
                file_size = EXCLUDED.file_size,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(row.id)
        .bind(&row.student_name)
        .bind(&row.roll_number)
        .bind(&row.certificate_number)
        .bind(&row.course_name)
        .bind(&row.institution)
        .bind(&row.year)
        .bind(&row.grade)
        .bind(&row.issue_date)
        .bind(&row.extraction_method)
        .bind(&row.field_confidences)
        .bind(&row.file_hash)
        .bind(&row.file_type)
        .bind(&row.file_name)
        .bind(row.file_size)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list(&self, limit: i64) -> Result<Vec<StoredCertificate>, StoreError> {
        let rows = sqlx::query_as::<_, StoredCertificate>(
            "SELECT * FROM certificates ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_certificate_number(
        &self,
        certificate_number: &str,
    ) -> Result<Option<StoredCertificate>, StoreError> {
        let row = sqlx::query_as::<_, StoredCertificate>(
            r#"
            SELECT * FROM certificates
            WHERE certificate_number = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(certificate_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_student(
        &self,
        student_name: &str,
    ) -> Result<Vec<StoredCertificate>, StoreError> {
        let rows = sqlx::query_as::<_, StoredCertificate>(
            r#"
            SELECT * FROM certificates
            WHERE LOWER(student_name) = LOWER($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(student_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
