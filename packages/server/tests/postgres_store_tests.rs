//! PostgresCertificateStore against a real database.
//!
//! Needs Docker. Run with: cargo test -p server --test postgres_store_tests -- --ignored
//!
//! One container is shared by every test; each test uses its own file
//! hashes and student names so rows never collide.

use anyhow::{Context, Result};
use server_core::domains::certificates::{
    model_field_confidences, CertificateStore, ExtractedRecord, PostgresCertificateStore,
    UploadedFile,
};
use sqlx::PgPool;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

struct SharedDatabase {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_DB: OnceCell<SharedDatabase> = OnceCell::const_new();

impl SharedDatabase {
    async fn init() -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?;
        let port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        // Run migrations once on the shared database
        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;
        PostgresCertificateStore::new(pool)
            .migrate()
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_DB
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test database")
            })
            .await
    }
}

async fn store() -> PostgresCertificateStore {
    let db = SharedDatabase::get().await;
    let pool = PgPool::connect(&db.db_url)
        .await
        .expect("Failed to connect to test database");
    PostgresCertificateStore::new(pool)
}

fn upload() -> UploadedFile {
    UploadedFile {
        file_hash: Uuid::new_v4().simple().to_string(),
        content_type: "application/pdf".to_string(),
        file_name: Some("certificate.pdf".to_string()),
        size_bytes: 2048,
    }
}

fn record(name: &str, certificate_no: Option<&str>) -> ExtractedRecord {
    ExtractedRecord {
        name: name.to_string(),
        roll_number: "R-1".to_string(),
        certificate_id: certificate_no.map(str::to_string),
        course_name: "Course".to_string(),
        institution: "Institute".to_string(),
        year: "2020".to_string(),
        grade: "B".to_string(),
        field_confidences: model_field_confidences(),
        ..ExtractedRecord::empty()
    }
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn save_round_trips_all_fields() {
    let store = store().await;
    let number = unique("CERT");
    let file = upload();

    let saved = store
        .save(&record("Asha Rao", Some(&number)), &file)
        .await
        .unwrap();

    assert_eq!(saved.student_name, "Asha Rao");
    assert_eq!(saved.certificate_number.as_deref(), Some(number.as_str()));
    assert_eq!(saved.extraction_method, "vision_model");
    assert_eq!(saved.field_confidences.0, model_field_confidences());
    assert_eq!(saved.file_hash, file.file_hash);
    assert_eq!(saved.file_size, 2048);

    let found = store
        .find_by_certificate_number(&number)
        .await
        .unwrap()
        .expect("saved certificate is found");
    assert_eq!(found.id, saved.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn same_file_hash_upserts() {
    let store = store().await;
    let file = upload();

    let first = store.save(&record("Old Name", None), &file).await.unwrap();
    let second = store.save(&record("New Name", None), &file).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(second.student_name, "New Name");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn find_by_student_is_case_insensitive_and_newest_first() {
    let store = store().await;
    let name = unique("Student");

    let older = store.save(&record(&name, None), &upload()).await.unwrap();
    let newer = store
        .save(&record(&name.to_uppercase(), None), &upload())
        .await
        .unwrap();

    let rows = store.find_by_student(&name.to_lowercase()).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, newer.id);
    assert_eq!(rows[1].id, older.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn list_respects_limit_and_ping_works() {
    let store = store().await;
    store.save(&record(&unique("A"), None), &upload()).await.unwrap();
    store.save(&record(&unique("B"), None), &upload()).await.unwrap();

    let rows = store.list(1).await.unwrap();
    assert_eq!(rows.len(), 1);

    store.ping().await.unwrap();
    assert_eq!(store.backend_name(), "postgres");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn missing_certificate_number_is_none() {
    let store = store().await;

    let found = store
        .find_by_certificate_number(&unique("MISSING"))
        .await
        .unwrap();

    assert!(found.is_none());
}
