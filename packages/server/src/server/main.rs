// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use gemini_client::{GeminiClient, ResponseSchema};
use server_core::domains::certificates::extraction::ModelFields;
use server_core::domains::certificates::{
    CertificateStore, MemoryCertificateStore, PostgresCertificateStore,
};
use server_core::kernel::{GeminiDocumentModel, ServerDeps};
use server_core::server::{build_app, AppOptions};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Certificate Verifier API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.gemini_model, "Configuration loaded");

    // Certificate store
    let store: Arc<dyn CertificateStore> = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            let store = PostgresCertificateStore::new(pool);
            tracing::info!("Running database migrations...");
            store.migrate().await.context("Failed to run migrations")?;
            tracing::info!("Migrations complete");

            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; certificates are kept in memory and lost on restart");
            Arc::new(MemoryCertificateStore::new())
        }
    };

    // Document model
    let mut client = GeminiClient::new(config.gemini_api_key.clone())
        .with_timeout(config.gemini_timeout)
        .context("Failed to build Gemini client")?;
    if let Some(base_url) = &config.gemini_base_url {
        client = client.with_base_url(base_url);
    }

    let mut model = GeminiDocumentModel::new(client, config.gemini_model.clone());
    if config.gemini_structured_output {
        model = model.with_response_schema(ModelFields::gemini_schema());
    }

    // Build application
    let app = build_app(
        ServerDeps::new(Arc::new(model), store),
        AppOptions {
            max_file_size: config.max_file_size,
            allowed_origins: config.allowed_origins.clone(),
        },
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Upload endpoint: http://localhost:{}/api/upload", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
