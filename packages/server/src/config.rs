use anyhow::{bail, Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PORT: u16 = 8000;
/// 10 MB
pub const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub gemini_structured_output: bool,
    pub gemini_timeout: Duration,
    pub max_file_size: usize,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("port", &self.port)
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_structured_output", &self.gemini_structured_output)
            .field("gemini_timeout", &self.gemini_timeout)
            .field("max_file_size", &self.max_file_size)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        match dotenv_status(dotenvy::dotenv()) {
            DotenvStatus::Loaded => tracing::debug!("Loaded variables from .env"),
            DotenvStatus::Missing => {}
            DotenvStatus::Invalid(error) => {
                tracing::warn!(error = %error, "Ignoring unreadable .env file")
            }
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let gemini_api_key = get("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?;

        let port = match get("PORT") {
            Some(v) => v.parse().context("PORT must be a valid number")?,
            None => DEFAULT_PORT,
        };

        let max_file_size = match get("MAX_FILE_SIZE") {
            Some(v) => v
                .parse()
                .context("MAX_FILE_SIZE must be a number of bytes")?,
            None => DEFAULT_MAX_FILE_SIZE,
        };
        if max_file_size == 0 {
            bail!("MAX_FILE_SIZE must be greater than zero");
        }

        let timeout_secs = match get("GEMINI_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .context("GEMINI_TIMEOUT_SECS must be a number of seconds")?,
            None => DEFAULT_GEMINI_TIMEOUT_SECS,
        };

        let gemini_structured_output = match get("GEMINI_STRUCTURED_OUTPUT") {
            Some(v) => parse_bool(&v).context("GEMINI_STRUCTURED_OUTPUT must be true or false")?,
            None => true,
        };

        let allowed_origins = get("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url: get("DATABASE_URL"),
            port,
            gemini_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL"),
            gemini_structured_output,
            gemini_timeout: Duration::from_secs(timeout_secs),
            max_file_size,
            allowed_origins,
        })
    }
}

#[derive(Debug, PartialEq)]
enum DotenvStatus {
    Loaded,
    Missing,
    Invalid(String),
}

fn dotenv_status<T>(result: dotenvy::Result<T>) -> DotenvStatus {
    match result {
        Ok(_) => DotenvStatus::Loaded,
        Err(e) if e.not_found() => DotenvStatus::Missing,
        Err(e) => DotenvStatus::Invalid(e.to_string()),
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean: {}", other),
    }
}
