use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub http_addr: String,
    pub upload_dir: PathBuf,
    pub log_level: String,
    pub session_ttl_seconds: i64,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub const DEFAULT_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

    pub fn from_env() -> Result<Self> {
        let database_url = get_or_default("DATABASE_URL", "sqlite://users.db")?;
        let http_addr = get_or_default("HTTP_ADDR", "0.0.0.0:8080")?;
        let upload_dir = PathBuf::from(get_or_default("UPLOAD_DIR", "static/uploads")?);
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let session_ttl_seconds: i64 = std::env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .context("Failed to parse SESSION_TTL_SECONDS, expecting integer")?;
        if session_ttl_seconds <= 0 {
            return Err(anyhow!("SESSION_TTL_SECONDS must be > 0"));
        }
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", Self::DEFAULT_BODY_LIMIT_BYTES)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url,
            http_addr,
            upload_dir,
            log_level,
            session_ttl_seconds,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_or_default(key: &str, default: &str) -> Result<String> {
    let value = match std::env::var(key) {
        Ok(value) => value.trim().to_string(),
        Err(_) => return Ok(default.to_string()),
    };
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
