use std::str::FromStr;

use anyhow::{Context, Result, anyhow};

use crate::domain::lang::Lang;
use crate::domain::pagination::{DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!(
                "unknown STORE_BACKEND '{other}', expecting postgres or memory"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) store_backend: StoreBackend,
    pub(crate) database_url: Option<String>,
    pub(crate) database_max_connections: u32,
    pub(crate) memory_seed_path: Option<String>,
    pub(crate) http_addr: String,
    pub(crate) cors_origins: Vec<String>,
    pub(crate) log_level: String,
    pub(crate) http_concurrency_limit: usize,
    pub(crate) http_request_timeout_secs: u64,
    pub(crate) default_lang: Lang,
    pub(crate) site_url: String,
    pub(crate) page_size: u32,
}

impl Settings {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_backend: StoreBackend = lookup("STORE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .parse()?;

        let database_url = optional(&lookup, "DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL is required when STORE_BACKEND=postgres"));
        }
        let database_max_connections =
            parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;
        let memory_seed_path = optional(&lookup, "MEMORY_SEED_PATH");

        let http_addr = lookup("HTTP_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".to_string()),
        );
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let http_concurrency_limit = parse_positive(&lookup, "HTTP_CONCURRENCY_LIMIT", 256usize)?;
        let http_request_timeout_secs =
            parse_positive(&lookup, "HTTP_REQUEST_TIMEOUT_SECS", 10u64)?;

        let default_lang = match optional(&lookup, "DEFAULT_LANG") {
            Some(raw) => raw
                .parse::<Lang>()
                .with_context(|| format!("Failed to parse DEFAULT_LANG '{raw}', expecting tr or en"))?,
            None => Lang::default(),
        };
        let site_url = optional(&lookup, "SITE_URL")
            .unwrap_or_else(|| "https://velvele.net".to_string())
            .trim_end_matches('/')
            .to_string();
        let page_size = parse_positive(&lookup, "PAGE_SIZE", DEFAULT_LIMIT)?;
        if page_size > MAX_LIMIT {
            return Err(anyhow!("PAGE_SIZE must be <= {MAX_LIMIT}"));
        }

        Ok(Self {
            store_backend,
            database_url,
            database_max_connections,
            memory_seed_path,
            http_addr,
            cors_origins,
            log_level,
            http_concurrency_limit,
            http_request_timeout_secs,
            default_lang,
            site_url,
            page_size,
        })
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + PartialEq + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
