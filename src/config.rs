use std::{env, str::FromStr, time::Duration};

use anyhow::{bail, Context, Result};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown STORAGE_BACKEND '{other}' (expected postgres or memory)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub insight_timeout_secs: u64,

    /// Reject out-of-range mood/sleep/steps instead of storing them as-is
    pub strict_validation: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend: StorageBackend = parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Postgres)?;
        let database_url = non_empty(&lookup, "DATABASE_URL");
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set");
        }

        Ok(Self {
            storage_backend,
            database_url,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 8000)?,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8501".into()),
            cors_extra_origins: lookup("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            openai_api_key: non_empty(&lookup, "OPENAI_API_KEY"),
            openai_model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into()),
            insight_timeout_secs: parse_or(&lookup, "INSIGHT_TIMEOUT_SECS", 30)?,

            strict_validation: parse_or(&lookup, "STRICT_VALIDATION", false)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn insight_timeout(&self) -> Duration {
        Duration::from_secs(self.insight_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub host: String,
    pub port: u16,
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = non_empty(&lookup, "API_BASE_URL")
            .or_else(|| non_empty(&lookup, "BACKEND_URL"))
            .unwrap_or_else(|| "http://127.0.0.1:8000".into());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            host: lookup("DASHBOARD_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "DASHBOARD_PORT", 8501)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/lifelog")])).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert_eq!(config.port, 8000);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.insight_timeout_secs, 30);
        assert!(!config.strict_validation);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let config = Config::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("STRICT_VALIDATION", "true"),
            ("CORS_EXTRA_ORIGINS", "http://10.0.0.5:8501, ,http://lan:8501"),
        ]))
        .unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert!(config.strict_validation);
        assert_eq!(config.cors_extra_origins, vec!["http://10.0.0.5:8501", "http://lan:8501"]);
    }

    #[test]
    fn invalid_port_is_reported_with_key() {
        let err = Config::from_lookup(lookup(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn dashboard_falls_back_to_backend_url() {
        let config = DashboardConfig::from_lookup(lookup(&[("BACKEND_URL", "http://api:8000/")])).unwrap();
        assert_eq!(config.api_base_url, "http://api:8000");
        assert_eq!(config.port, 8501);
    }

    #[test]
    fn env_example_lists_every_key_read() {
        let example: HashMap<String, String> = include_str!("../.env.example")
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();
        let read = std::cell::RefCell::new(Vec::new());
        let tracking = |key: &str| {
            read.borrow_mut().push(key.to_string());
            example.get(key).cloned()
        };

        let config = Config::from_lookup(tracking).unwrap();
        let dashboard = DashboardConfig::from_lookup(tracking).unwrap();
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert!(config.cors_extra_origins.is_empty());
        assert_eq!(dashboard.listen_addr(), "0.0.0.0:8501");

        let missing: Vec<String> = read
            .into_inner()
            .into_iter()
            .filter(|key| !example.contains_key(key))
            .collect();
        assert!(missing.is_empty(), "keys missing from .env.example: {missing:?}");
    }
}
