use std::env;
use std::str::FromStr;
use std::time::Duration;

use reqwest::header::HeaderValue;

use crate::utils::errors::ConfigError;

const DEFAULT_API_URL: &str = "https://api.twitter.com/1.1";
const DEFAULT_DB_PATH: &str = "/tmp/timeline-db";
const DEFAULT_LOG_DIR: &str = "/tmp/logs";
const DEFAULT_CACHE_LIMIT: usize = 300;
const DEFAULT_PAGE_SIZE: u32 = 25;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    api_url: String,
    access_token: String,
    db_path: String,
    log_dir: String,
    cache_limit: usize,
    page_size: u32,
    request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any name -> value lookup, so tests do not have
    /// to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("TIMELINE_ACCESS_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("TIMELINE_ACCESS_TOKEN"))?;
        if HeaderValue::from_str(&format!("Bearer {}", access_token)).is_err() {
            return Err(ConfigError::InvalidToken("TIMELINE_ACCESS_TOKEN"));
        }
        let api_url = lookup("TIMELINE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let db_path = lookup("TIMELINE_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let log_dir = lookup("TIMELINE_LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());
        let cache_limit = parse_number(&lookup, "TIMELINE_CACHE_LIMIT", DEFAULT_CACHE_LIMIT)?;
        let page_size = parse_number(&lookup, "TIMELINE_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        let timeout_secs = parse_number(&lookup, "TIMELINE_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token,
            db_path,
            log_dir,
            cache_limit,
            page_size,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn api_url(&self) -> &String {
        &self.api_url
    }

    pub fn access_token(&self) -> &String {
        &self.access_token
    }

    pub fn db_path(&self) -> &String {
        &self.db_path
    }

    pub fn log_dir(&self) -> &String {
        &self.log_dir
    }

    pub fn cache_limit(&self) -> usize {
        self.cache_limit
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn parse_number<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}
