use crate::errors::ConfigError;
use reqwest::Url;
use std::{env, time::Duration};

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub timeout: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base = resolve_api_base(env::var("ATTENDANCE_API_URL").ok().as_deref())?;
        let timeout = resolve_timeout(env::var("ATTENDANCE_API_TIMEOUT_SECS").ok().as_deref())?;
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            api_base,
            timeout,
            port,
        })
    }
}

pub fn resolve_api_base(value: Option<&str>) -> Result<Url, ConfigError> {
    let raw = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_API_URL);
    // Relative joins drop the last path segment unless it ends with '/'.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized).map_err(|err| ConfigError::ApiUrl {
        value: raw.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::ApiUrl {
            value: raw.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

pub fn resolve_timeout(value: Option<&str>) -> Result<Duration, ConfigError> {
    match value.map(str::trim) {
        None | Some("") => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::Timeout(raw.to_string())),
        },
    }
}
