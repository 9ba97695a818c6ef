use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const SERVER_URL_ENV_VAR: &str = "TB_API_URL";
const TIMEOUT_ENV_VAR: &str = "TB_API_TIMEOUT_MS";

/// Where the `chifra daemon` lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBaseConfig {
    pub server_url: String,
    /// Client-wide timeout; a per-request timeout in `RequestOptions` wins.
    pub timeout: Option<Duration>,
}

impl Default for ApiBaseConfig {
    fn default() -> Self {
        Self { server_url: DEFAULT_SERVER_URL.to_string(), timeout: None }
    }
}

impl ApiBaseConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self { server_url: server_url.into(), timeout: None }
    }

    /// Reads `TB_API_URL` and `TB_API_TIMEOUT_MS` from the process environment.
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let server_url = lookup(SERVER_URL_ENV_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let timeout = match lookup(TIMEOUT_ENV_VAR) {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|e| {
                    ApiSdkError::ConfigError(format!(
                        "{} must be milliseconds: {}",
                        TIMEOUT_ENV_VAR, e
                    ))
                })?;
                Some(Duration::from_millis(ms))
            }
            None => None,
        };

        Ok(Self { server_url, timeout })
    }
}

#[derive(Error, Debug)]
pub enum ApiSdkError {
    /// A parameter value could not be expressed as query entries. Raised before
    /// any network traffic.
    #[error("invalid parameter `{key}`: {reason}")]
    InvalidParameterKind { key: String, reason: String },

    /// The request never completed or the server answered with a non-2xx
    /// status. `body` holds the raw response text when one was read.
    #[error("transport error: {message}")]
    TransportError { status: Option<u16>, body: Option<String>, message: String },

    /// A 2xx response whose body did not match any expected shape.
    #[error("could not decode response: {reason}")]
    DecodeError { reason: String, raw: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl ApiSdkError {
    pub(crate) fn invalid_parameter(key: &str, reason: impl Into<String>) -> Self {
        ApiSdkError::InvalidParameterKind { key: key.to_string(), reason: reason.into() }
    }

    pub(crate) fn decode(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        ApiSdkError::DecodeError { reason: reason.into(), raw: raw.into() }
    }

    /// HTTP status of a failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiSdkError::TransportError { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiSdkError {
    fn from(error: reqwest::Error) -> Self {
        ApiSdkError::TransportError {
            status: error.status().map(|s| s.as_u16()),
            body: None,
            message: error.to_string(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiSdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_daemon() {
        let config = ApiBaseConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, ApiBaseConfig::default());
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ApiBaseConfig::from_lookup(lookup(&[
            ("TB_API_URL", "http://indexer:9090"),
            ("TB_API_TIMEOUT_MS", "1500"),
        ]))
        .unwrap();

        assert_eq!(config.server_url, "http://indexer:9090");
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn rejects_bad_timeout() {
        let result = ApiBaseConfig::from_lookup(lookup(&[("TB_API_TIMEOUT_MS", "soon")]));

        assert!(matches!(result, Err(ApiSdkError::ConfigError(_))));
    }
}
