use std::{fmt::Display, time::Duration};

use reqwest::{Method, header::HeaderMap};
use serde::{Serialize, Serializer, ser::Error as _};
use serde_json::Value;
use url::{Url, form_urlencoded};

use crate::api::types::{ApiResult, ApiSdkError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self { path: path.into(), method }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, HttpMethod::Get)
    }
}

/// Named parameters for one endpoint call, kept in insertion order.
///
/// Values are plain JSON values; which of them can actually be sent is decided
/// by [`build`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    entries: Vec<(String, Value)>,
}

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from any struct that serializes to a JSON object. Field
    /// order follows the struct's declaration order.
    pub fn from_params<T: Serialize + ?Sized>(params: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(params)
            .map_err(|e| ApiSdkError::invalid_parameter("parameters", e.to_string()))?;

        match value {
            Value::Object(map) => Ok(Self { entries: map.into_iter().collect() }),
            Value::Null => Ok(Self::new()),
            _ => Err(ApiSdkError::invalid_parameter(
                "parameters",
                "parameters must serialize to a map of named fields",
            )),
        }
    }

    /// Sets `key`, replacing an earlier value in place so the order stays stable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Transport settings handed to the HTTP client untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout: Some(timeout), ..Default::default() }
    }
}

/// A fully normalized request, ready for the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub endpoint: Endpoint,
    pub query: Vec<(String, String)>,
    pub options: RequestOptions,
}

impl RequestDescriptor {
    /// The query as `application/x-www-form-urlencoded` text, without the `?`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new()).extend_pairs(&self.query).finish()
    }

    pub fn url(&self, server_url: &str) -> ApiResult<Url> {
        let joined = format!(
            "{}/{}",
            server_url.trim_end_matches('/'),
            self.endpoint.path.trim_start_matches('/')
        );
        let mut url = Url::parse(&joined).map_err(|e| {
            ApiSdkError::ConfigError(format!("invalid server url '{}': {}", server_url, e))
        })?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

/// Normalizes an endpoint call into a [`RequestDescriptor`].
///
/// Null values are dropped. Scalars become one entry each. A list becomes one
/// entry per element under the same key (`addrs=a&addrs=b`), in list order.
/// Objects, nested lists and nulls inside a list are rejected with
/// `InvalidParameterKind`. No semantic validation happens here.
pub fn build(
    endpoint: Endpoint,
    parameters: Option<&ParameterBag>,
    options: Option<RequestOptions>,
) -> ApiResult<RequestDescriptor> {
    if endpoint.path.trim().is_empty() {
        return Err(ApiSdkError::invalid_parameter("endpoint", "path must not be empty"));
    }

    let mut query = Vec::new();
    if let Some(bag) = parameters {
        for (key, value) in bag.iter() {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items {
                        query.push((key.to_string(), scalar_to_string(key, item)?));
                    }
                }
                scalar => query.push((key.to_string(), scalar_to_string(key, scalar)?)),
            }
        }
    }

    Ok(RequestDescriptor { endpoint, query, options: options.unwrap_or_default() })
}

fn scalar_to_string(key: &str, value: &Value) -> ApiResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(ApiSdkError::invalid_parameter(key, "lists cannot contain null")),
        Value::Array(_) => {
            Err(ApiSdkError::invalid_parameter(key, "nested lists are not supported"))
        }
        Value::Object(_) => {
            Err(ApiSdkError::invalid_parameter(key, "objects cannot be sent as query parameters"))
        }
    }
}

/// `serialize_with` target for optional floats. JSON has no NaN or infinity,
/// so such values would otherwise turn into `null` and vanish from the query.
pub fn finite_float<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if !v.is_finite() => {
            Err(S::Error::custom(format!("{} is not a finite number", v)))
        }
        _ => value.serialize(serializer),
    }
}
