use std::{fmt, time::Duration};

use serde_json::Value;
use url::Url;

use crate::{
    client::Config,
    errors::{APIError, Error, Result},
    raw::RawData,
};

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured header list with validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderList(Vec<HeaderEntry>);

impl HeaderList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a header entry. Panics if key or value is empty/whitespace-only.
    ///
    /// # Panics
    /// Panics if the header key or value is empty or contains only whitespace.
    pub fn push(&mut self, entry: HeaderEntry) {
        assert!(
            entry.is_valid(),
            "Invalid header: key and value must be non-empty (got key={:?}, value={:?})",
            entry.key,
            entry.value
        );
        self.0.push(entry);
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(HeaderEntry::new(key.into(), value.into()));
        self
    }

    /// Last value set for `key`, compared case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|entry| entry.key.eq_ignore_ascii_case(key))
            .map(|entry| entry.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    pub fn is_valid(&self) -> bool {
        !(self.key.trim().is_empty() || self.value.trim().is_empty())
    }
}

/// A fully prepared API call handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderList,
    /// JSON body, sent as-is. `None` for body-less calls.
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Request path, e.g. `/v1/prices/evaluate`.
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// Sends prepared requests and returns the decoded JSON response body.
///
/// Implementations report non-2xx responses as [`Error::Api`], typically via
/// [`parse_api_error`], and connection failures as [`Error::Transport`].
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// An API operation: where it lives and what it sends.
pub trait Endpoint {
    const METHOD: Method;

    /// Unencoded path segments below the base URL.
    fn path_segments(&self) -> Vec<&str>;

    fn body(&self) -> Option<&RawData>;

    /// Client-side checks run before the request is sent.
    fn validate_params(&self) -> Result<()>;

    /// Absolute URL of this call against `config`'s base URL.
    fn url(&self, config: &Config) -> Result<Url> {
        config.endpoint_url(&self.path_segments())
    }
}

/// Builds an [`Error::Api`] from a non-2xx status and its response body.
///
/// Problem-details bodies (`type`, `title`, `detail`, `status`) are decoded;
/// anything else is kept verbatim as the detail.
pub fn parse_api_error(status: u16, body: &str) -> Error {
    if body.trim().is_empty() {
        return APIError {
            status,
            error_type: None,
            title: Some(status_text(status).to_string()),
            detail: None,
            raw_body: None,
        }
        .into();
    }

    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        let title = text("title");
        let detail = text("detail");
        if title.is_some() || detail.is_some() {
            let status_override = obj
                .get("status")
                .and_then(Value::as_u64)
                .and_then(|v| u16::try_from(v).ok())
                .unwrap_or(status);
            return APIError {
                status: status_override,
                error_type: text("type"),
                title,
                detail,
                raw_body: Some(body.to_string()),
            }
            .into();
        }
    }

    APIError {
        status,
        error_type: None,
        title: Some(status_text(status).to_string()),
        detail: Some(body.to_string()),
        raw_body: Some(body.to_string()),
    }
    .into()
}

fn status_text(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        413 => "Payload Too Large",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "request failed",
    }
}
