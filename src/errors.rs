use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error envelope returned by the billing API.
///
/// The API answers failed requests with a problem-details body
/// (`type`, `status`, `title`, `detail`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct APIError {
    pub status: u16,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Raw response body for debugging (when available).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

impl APIError {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status,
            error_type: None,
            title: Some(title.into()),
            detail: None,
            raw_body: None,
        }
    }

    /// Human readable message, preferring `detail` over `title`.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("request failed")
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = &self.error_type {
            write!(f, "{} ({}): {}", kind, self.status, self.message())
        } else {
            write!(f, "{}: {}", self.status, self.message())
        }
    }
}

impl std::error::Error for APIError {}

/// Failure reported by a [`Transport`](crate::Transport) before any API response was read.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

/// Convenience alias for fallible results.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type surfaced by the models and the client.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is absent from the raw data or holds JSON null.
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },

    /// An enum-typed field holds a value outside the known set.
    #[error("invalid value {value:?} for field `{field}`")]
    InvalidEnumValue { field: String, value: String },

    /// A discriminated union could not pick a variant.
    #[error("{}", unknown_variant_message(.field, .value.as_deref()))]
    UnknownVariant { field: String, value: Option<String> },

    /// A raw value does not have the JSON shape its field declares.
    #[error("invalid field `{field}`: {message}")]
    InvalidField { field: String, message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(#[from] APIError),

    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl Error {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Error::MissingRequiredField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid_field(field: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::InvalidField {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Dotted path of the offending field for model errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::MissingRequiredField { field }
            | Error::InvalidEnumValue { field, .. }
            | Error::UnknownVariant { field, .. }
            | Error::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

fn unknown_variant_message(field: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("unknown variant {value:?} for discriminator `{field}`"),
        None => format!("missing discriminator `{field}`"),
    }
}
