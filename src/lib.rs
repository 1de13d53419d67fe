//! Typed models and a minimal client for the billing API's price evaluation
//! endpoints.
//!
//! Models keep the JSON object they were built from. Optional fields remember
//! whether they were left unset or set to `null`, properties this crate does
//! not know survive a round trip, and [`Price`] picks its variant from the
//! `model_type` discriminator.
//!
//! ```ignore
//! use billing_models::{Config, Client, MockTransport, PriceEvaluateMultipleParams};
//!
//! let client = Client::new(
//!     Config { api_key: Some("sk_test".into()), ..Default::default() },
//!     MockTransport::default(),
//! )?;
//! let params = PriceEvaluateMultipleParams::new()
//!     .with_timeframe_start(start)
//!     .with_timeframe_end(end);
//! let response = client.prices().evaluate_multiple(&params)?;
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::result_large_err)]

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.withorb.com";

/// Default User-Agent header value.
pub(crate) const DEFAULT_CLIENT_HEADER: &str =
    concat!("billing-models-rust/", env!("CARGO_PKG_VERSION"));

/// Default request timeout (60 seconds).
pub const DEFAULT_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[macro_use]
mod macros;

mod client;
mod errors;
mod http;
mod identifiers;
#[cfg(feature = "mock")]
mod mock;
pub mod models;
mod prices;
pub mod raw;

pub use client::{Client, Config};
pub use errors::{APIError, Error, Result, TransportError};
pub use http::{parse_api_error, ApiRequest, Endpoint, HeaderEntry, HeaderList, Method, Transport};
pub use identifiers::{CustomerId, ItemId, PriceId};
#[cfg(feature = "mock")]
pub use mock::{fixtures, MockConfig, MockTransport};
pub use models::{
    Cadence, ConversionRateConfig, GroupingValue, Metadata, Price, PriceEvaluateBody,
    PriceEvaluateMultipleParams, PriceEvaluateMultipleResponse, PriceEvaluateParams,
    PriceEvaluateResponse, PriceEvaluation,
};
pub use prices::PricesClient;
pub use raw::{FieldSpec, FieldValue, Model, Presence, RawData, Tagged};
