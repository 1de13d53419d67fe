use std::{sync::Arc, time::Duration};

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    errors::{Error, Result},
    http::{ApiRequest, Endpoint, HeaderList, Transport},
    prices::PricesClient,
    raw::Model,
    DEFAULT_BASE_URL, DEFAULT_CLIENT_HEADER, DEFAULT_REQUEST_TIMEOUT,
};

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// API root, e.g. `https://api.example.com`. Defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Secret key sent as a bearer token.
    pub api_key: Option<String>,
    pub client_header: Option<String>,
    /// Override the request timeout (defaults to 60s).
    pub timeout: Option<Duration>,
    /// Default extra headers applied to all requests.
    pub default_headers: Option<HeaderList>,
    /// Validate response models after decoding (off by default).
    pub response_validation: Option<bool>,
}

impl Config {
    /// Parsed base URL.
    pub fn base_url(&self) -> Result<Url> {
        let source = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        let url =
            Url::parse(source).map_err(|err| Error::Config(format!("invalid base url: {err}")))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!("invalid base url: {source}")));
        }
        Ok(url)
    }

    /// Appends `segments` to the base URL path, percent-encoding each one.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url()?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Config("base url cannot carry a path".to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

/// Billing API client. Cheap to clone; clones share one transport.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    config: Config,
    api_key: String,
    client_header: String,
    request_timeout: Duration,
    default_headers: HeaderList,
    response_validation: bool,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub fn new(cfg: Config, transport: impl Transport + 'static) -> Result<Self> {
        Self::with_transport(cfg, Arc::new(transport))
    }

    /// Like [`Client::new`] for a transport that is already shared.
    pub fn with_transport(cfg: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        // Fail on a bad base URL here rather than on the first call.
        cfg.base_url()?;

        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config("api key is required".to_string()))?
            .to_string();

        let client_header = cfg
            .client_header
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CLIENT_HEADER.to_string());

        Ok(Self {
            inner: Arc::new(ClientInner {
                api_key,
                client_header,
                request_timeout: cfg.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
                default_headers: cfg.default_headers.clone().unwrap_or_default(),
                response_validation: cfg.response_validation.unwrap_or(false),
                config: cfg,
                transport,
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn prices(&self) -> PricesClient {
        PricesClient {
            inner: self.inner.clone(),
        }
    }
}

impl ClientInner {
    fn headers(&self) -> HeaderList {
        let mut headers = HeaderList::new()
            .with("Authorization", format!("Bearer {}", self.api_key))
            .with("Accept", "application/json")
            .with("Content-Type", "application/json")
            .with("User-Agent", self.client_header.clone());
        for entry in self.default_headers.iter() {
            headers.push(entry.clone());
        }
        headers
    }

    /// Validates `params`, sends them and decodes the response into `T`.
    pub(crate) fn execute<E, T>(&self, params: &E) -> Result<T>
    where
        E: Endpoint,
        T: Model + DeserializeOwned,
    {
        params.validate_params()?;

        let request = ApiRequest {
            method: E::METHOD,
            url: params.url(&self.config)?,
            headers: self.headers(),
            body: params.body().map(|raw| Value::Object(raw.as_map().clone())),
            timeout: Some(self.request_timeout),
        };

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "billing.http",
            method = %request.method,
            path = %request.path(),
        );
        #[cfg(feature = "tracing")]
        let _guard = span.enter();

        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();
        let value = match self.transport.send(request) {
            Ok(value) => value,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    error = %err,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "request failed"
                );
                return Err(err);
            }
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request completed"
        );

        let parsed = serde_json::from_value::<T>(value).map_err(Error::Serialization)?;
        if self.response_validation {
            parsed.validate()?;
        }
        Ok(parsed)
    }
}
