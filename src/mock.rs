#![cfg(feature = "mock")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use serde_json::Value;

use crate::{
    errors::{Error, Result, TransportError},
    http::{parse_api_error, ApiRequest, Transport},
};

/// In-memory mock configuration for offline tests.
#[derive(Default)]
pub struct MockConfig {
    pub responses: Vec<Result<Value>>,
}

impl MockConfig {
    /// Queue a successful JSON response body.
    pub fn with_response(mut self, body: Value) -> Self {
        self.responses.push(Ok(body));
        self
    }

    /// Queue a non-2xx response, decoded the way a real transport would.
    pub fn with_api_error(mut self, status: u16, body: impl AsRef<str>) -> Self {
        self.responses.push(Err(parse_api_error(status, body.as_ref())));
        self
    }

    pub fn with_error(mut self, err: Error) -> Self {
        self.responses.push(Err(err));
        self
    }
}

/// [`Transport`] that replays queued responses and records every request.
///
/// Clones share the queue and the request log, so a test can keep one
/// handle while the client owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new(cfg: MockConfig) -> Self {
        Self {
            inner: Arc::new(MockInner {
                responses: Mutex::new(VecDeque::from(cfg.responses)),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.lock().expect("lock poisoned").clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.inner
            .requests
            .lock()
            .expect("lock poisoned")
            .last()
            .cloned()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.inner.responses.lock().expect("lock poisoned").len()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: ApiRequest) -> Result<Value> {
        self.inner
            .requests
            .lock()
            .expect("lock poisoned")
            .push(request);
        self.inner
            .responses
            .lock()
            .expect("lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no mock response queued").into()))
    }
}

pub mod fixtures {
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    use crate::models::{
        Cadence, NewFloatingTieredPrice, NewFloatingUnitPrice, Price, PriceEvaluateMultipleParams,
        PriceEvaluation, Tier, TieredConfig, UnitConfig,
    };

    pub fn unit_price() -> Price {
        NewFloatingUnitPrice::new()
            .with_cadence(Cadence::Monthly)
            .with_currency("USD")
            .with_item_id("item_api_calls")
            .with_name("API calls")
            .with_unit_config(UnitConfig::new().with_unit_amount("0.002"))
            .into()
    }

    pub fn tiered_price() -> Price {
        NewFloatingTieredPrice::new()
            .with_cadence(Cadence::Monthly)
            .with_currency("USD")
            .with_item_id("item_storage")
            .with_name("Storage")
            .with_tiered_config(TieredConfig::new().with_tiers(vec![
                Tier::new()
                    .with_first_unit(0.0)
                    .with_last_unit(1000.0)
                    .with_unit_amount("0.10"),
                {
                    let mut tier = Tier::new().with_first_unit(1000.0).with_unit_amount("0.05");
                    tier.set_last_unit(None);
                    tier
                },
            ]))
            .into()
    }

    /// January 2025 evaluation of an inline unit price grouped by region.
    pub fn evaluate_multiple_params() -> PriceEvaluateMultipleParams {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single();
        let end = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).single();
        PriceEvaluateMultipleParams::new()
            .with_timeframe_start(start.expect("fixed date"))
            .with_timeframe_end(end.expect("fixed date"))
            .with_external_customer_id("acme-corp")
            .with_price_evaluations(vec![PriceEvaluation::new()
                .with_price(unit_price())
                .with_grouping_keys(vec!["region".to_string()])])
    }

    pub fn evaluate_multiple_response() -> Value {
        json!({
            "data": [{
                "currency": "USD",
                "inline_price_index": 0,
                "price_groups": [
                    {"amount": "2.50", "grouping_values": ["us-east"], "quantity": 1250},
                    {"amount": "0.40", "grouping_values": ["eu-west"], "quantity": 200}
                ]
            }]
        })
    }

    pub fn evaluate_response() -> Value {
        json!({
            "data": [{"amount": "12.00", "grouping_values": [], "quantity": 120}]
        })
    }
}
