//! Price evaluation requests and responses.
//!
//! `POST /v1/prices/evaluate` evaluates stored or inline prices against a
//! customer's events in a time window; `POST /v1/prices/{price_id}/evaluate`
//! evaluates a single stored price.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::price::Price;
use crate::{
    errors::{Error, Result},
    http::{Endpoint, Method},
    identifiers::{CustomerId, PriceId},
    raw::{FieldValue, Model, RawData},
};

model! {
    /// One price to evaluate: a stored price (`price_id` / `external_price_id`)
    /// or an inline `price` definition.
    pub struct PriceEvaluation {
        nullable external_price_id: String,
        /// Boolean expression selecting the events to evaluate, e.g. `region = 'us-east'`.
        nullable filter: String,
        /// Property expressions to group results by, e.g. `[region, model]`.
        optional grouping_keys: Vec<String>,
        /// Inline price definition to evaluate instead of a stored price.
        nullable price: Price,
        nullable price_id: PriceId,
    }
}

model! {
    /// Body of `POST /v1/prices/evaluate`.
    pub struct PriceEvaluateMultipleParams {
        /// Exclusive upper bound of the evaluation window.
        required timeframe_end: DateTime<Utc>,
        /// Inclusive lower bound of the evaluation window.
        required timeframe_start: DateTime<Utc>,
        nullable customer_id: CustomerId,
        nullable external_customer_id: String,
        /// Prices to evaluate, at most 100.
        optional price_evaluations: Vec<PriceEvaluation>,
    }
}

impl PriceEvaluateMultipleParams {
    /// Raw request body, exactly as it will be sent.
    pub fn raw_body_data(&self) -> &RawData {
        self.raw_data()
    }
}

impl Endpoint for PriceEvaluateMultipleParams {
    const METHOD: Method = Method::Post;

    fn path_segments(&self) -> Vec<&str> {
        vec!["v1", "prices", "evaluate"]
    }

    fn body(&self) -> Option<&RawData> {
        Some(self.raw_data())
    }

    fn validate_params(&self) -> Result<()> {
        self.validate()
    }
}

model! {
    /// Body of `POST /v1/prices/{price_id}/evaluate`.
    pub struct PriceEvaluateBody {
        required timeframe_end: DateTime<Utc>,
        required timeframe_start: DateTime<Utc>,
        nullable customer_id: CustomerId,
        nullable external_customer_id: String,
        nullable filter: String,
        optional grouping_keys: Vec<String>,
    }
}

/// Parameters of `POST /v1/prices/{price_id}/evaluate`.
///
/// The price id travels in the path; everything else is the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceEvaluateParams {
    price_id: PriceId,
    body: PriceEvaluateBody,
}

impl PriceEvaluateParams {
    pub fn new(price_id: impl Into<PriceId>, body: PriceEvaluateBody) -> Self {
        Self {
            price_id: price_id.into(),
            body,
        }
    }

    pub fn price_id(&self) -> &PriceId {
        &self.price_id
    }

    pub fn body(&self) -> &PriceEvaluateBody {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut PriceEvaluateBody {
        &mut self.body
    }

    pub fn raw_body_data(&self) -> &RawData {
        self.body.raw_data()
    }
}

impl Endpoint for PriceEvaluateParams {
    const METHOD: Method = Method::Post;

    fn path_segments(&self) -> Vec<&str> {
        vec!["v1", "prices", self.price_id.as_str(), "evaluate"]
    }

    fn body(&self) -> Option<&RawData> {
        Some(self.body.raw_data())
    }

    fn validate_params(&self) -> Result<()> {
        if self.price_id.is_empty() {
            return Err(Error::missing("price_id"));
        }
        self.body.validate()
    }
}

/// One value of a grouping key in evaluation results.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupingValue {
    String(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue for GroupingValue {
    fn to_json(&self) -> Value {
        match self {
            GroupingValue::String(s) => Value::String(s.clone()),
            GroupingValue::Number(n) => Value::from(*n),
            GroupingValue::Bool(b) => Value::Bool(*b),
        }
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        match value {
            Value::String(s) => Ok(GroupingValue::String(s.clone())),
            Value::Bool(b) => Ok(GroupingValue::Bool(*b)),
            Value::Number(n) => n
                .as_f64()
                .map(GroupingValue::Number)
                .ok_or_else(|| Error::invalid_field(path, format!("unrepresentable number {n}"))),
            other => Err(Error::invalid_field(
                path,
                format!("expected a string, number or boolean, got {other}"),
            )),
        }
    }
}

model! {
    /// Amount and quantity for one combination of grouping values.
    pub struct EvaluatePriceGroup {
        /// Price amount for the group, as a decimal string.
        required amount: String,
        /// Values of the grouping keys, in the order the keys were requested.
        required grouping_values: Vec<GroupingValue>,
        /// Usage quantity of the group.
        required quantity: f64,
    }
}

model! {
    pub struct PriceEvaluateMultipleResponseData {
        /// Currency of the evaluated amounts.
        required currency: String,
        required price_groups: Vec<EvaluatePriceGroup>,
        nullable external_price_id: String,
        /// Index of the inline price in the request, when the price was inline.
        nullable inline_price_index: i64,
        nullable price_id: PriceId,
    }
}

model! {
    pub struct PriceEvaluateMultipleResponse {
        required data: Vec<PriceEvaluateMultipleResponseData>,
    }
}

model! {
    pub struct PriceEvaluateResponse {
        required data: Vec<EvaluatePriceGroup>,
    }
}
