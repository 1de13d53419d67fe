//! Price evaluation API client.

use std::sync::Arc;

use crate::{
    client::ClientInner,
    errors::Result,
    models::{
        PriceEvaluateMultipleParams, PriceEvaluateMultipleResponse, PriceEvaluateParams,
        PriceEvaluateResponse,
    },
};

/// Client for price operations.
#[derive(Clone)]
pub struct PricesClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl PricesClient {
    /// Evaluate up to 100 stored or inline prices over a timeframe.
    ///
    /// Each evaluation may filter and group the customer's events; results
    /// come back in request order.
    pub fn evaluate_multiple(
        &self,
        params: &PriceEvaluateMultipleParams,
    ) -> Result<PriceEvaluateMultipleResponse> {
        self.inner.execute(params)
    }

    /// Evaluate one stored price over a timeframe.
    pub fn evaluate(&self, params: &PriceEvaluateParams) -> Result<PriceEvaluateResponse> {
        self.inner.execute(params)
    }
}
