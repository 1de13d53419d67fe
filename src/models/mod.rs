//! Billing API data models.
//!
//! Every model keeps the JSON object it was built from and reads typed
//! values out of it on demand, so properties this crate does not declare
//! survive a round trip unchanged.

pub mod configs;
pub mod evaluate;
pub mod price;
pub mod shared;

pub use configs::*;
pub use evaluate::{
    EvaluatePriceGroup, GroupingValue, PriceEvaluateBody, PriceEvaluateMultipleParams,
    PriceEvaluateMultipleResponse, PriceEvaluateMultipleResponseData, PriceEvaluateParams,
    PriceEvaluateResponse, PriceEvaluation,
};
pub use price::*;
pub use shared::{
    Cadence, ConversionRateConfig, ConversionRateTier, ConversionRateTieredConfig,
    ConversionRateUnitConfig, DurationUnit, Metadata, NewBillingCycleConfiguration,
    NewDimensionalPriceConfiguration, TieredConversionRateConfig, UnitConversionRateConfig,
};
