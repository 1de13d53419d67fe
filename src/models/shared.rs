//! Models shared by every price variant.

use std::collections::BTreeMap;

/// Free-form key/value metadata. A null value deletes the key server-side.
pub type Metadata = BTreeMap<String, Option<String>>;

string_enum! {
    /// Billing recurrence period of a price.
    pub enum Cadence {
        Annual => "annual",
        SemiAnnual => "semi_annual",
        Monthly => "monthly",
        Quarterly => "quarterly",
        OneTime => "one_time",
        Custom => "custom",
    }
}

string_enum! {
    /// Unit of a billing or invoicing cycle duration.
    pub enum DurationUnit {
        Day => "day",
        Month => "month",
    }
}

model! {
    /// Cycle on which a price is billed or invoiced, when it differs from the plan's.
    pub struct NewBillingCycleConfiguration {
        /// Length of the cycle, in `duration_unit`s.
        required duration: i64,
        required duration_unit: DurationUnit,
    }
}

model! {
    /// Links a price to a dimensional price group.
    pub struct NewDimensionalPriceConfiguration {
        /// Dimension values, in the order of the group's dimensions.
        required dimension_values: Vec<String>,
        nullable dimensional_price_group_id: String,
        nullable external_dimensional_price_group_id: String,
    }
}

model! {
    pub struct ConversionRateUnitConfig {
        /// Amount per unit of overage.
        required unit_amount: String,
    }
}

model! {
    pub struct ConversionRateTier {
        /// Exclusive tier starting value.
        required first_unit: f64,
        /// Amount per unit of overage.
        required unit_amount: String,
        /// Inclusive tier ending value. Null means the tier is unbounded.
        nullable last_unit: f64,
    }
}

model! {
    pub struct ConversionRateTieredConfig {
        required tiers: Vec<ConversionRateTier>,
    }
}

model! {
    /// Converts usage to the price currency at a flat rate.
    pub struct UnitConversionRateConfig tag conversion_rate_type = "unit" {
        required unit_config: ConversionRateUnitConfig,
    }
}

model! {
    /// Converts usage to the price currency with tiered rates.
    pub struct TieredConversionRateConfig tag conversion_rate_type = "tiered" {
        required tiered_config: ConversionRateTieredConfig,
    }
}

discriminated_union! {
    /// Credit-to-currency conversion applied to a price.
    pub enum ConversionRateConfig tag conversion_rate_type {
        Unit(UnitConversionRateConfig),
        Tiered(TieredConversionRateConfig),
    }
}
