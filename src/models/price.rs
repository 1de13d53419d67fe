//! Inline price definitions and the [`Price`] union.
//!
//! Every variant shares the same base fields and adds one config object
//! named after its `model_type`.

use super::{configs::*, shared::*};
use crate::{errors::Result, identifiers::ItemId};

/// Declares a price variant: the shared base fields plus the variant's own.
macro_rules! price_variant {
    (
        $(#[$meta:meta])*
        pub struct $name:ident = $tag:literal {
            $($config:tt)*
        }
    ) => {
        model! {
            $(#[$meta])*
            pub struct $name tag model_type = $tag {
                /// Cadence to bill this price on.
                required cadence: Cadence,
                /// ISO 4217 currency code (or custom pricing unit) the price is billed in.
                required currency: String,
                /// Item the price is associated with.
                required item_id: ItemId,
                /// Name shown on invoices.
                required name: String,
                $($config)*
                /// Billable metric that feeds usage into this price.
                nullable billable_metric_id: String,
                /// Bill in advance instead of in arrears.
                nullable billed_in_advance: bool,
                nullable billing_cycle_configuration: NewBillingCycleConfiguration,
                /// Per-unit conversion rate when the price is in a custom pricing unit.
                nullable conversion_rate: f64,
                nullable conversion_rate_config: ConversionRateConfig,
                nullable dimensional_price_configuration: NewDimensionalPriceConfiguration,
                nullable external_price_id: String,
                /// Fixed quantity billed when the price has no billable metric.
                nullable fixed_price_quantity: f64,
                nullable invoice_grouping_key: String,
                nullable invoicing_cycle_configuration: NewBillingCycleConfiguration,
                nullable metadata: Metadata,
            }
        }
    };
}

price_variant! {
    /// Charges a constant amount per unit of usage.
    pub struct NewFloatingUnitPrice = "unit" {
        required unit_config: UnitConfig,
    }
}

price_variant! {
    /// Graduated tiers: each unit is charged at the rate of the tier it falls in.
    pub struct NewFloatingTieredPrice = "tiered" {
        required tiered_config: TieredConfig,
    }
}

price_variant! {
    /// Volume tiers: all units are charged at the rate of the tier the total falls in.
    pub struct NewFloatingBulkPrice = "bulk" {
        required bulk_config: BulkConfig,
    }
}

price_variant! {
    pub struct NewFloatingBulkWithFiltersPrice = "bulk_with_filters" {
        required bulk_with_filters_config: BulkWithFiltersConfig,
    }
}

price_variant! {
    pub struct NewFloatingPackagePrice = "package" {
        required package_config: PackageConfig,
    }
}

price_variant! {
    pub struct NewFloatingMatrixPrice = "matrix" {
        required matrix_config: MatrixConfig,
    }
}

price_variant! {
    pub struct NewFloatingThresholdTotalAmountPrice = "threshold_total_amount" {
        required threshold_total_amount_config: ThresholdTotalAmountConfig,
    }
}

price_variant! {
    pub struct NewFloatingTieredPackagePrice = "tiered_package" {
        required tiered_package_config: TieredPackageConfig,
    }
}

price_variant! {
    pub struct NewFloatingTieredWithMinimumPrice = "tiered_with_minimum" {
        required tiered_with_minimum_config: TieredWithMinimumConfig,
    }
}

price_variant! {
    pub struct NewFloatingGroupedTieredPrice = "grouped_tiered" {
        required grouped_tiered_config: GroupedTieredConfig,
    }
}

price_variant! {
    pub struct NewFloatingTieredPackageWithMinimumPrice = "tiered_package_with_minimum" {
        required tiered_package_with_minimum_config: TieredPackageWithMinimumConfig,
    }
}

price_variant! {
    pub struct NewFloatingPackageWithAllocationPrice = "package_with_allocation" {
        required package_with_allocation_config: PackageWithAllocationConfig,
    }
}

price_variant! {
    pub struct NewFloatingUnitWithPercentPrice = "unit_with_percent" {
        required unit_with_percent_config: UnitWithPercentConfig,
    }
}

price_variant! {
    pub struct NewFloatingMatrixWithAllocationPrice = "matrix_with_allocation" {
        required matrix_with_allocation_config: MatrixWithAllocationConfig,
    }
}

price_variant! {
    pub struct NewFloatingTieredWithProrationPrice = "tiered_with_proration" {
        required tiered_with_proration_config: TieredWithProrationConfig,
    }
}

price_variant! {
    pub struct NewFloatingUnitWithProrationPrice = "unit_with_proration" {
        required unit_with_proration_config: UnitWithProrationConfig,
    }
}

price_variant! {
    pub struct NewFloatingGroupedAllocationPrice = "grouped_allocation" {
        required grouped_allocation_config: GroupedAllocationConfig,
    }
}

price_variant! {
    pub struct NewFloatingBulkWithProrationPrice = "bulk_with_proration" {
        required bulk_with_proration_config: BulkWithProrationConfig,
    }
}

price_variant! {
    pub struct NewFloatingGroupedWithProratedMinimumPrice = "grouped_with_prorated_minimum" {
        required grouped_with_prorated_minimum_config: GroupedWithProratedMinimumConfig,
    }
}

price_variant! {
    pub struct NewFloatingGroupedWithMeteredMinimumPrice = "grouped_with_metered_minimum" {
        required grouped_with_metered_minimum_config: GroupedWithMeteredMinimumConfig,
    }
}

price_variant! {
    pub struct NewFloatingGroupedWithMinMaxThresholdsPrice = "grouped_with_min_max_thresholds" {
        required grouped_with_min_max_thresholds_config: GroupedWithMinMaxThresholdsConfig,
    }
}

price_variant! {
    pub struct NewFloatingMatrixWithDisplayNamePrice = "matrix_with_display_name" {
        required matrix_with_display_name_config: MatrixWithDisplayNameConfig,
    }
}

price_variant! {
    pub struct NewFloatingGroupedTieredPackagePrice = "grouped_tiered_package" {
        required grouped_tiered_package_config: GroupedTieredPackageConfig,
    }
}

price_variant! {
    pub struct NewFloatingMaxGroupTieredPackagePrice = "max_group_tiered_package" {
        required max_group_tiered_package_config: MaxGroupTieredPackageConfig,
    }
}

price_variant! {
    pub struct NewFloatingScalableMatrixWithUnitPricingPrice = "scalable_matrix_with_unit_pricing" {
        required scalable_matrix_with_unit_pricing_config: ScalableMatrixWithUnitPricingConfig,
    }
}

price_variant! {
    pub struct NewFloatingScalableMatrixWithTieredPricingPrice = "scalable_matrix_with_tiered_pricing" {
        required scalable_matrix_with_tiered_pricing_config: ScalableMatrixWithTieredPricingConfig,
    }
}

price_variant! {
    pub struct NewFloatingCumulativeGroupedBulkPrice = "cumulative_grouped_bulk" {
        required cumulative_grouped_bulk_config: CumulativeGroupedBulkConfig,
    }
}

price_variant! {
    pub struct NewFloatingCumulativeGroupedAllocationPrice = "cumulative_grouped_allocation" {
        required cumulative_grouped_allocation_config: CumulativeGroupedAllocationConfig,
    }
}

price_variant! {
    /// Bills at least `minimum_amount` per period.
    pub struct NewFloatingMinimumPrice = "minimum" {
        required minimum_config: MinimumConfig,
    }
}

price_variant! {
    /// Bills a percentage of the other charges.
    pub struct NewFloatingPercentPrice = "percent" {
        required percent_config: PercentConfig,
    }
}

price_variant! {
    /// Rates each event by a per-unit rate carried in the event itself.
    pub struct NewFloatingEventOutputPrice = "event_output" {
        required event_output_config: EventOutputConfig,
    }
}

discriminated_union! {
    /// An inline price definition, resolved by its `model_type`.
    pub enum Price tag model_type {
        Unit(NewFloatingUnitPrice),
        Tiered(NewFloatingTieredPrice),
        Bulk(NewFloatingBulkPrice),
        BulkWithFilters(NewFloatingBulkWithFiltersPrice),
        Package(NewFloatingPackagePrice),
        Matrix(NewFloatingMatrixPrice),
        ThresholdTotalAmount(NewFloatingThresholdTotalAmountPrice),
        TieredPackage(NewFloatingTieredPackagePrice),
        TieredWithMinimum(NewFloatingTieredWithMinimumPrice),
        GroupedTiered(NewFloatingGroupedTieredPrice),
        TieredPackageWithMinimum(NewFloatingTieredPackageWithMinimumPrice),
        PackageWithAllocation(NewFloatingPackageWithAllocationPrice),
        UnitWithPercent(NewFloatingUnitWithPercentPrice),
        MatrixWithAllocation(NewFloatingMatrixWithAllocationPrice),
        TieredWithProration(NewFloatingTieredWithProrationPrice),
        UnitWithProration(NewFloatingUnitWithProrationPrice),
        GroupedAllocation(NewFloatingGroupedAllocationPrice),
        BulkWithProration(NewFloatingBulkWithProrationPrice),
        GroupedWithProratedMinimum(NewFloatingGroupedWithProratedMinimumPrice),
        GroupedWithMeteredMinimum(NewFloatingGroupedWithMeteredMinimumPrice),
        GroupedWithMinMaxThresholds(NewFloatingGroupedWithMinMaxThresholdsPrice),
        MatrixWithDisplayName(NewFloatingMatrixWithDisplayNamePrice),
        GroupedTieredPackage(NewFloatingGroupedTieredPackagePrice),
        MaxGroupTieredPackage(NewFloatingMaxGroupTieredPackagePrice),
        ScalableMatrixWithUnitPricing(NewFloatingScalableMatrixWithUnitPricingPrice),
        ScalableMatrixWithTieredPricing(NewFloatingScalableMatrixWithTieredPricingPrice),
        CumulativeGroupedBulk(NewFloatingCumulativeGroupedBulkPrice),
        CumulativeGroupedAllocation(NewFloatingCumulativeGroupedAllocationPrice),
        Minimum(NewFloatingMinimumPrice),
        Percent(NewFloatingPercentPrice),
        EventOutput(NewFloatingEventOutputPrice),
    }
}

// Base fields read straight from the raw data, whatever the variant.
impl Price {
    pub fn cadence(&self) -> Result<Cadence> {
        self.raw_data().required("cadence")
    }

    pub fn currency(&self) -> Result<String> {
        self.raw_data().required("currency")
    }

    pub fn item_id(&self) -> Result<ItemId> {
        self.raw_data().required("item_id")
    }

    pub fn name(&self) -> Result<String> {
        self.raw_data().required("name")
    }

    pub fn external_price_id(&self) -> Result<Option<String>> {
        self.raw_data().get("external_price_id")
    }

    pub fn conversion_rate_config(&self) -> Result<Option<ConversionRateConfig>> {
        self.raw_data().get("conversion_rate_config")
    }

    pub fn metadata(&self) -> Result<Option<Metadata>> {
        self.raw_data().get("metadata")
    }

    /// Variant-specific config object, e.g. `tiered_config` for a tiered price.
    pub fn config_raw(&self) -> Option<&serde_json::Value> {
        self.raw_data().get_raw(&config_key(self.model_type()))
    }
}

fn config_key(model_type: &str) -> String {
    format!("{model_type}_config")
}
