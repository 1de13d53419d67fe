//! Variant-specific pricing configurations.
//!
//! Monetary amounts travel as decimal strings; unit counts and bounds are
//! JSON numbers unless the API defines them as strings.

model! {
    pub struct UnitConfig {
        /// Rate per unit of usage.
        required unit_amount: String,
        /// Whether to prorate the price for partial periods.
        optional prorated: bool,
    }
}

model! {
    pub struct Tier {
        /// Exclusive tier starting value.
        required first_unit: f64,
        /// Amount per unit.
        required unit_amount: String,
        /// Inclusive tier ending value. Null means the tier is unbounded.
        nullable last_unit: f64,
    }
}

model! {
    pub struct TieredConfig {
        /// Tiers for rating based on total usage quantities into the specified tier.
        required tiers: Vec<Tier>,
        optional prorated: bool,
    }
}

model! {
    pub struct BulkTier {
        required unit_amount: String,
        /// Upper bound for this tier.
        nullable maximum_units: f64,
    }
}

model! {
    pub struct BulkConfig {
        /// Bulk tiers for rating based on total usage volume.
        required tiers: Vec<BulkTier>,
    }
}

model! {
    /// Event property filter for `bulk_with_filters` pricing.
    pub struct BulkWithFiltersFilter {
        required property_key: String,
        required property_value: String,
    }
}

model! {
    pub struct BulkWithFiltersTier {
        required unit_amount: String,
        /// Lower bound of this tier. Null for the first tier.
        nullable tier_lower_bound: String,
    }
}

model! {
    pub struct BulkWithFiltersConfig {
        /// Property filters to apply (all must match).
        required filters: Vec<BulkWithFiltersFilter>,
        /// Bulk tiers for rating based on total usage volume.
        required tiers: Vec<BulkWithFiltersTier>,
    }
}

model! {
    pub struct PackageConfig {
        /// Amount charged per package.
        required package_amount: String,
        /// Units per package. An event of 10 units with a package size of 4 is billed as 3 packages.
        required package_size: i64,
    }
}

model! {
    pub struct MatrixValue {
        /// One or two matrix keys to filter usage to this value. Null acts as a wildcard.
        required dimension_values: Vec<Option<String>>,
        required unit_amount: String,
    }
}

model! {
    pub struct MatrixConfig {
        /// Unit price for usage that matches no matrix value.
        required default_unit_amount: String,
        /// One or two event property names to group usage by.
        required dimensions: Vec<Option<String>>,
        required matrix_values: Vec<MatrixValue>,
    }
}

model! {
    pub struct ConsumptionTableEntry {
        required threshold: String,
        required total_amount: String,
    }
}

model! {
    pub struct ThresholdTotalAmountConfig {
        /// Thresholds and the total amount billed once usage reaches each one.
        required consumption_table: Vec<ConsumptionTableEntry>,
        nullable prorate: bool,
    }
}

model! {
    pub struct TieredPackageTier {
        /// Price per package.
        required per_unit: String,
        required tier_lower_bound: String,
    }
}

model! {
    pub struct TieredPackageConfig {
        required package_size: String,
        /// Tiers by package count. The first tier must start at zero.
        required tiers: Vec<TieredPackageTier>,
    }
}

model! {
    pub struct TieredMinimumTier {
        required minimum_amount: String,
        required tier_lower_bound: String,
        required unit_amount: String,
    }
}

model! {
    pub struct TieredWithMinimumConfig {
        /// Tiers ordered by `tier_lower_bound`.
        required tiers: Vec<TieredMinimumTier>,
        /// Hide tiers whose amount is zero on invoices.
        optional hide_zero_amount_tiers: bool,
        /// Prorate the minimum for partial periods.
        optional prorate: bool,
    }
}

model! {
    pub struct GroupedTier {
        required tier_lower_bound: String,
        required unit_amount: String,
    }
}

model! {
    pub struct GroupedTieredConfig {
        /// Event property used to group usage before tiering.
        required grouping_key: String,
        required tiers: Vec<GroupedTier>,
    }
}

model! {
    pub struct TieredPackageWithMinimumTier {
        required minimum_amount: String,
        required per_unit: String,
        required tier_lower_bound: String,
    }
}

model! {
    pub struct TieredPackageWithMinimumConfig {
        required package_size: f64,
        required tiers: Vec<TieredPackageWithMinimumTier>,
    }
}

model! {
    pub struct PackageWithAllocationConfig {
        required allocation: String,
        required package_amount: String,
        required package_size: String,
    }
}

model! {
    pub struct UnitWithPercentConfig {
        /// Percentage of the unit amount billed on top.
        required percent: String,
        required unit_amount: String,
    }
}

model! {
    pub struct MatrixWithAllocationConfig {
        /// Usage allocation applied before matrix rating.
        required allocation: String,
        required default_unit_amount: String,
        required dimensions: Vec<Option<String>>,
        required matrix_values: Vec<MatrixValue>,
    }
}

model! {
    pub struct ProratedTier {
        required tier_lower_bound: String,
        required unit_amount: String,
    }
}

model! {
    pub struct TieredWithProrationConfig {
        /// Tiers with proration for partial periods.
        required tiers: Vec<ProratedTier>,
    }
}

model! {
    pub struct UnitWithProrationConfig {
        required unit_amount: String,
    }
}

model! {
    pub struct GroupedAllocationConfig {
        /// Usage allocation per group.
        required allocation: String,
        required grouping_key: String,
        /// Unit rate for usage beyond the allocation.
        required overage_unit_rate: String,
    }
}

model! {
    pub struct BulkWithProrationTier {
        required unit_amount: String,
        nullable tier_lower_bound: String,
    }
}

model! {
    pub struct BulkWithProrationConfig {
        required tiers: Vec<BulkWithProrationTier>,
    }
}

model! {
    pub struct GroupedWithProratedMinimumConfig {
        required grouping_key: String,
        /// Minimum amount to charge per group.
        required minimum: String,
        required unit_rate: String,
    }
}

model! {
    pub struct ScalingFactor {
        required scaling_factor: String,
        required scaling_value: String,
    }
}

model! {
    pub struct PricingUnitAmount {
        required pricing_value: String,
        required unit_amount: String,
    }
}

model! {
    pub struct GroupedWithMeteredMinimumConfig {
        /// Event property used to group before applying the minimum.
        required grouping_key: String,
        required minimum_unit_amount: String,
        /// Event property used to look up the per-unit amount.
        required pricing_key: String,
        required scaling_factors: Vec<ScalingFactor>,
        /// Event property used to look up the scaling factor.
        required scaling_key: String,
        required unit_amounts: Vec<PricingUnitAmount>,
    }
}

model! {
    pub struct GroupedWithMinMaxThresholdsConfig {
        required grouping_key: String,
        required maximum_charge: String,
        required minimum_charge: String,
        required per_unit_rate: String,
    }
}

model! {
    pub struct DisplayNameUnitAmount {
        required dimension_value: String,
        required display_name: String,
        required unit_amount: String,
    }
}

model! {
    pub struct MatrixWithDisplayNameConfig {
        /// Event property used for the matrix dimension.
        required dimension: String,
        required unit_amounts: Vec<DisplayNameUnitAmount>,
    }
}

model! {
    pub struct GroupedTieredPackageConfig {
        required grouping_key: String,
        required package_size: String,
        required tiers: Vec<TieredPackageTier>,
    }
}

model! {
    pub struct MaxGroupTieredPackageConfig {
        /// Tiering applies to the group with the largest usage.
        required grouping_key: String,
        required package_size: String,
        required tiers: Vec<GroupedTier>,
    }
}

model! {
    pub struct MatrixScalingFactor {
        required first_dimension_value: String,
        required scaling_factor: String,
        nullable second_dimension_value: String,
    }
}

model! {
    pub struct ScalableMatrixWithUnitPricingConfig {
        required first_dimension: String,
        required matrix_scaling_factors: Vec<MatrixScalingFactor>,
        required unit_price: String,
        nullable prorate: bool,
        nullable second_dimension: String,
    }
}

model! {
    pub struct ScalableMatrixWithTieredPricingConfig {
        required first_dimension: String,
        required matrix_scaling_factors: Vec<MatrixScalingFactor>,
        required tiers: Vec<GroupedTier>,
        nullable second_dimension: String,
    }
}

model! {
    pub struct CumulativeGroupedBulkDimensionValue {
        required grouping_key: String,
        required tier_lower_bound: String,
        required unit_amount: String,
    }
}

model! {
    pub struct CumulativeGroupedBulkConfig {
        required dimension_values: Vec<CumulativeGroupedBulkDimensionValue>,
        /// Name of the group the tiers accumulate across.
        required group: String,
    }
}

model! {
    pub struct CumulativeGroupedAllocationConfig {
        /// Allocation shared by all groups.
        required cumulative_allocation: String,
        /// Allocation granted to each group.
        required group_allocation: String,
        required grouping_key: String,
        required unit_amount: String,
    }
}

model! {
    pub struct MinimumConfig {
        /// Minimum amount to bill per period.
        required minimum_amount: String,
        /// Prorate the minimum for partial periods.
        optional prorated: bool,
    }
}

model! {
    pub struct PercentConfig {
        /// Percentage of the subtotal to bill, between 0 and 100.
        required percent: f64,
    }
}

model! {
    pub struct EventOutputConfig {
        /// Event property holding the per-unit rate.
        required unit_rating_key: String,
        /// Rate used when the event lacks `unit_rating_key`.
        nullable default_unit_rate: String,
        nullable grouping_key: String,
    }
}
