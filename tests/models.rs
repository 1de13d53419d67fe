use std::collections::{BTreeMap, BTreeSet};

use billing_models::{
    models::*, Cadence, ConversionRateConfig, Error, Model, Price, PriceEvaluateMultipleParams,
    PriceEvaluation, RawData,
};
use serde_json::{json, Value};

fn base_fields(model_type: &str) -> Value {
    json!({
        "model_type": model_type,
        "cadence": "monthly",
        "currency": "USD",
        "item_id": "item_1",
        "name": "Usage"
    })
}

#[test]
fn every_discriminator_resolves_to_its_variant() {
    for tag in Price::TAGS {
        let raw: RawData = serde_json::from_value(base_fields(tag)).unwrap();
        let price = Price::from_raw_data(raw).unwrap();
        assert_eq!(price.model_type(), *tag);

        // Base fields are present, so the first gap is the variant's own config.
        let err = price.validate().unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField { ref field } if *field == format!("{tag}_config")),
            "{tag}: {err}"
        );

        let out = serde_json::to_value(&price).unwrap();
        assert_eq!(out, base_fields(tag));
    }
}

#[test]
fn fully_populated_unit_price_round_trips_through_union() {
    let mut metadata = BTreeMap::new();
    metadata.insert("team".to_string(), Some("growth".to_string()));
    metadata.insert("legacy".to_string(), None);

    let unit = NewFloatingUnitPrice::new()
        .with_cadence(Cadence::Annual)
        .with_currency("currency")
        .with_item_id("item_id")
        .with_name("Annual fee")
        .with_unit_config(UnitConfig::new().with_unit_amount("unit_amount").with_prorated(true))
        .with_billable_metric_id("billable_metric_id")
        .with_billed_in_advance(true)
        .with_billing_cycle_configuration(
            NewBillingCycleConfiguration::new()
                .with_duration(0)
                .with_duration_unit(DurationUnit::Day),
        )
        .with_conversion_rate(0.0)
        .with_conversion_rate_config(UnitConversionRateConfig::new().with_unit_config(
            ConversionRateUnitConfig::new().with_unit_amount("unit_amount"),
        ))
        .with_dimensional_price_configuration(
            NewDimensionalPriceConfiguration::new()
                .with_dimension_values(vec!["string".to_string()])
                .with_dimensional_price_group_id("dimensional_price_group_id")
                .with_external_dimensional_price_group_id("external_dimensional_price_group_id"),
        )
        .with_external_price_id("external_price_id")
        .with_fixed_price_quantity(0.0)
        .with_invoice_grouping_key("x")
        .with_invoicing_cycle_configuration(
            NewBillingCycleConfiguration::new()
                .with_duration(0)
                .with_duration_unit(DurationUnit::Day),
        )
        .with_metadata(metadata);
    unit.validate().unwrap();

    let json = unit.to_json_string().unwrap();
    let price = Price::from_json_str(&json).unwrap();
    price.validate().unwrap();

    let Price::Unit(back) = &price else {
        panic!("expected unit price");
    };
    assert_eq!(back, &unit);
    assert_eq!(price, Price::from(unit));
    assert_eq!(price.to_json_string().unwrap(), json);
    assert_eq!(
        price.metadata().unwrap().unwrap().get("legacy"),
        Some(&None)
    );
}

#[test]
fn union_deserialize_reports_unknown_variant() {
    let err = serde_json::from_value::<Price>(base_fields("stairstep")).unwrap_err();
    assert!(err.to_string().contains("stairstep"));

    let mut value = base_fields("unit");
    value.as_object_mut().unwrap().remove("model_type");
    let err = serde_json::from_value::<Price>(value).unwrap_err();
    assert!(err.to_string().contains("missing discriminator `model_type`"));
}

#[test]
fn unknown_enum_values_deserialize_and_fail_validation() {
    let mut value = base_fields("unit");
    value["cadence"] = json!("fortnightly");
    value["unit_config"] = json!({"unit_amount": "1.00"});

    let price: Price = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(price.cadence().unwrap(), Cadence::Other("fortnightly".into()));
    assert!(matches!(
        price.validate().unwrap_err(),
        Error::InvalidEnumValue { ref field, ref value } if field == "cadence" && value == "fortnightly"
    ));
    assert_eq!(serde_json::to_value(&price).unwrap(), value);
}

#[test]
fn null_required_field_fails_validation() {
    let mut value = base_fields("unit");
    value["unit_config"] = json!({"unit_amount": "1.00"});
    value["currency"] = Value::Null;

    let price: Price = serde_json::from_value(value).unwrap();
    assert!(price.currency().is_err());
    assert!(matches!(
        price.validate().unwrap_err(),
        Error::MissingRequiredField { ref field } if field == "currency"
    ));
}

#[test]
fn presence_kinds_behave_differently_on_null() {
    // Optional, not nullable: assigning None never writes null.
    let mut unit = UnitConfig::new().with_unit_amount("1.00");
    unit.set_prorated(None);
    assert_eq!(serde_json::to_value(&unit).unwrap(), json!({"unit_amount": "1.00"}));

    // Nullable: None is an explicit null that is serialized.
    let mut tier = Tier::new().with_first_unit(0.0).with_unit_amount("1.00");
    tier.set_last_unit(None);
    assert_eq!(
        serde_json::to_value(&tier).unwrap(),
        json!({"first_unit": 0.0, "unit_amount": "1.00", "last_unit": null})
    );

    // Never-set nullable field is absent, not null.
    let evaluation = PriceEvaluation::new();
    assert_eq!(serde_json::to_value(&evaluation).unwrap(), json!({}));
}

#[test]
fn equality_ignores_undeclared_properties() {
    let a: UnitConfig = serde_json::from_value(json!({"unit_amount": "1.00"})).unwrap();
    let b: UnitConfig =
        serde_json::from_value(json!({"unit_amount": "1.00", "x_trace": "abc"})).unwrap();
    assert_eq!(a, b);

    let c: UnitConfig =
        serde_json::from_value(json!({"unit_amount": "1.00", "prorated": false})).unwrap();
    assert_ne!(a, c);
}

#[test]
fn equality_distinguishes_absent_from_null() {
    let absent = Tier::new().with_first_unit(0.0).with_unit_amount("1.00");
    let mut null = absent.clone();
    null.set_last_unit(None);
    assert_ne!(absent, null);
}

#[test]
fn reassigning_keeps_key_order() {
    let mut price = NewFloatingUnitPrice::new()
        .with_cadence(Cadence::Monthly)
        .with_currency("USD")
        .with_item_id("item_1")
        .with_name("Usage");
    price.set_currency("EUR");
    let keys: Vec<_> = price.raw_data().keys().collect();
    assert_eq!(keys, ["model_type", "cadence", "currency", "item_id", "name"]);
}

#[test]
fn nested_union_fields_validate_through_the_price() {
    let raw = json!({
        "model_type": "matrix",
        "cadence": "monthly",
        "currency": "USD",
        "item_id": "item_1",
        "name": "Regional compute",
        "matrix_config": {
            "default_unit_amount": "0.00",
            "dimensions": ["region", null],
            "matrix_values": []
        },
        "conversion_rate_config": {"conversion_rate_type": "unit", "unit_config": {}}
    });
    let price: NewFloatingMatrixPrice = serde_json::from_value(raw).unwrap();
    let err = price.validate().unwrap_err();
    assert_eq!(err.field(), Some("conversion_rate_config.unit_config.unit_amount"));

    let converted: ConversionRateConfig = UnitConversionRateConfig::new()
        .with_unit_config(
            ConversionRateUnitConfig::new().with_unit_amount("0.5"),
        )
        .into();
    let mut fixed = price.clone();
    fixed.set_conversion_rate_config(Some(converted));
    assert!(fixed.validate().is_ok());
}

#[test]
fn json_string_helpers_round_trip() {
    let text = r#"{"unit_amount":"1.00","x_extra":[1,2]}"#;
    let unit = UnitConfig::from_json_str(text).unwrap();
    assert_eq!(unit.to_json_string().unwrap(), text);
}

#[test]
fn equality_compares_typed_values() {
    let built = Tier::new().with_first_unit(0.0).with_unit_amount("1.00");
    let wire: Tier =
        serde_json::from_value(json!({"first_unit": 0, "unit_amount": "1.00"})).unwrap();
    assert_eq!(built, wire);

    let params = |start: &str| -> PriceEvaluateMultipleParams {
        serde_json::from_value(json!({
            "timeframe_start": start,
            "timeframe_end": "2025-02-01T00:00:00Z"
        }))
        .unwrap()
    };
    assert_eq!(
        params("2025-01-01T00:00:00Z"),
        params("2025-01-01T00:00:00+00:00")
    );
    assert_ne!(params("2025-01-01T00:00:00Z"), params("2025-01-01T01:00:00Z"));

    let plain: TieredConfig = serde_json::from_value(json!({
        "tiers": [{"first_unit": 0, "unit_amount": "1.00"}]
    }))
    .unwrap();
    let annotated: TieredConfig = serde_json::from_value(json!({
        "tiers": [{"first_unit": 0.0, "unit_amount": "1.00", "x_note": "migrated"}]
    }))
    .unwrap();
    assert_eq!(plain, annotated);
}

fn tweak<T>(mut value: T, f: impl FnOnce(&mut T)) -> T {
    f(&mut value);
    value
}

fn open_tier() -> Tier {
    tweak(
        Tier::new().with_first_unit(100.0).with_unit_amount("0.50"),
        |tier| tier.set_last_unit(None),
    )
}

fn grouped_tier() -> GroupedTier {
    GroupedTier::new().with_tier_lower_bound("0").with_unit_amount("1.00")
}

fn tiered_package_tier() -> TieredPackageTier {
    TieredPackageTier::new().with_per_unit("1.00").with_tier_lower_bound("0")
}

fn matrix_value() -> MatrixValue {
    MatrixValue::new()
        .with_dimension_values(vec![Some("eu".to_string()), None])
        .with_unit_amount("1.00")
}

macro_rules! variant {
    ($ty:ident, $with_config:ident, $config:expr) => {{
        let mut price = $ty::new()
            .with_cadence(Cadence::Monthly)
            .with_currency("USD")
            .with_item_id("item_1")
            .with_name(stringify!($ty))
            .$with_config($config)
            .with_external_price_id("ext_1")
            .with_fixed_price_quantity(1.0);
        price.set_billable_metric_id(None);
        price.set_conversion_rate_config(None);
        Price::from(price)
    }};
}

fn every_variant() -> Vec<Price> {
    vec![
        variant!(
            NewFloatingUnitPrice,
            with_unit_config,
            UnitConfig::new().with_unit_amount("1.00").with_prorated(false)
        ),
        variant!(
            NewFloatingTieredPrice,
            with_tiered_config,
            TieredConfig::new().with_tiers(vec![
                Tier::new()
                    .with_first_unit(0.0)
                    .with_last_unit(100.0)
                    .with_unit_amount("1.00"),
                open_tier(),
            ])
        ),
        variant!(
            NewFloatingBulkPrice,
            with_bulk_config,
            BulkConfig::new().with_tiers(vec![
                BulkTier::new().with_unit_amount("1.00").with_maximum_units(10.0),
                tweak(BulkTier::new().with_unit_amount("0.80"), |tier| {
                    tier.set_maximum_units(None)
                }),
            ])
        ),
        variant!(
            NewFloatingBulkWithFiltersPrice,
            with_bulk_with_filters_config,
            BulkWithFiltersConfig::new()
                .with_filters(vec![BulkWithFiltersFilter::new()
                    .with_property_key("region")
                    .with_property_value("eu")])
                .with_tiers(vec![
                    BulkWithFiltersTier::new()
                        .with_unit_amount("1.00")
                        .with_tier_lower_bound("0"),
                    tweak(BulkWithFiltersTier::new().with_unit_amount("0.80"), |tier| {
                        tier.set_tier_lower_bound(None)
                    }),
                ])
        ),
        variant!(
            NewFloatingPackagePrice,
            with_package_config,
            PackageConfig::new().with_package_amount("5.00").with_package_size(100)
        ),
        variant!(
            NewFloatingMatrixPrice,
            with_matrix_config,
            MatrixConfig::new()
                .with_default_unit_amount("0.00")
                .with_dimensions(vec![Some("region".to_string()), None])
                .with_matrix_values(vec![matrix_value()])
        ),
        variant!(
            NewFloatingThresholdTotalAmountPrice,
            with_threshold_total_amount_config,
            tweak(
                ThresholdTotalAmountConfig::new().with_consumption_table(vec![
                    ConsumptionTableEntry::new()
                        .with_threshold("100")
                        .with_total_amount("10.00")
                ]),
                |config| config.set_prorate(None)
            )
        ),
        variant!(
            NewFloatingTieredPackagePrice,
            with_tiered_package_config,
            TieredPackageConfig::new()
                .with_package_size("10")
                .with_tiers(vec![tiered_package_tier()])
        ),
        variant!(
            NewFloatingTieredWithMinimumPrice,
            with_tiered_with_minimum_config,
            TieredWithMinimumConfig::new()
                .with_tiers(vec![TieredMinimumTier::new()
                    .with_minimum_amount("5.00")
                    .with_tier_lower_bound("0")
                    .with_unit_amount("1.00")])
                .with_hide_zero_amount_tiers(true)
                .with_prorate(false)
        ),
        variant!(
            NewFloatingGroupedTieredPrice,
            with_grouped_tiered_config,
            GroupedTieredConfig::new()
                .with_grouping_key("region")
                .with_tiers(vec![grouped_tier()])
        ),
        variant!(
            NewFloatingTieredPackageWithMinimumPrice,
            with_tiered_package_with_minimum_config,
            TieredPackageWithMinimumConfig::new()
                .with_package_size(10.0)
                .with_tiers(vec![TieredPackageWithMinimumTier::new()
                    .with_minimum_amount("5.00")
                    .with_per_unit("1.00")
                    .with_tier_lower_bound("0")])
        ),
        variant!(
            NewFloatingPackageWithAllocationPrice,
            with_package_with_allocation_config,
            PackageWithAllocationConfig::new()
                .with_allocation("100")
                .with_package_amount("5.00")
                .with_package_size("10")
        ),
        variant!(
            NewFloatingUnitWithPercentPrice,
            with_unit_with_percent_config,
            UnitWithPercentConfig::new().with_percent("10").with_unit_amount("1.00")
        ),
        variant!(
            NewFloatingMatrixWithAllocationPrice,
            with_matrix_with_allocation_config,
            MatrixWithAllocationConfig::new()
                .with_allocation("100")
                .with_default_unit_amount("0.00")
                .with_dimensions(vec![Some("region".to_string()), None])
                .with_matrix_values(vec![matrix_value()])
        ),
        variant!(
            NewFloatingTieredWithProrationPrice,
            with_tiered_with_proration_config,
            TieredWithProrationConfig::new().with_tiers(vec![ProratedTier::new()
                .with_tier_lower_bound("0")
                .with_unit_amount("1.00")])
        ),
        variant!(
            NewFloatingUnitWithProrationPrice,
            with_unit_with_proration_config,
            UnitWithProrationConfig::new().with_unit_amount("1.00")
        ),
        variant!(
            NewFloatingGroupedAllocationPrice,
            with_grouped_allocation_config,
            GroupedAllocationConfig::new()
                .with_allocation("100")
                .with_grouping_key("region")
                .with_overage_unit_rate("0.50")
        ),
        variant!(
            NewFloatingBulkWithProrationPrice,
            with_bulk_with_proration_config,
            BulkWithProrationConfig::new().with_tiers(vec![
                BulkWithProrationTier::new()
                    .with_unit_amount("1.00")
                    .with_tier_lower_bound("10"),
                tweak(BulkWithProrationTier::new().with_unit_amount("1.20"), |tier| {
                    tier.set_tier_lower_bound(None)
                }),
            ])
        ),
        variant!(
            NewFloatingGroupedWithProratedMinimumPrice,
            with_grouped_with_prorated_minimum_config,
            GroupedWithProratedMinimumConfig::new()
                .with_grouping_key("region")
                .with_minimum("10.00")
                .with_unit_rate("1.00")
        ),
        variant!(
            NewFloatingGroupedWithMeteredMinimumPrice,
            with_grouped_with_metered_minimum_config,
            GroupedWithMeteredMinimumConfig::new()
                .with_grouping_key("region")
                .with_minimum_unit_amount("1.00")
                .with_pricing_key("tier")
                .with_scaling_factors(vec![ScalingFactor::new()
                    .with_scaling_factor("1.5")
                    .with_scaling_value("eu")])
                .with_scaling_key("region")
                .with_unit_amounts(vec![PricingUnitAmount::new()
                    .with_pricing_value("gold")
                    .with_unit_amount("2.00")])
        ),
        variant!(
            NewFloatingGroupedWithMinMaxThresholdsPrice,
            with_grouped_with_min_max_thresholds_config,
            GroupedWithMinMaxThresholdsConfig::new()
                .with_grouping_key("region")
                .with_maximum_charge("100.00")
                .with_minimum_charge("10.00")
                .with_per_unit_rate("1.00")
        ),
        variant!(
            NewFloatingMatrixWithDisplayNamePrice,
            with_matrix_with_display_name_config,
            MatrixWithDisplayNameConfig::new()
                .with_dimension("region")
                .with_unit_amounts(vec![DisplayNameUnitAmount::new()
                    .with_dimension_value("eu")
                    .with_display_name("Europe")
                    .with_unit_amount("1.00")])
        ),
        variant!(
            NewFloatingGroupedTieredPackagePrice,
            with_grouped_tiered_package_config,
            GroupedTieredPackageConfig::new()
                .with_grouping_key("region")
                .with_package_size("10")
                .with_tiers(vec![tiered_package_tier()])
        ),
        variant!(
            NewFloatingMaxGroupTieredPackagePrice,
            with_max_group_tiered_package_config,
            MaxGroupTieredPackageConfig::new()
                .with_grouping_key("region")
                .with_package_size("10")
                .with_tiers(vec![grouped_tier()])
        ),
        variant!(
            NewFloatingScalableMatrixWithUnitPricingPrice,
            with_scalable_matrix_with_unit_pricing_config,
            tweak(
                ScalableMatrixWithUnitPricingConfig::new()
                    .with_first_dimension("region")
                    .with_matrix_scaling_factors(vec![tweak(
                        MatrixScalingFactor::new()
                            .with_first_dimension_value("eu")
                            .with_scaling_factor("1.2"),
                        |factor| factor.set_second_dimension_value(None)
                    )])
                    .with_unit_price("1.00")
                    .with_prorate(true),
                |config| config.set_second_dimension(None)
            )
        ),
        variant!(
            NewFloatingScalableMatrixWithTieredPricingPrice,
            with_scalable_matrix_with_tiered_pricing_config,
            ScalableMatrixWithTieredPricingConfig::new()
                .with_first_dimension("region")
                .with_matrix_scaling_factors(vec![MatrixScalingFactor::new()
                    .with_first_dimension_value("eu")
                    .with_scaling_factor("1.2")
                    .with_second_dimension_value("gpu")])
                .with_tiers(vec![grouped_tier()])
                .with_second_dimension("sku")
        ),
        variant!(
            NewFloatingCumulativeGroupedBulkPrice,
            with_cumulative_grouped_bulk_config,
            CumulativeGroupedBulkConfig::new()
                .with_dimension_values(vec![CumulativeGroupedBulkDimensionValue::new()
                    .with_grouping_key("region")
                    .with_tier_lower_bound("0")
                    .with_unit_amount("1.00")])
                .with_group("compute")
        ),
        variant!(
            NewFloatingCumulativeGroupedAllocationPrice,
            with_cumulative_grouped_allocation_config,
            CumulativeGroupedAllocationConfig::new()
                .with_cumulative_allocation("1000")
                .with_group_allocation("100")
                .with_grouping_key("region")
                .with_unit_amount("1.00")
        ),
        variant!(
            NewFloatingMinimumPrice,
            with_minimum_config,
            MinimumConfig::new().with_minimum_amount("50.00").with_prorated(true)
        ),
        variant!(
            NewFloatingPercentPrice,
            with_percent_config,
            PercentConfig::new().with_percent(2.5)
        ),
        variant!(
            NewFloatingEventOutputPrice,
            with_event_output_config,
            tweak(
                EventOutputConfig::new()
                    .with_unit_rating_key("rate")
                    .with_grouping_key("region"),
                |config| config.set_default_unit_rate(None)
            )
        ),
    ]
}

#[test]
fn every_variant_round_trips_through_union() {
    let prices = every_variant();
    let tags: BTreeSet<_> = prices.iter().map(Price::model_type).collect();
    assert_eq!(tags.len(), Price::TAGS.len());

    for price in &prices {
        let tag = price.model_type();
        price
            .validate()
            .unwrap_or_else(|err| panic!("{tag}: {err}"));
        assert_eq!(price.raw_data().get_raw("billable_metric_id"), Some(&Value::Null));

        let json = price.to_json_string().unwrap();
        let back = Price::from_json_str(&json).unwrap();
        assert_eq!(&back, price, "{tag}");
        assert_eq!(back.model_type(), tag);
        back.validate().unwrap_or_else(|err| panic!("{tag}: {err}"));
        assert_eq!(back.to_json_string().unwrap(), json, "{tag}");
        assert!(
            back.config_raw().is_some_and(Value::is_object),
            "{tag}: config missing"
        );
    }
}

#[test]
fn non_finite_amounts_fail_validation_as_invalid() {
    let price = NewFloatingPercentPrice::new()
        .with_cadence(Cadence::Monthly)
        .with_currency("USD")
        .with_item_id("item_1")
        .with_name("Platform fee")
        .with_percent_config(PercentConfig::new().with_percent(f64::NAN));
    let err = price.validate().unwrap_err();
    assert!(
        matches!(err, Error::InvalidField { ref field, .. } if field == "percent_config.percent"),
        "{err}"
    );
}
