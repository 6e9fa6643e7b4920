//! Integration tests for the Hatchery Pricing Engine.
//!
//! Requests are built as JSON, deserialized into [`PricingRequest`] and
//! priced against the shipped `config/uk_hatchery` reference data. Results
//! are checked through their serialized form, as a presentation layer
//! would see them.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;

use hatchery_pricing::config::ConfigLoader;
use hatchery_pricing::engine::PricingEngine;
use hatchery_pricing::error::EngineError;
use hatchery_pricing::models::{DeliveryMethod, PricingRequest, PricingResult};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_engine() -> PricingEngine {
    let loader = ConfigLoader::load("./config/uk_hatchery").expect("Failed to load config");
    PricingEngine::new(loader.into_config())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a serialized decimal field.
fn money(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal serialized as string"))
}

fn create_request(order: Value, selections: Value) -> PricingRequest {
    serde_json::from_value(json!({
        "order": order,
        "selections": selections
    }))
    .expect("request should deserialize")
}

fn reference_order() -> Value {
    json!({
        "saleable_chicks": 100000,
        "egg_multiplier": "2.5",
        "monthly_egg_volume": 500000
    })
}

fn price(order: Value, selections: Value) -> Result<PricingResult, EngineError> {
    create_engine().price_request(&create_request(order, selections))
}

fn price_json(order: Value, selections: Value) -> Value {
    let result = price(order, selections).expect("pricing should succeed");
    serde_json::to_value(result).unwrap()
}

// =============================================================================
// SECTION 1: Reference orders
// =============================================================================

#[test]
fn test_single_in_ovo_vaccine() {
    let json = price_json(
        reference_order(),
        json!({ "in_ovo": [{ "vaccine": "Nobilis Rismavac +CA126" }] }),
    );

    assert_eq!(json["eggs_for_in_ovo"], 250000);
    assert_eq!(json["line_items"][0]["label"], "Inovo: Nobilis Rismavac +CA126");
    assert_eq!(money(&json["line_items"][0]["total_cost"]), decimal("4230.00"));
    assert_eq!(
        json["line_items"][1]["label"],
        "Inovo Machine Lease (allocated)"
    );
    assert_eq!(money(&json["line_items"][1]["total_cost"]), decimal("3062.50"));
    assert_eq!(money(&json["totals"]["total_vaccine_cost"]), decimal("4230"));
    assert_eq!(money(&json["totals"]["total_machine_cost"]), decimal("3062.5"));
    assert_eq!(money(&json["totals"]["grand_total"]), decimal("7292.5"));
    assert_eq!(money(&json["totals"]["cost_per_chick"]), decimal("0.072925"));
}

#[test]
fn test_double_dose_injection_doubles_machine() {
    let json = price_json(
        reference_order(),
        json!({ "day_old_injection": [{ "vaccine": "Transmune", "double_dose": true }] }),
    );

    assert_eq!(json["injection_passes"], 2);
    assert_eq!(
        json["line_items"][0]["label"],
        "Day Old Inj: Transmune (2x Dose)"
    );
    assert_eq!(money(&json["line_items"][0]["total_cost"]), decimal("2526"));
    assert_eq!(
        json["line_items"][1]["label"],
        "Novatech Machine Costs (×2 passes)"
    );
    // (0.00655 + 0.00545 + 0.00214) * 0.79 * 100000 * 2
    assert_eq!(money(&json["line_items"][1]["total_cost"]), decimal("2234.12"));
}

#[test]
fn test_single_dose_injection_is_one_pass() {
    let json = price_json(
        reference_order(),
        json!({ "day_old_injection": [{ "vaccine": "Reo" }, { "vaccine": "Lincocin" }] }),
    );

    assert_eq!(json["injection_passes"], 1);
    assert_eq!(money(&json["line_items"][2]["total_cost"]), decimal("1117.06"));
}

#[test]
fn test_full_programme() {
    let json = price_json(
        json!({
            "saleable_chicks": 100000,
            "egg_multiplier": "2.5",
            "monthly_egg_volume": 500000,
            "beak_treatment": true,
            "toe_treatment": true
        }),
        json!({
            "in_ovo": [{ "vaccine": "Nobilis Rismavac +CA126" }],
            "day_old_injection": [{ "vaccine": "Reo", "double_dose": true }],
            "spray": [{ "vaccine": "IB Ma5" }]
        }),
    );

    let labels: Vec<&str> = json["line_items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Inovo: Nobilis Rismavac +CA126",
            "Inovo Machine Lease (allocated)",
            "Day Old Inj: Reo (2x Dose)",
            "Novatech Machine Costs (×2 passes)",
            "Spray: IB Ma5",
            "Beak Treatment (Novatech IR)",
            "Toe Treatment (cost not configured)",
        ]
    );

    assert_eq!(money(&json["totals"]["total_vaccine_cost"]), decimal("8970.5"));
    assert_eq!(money(&json["totals"]["total_machine_cost"]), decimal("6076.35"));
    assert_eq!(money(&json["totals"]["grand_total"]), decimal("15046.85"));
    assert_eq!(json["line_items"][6]["provisional"], true);
}

#[test]
fn test_full_programme_rounded_for_display() {
    let result = price(
        json!({
            "saleable_chicks": 100000,
            "egg_multiplier": "2.5",
            "monthly_egg_volume": 500000,
            "beak_treatment": true
        }),
        json!({
            "in_ovo": [{ "vaccine": "Nobilis Rismavac +CA126" }],
            "day_old_injection": [{ "vaccine": "Reo", "double_dose": true }],
            "spray": [{ "vaccine": "IB Ma5" }]
        }),
    )
    .unwrap();

    let shown = result.rounded_for_display();
    assert_eq!(shown.totals.grand_total, decimal("15046.85"));
    // 0.1504685 per chick
    assert_eq!(shown.totals.cost_per_chick, decimal("0.15047"));
    assert_eq!(result.totals.cost_per_chick, decimal("0.1504685"));
}

#[test]
fn test_subtotals_by_method() {
    let json = price_json(
        json!({
            "saleable_chicks": 100000,
            "egg_multiplier": "2.5",
            "monthly_egg_volume": 500000,
            "beak_treatment": true
        }),
        json!({
            "in_ovo": [{ "vaccine": "Nobilis Rismavac +CA126" }],
            "spray": [{ "vaccine": "IB Ma5" }]
        }),
    );

    let subtotals = json["subtotals"].as_array().unwrap();
    assert_eq!(subtotals.len(), 4);
    assert_eq!(subtotals[0]["group"], "in_ovo");
    assert_eq!(money(&subtotals[0]["total"]), decimal("7292.5"));
    assert_eq!(subtotals[1]["group"], "day_old_injection");
    assert_eq!(money(&subtotals[1]["total"]), Decimal::ZERO);
    assert_eq!(subtotals[2]["group"], "spray");
    assert_eq!(money(&subtotals[2]["vaccine_cost"]), decimal("266.5"));
    assert_eq!(subtotals[3]["group"], "treatments");
    assert_eq!(money(&subtotals[3]["machine_cost"]), decimal("779.73"));
}

#[test]
fn test_fractional_lease_totals_match_line_items() {
    // 6125 / 5884955 does not terminate, so the lease line is full precision
    let result = price(
        json!({
            "saleable_chicks": 353274,
            "egg_multiplier": "0.3",
            "monthly_egg_volume": 5884955
        }),
        json!({
            "in_ovo": [{ "vaccine": "Innovax ND-ILT" }],
            "day_old_injection": [{ "vaccine": "Nobilis Rismavac +CA126", "double_dose": true }]
        }),
    )
    .unwrap();

    let line_sum: Decimal = result.line_items.iter().map(|l| l.total_cost).sum();
    assert_eq!(result.totals.grand_total, line_sum);
    assert_eq!(
        result.totals.grand_total,
        result.totals.total_vaccine_cost + result.totals.total_machine_cost
    );
    assert_eq!(result.totals.total_vaccine_cost, decimal("15540.16322"));

    let shown = result.rounded_for_display();
    assert_eq!(shown.totals.total_machine_cost, decimal("8002.87"));
    assert_eq!(shown.totals.grand_total, decimal("23543.03"));
}

// =============================================================================
// SECTION 2: Empty and zero-size orders
// =============================================================================

#[test]
fn test_nothing_selected() {
    let json = price_json(reference_order(), json!({}));

    assert!(json["line_items"].as_array().unwrap().is_empty());
    assert_eq!(money(&json["totals"]["grand_total"]), Decimal::ZERO);
    assert_eq!(money(&json["totals"]["cost_per_chick"]), Decimal::ZERO);
    assert!(json["warnings"].as_array().unwrap().is_empty());
    assert!(json["coverage"].as_array().unwrap().is_empty());
    assert_eq!(json["injection_passes"], 0);
}

#[test]
fn test_selections_may_be_omitted() {
    let request: PricingRequest = serde_json::from_value(json!({
        "order": reference_order()
    }))
    .unwrap();
    let result = create_engine().price_request(&request).unwrap();
    assert!(result.line_items.is_empty());
}

#[test]
fn test_empty_slots_contribute_nothing() {
    let with_blanks = price(
        reference_order(),
        json!({
            "in_ovo": [{ "vaccine": null }, { "vaccine": "Transmune" }, {}],
            "spray": [{ "vaccine": null }]
        }),
    )
    .unwrap();
    let without_blanks = price(
        reference_order(),
        json!({ "in_ovo": [{ "vaccine": "Transmune" }] }),
    )
    .unwrap();

    assert_eq!(with_blanks.line_items, without_blanks.line_items);
    assert_eq!(with_blanks.totals, without_blanks.totals);
}

#[test]
fn test_zero_chicks_has_zero_per_chick() {
    let json = price_json(
        json!({
            "saleable_chicks": 0,
            "egg_multiplier": "2.5",
            "monthly_egg_volume": 500000,
            "beak_treatment": true
        }),
        json!({ "in_ovo": [{ "vaccine": "Transmune" }] }),
    );

    assert_eq!(json["eggs_for_in_ovo"], 0);
    assert_eq!(money(&json["totals"]["grand_total"]), Decimal::ZERO);
    assert_eq!(money(&json["totals"]["cost_per_chick"]), Decimal::ZERO);
    for line in json["line_items"].as_array().unwrap() {
        assert_eq!(money(&line["cost_per_chick"]), Decimal::ZERO);
    }
}

// =============================================================================
// SECTION 3: Warnings
// =============================================================================

#[test]
fn test_vector_conflict_across_methods() {
    let json = price_json(
        reference_order(),
        json!({
            "in_ovo": [{ "vaccine": "Innovax ND-ILT" }],
            "day_old_injection": [{ "vaccine": "Vectormune ND" }]
        }),
    );

    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["kind"], "vector_conflict");
    assert_eq!(warnings[0]["severity"], "critical");
    assert_eq!(
        warnings[0]["selections"],
        json!(["Innovax ND-ILT (Inovo)", "Vectormune ND (Day Old Inj)"])
    );
}

#[test]
fn test_hvt_interference_is_advisory() {
    let json = price_json(
        reference_order(),
        json!({
            "in_ovo": [
                { "vaccine": "Nobilis Rismavac +CA126" },
                { "vaccine": "Innovax ND-IBD" }
            ]
        }),
    );

    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["kind"], "hvt_interference");
    assert_eq!(warnings[0]["severity"], "advisory");
    assert_eq!(
        warnings[0]["recommendation"],
        "Consider Rismavac HIGH PFU instead"
    );
    assert!(money(&json["totals"]["grand_total"]) > Decimal::ZERO);
}

#[test]
fn test_high_pfu_with_innovax_has_no_interference() {
    let json = price_json(
        reference_order(),
        json!({
            "in_ovo": [
                { "vaccine": "Nobilis Rismavac HIGH PFU" },
                { "vaccine": "Innovax ND-IBD" }
            ]
        }),
    );
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 4: Coverage
// =============================================================================

#[test]
fn test_coverage_in_taxonomy_order_with_providers() {
    let json = price_json(
        reference_order(),
        json!({
            "in_ovo": [{ "vaccine": "Innovax ND-IBD" }],
            "day_old_injection": [{ "vaccine": "Transmune" }, { "vaccine": "Lincocin" }],
            "spray": [{ "vaccine": "Evalon" }]
        }),
    );

    let coverage = json["coverage"].as_array().unwrap();
    let diseases: Vec<&str> = coverage
        .iter()
        .map(|c| c["disease_label"].as_str().unwrap())
        .collect();
    assert_eq!(
        diseases,
        vec![
            "Marek's Disease",
            "Newcastle Disease (ND)",
            "Gumboro (IBD)",
            "Coccidiosis (5-Strain Core Protection)",
            "Bacterial Infections (Antibiotic Only)",
        ]
    );
    assert_eq!(
        coverage[2]["providing_vaccines"],
        json!(["Innovax ND-IBD (Inovo)", "Transmune (Day Old Inj)"])
    );

    let counts = json["coverage_counts"].as_array().unwrap();
    assert_eq!(counts.len(), 5);
    assert_eq!(counts[0]["category"], "Marek's Disease");
    assert_eq!(counts[0]["count"], 1);
    assert_eq!(counts[4]["category"], "Bacterial");
    assert_eq!(counts[4]["icon"], "💊");
}

// =============================================================================
// SECTION 5: Error cases
// =============================================================================

#[test]
fn test_negative_chicks_rejected() {
    let result = price(
        json!({
            "saleable_chicks": -1,
            "egg_multiplier": "2.5",
            "monthly_egg_volume": 500000
        }),
        json!({}),
    );
    match result {
        Err(EngineError::InvalidOrder { field, .. }) => assert_eq!(field, "saleable_chicks"),
        other => panic!("Expected InvalidOrder, got {:?}", other),
    }
}

#[test]
fn test_egg_multiplier_above_limit_rejected() {
    let result = price(
        json!({
            "saleable_chicks": 100000,
            "egg_multiplier": "5.5",
            "monthly_egg_volume": 500000
        }),
        json!({}),
    );
    match result {
        Err(EngineError::InvalidOrder { field, .. }) => assert_eq!(field, "egg_multiplier"),
        other => panic!("Expected InvalidOrder, got {:?}", other),
    }
}

#[test]
fn test_zero_monthly_volume_rejected() {
    let result = price(
        json!({
            "saleable_chicks": 100000,
            "egg_multiplier": "2.5",
            "monthly_egg_volume": 0
        }),
        json!({}),
    );
    assert!(matches!(result, Err(EngineError::InvalidOrder { .. })));
}

#[test]
fn test_unknown_vaccine_rejected() {
    let result = price(
        reference_order(),
        json!({ "in_ovo": [{ "vaccine": "Marek Magic" }] }),
    );
    match result {
        Err(EngineError::UnknownVaccine { name }) => assert_eq!(name, "Marek Magic"),
        other => panic!("Expected UnknownVaccine, got {:?}", other),
    }
}

#[test]
fn test_spray_double_dose_rejected() {
    let result = price(
        reference_order(),
        json!({ "spray": [{ "vaccine": "IB Ma5", "double_dose": true }] }),
    );
    match result {
        Err(EngineError::InvalidSelection { method, .. }) => {
            assert_eq!(method, DeliveryMethod::Spray)
        }
        other => panic!("Expected InvalidSelection, got {:?}", other),
    }
}

#[test]
fn test_vaccine_under_wrong_method_rejected() {
    let result = price(
        reference_order(),
        json!({ "in_ovo": [{ "vaccine": "Reo" }] }),
    );
    assert!(matches!(
        result,
        Err(EngineError::InvalidSelection {
            method: DeliveryMethod::InOvo,
            ..
        })
    ));
}

#[test]
fn test_too_many_slots_rejected() {
    let result = price(
        reference_order(),
        json!({
            "spray": [
                { "vaccine": "IB 4/91" },
                { "vaccine": "IB Ma5" },
                { "vaccine": "IB Primer" },
                { "vaccine": "IBird" },
                { "vaccine": "Evalon" }
            ]
        }),
    );
    assert!(matches!(
        result,
        Err(EngineError::InvalidSelection {
            method: DeliveryMethod::Spray,
            ..
        })
    ));
}

#[test]
fn test_audit_trace_serialized() {
    let json = price_json(
        reference_order(),
        json!({ "in_ovo": [{ "vaccine": "Transmune" }] }),
    );

    let steps = json["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "dose_multipliers",
            "vaccine_cost",
            "in_ovo_machine",
            "injection_machine",
            "treatments",
            "totals",
        ]
    );
    assert_eq!(json["catalogue_version"], "2025-01");
}
