#![cfg(feature = "catalog")]

use propcalc_core::catalog::{self, CalculatorKind};
use propcalc_core::forms::FormValues;

// ===========================================================================
// Catalog — the form-in / rows-out boundary contract
// ===========================================================================

#[test]
fn test_every_calculator_runs_on_an_empty_form() {
    // Per-field defaults must make every registered calculator computable
    // with no input at all
    for def in catalog::catalog() {
        let rows = catalog::run(def.slug, &FormValues::new())
            .unwrap_or_else(|e| panic!("{} failed on empty form: {e}", def.slug));
        assert!(!rows.is_empty(), "{} produced no rows", def.slug);
    }
}

#[test]
fn test_row_order_is_stable() {
    let first = catalog::run("amortization-schedule", &FormValues::new()).unwrap();
    let second = catalog::run("amortization-schedule", &FormValues::new()).unwrap();
    assert_eq!(first, second);
    let labels: Vec<&str> = first.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Monthly Payment",
            "Months to Payoff",
            "Total Interest Paid",
            "Total Principal Paid",
            "Total Extra Payments",
        ]
    );
}

#[test]
fn test_currency_rows_are_two_decimal_strings() {
    for def in catalog::catalog() {
        for row in catalog::run(def.slug, &FormValues::new()).unwrap() {
            if row.is_currency {
                let (_, decimals) = row
                    .value
                    .split_once('.')
                    .unwrap_or_else(|| panic!("{}: '{}' not fixed-point", def.slug, row.value));
                assert_eq!(decimals.len(), 2, "{}: '{}'", def.slug, row.value);
            }
        }
    }
}

#[test]
fn test_transfer_tax_calculators_cover_both_rules() {
    let kinds: Vec<_> = catalog::catalog().iter().map(|d| d.kind).collect();
    assert!(kinds
        .iter()
        .any(|k| matches!(k, CalculatorKind::TieredTransferTax(_))));
    assert!(kinds
        .iter()
        .any(|k| matches!(k, CalculatorKind::FlatTransferTax(_))));
}

#[test]
fn test_garbage_fields_fall_back_per_field() {
    let mut values = FormValues::new();
    values.set_text("loan_amount", "not a number");
    values.set_text("annual_rate", "");
    let rows = catalog::run("mortgage-payment", &values).unwrap();
    // Defaults: 300,000 at 6.5% over 30 years
    assert!(rows[0].value.starts_with("1896."));
}
