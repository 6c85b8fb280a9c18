#![cfg(feature = "transfer_tax")]

use propcalc_core::transfer_tax::brackets::{
    apply_brackets, BracketTable, RateClass, TaxBracket,
};
use propcalc_core::transfer_tax::flat_rate::apply_flat_per_unit_rate;
use propcalc_core::transfer_tax::tables;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Tiered accumulator — statutory known answers and conservation
// ===========================================================================

#[test]
fn test_hawaii_owner_occupant_850k_is_1100() {
    let table = tables::hawaii().unwrap();
    let out = apply_brackets(dec!(850000), &table, RateClass::Alternate);
    assert_eq!(out.total, dec!(1100));
}

#[test]
fn test_hawaii_ten_million_luxury_sale() {
    // Standard column, all seven brackets touched:
    // 600k@0.15% + 400k@0.25% + 1M@0.4% + 2M@0.6% + 2M@0.85% + 4M@1.1%
    // + 2M@1.25% on a 12M sale
    let table = tables::hawaii().unwrap();
    let out = apply_brackets(dec!(12000000), &table, RateClass::Standard);
    assert_eq!(out.slices.len(), 7);
    let expected = dec!(900) + dec!(1000) + dec!(4000) + dec!(12000) + dec!(17000)
        + dec!(44000)
        + dec!(25000);
    assert_eq!(out.total, expected);
}

#[test]
fn test_conservation_across_all_tiered_tables() {
    let amounts = [
        dec!(1),
        dec!(599999.99),
        dec!(600000),
        dec!(850000),
        dec!(1000000.01),
        dec!(7300000),
    ];
    for table in [
        tables::hawaii().unwrap(),
        tables::maine().unwrap(),
        tables::rhode_island().unwrap(),
    ] {
        for amount in amounts {
            for class in [RateClass::Standard, RateClass::Alternate] {
                let out = apply_brackets(amount, &table, class);
                let consumed: Decimal = out.slices.iter().map(|s| s.taxable).sum();
                assert_eq!(consumed, amount, "{} dropped dollars at {amount}", table.name());
                let summed: Decimal = out.slices.iter().map(|s| s.tax).sum();
                assert_eq!(summed, out.total, "{} total mismatch", table.name());
            }
        }
    }
}

#[test]
fn test_negative_amount_taxes_nothing() {
    let table = tables::maine().unwrap();
    let out = apply_brackets(dec!(-850000), &table, RateClass::Standard);
    assert_eq!(out.total, dec!(0));
    assert!(out.slices.is_empty());
}

// ===========================================================================
// Flat per-unit rule — the rounding semantics are not the one-bracket case
// ===========================================================================

#[test]
fn test_alabama_250k_known_answer() {
    assert_eq!(
        apply_flat_per_unit_rate(dec!(250000), dec!(500), dec!(0.50)).unwrap(),
        dec!(250.00)
    );
}

#[test]
fn test_flat_rule_rounds_unit_count_not_remainder() {
    // One dollar into the next increment owes the full increment
    assert_eq!(
        apply_flat_per_unit_rate(dec!(250001), dec!(500), dec!(0.50)).unwrap(),
        dec!(250.50)
    );
    // The marginal accumulator would have taxed the single dollar instead
    let degenerate = BracketTable::new(
        "flat-as-bracket",
        vec![TaxBracket {
            upper_bound: None,
            rate: dec!(0.001),
            alternate_rate: None,
        }],
    )
    .unwrap();
    let marginal = apply_brackets(dec!(250001), &degenerate, RateClass::Standard);
    assert_eq!(marginal.total, dec!(250.001));
}

#[test]
fn test_minnesota_deed_tax() {
    let schedule = tables::minnesota();
    let tax = apply_flat_per_unit_rate(dec!(350000), schedule.unit, schedule.rate_per_unit).unwrap();
    // 700 increments at $1.65
    assert_eq!(tax, dec!(1155.00));
}

// ===========================================================================
// Configuration validation
// ===========================================================================

#[test]
fn test_malformed_tables_rejected_at_construction() {
    // Missing unbounded tail
    assert!(BracketTable::new(
        "capped",
        vec![TaxBracket {
            upper_bound: Some(dec!(1000000)),
            rate: dec!(0.004),
            alternate_rate: None,
        }],
    )
    .is_err());

    // Descending bounds
    assert!(BracketTable::new(
        "descending",
        vec![
            TaxBracket {
                upper_bound: Some(dec!(600000)),
                rate: dec!(0.001),
                alternate_rate: None,
            },
            TaxBracket {
                upper_bound: Some(dec!(400000)),
                rate: dec!(0.002),
                alternate_rate: None,
            },
            TaxBracket {
                upper_bound: None,
                rate: dec!(0.003),
                alternate_rate: None,
            },
        ],
    )
    .is_err());
}

#[test]
fn test_idempotent() {
    let table = tables::hawaii().unwrap();
    let a = apply_brackets(dec!(850000), &table, RateClass::Alternate);
    let b = apply_brackets(dec!(850000), &table, RateClass::Alternate);
    assert_eq!(a, b);
}
