//! Statutory transfer-tax configuration shipped with the calculators.
//!
//! Tiered tables are validated marginal-bracket tables; flat schedules use
//! the per-started-increment rule. Amounts are statutory thresholds in
//! dollars, rates are decimal fractions of the consideration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::transfer_tax::brackets::{BracketTable, TaxBracket};
use crate::transfer_tax::flat_rate::FlatRateSchedule;
use crate::PropCalcResult;

/// Hawaii conveyance tax. Standard column applies to buyers ineligible for
/// the county homeowner exemption; the alternate column is the reduced
/// owner-occupant schedule.
pub fn hawaii() -> PropCalcResult<BracketTable> {
    BracketTable::new(
        "Hawaii conveyance tax",
        vec![
            bracket(Some(dec!(600000)), dec!(0.0015), Some(dec!(0.001))),
            bracket(Some(dec!(1000000)), dec!(0.0025), Some(dec!(0.002))),
            bracket(Some(dec!(2000000)), dec!(0.004), Some(dec!(0.003))),
            bracket(Some(dec!(4000000)), dec!(0.006), Some(dec!(0.005))),
            bracket(Some(dec!(6000000)), dec!(0.0085), Some(dec!(0.007))),
            bracket(Some(dec!(10000000)), dec!(0.011), Some(dec!(0.009))),
            bracket(None, dec!(0.0125), Some(dec!(0.01))),
        ],
    )
}

/// Maine real estate transfer tax with the graduated rate on the portion
/// of the consideration above $1,000,000.
pub fn maine() -> PropCalcResult<BracketTable> {
    BracketTable::new(
        "Maine real estate transfer tax",
        vec![
            bracket(Some(dec!(1000000)), dec!(0.0044), None),
            bracket(None, dec!(0.0094), None),
        ],
    )
}

/// Rhode Island real estate conveyance tax: $2.30 per $500 throughout,
/// with an additional $2.30 per $500 on the portion above $800,000.
pub fn rhode_island() -> PropCalcResult<BracketTable> {
    BracketTable::new(
        "Rhode Island real estate conveyance tax",
        vec![
            bracket(Some(dec!(800000)), dec!(0.0046), None),
            bracket(None, dec!(0.0092), None),
        ],
    )
}

/// Alabama deed recording tax: $0.50 per $500 started.
pub fn alabama() -> FlatRateSchedule {
    FlatRateSchedule {
        name: "Alabama deed recording tax".into(),
        unit: dec!(500),
        rate_per_unit: dec!(0.50),
    }
}

/// Minnesota deed tax: $1.65 per $500 started.
pub fn minnesota() -> FlatRateSchedule {
    FlatRateSchedule {
        name: "Minnesota deed tax".into(),
        unit: dec!(500),
        rate_per_unit: dec!(1.65),
    }
}

/// South Dakota real estate transfer fee: $0.50 per $500 started.
pub fn south_dakota() -> FlatRateSchedule {
    FlatRateSchedule {
        name: "South Dakota real estate transfer fee".into(),
        unit: dec!(500),
        rate_per_unit: dec!(0.50),
    }
}

fn bracket(
    upper_bound: Option<Decimal>,
    rate: Decimal,
    alternate_rate: Option<Decimal>,
) -> TaxBracket {
    TaxBracket {
        upper_bound,
        rate,
        alternate_rate,
    }
}
