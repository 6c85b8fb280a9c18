use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::PropCalcResult;

/// A flat per-increment deed or transfer tax ($0.50 per $500 started).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRateSchedule {
    pub name: String,
    /// Increment size the statute taxes in (typically 100 or 500)
    pub unit: Money,
    /// Tax per started increment
    pub rate_per_unit: Money,
}

/// Result of a flat per-unit tax calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatTaxOutput {
    /// Number of started increments (the unit count rounds up, never the
    /// remainder — the legally distinct rule these statutes use)
    pub units: Decimal,
    pub tax: Money,
}

/// Per-increment tax: `ceil(amount / unit) * rate_per_unit`.
///
/// This is not the single-bracket case of the marginal accumulator: the
/// statute rounds the unit count up, so a $250,100 sale owes tax on 501
/// full $500 increments. A non-positive amount yields zero.
pub fn apply_flat_per_unit_rate(
    amount: Money,
    unit: Money,
    rate_per_unit: Money,
) -> PropCalcResult<Money> {
    if unit <= Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "unit".into(),
            reason: "Taxable increment must be positive".into(),
        });
    }
    if rate_per_unit < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "rate_per_unit".into(),
            reason: "Rate per increment cannot be negative".into(),
        });
    }
    if amount <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let units = (amount / unit).ceil();
    Ok(units * rate_per_unit)
}

/// Flat per-unit tax with the standard output envelope.
pub fn calculate_flat_tax(
    amount: Money,
    schedule: &FlatRateSchedule,
) -> PropCalcResult<ComputationOutput<FlatTaxOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if amount <= Decimal::ZERO {
        warnings.push("Non-positive consideration; tax is zero".into());
    }

    let tax = apply_flat_per_unit_rate(amount, schedule.unit, schedule.rate_per_unit)?;
    let units = if amount > Decimal::ZERO {
        (amount / schedule.unit).ceil()
    } else {
        Decimal::ZERO
    };

    let output = FlatTaxOutput { units, tax };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat per-increment transfer tax",
        &serde_json::json!({
            "schedule": schedule.name,
            "amount": amount.to_string(),
            "unit": schedule.unit.to_string(),
            "rate_per_unit": schedule.rate_per_unit.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
