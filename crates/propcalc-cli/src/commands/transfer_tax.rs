use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use propcalc_core::transfer_tax::brackets::{calculate_tiered_tax, RateClass};
use propcalc_core::transfer_tax::flat_rate::{calculate_flat_tax, FlatRateSchedule};
use propcalc_core::transfer_tax::tables;

/// States with tiered (marginal-bracket) transfer taxes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TieredState {
    Hawaii,
    Maine,
    RhodeIsland,
}

/// States with flat per-increment transfer taxes
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FlatState {
    Alabama,
    Minnesota,
    SouthDakota,
}

/// Arguments for the tiered transfer-tax calculation
#[derive(Args)]
pub struct TransferTaxArgs {
    /// State whose bracket table applies
    #[arg(long, value_enum)]
    pub state: TieredState,

    /// Sale price / consideration
    #[arg(long)]
    pub amount: Decimal,

    /// Apply the reduced owner-occupant rate column where the state has one
    #[arg(long, default_value_t = false)]
    pub owner_occupant: bool,
}

pub fn run_transfer_tax(args: TransferTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = match args.state {
        TieredState::Hawaii => tables::hawaii()?,
        TieredState::Maine => tables::maine()?,
        TieredState::RhodeIsland => tables::rhode_island()?,
    };
    let class = if args.owner_occupant {
        RateClass::Alternate
    } else {
        RateClass::Standard
    };

    let result = calculate_tiered_tax(args.amount, &table, class)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the flat per-increment tax calculation
#[derive(Args)]
pub struct FlatTaxArgs {
    /// State whose per-increment schedule applies
    #[arg(long, value_enum, conflicts_with_all = ["unit", "rate"])]
    pub state: Option<FlatState>,

    /// Sale price / consideration
    #[arg(long)]
    pub amount: Decimal,

    /// Custom increment size (requires --rate)
    #[arg(long, requires = "rate")]
    pub unit: Option<Decimal>,

    /// Custom tax per started increment (requires --unit)
    #[arg(long, requires = "unit")]
    pub rate: Option<Decimal>,
}

pub fn run_flat_tax(args: FlatTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = match (args.state, args.unit, args.rate) {
        (Some(state), _, _) => match state {
            FlatState::Alabama => tables::alabama(),
            FlatState::Minnesota => tables::minnesota(),
            FlatState::SouthDakota => tables::south_dakota(),
        },
        (None, Some(unit), Some(rate)) => FlatRateSchedule {
            name: "custom".into(),
            unit,
            rate_per_unit: rate,
        },
        _ => return Err("--state or both --unit and --rate are required".into()),
    };

    let result = calculate_flat_tax(args.amount, &schedule)?;
    Ok(serde_json::to_value(result)?)
}
