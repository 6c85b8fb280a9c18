use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use propcalc_core::waterfall::distribution::{self, WaterfallDeal};

use crate::input;

/// Arguments for the waterfall allocation
#[derive(Args)]
pub struct WaterfallArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Total LP capital contribution
    #[arg(long)]
    pub lp_capital: Option<Decimal>,

    /// Total GP capital contribution
    #[arg(long)]
    pub gp_capital: Option<Decimal>,

    /// Annual preferred return as a percentage (8 = 8%)
    #[arg(long)]
    pub pref_rate: Option<Decimal>,

    /// Hold period in years
    #[arg(long)]
    pub hold_years: Option<Decimal>,

    /// GP catch-up as a percentage of the GP preferred entitlement
    #[arg(long, default_value_t = dec!(100))]
    pub catch_up: Decimal,

    /// LP share of the residual promote split, as a percentage
    #[arg(long, default_value_t = dec!(70))]
    pub lp_promote_share: Decimal,

    /// Total profit being distributed
    #[arg(long)]
    pub total_profit: Option<Decimal>,
}

pub fn run_waterfall(args: WaterfallArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deal: WaterfallDeal = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(deal) = input::stdin::read_json()? {
        deal
    } else {
        WaterfallDeal {
            lp_capital: args
                .lp_capital
                .ok_or("--lp-capital is required (or provide --input)")?,
            gp_capital: args
                .gp_capital
                .ok_or("--gp-capital is required (or provide --input)")?,
            preferred_return_rate_percent: args
                .pref_rate
                .ok_or("--pref-rate is required (or provide --input)")?,
            hold_period_years: args
                .hold_years
                .ok_or("--hold-years is required (or provide --input)")?,
            catch_up_percent: args.catch_up,
            promote_split_lp_percent: args.lp_promote_share,
            total_profit: args
                .total_profit
                .ok_or("--total-profit is required (or provide --input)")?,
        }
    };

    let result = distribution::allocate_waterfall(&deal)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: WaterfallArgs,
    }

    #[test]
    fn test_catch_up_and_promote_defaults() {
        let harness = Harness::parse_from(["waterfall"]);
        assert_eq!(harness.args.catch_up, dec!(100));
        assert_eq!(harness.args.lp_promote_share, dec!(70));
    }

    #[test]
    fn test_explicit_percentages_override_defaults() {
        let harness =
            Harness::parse_from(["waterfall", "--catch-up", "50", "--lp-promote-share", "80"]);
        assert_eq!(harness.args.catch_up, dec!(50));
        assert_eq!(harness.args.lp_promote_share, dec!(80));
    }
}
