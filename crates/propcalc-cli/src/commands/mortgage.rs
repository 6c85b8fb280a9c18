use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use propcalc_core::amortization::loan::{self, LoanTerms};
use propcalc_core::amortization::schedule::{self, ExtraPayments};

use crate::input;

/// Loan terms shared by the amortization subcommands.
#[derive(Args)]
pub struct LoanFlags {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (6.5 = 6.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years (mutually exclusive with --term-months)
    #[arg(long, conflicts_with = "term_months")]
    pub term_years: Option<u32>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,
}

impl LoanFlags {
    fn into_terms(self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        let principal = self.principal.ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let term_months = match (self.term_months, self.term_years) {
            (Some(months), _) => months,
            (None, Some(years)) => years.saturating_mul(12),
            (None, None) => return Err("--term-years or --term-months is required".into()),
        };
        Ok(LoanTerms::new(principal, rate, term_months)?)
    }
}

/// Extra-payment flags shared by schedule and comparison subcommands.
#[derive(Args)]
pub struct ExtraFlags {
    /// Extra principal every month
    #[arg(long, default_value_t = dec!(0))]
    pub extra_monthly: Decimal,

    /// Extra principal every 12th month
    #[arg(long, default_value_t = dec!(0))]
    pub extra_annual: Decimal,

    /// First month (1-based) from which extras apply
    #[arg(long, default_value = "1")]
    pub extra_start_month: u32,
}

impl ExtraFlags {
    fn into_extras(self) -> ExtraPayments {
        ExtraPayments {
            monthly: self.extra_monthly,
            annual: self.extra_annual,
            start_month: self.extra_start_month,
        }
    }
}

/// JSON request shape accepted via --input or stdin.
#[derive(Deserialize)]
struct ScheduleRequest {
    loan: LoanTerms,
    #[serde(default)]
    extras: ExtraPayments,
}

/// Arguments for the payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(terms) = input::stdin::read_json()? {
        terms
    } else {
        args.loan.into_terms()?
    };

    let result = loan::calculate_payment(&terms)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the schedule simulation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    #[command(flatten)]
    pub extras: ExtraFlags,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ScheduleRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(request) = input::stdin::read_json()? {
        request
    } else {
        ScheduleRequest {
            loan: args.loan.into_terms()?,
            extras: args.extras.into_extras(),
        }
    };

    let result = schedule::simulate_schedule(&request.loan, &request.extras)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the standard-vs-accelerated comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    #[command(flatten)]
    pub extras: ExtraFlags,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ScheduleRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(request) = input::stdin::read_json()? {
        request
    } else {
        ScheduleRequest {
            loan: args.loan.into_terms()?,
            extras: args.extras.into_extras(),
        }
    };

    let result = schedule::compare_standard_vs_accelerated(&request.loan, &request.extras)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        extras: ExtraFlags,
    }

    #[test]
    fn test_extra_flags_default_to_zero() {
        let harness = Harness::parse_from(["schedule"]);
        let extras = harness.extras.into_extras();
        assert_eq!(extras.monthly, dec!(0));
        assert_eq!(extras.annual, dec!(0));
        assert_eq!(extras.start_month, 1);
    }

    #[test]
    fn test_extra_flags_parse_decimals() {
        let harness = Harness::parse_from(["schedule", "--extra-monthly", "150.50"]);
        assert_eq!(harness.extras.into_extras().monthly, dec!(150.50));
    }
}
