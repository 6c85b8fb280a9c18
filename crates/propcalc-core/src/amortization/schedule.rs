use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::loan::{monthly_payment, LoanTerms};
use crate::error::PropCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Extra principal applied on top of the scheduled payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayments {
    /// Extra principal every month
    pub monthly: Money,
    /// Extra principal every 12th month
    pub annual: Money,
    /// First month (1-based) from which extras apply
    pub start_month: u32,
}

impl ExtraPayments {
    pub fn none() -> Self {
        Self {
            monthly: Decimal::ZERO,
            annual: Decimal::ZERO,
            start_month: 1,
        }
    }

    fn validate(&self) -> PropCalcResult<()> {
        if self.monthly < Decimal::ZERO {
            return Err(PropCalcError::InvalidInput {
                field: "monthly".into(),
                reason: "Extra monthly payment cannot be negative".into(),
            });
        }
        if self.annual < Decimal::ZERO {
            return Err(PropCalcError::InvalidInput {
                field: "annual".into(),
                reason: "Extra annual payment cannot be negative".into(),
            });
        }
        Ok(())
    }

    /// Extra principal scheduled for a given 1-based month.
    fn scheduled_for(&self, month: u32) -> Money {
        if month < self.start_month.max(1) {
            return Decimal::ZERO;
        }
        let mut extra = self.monthly;
        if month % 12 == 0 {
            extra += self.annual;
        }
        extra
    }
}

impl Default for ExtraPayments {
    fn default() -> Self {
        Self::none()
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One simulated month of the schedule.
///
/// `principal_portion + extra_principal` always equals the cash actually
/// applied to the balance that month: when the final payment would drive the
/// balance negative, the overshoot is counted against `extra_principal`
/// (which may go negative in that month) rather than the scheduled portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationStep {
    /// 1-based month number
    pub month_index: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub extra_principal: Money,
    /// Remaining balance, clamped at zero
    pub ending_balance: Money,
}

/// Full simulated schedule with totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    /// The scheduled annuity payment
    pub base_payment: Money,
    pub steps: Vec<AmortizationStep>,
    pub months_elapsed: u32,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_extra: Money,
    /// Final-month overshoot clamped out of the last payment. Reported
    /// separately so the extra-payment total still reflects cash applied.
    pub final_adjustment: Money,
}

/// Standard-vs-accelerated comparison across two schedule runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOutput {
    pub base_payment: Money,
    pub total_interest_standard: Money,
    pub total_interest_accelerated: Money,
    pub interest_saved: Money,
    pub months_standard: u32,
    pub months_accelerated: u32,
    pub months_saved: u32,
}

// ---------------------------------------------------------------------------
// Schedule iterator
// ---------------------------------------------------------------------------

/// Lazy month-by-month amortization walk.
///
/// Yields one step per month until the balance reaches zero or the loan term
/// is exhausted, whichever comes first.
pub struct ScheduleIter {
    balance: Money,
    monthly_rate: Rate,
    base_payment: Money,
    extras: ExtraPayments,
    month: u32,
    term_months: u32,
}

impl Iterator for ScheduleIter {
    type Item = AmortizationStep;

    fn next(&mut self) -> Option<AmortizationStep> {
        if self.balance <= Decimal::ZERO || self.month >= self.term_months {
            return None;
        }
        self.month += 1;

        let interest = self.balance * self.monthly_rate;
        let principal = self.base_payment - interest;
        let mut extra = self.extras.scheduled_for(self.month);

        let mut ending = self.balance - principal - extra;
        if ending < Decimal::ZERO {
            // Clamp at zero; the overshoot reduces the counted extra so that
            // principal + extra matches the cash actually applied.
            extra += ending;
            ending = Decimal::ZERO;
        }
        self.balance = ending;

        Some(AmortizationStep {
            month_index: self.month,
            interest_portion: interest,
            principal_portion: principal,
            extra_principal: extra,
            ending_balance: ending,
        })
    }
}

/// Build the lazy schedule iterator for a loan.
pub fn schedule_iter(loan: &LoanTerms, extras: &ExtraPayments) -> PropCalcResult<ScheduleIter> {
    extras.validate()?;
    let base_payment = monthly_payment(loan)?;
    Ok(ScheduleIter {
        balance: loan.principal,
        monthly_rate: loan.monthly_rate(),
        base_payment,
        extras: extras.clone(),
        month: 0,
        term_months: loan.term_months,
    })
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

/// Run the full schedule and aggregate totals.
pub fn simulate_schedule(
    loan: &LoanTerms,
    extras: &ExtraPayments,
) -> PropCalcResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let iter = schedule_iter(loan, extras)?;
    let base_payment = monthly_payment(loan)?;

    let mut steps = Vec::with_capacity(loan.term_months as usize);
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_extra = Decimal::ZERO;
    let mut final_adjustment = Decimal::ZERO;

    for step in iter {
        total_interest += step.interest_portion;
        total_principal += step.principal_portion;
        total_extra += step.extra_principal;
        final_adjustment += extras.scheduled_for(step.month_index) - step.extra_principal;
        steps.push(step);
    }

    let months_elapsed = steps.len() as u32;
    if let Some(last) = steps.last() {
        // sub-cent residue is decimal rounding noise, not a short payoff
        if last.ending_balance > dec!(0.005) {
            warnings.push(format!(
                "Balance of {} remains after the scheduled term",
                last.ending_balance.round_dp(2)
            ));
        }
    }

    let output = ScheduleOutput {
        base_payment,
        steps,
        months_elapsed,
        total_interest,
        total_principal,
        total_extra,
        final_adjustment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization schedule (monthly compounding)",
        &serde_json::json!({
            "principal": loan.principal.to_string(),
            "annual_rate_percent": loan.annual_rate_percent.to_string(),
            "term_months": loan.term_months,
            "extra_monthly": extras.monthly.to_string(),
            "extra_annual": extras.annual.to_string(),
            "extra_start_month": extras.start_month,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Run the schedule twice — once without extras, once with — and report the
/// interest and time saved. This is the comparison basis every
/// extra-payment, recast, and refinance calculator shares.
pub fn compare_standard_vs_accelerated(
    loan: &LoanTerms,
    extras: &ExtraPayments,
) -> PropCalcResult<ComputationOutput<ComparisonOutput>> {
    let start = Instant::now();

    let standard = simulate_schedule(loan, &ExtraPayments::none())?;
    let accelerated = simulate_schedule(loan, extras)?;

    let output = ComparisonOutput {
        base_payment: standard.result.base_payment,
        total_interest_standard: standard.result.total_interest,
        total_interest_accelerated: accelerated.result.total_interest,
        interest_saved: standard.result.total_interest - accelerated.result.total_interest,
        months_standard: standard.result.months_elapsed,
        months_accelerated: accelerated.result.months_elapsed,
        months_saved: standard
            .result
            .months_elapsed
            .saturating_sub(accelerated.result.months_elapsed),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Standard vs accelerated amortization comparison",
        &serde_json::json!({
            "principal": loan.principal.to_string(),
            "annual_rate_percent": loan.annual_rate_percent.to_string(),
            "term_months": loan.term_months,
            "extra_monthly": extras.monthly.to_string(),
            "extra_annual": extras.annual.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn thirty_year_loan() -> LoanTerms {
        LoanTerms::new(dec!(300000), dec!(6.5), 360).unwrap()
    }

    #[test]
    fn test_schedule_runs_full_term_without_extras() {
        let out = simulate_schedule(&thirty_year_loan(), &ExtraPayments::none()).unwrap();
        assert_eq!(out.result.months_elapsed, 360);
        let last = out.result.steps.last().unwrap();
        assert!(last.ending_balance.abs() < dec!(0.000001));
    }

    #[test]
    fn test_balance_monotonically_non_increasing() {
        let extras = ExtraPayments {
            monthly: dec!(150),
            annual: dec!(1000),
            start_month: 1,
        };
        let out = simulate_schedule(&thirty_year_loan(), &extras).unwrap();
        let mut previous = dec!(300000);
        for step in &out.result.steps {
            assert!(step.ending_balance <= previous);
            assert!(step.ending_balance >= dec!(0));
            previous = step.ending_balance;
        }
    }

    #[test]
    fn test_extras_shorten_payoff() {
        let extras = ExtraPayments {
            monthly: dec!(200),
            annual: dec!(0),
            start_month: 1,
        };
        let out = simulate_schedule(&thirty_year_loan(), &extras).unwrap();
        assert!(out.result.months_elapsed < 360);
        assert_eq!(out.result.steps.last().unwrap().ending_balance, dec!(0));
    }

    #[test]
    fn test_cash_applied_equals_principal() {
        // principal portions + extras across the whole run pay off the
        // original balance exactly, clamp included
        let extras = ExtraPayments {
            monthly: dec!(250),
            annual: dec!(0),
            start_month: 1,
        };
        let out = simulate_schedule(&thirty_year_loan(), &extras).unwrap();
        let applied = out.result.total_principal + out.result.total_extra;
        assert!((applied - dec!(300000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_final_month_clamp_reduces_extra() {
        // Oversized extra forces an overshoot in the final month
        let loan = LoanTerms::new(dec!(10000), dec!(6), 120).unwrap();
        let extras = ExtraPayments {
            monthly: dec!(3000),
            annual: dec!(0),
            start_month: 1,
        };
        let out = simulate_schedule(&loan, &extras).unwrap();
        let last = out.result.steps.last().unwrap();
        assert_eq!(last.ending_balance, dec!(0));
        assert!(last.extra_principal < dec!(3000));
        assert!(out.result.final_adjustment > dec!(0));
    }

    #[test]
    fn test_extra_start_month_delays_extras() {
        let extras = ExtraPayments {
            monthly: dec!(100),
            annual: dec!(0),
            start_month: 13,
        };
        let out = simulate_schedule(&thirty_year_loan(), &extras).unwrap();
        assert_eq!(out.result.steps[0].extra_principal, dec!(0));
        assert_eq!(out.result.steps[11].extra_principal, dec!(0));
        assert_eq!(out.result.steps[12].extra_principal, dec!(100));
    }

    #[test]
    fn test_annual_extra_applies_every_twelfth_month() {
        let extras = ExtraPayments {
            monthly: dec!(0),
            annual: dec!(1200),
            start_month: 1,
        };
        let out = simulate_schedule(&thirty_year_loan(), &extras).unwrap();
        assert_eq!(out.result.steps[10].extra_principal, dec!(0));
        assert_eq!(out.result.steps[11].extra_principal, dec!(1200));
        assert_eq!(out.result.steps[23].extra_principal, dec!(1200));
    }

    #[test]
    fn test_comparison_reports_savings() {
        let extras = ExtraPayments {
            monthly: dec!(200),
            annual: dec!(0),
            start_month: 1,
        };
        let out = compare_standard_vs_accelerated(&thirty_year_loan(), &extras).unwrap();
        let result = &out.result;
        assert!(result.interest_saved > dec!(0));
        assert!(result.months_saved > 0);
        assert_eq!(
            result.months_saved,
            result.months_standard - result.months_accelerated
        );
        assert_eq!(
            result.interest_saved,
            result.total_interest_standard - result.total_interest_accelerated
        );
    }

    #[test]
    fn test_rejects_negative_extras() {
        let extras = ExtraPayments {
            monthly: dec!(-1),
            annual: dec!(0),
            start_month: 1,
        };
        assert!(schedule_iter(&thirty_year_loan(), &extras).is_err());
    }

    #[test]
    fn test_zero_rate_schedule() {
        let loan = LoanTerms::new(dec!(12000), dec!(0), 12).unwrap();
        let out = simulate_schedule(&loan, &ExtraPayments::none()).unwrap();
        assert_eq!(out.result.months_elapsed, 12);
        assert_eq!(out.result.total_interest, dec!(0));
        assert_eq!(out.result.total_principal, dec!(12000));
    }
}
