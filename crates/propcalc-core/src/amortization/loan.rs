use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PropCalcError;
use crate::types::{Money, Rate};
use crate::PropCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// A fixed-rate, fixed-term amortizing loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original or current balance
    pub principal: Money,
    /// Nominal annual interest rate as a percentage (6.5 means 6.5%)
    pub annual_rate_percent: Rate,
    /// Total number of scheduled monthly payments
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(
        principal: Money,
        annual_rate_percent: Rate,
        term_months: u32,
    ) -> PropCalcResult<Self> {
        let terms = Self {
            principal,
            annual_rate_percent,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> PropCalcResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(PropCalcError::InvalidInput {
                field: "principal".into(),
                reason: "Loan principal must be positive".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(PropCalcError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.term_months == 0 {
            return Err(PropCalcError::InvalidInput {
                field: "term_months".into(),
                reason: "Loan term must be at least 1 month".into(),
            });
        }
        Ok(())
    }

    /// Periodic rate: annual percentage / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / PERCENT / MONTHS_PER_YEAR
    }
}

/// Fixed payment that fully amortizes the loan over its term.
///
/// Standard annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`. The
/// zero-interest loan degenerates to `principal / term_months` and is
/// handled here rather than left to the caller.
pub fn monthly_payment(loan: &LoanTerms) -> PropCalcResult<Money> {
    loan.validate()?;

    let r = loan.monthly_rate();
    let n = Decimal::from(loan.term_months);

    if r.is_zero() {
        return Ok(loan.principal / n);
    }

    let factor = (Decimal::ONE + r).powi(loan.term_months as i64);
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(PropCalcError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    Ok(loan.principal * r * factor / denominator)
}

/// Payment plus lifetime totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Single-payment calculation with the standard output envelope.
pub fn calculate_payment(
    loan: &LoanTerms,
) -> PropCalcResult<crate::types::ComputationOutput<PaymentOutput>> {
    let start = std::time::Instant::now();

    let monthly_payment = monthly_payment(loan)?;
    let total_paid = monthly_payment * Decimal::from(loan.term_months);

    let output = PaymentOutput {
        monthly_payment,
        total_paid,
        total_interest: total_paid - loan.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(crate::types::with_metadata(
        "Fixed-rate annuity payment",
        &serde_json::json!({
            "principal": loan.principal.to_string(),
            "annual_rate_percent": loan.annual_rate_percent.to_string(),
            "term_months": loan.term_months,
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

    #[test]
    fn test_monthly_payment_known_answer() {
        // 300k at 6.5% over 30 years => ~$1,896.20/month
        let loan = LoanTerms::new(dec!(300000), dec!(6.5), 360).unwrap();
        let payment = monthly_payment(&loan).unwrap();
        assert!(
            (payment - dec!(1896.20)).abs() < dec!(0.05),
            "expected ~1896.20, got {payment}"
        );
    }

    #[test]
    fn test_monthly_payment_short_term() {
        // 12k at 12% over 12 months => ~$1,066.19/month
        let loan = LoanTerms::new(dec!(12000), dec!(12), 12).unwrap();
        let payment = monthly_payment(&loan).unwrap();
        assert!((payment - dec!(1066.19)).abs() < dec!(0.05));
    }

    #[test]
    fn test_zero_rate_loan_divides_evenly() {
        let loan = LoanTerms::new(dec!(120000), dec!(0), 240).unwrap();
        assert_eq!(monthly_payment(&loan).unwrap(), dec!(500));
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        assert!(LoanTerms::new(dec!(0), dec!(6.5), 360).is_err());
        assert!(LoanTerms::new(dec!(-1000), dec!(6.5), 360).is_err());
    }

    #[test]
    fn test_rejects_zero_term() {
        assert!(LoanTerms::new(dec!(100000), dec!(6.5), 0).is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        assert!(LoanTerms::new(dec!(100000), dec!(-1), 360).is_err());
    }

    #[test]
    fn test_monthly_rate() {
        let loan = LoanTerms::new(dec!(100000), dec!(6), 360).unwrap();
        assert_eq!(loan.monthly_rate(), dec!(0.005));
    }
}
