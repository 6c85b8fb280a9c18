//! Form-to-rows execution of a registered calculator.
//!
//! This is the function-call boundary the website consumes: loosely-typed
//! form values in, an ordered list of display rows out. Field coercion
//! defaults are documented per calculator and applied per field, matching
//! the fallback each page historically defined.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization::loan::{monthly_payment, LoanTerms};
use crate::amortization::schedule::{
    compare_standard_vs_accelerated, simulate_schedule, ExtraPayments,
};
use crate::catalog::definitions::{find, CalculatorKind, FlatTable, TieredTable};
use crate::error::PropCalcError;
use crate::forms::FormValues;
use crate::transfer_tax::brackets::{calculate_tiered_tax, RateClass};
use crate::transfer_tax::flat_rate::calculate_flat_tax;
use crate::types::{Money, ResultRow};
use crate::waterfall::distribution::{allocate_waterfall, WaterfallDeal};
use crate::PropCalcResult;

/// Run the calculator registered under `slug` against submitted form
/// values. Row order is fixed per calculator and preserved exactly.
pub fn run(slug: &str, values: &FormValues) -> PropCalcResult<Vec<ResultRow>> {
    let def = find(slug).ok_or_else(|| PropCalcError::UnknownCalculator(slug.to_string()))?;

    match def.kind {
        CalculatorKind::LoanPayment => run_loan_payment(values),
        CalculatorKind::LoanSchedule => run_loan_schedule(values),
        CalculatorKind::ExtraPaymentSavings => run_extra_payment_savings(values),
        CalculatorKind::TieredTransferTax(table) => run_tiered_transfer_tax(table, values),
        CalculatorKind::FlatTransferTax(table) => run_flat_transfer_tax(table, values),
        CalculatorKind::SyndicationWaterfall => run_syndication_waterfall(values),
    }
}

/// Loan fields shared by the amortization family.
/// Defaults: loan_amount 300,000; annual_rate 6.5; term_years 30.
fn loan_from(values: &FormValues) -> PropCalcResult<LoanTerms> {
    let principal = values.decimal_or("loan_amount", dec!(300000));
    let rate = values.decimal_or("annual_rate", dec!(6.5));
    let term_years = values.integer_or("term_years", 30);
    LoanTerms::new(principal, rate, term_years.saturating_mul(12))
}

/// Extra-payment fields. Defaults: extra_monthly 0; extra_annual 0;
/// extra_start_month 1.
fn extras_from(values: &FormValues) -> ExtraPayments {
    ExtraPayments {
        monthly: values.decimal_or("extra_monthly", dec!(0)),
        annual: values.decimal_or("extra_annual", dec!(0)),
        start_month: values.integer_or("extra_start_month", 1),
    }
}

fn run_loan_payment(values: &FormValues) -> PropCalcResult<Vec<ResultRow>> {
    let loan = loan_from(values)?;
    let payment = monthly_payment(&loan)?;
    let total_paid = payment * Decimal::from(loan.term_months);

    Ok(vec![
        ResultRow::currency("Monthly Payment", payment),
        ResultRow::currency("Total of Payments", total_paid),
        ResultRow::currency("Total Interest", total_paid - loan.principal),
    ])
}

fn run_loan_schedule(values: &FormValues) -> PropCalcResult<Vec<ResultRow>> {
    let loan = loan_from(values)?;
    let extras = extras_from(values);
    let out = simulate_schedule(&loan, &extras)?;
    let result = &out.result;

    Ok(vec![
        ResultRow::currency("Monthly Payment", result.base_payment),
        ResultRow::text("Months to Payoff", result.months_elapsed.to_string()),
        ResultRow::currency("Total Interest Paid", result.total_interest),
        ResultRow::currency("Total Principal Paid", result.total_principal),
        ResultRow::currency("Total Extra Payments", result.total_extra),
    ])
}

fn run_extra_payment_savings(values: &FormValues) -> PropCalcResult<Vec<ResultRow>> {
    let loan = loan_from(values)?;
    let extras = extras_from(values);
    let out = compare_standard_vs_accelerated(&loan, &extras)?;
    let result = &out.result;

    Ok(vec![
        ResultRow::currency("Monthly Payment", result.base_payment),
        ResultRow::currency("Interest Without Extras", result.total_interest_standard),
        ResultRow::currency("Interest With Extras", result.total_interest_accelerated),
        ResultRow::currency("Interest Saved", result.interest_saved),
        ResultRow::text("Months Saved", result.months_saved.to_string()),
    ])
}

/// Transfer-tax fields. Defaults: sale_price 350,000; owner_occupant false.
fn run_tiered_transfer_tax(
    table: TieredTable,
    values: &FormValues,
) -> PropCalcResult<Vec<ResultRow>> {
    let amount = values.decimal_or("sale_price", dec!(350000));
    let class = if values.flag_or("owner_occupant", false) {
        RateClass::Alternate
    } else {
        RateClass::Standard
    };

    let bracket_table = table.build()?;
    let out = calculate_tiered_tax(amount, &bracket_table, class)?;

    Ok(vec![
        ResultRow::currency("Sale Price", amount),
        ResultRow::currency("Transfer Tax", out.result.total),
        ResultRow::text("Effective Rate", format_effective_rate(out.result.total, amount)),
    ])
}

fn run_flat_transfer_tax(table: FlatTable, values: &FormValues) -> PropCalcResult<Vec<ResultRow>> {
    let amount = values.decimal_or("sale_price", dec!(350000));
    let schedule = table.build();
    let out = calculate_flat_tax(amount, &schedule)?;

    Ok(vec![
        ResultRow::currency("Sale Price", amount),
        ResultRow::text("Taxable Increments", out.result.units.normalize().to_string()),
        ResultRow::currency("Transfer Tax", out.result.tax),
    ])
}

/// Waterfall fields. Defaults: lp_capital 1,000,000; gp_capital 100,000;
/// preferred_return 8; hold_years 5; catch_up 100; lp_promote_share 70;
/// total_profit 500,000.
fn run_syndication_waterfall(values: &FormValues) -> PropCalcResult<Vec<ResultRow>> {
    let deal = WaterfallDeal {
        lp_capital: values.decimal_or("lp_capital", dec!(1000000)),
        gp_capital: values.decimal_or("gp_capital", dec!(100000)),
        preferred_return_rate_percent: values.decimal_or("preferred_return", dec!(8)),
        hold_period_years: values.decimal_or("hold_years", dec!(5)),
        catch_up_percent: values.decimal_or("catch_up", dec!(100)),
        promote_split_lp_percent: values.decimal_or("lp_promote_share", dec!(70)),
        total_profit: values.decimal_or("total_profit", dec!(500000)),
    };
    let out = allocate_waterfall(&deal)?;
    let result = &out.result;

    Ok(vec![
        ResultRow::currency("LP Preferred Return Paid", result.lp_pref_paid),
        ResultRow::currency("GP Catch-Up Paid", result.gp_catch_up_paid),
        ResultRow::currency("LP Share of Promote", result.residual_to_lp),
        ResultRow::currency("GP Share of Promote", result.residual_to_gp),
        ResultRow::currency("Total LP Distribution", result.lp_distribution),
        ResultRow::currency("Total GP Distribution", result.gp_distribution),
    ])
}

fn format_effective_rate(tax: Money, amount: Money) -> String {
    if amount <= Decimal::ZERO {
        return "0%".to_string();
    }
    format!("{}%", (tax / amount * dec!(100)).round_dp(3).normalize())
}
