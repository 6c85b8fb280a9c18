use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::PropCalcResult;

const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// A two-class (LP capital / GP sponsor) profit-sharing structure with a
/// three-tier distribution: LP preferred return, GP catch-up, promote split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallDeal {
    pub lp_capital: Money,
    pub gp_capital: Money,
    /// Annual preferred return as a percentage (8 means 8%)
    pub preferred_return_rate_percent: Rate,
    pub hold_period_years: Years,
    /// Fraction of the GP's own preferred entitlement paid in tier 2,
    /// as a percentage in [0, 100]
    pub catch_up_percent: Rate,
    /// LP share of the tier-3 residual, as a percentage in [0, 100]
    pub promote_split_lp_percent: Rate,
    /// Total profit being distributed
    pub total_profit: Money,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Tier-by-tier allocation result. `lp_distribution + gp_distribution`
/// equals `total_profit` exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallOutput {
    pub lp_distribution: Money,
    pub gp_distribution: Money,
    pub lp_pref_entitlement: Money,
    pub lp_pref_paid: Money,
    pub gp_catch_up_entitlement: Money,
    pub gp_catch_up_paid: Money,
    pub residual: Money,
    pub residual_to_lp: Money,
    pub residual_to_gp: Money,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Allocate total profit across the three ordered tiers.
///
/// Preferred entitlements are simple (non-compounding):
/// `capital * rate/100 * years`. Tiers are strictly sequential — the GP
/// catch-up begins only once the LP preferred is fully satisfied, and the
/// promote split only once the catch-up is satisfied or profit runs out.
/// When profit falls short of the LP preferred entitlement, LP receives all
/// of it and GP receives nothing.
pub fn allocate_waterfall(
    deal: &WaterfallDeal,
) -> PropCalcResult<ComputationOutput<WaterfallOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation: reject, never clamp ---
    if deal.total_profit < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "total_profit".into(),
            reason: "Total profit cannot be negative".into(),
        });
    }
    if deal.lp_capital < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "lp_capital".into(),
            reason: "LP capital cannot be negative".into(),
        });
    }
    if deal.gp_capital < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "gp_capital".into(),
            reason: "GP capital cannot be negative".into(),
        });
    }
    if deal.preferred_return_rate_percent < Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "preferred_return_rate_percent".into(),
            reason: "Preferred return rate cannot be negative".into(),
        });
    }
    if deal.hold_period_years <= Decimal::ZERO {
        return Err(PropCalcError::InvalidInput {
            field: "hold_period_years".into(),
            reason: "Hold period must be positive".into(),
        });
    }
    if deal.catch_up_percent < Decimal::ZERO || deal.catch_up_percent > PERCENT {
        return Err(PropCalcError::InvalidInput {
            field: "catch_up_percent".into(),
            reason: "Catch-up percentage must be between 0 and 100".into(),
        });
    }
    if deal.promote_split_lp_percent < Decimal::ZERO || deal.promote_split_lp_percent > PERCENT {
        return Err(PropCalcError::InvalidInput {
            field: "promote_split_lp_percent".into(),
            reason: "LP promote share must be between 0 and 100".into(),
        });
    }

    let pref_rate = deal.preferred_return_rate_percent / PERCENT;

    // Tier 1 — LP preferred return
    let lp_pref_entitlement = deal.lp_capital * pref_rate * deal.hold_period_years;
    let lp_pref_paid = lp_pref_entitlement.min(deal.total_profit);
    let mut remaining = deal.total_profit - lp_pref_paid;

    if remaining.is_zero() && lp_pref_paid < lp_pref_entitlement {
        warnings.push(
            "Profit falls short of the LP preferred entitlement; GP receives nothing".into(),
        );
    }

    // Tier 2 — GP catch-up, entered only after tier 1 is fully satisfied
    let gp_catch_up_entitlement =
        deal.gp_capital * pref_rate * deal.hold_period_years * (deal.catch_up_percent / PERCENT);
    let gp_catch_up_paid = gp_catch_up_entitlement.min(remaining);
    remaining -= gp_catch_up_paid;

    // Tier 3 — promote split of whatever remains
    let residual = remaining;
    let residual_to_lp = residual * deal.promote_split_lp_percent / PERCENT;
    let residual_to_gp = residual - residual_to_lp;

    let output = WaterfallOutput {
        lp_distribution: lp_pref_paid + residual_to_lp,
        gp_distribution: gp_catch_up_paid + residual_to_gp,
        lp_pref_entitlement,
        lp_pref_paid,
        gp_catch_up_entitlement,
        gp_catch_up_paid,
        residual,
        residual_to_lp,
        residual_to_gp,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Three-tier syndication waterfall (strict subordination)",
        &serde_json::json!({
            "lp_capital": deal.lp_capital.to_string(),
            "gp_capital": deal.gp_capital.to_string(),
            "preferred_return_rate_percent": deal.preferred_return_rate_percent.to_string(),
            "hold_period_years": deal.hold_period_years.to_string(),
            "catch_up_percent": deal.catch_up_percent.to_string(),
            "promote_split_lp_percent": deal.promote_split_lp_percent.to_string(),
            "total_profit": deal.total_profit.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
