use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PropCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PropCalcResult;

// ---------------------------------------------------------------------------
// Bracket table
// ---------------------------------------------------------------------------

/// Which statutory rate column applies to a transaction.
///
/// Several transfer-tax statutes carry two parallel rate columns keyed by a
/// classification of the buyer or property (owner-occupant vs. not,
/// residential vs. commercial).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateClass {
    Standard,
    Alternate,
}

/// One bracket of an ordered marginal-rate table.
///
/// Bounds are absolute cumulative thresholds, not widths. `upper_bound` of
/// `None` marks the unbounded tail bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Money>,
    /// Rate as a decimal fraction (0.006 = 0.6%)
    pub rate: Rate,
    /// Second rate column, where the statute defines one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_rate: Option<Rate>,
}

impl TaxBracket {
    /// Rate for the given classification. Tables without an alternate
    /// column apply the standard rate to every transaction.
    pub fn rate_for(&self, class: RateClass) -> Rate {
        match class {
            RateClass::Standard => self.rate,
            RateClass::Alternate => self.alternate_rate.unwrap_or(self.rate),
        }
    }
}

/// A validated, ordered bracket table.
///
/// Validation happens once at construction: malformed tables (unsorted
/// bounds, missing unbounded tail, negative rates) are configuration
/// errors and never reach a calculation. Deliberately not `Deserialize` —
/// external callers go through [`BracketTable::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketTable {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    pub fn new(name: impl Into<String>, brackets: Vec<TaxBracket>) -> PropCalcResult<Self> {
        let name = name.into();
        if brackets.is_empty() {
            return Err(PropCalcError::InvalidConfiguration(format!(
                "Bracket table '{name}' has no brackets"
            )));
        }

        let mut previous: Option<Money> = None;
        for (i, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO
                || bracket.alternate_rate.is_some_and(|r| r < Decimal::ZERO)
            {
                return Err(PropCalcError::InvalidConfiguration(format!(
                    "Bracket table '{name}' has a negative rate at position {i}"
                )));
            }
            match bracket.upper_bound {
                Some(bound) => {
                    if i == brackets.len() - 1 {
                        return Err(PropCalcError::InvalidConfiguration(format!(
                            "Bracket table '{name}' must end with an unbounded tail bracket"
                        )));
                    }
                    if bound <= Decimal::ZERO {
                        return Err(PropCalcError::InvalidConfiguration(format!(
                            "Bracket table '{name}' has a non-positive bound at position {i}"
                        )));
                    }
                    if let Some(prev) = previous {
                        if bound <= prev {
                            return Err(PropCalcError::InvalidConfiguration(format!(
                                "Bracket table '{name}' bounds must be strictly ascending"
                            )));
                        }
                    }
                    previous = Some(bound);
                }
                None => {
                    if i != brackets.len() - 1 {
                        return Err(PropCalcError::InvalidConfiguration(format!(
                            "Bracket table '{name}' has an unbounded bracket before the tail"
                        )));
                    }
                }
            }
        }

        Ok(Self { name, brackets })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Whether the table defines a second rate column anywhere.
    pub fn has_alternate_column(&self) -> bool {
        self.brackets.iter().any(|b| b.alternate_rate.is_some())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// The portion of the amount falling in one bracket, and the tax on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower_bound: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Money>,
    pub taxable: Money,
    pub rate: Rate,
    pub tax: Money,
}

/// Marginal accumulation result across all brackets touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketOutput {
    pub slices: Vec<BracketSlice>,
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

/// Walk the bracket table in ascending order, taxing each marginal slice of
/// `amount` at the rate the selector picks for that bracket.
///
/// Every dollar is taxed at exactly the marginal rate of the bracket it
/// falls in; the unbounded tail guarantees the walk always consumes the
/// full amount. A non-positive amount yields zero with no error.
pub fn apply_brackets_with<F>(amount: Money, table: &BracketTable, rate_for: F) -> BracketOutput
where
    F: Fn(&TaxBracket) -> Rate,
{
    let mut slices = Vec::new();
    let mut total = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;
    let mut remaining = amount.max(Decimal::ZERO);

    for bracket in table.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let width = match bracket.upper_bound {
            Some(bound) => bound - previous_bound,
            None => remaining,
        };
        let taxable = remaining.min(width);
        let rate = rate_for(bracket);
        let tax = taxable * rate;

        total += tax;
        slices.push(BracketSlice {
            lower_bound: previous_bound,
            upper_bound: bracket.upper_bound,
            taxable,
            rate,
            tax,
        });

        remaining -= taxable;
        if let Some(bound) = bracket.upper_bound {
            previous_bound = bound;
        }
    }

    BracketOutput { slices, total }
}

/// Column-selector convenience over [`apply_brackets_with`].
pub fn apply_brackets(amount: Money, table: &BracketTable, class: RateClass) -> BracketOutput {
    apply_brackets_with(amount, table, |bracket| bracket.rate_for(class))
}

/// Tiered transfer tax with the standard output envelope.
pub fn calculate_tiered_tax(
    amount: Money,
    table: &BracketTable,
    class: RateClass,
) -> PropCalcResult<ComputationOutput<BracketOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if amount <= Decimal::ZERO {
        warnings.push("Non-positive consideration; tax is zero".into());
    }
    if class == RateClass::Alternate && !table.has_alternate_column() {
        warnings.push(format!(
            "Table '{}' has no alternate rate column; standard rates applied",
            table.name()
        ));
    }

    let output = apply_brackets(amount, table, class);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Progressive transfer tax (marginal brackets)",
        &serde_json::json!({
            "table": table.name(),
            "amount": amount.to_string(),
            "rate_class": class,
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn two_tier_table() -> BracketTable {
        BracketTable::new(
            "test",
            vec![
                TaxBracket {
                    upper_bound: Some(dec!(100000)),
                    rate: dec!(0.001),
                    alternate_rate: None,
                },
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.002),
                    alternate_rate: None,
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_marginal_accumulation() {
        let out = apply_brackets(dec!(150000), &two_tier_table(), RateClass::Standard);
        // 100,000 at 0.1% + 50,000 at 0.2% = 100 + 100
        assert_eq!(out.total, dec!(200));
        assert_eq!(out.slices.len(), 2);
        assert_eq!(out.slices[0].taxable, dec!(100000));
        assert_eq!(out.slices[1].taxable, dec!(50000));
    }

    #[test]
    fn test_amount_within_first_bracket() {
        let out = apply_brackets(dec!(40000), &two_tier_table(), RateClass::Standard);
        assert_eq!(out.total, dec!(40));
        assert_eq!(out.slices.len(), 1);
    }

    #[test]
    fn test_amount_exactly_on_boundary() {
        let out = apply_brackets(dec!(100000), &two_tier_table(), RateClass::Standard);
        assert_eq!(out.total, dec!(100));
        assert_eq!(out.slices.len(), 1);
    }

    #[test]
    fn test_slices_conserve_amount() {
        let amount = dec!(1234567.89);
        let out = apply_brackets(amount, &two_tier_table(), RateClass::Standard);
        let consumed: Decimal = out.slices.iter().map(|s| s.taxable).sum();
        assert_eq!(consumed, amount);
        let summed: Decimal = out.slices.iter().map(|s| s.tax).sum();
        assert_eq!(summed, out.total);
    }

    #[test]
    fn test_non_positive_amount_is_zero() {
        let out = apply_brackets(dec!(0), &two_tier_table(), RateClass::Standard);
        assert_eq!(out.total, dec!(0));
        assert!(out.slices.is_empty());
        let out = apply_brackets(dec!(-500), &two_tier_table(), RateClass::Standard);
        assert_eq!(out.total, dec!(0));
    }

    #[test]
    fn test_alternate_falls_back_to_standard() {
        let out = apply_brackets(dec!(50000), &two_tier_table(), RateClass::Alternate);
        assert_eq!(out.total, dec!(50));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(BracketTable::new("empty", vec![]).is_err());
    }

    #[test]
    fn test_rejects_missing_unbounded_tail() {
        let result = BracketTable::new(
            "no-tail",
            vec![TaxBracket {
                upper_bound: Some(dec!(100000)),
                rate: dec!(0.001),
                alternate_rate: None,
            }],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unsorted_bounds() {
        let result = BracketTable::new(
            "unsorted",
            vec![
                TaxBracket {
                    upper_bound: Some(dec!(200000)),
                    rate: dec!(0.001),
                    alternate_rate: None,
                },
                TaxBracket {
                    upper_bound: Some(dec!(100000)),
                    rate: dec!(0.002),
                    alternate_rate: None,
                },
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.003),
                    alternate_rate: None,
                },
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_interior_unbounded_bracket() {
        let result = BracketTable::new(
            "interior-tail",
            vec![
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.001),
                    alternate_rate: None,
                },
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.002),
                    alternate_rate: None,
                },
            ],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let result = BracketTable::new(
            "negative",
            vec![TaxBracket {
                upper_bound: None,
                rate: dec!(-0.001),
                alternate_rate: None,
            }],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_selector() {
        // Rate selector that doubles every bracket's standard rate
        let out = apply_brackets_with(dec!(150000), &two_tier_table(), |b| {
            b.rate * dec!(2)
        });
        assert_eq!(out.total, dec!(400));
    }
}
