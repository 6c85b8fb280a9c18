use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.005 = 0.5%) unless a field name says
/// `_percent`, in which case 6.5 means 6.5%.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// One display row produced by a calculator.
///
/// Row order within a `Vec<ResultRow>` matches the display order the
/// consuming page defines and must be preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub label: String,
    /// Pre-formatted value (currency values fixed to 2 decimal places)
    pub value: String,
    pub is_currency: bool,
}

impl ResultRow {
    /// A currency row, formatted to exactly two decimal places.
    pub fn currency(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            value: format!(
                "{:.2}",
                amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            ),
            is_currency: true,
        }
    }

    /// A plain text row (counts, percentages, notes).
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_currency: false,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
