//! Declarative calculator registry.
//!
//! Each page-facing calculator is a configuration record consumed by one of
//! the three shared primitives, not its own implementation. Adding a state
//! transfer-tax calculator means adding a table constructor and one entry
//! here.

use serde::Serialize;
use std::sync::OnceLock;

use crate::transfer_tax::brackets::BracketTable;
use crate::transfer_tax::flat_rate::FlatRateSchedule;
use crate::transfer_tax::tables;
use crate::PropCalcResult;

/// Tiered statutory tables the registry can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TieredTable {
    Hawaii,
    Maine,
    RhodeIsland,
}

impl TieredTable {
    pub fn build(&self) -> PropCalcResult<BracketTable> {
        match self {
            TieredTable::Hawaii => tables::hawaii(),
            TieredTable::Maine => tables::maine(),
            TieredTable::RhodeIsland => tables::rhode_island(),
        }
    }
}

/// Flat per-increment schedules the registry can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlatTable {
    Alabama,
    Minnesota,
    SouthDakota,
}

impl FlatTable {
    pub fn build(&self) -> FlatRateSchedule {
        match self {
            FlatTable::Alabama => tables::alabama(),
            FlatTable::Minnesota => tables::minnesota(),
            FlatTable::SouthDakota => tables::south_dakota(),
        }
    }
}

/// Which primitive a calculator parameterizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalculatorKind {
    /// Annuity payment plus lifetime totals
    LoanPayment,
    /// Month-by-month schedule with optional extra payments
    LoanSchedule,
    /// Standard-vs-accelerated interest and payoff comparison
    ExtraPaymentSavings,
    /// Progressive marginal-bracket transfer tax
    TieredTransferTax(TieredTable),
    /// Flat per-started-increment transfer tax
    FlatTransferTax(FlatTable),
    /// Three-tier LP/GP profit distribution
    SyndicationWaterfall,
}

/// One registered calculator.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorDef {
    pub slug: &'static str,
    pub title: &'static str,
    pub kind: CalculatorKind,
}

static CATALOG: OnceLock<Vec<CalculatorDef>> = OnceLock::new();

/// The full calculator registry, built once.
pub fn catalog() -> &'static [CalculatorDef] {
    CATALOG
        .get_or_init(|| {
            vec![
                CalculatorDef {
                    slug: "mortgage-payment",
                    title: "Mortgage Payment Calculator",
                    kind: CalculatorKind::LoanPayment,
                },
                CalculatorDef {
                    slug: "amortization-schedule",
                    title: "Amortization Schedule Calculator",
                    kind: CalculatorKind::LoanSchedule,
                },
                CalculatorDef {
                    slug: "extra-payment-savings",
                    title: "Extra Payment Savings Calculator",
                    kind: CalculatorKind::ExtraPaymentSavings,
                },
                CalculatorDef {
                    slug: "hawaii-transfer-tax",
                    title: "Hawaii Conveyance Tax Calculator",
                    kind: CalculatorKind::TieredTransferTax(TieredTable::Hawaii),
                },
                CalculatorDef {
                    slug: "maine-transfer-tax",
                    title: "Maine Transfer Tax Calculator",
                    kind: CalculatorKind::TieredTransferTax(TieredTable::Maine),
                },
                CalculatorDef {
                    slug: "rhode-island-transfer-tax",
                    title: "Rhode Island Conveyance Tax Calculator",
                    kind: CalculatorKind::TieredTransferTax(TieredTable::RhodeIsland),
                },
                CalculatorDef {
                    slug: "alabama-transfer-tax",
                    title: "Alabama Deed Recording Tax Calculator",
                    kind: CalculatorKind::FlatTransferTax(FlatTable::Alabama),
                },
                CalculatorDef {
                    slug: "minnesota-transfer-tax",
                    title: "Minnesota Deed Tax Calculator",
                    kind: CalculatorKind::FlatTransferTax(FlatTable::Minnesota),
                },
                CalculatorDef {
                    slug: "south-dakota-transfer-tax",
                    title: "South Dakota Transfer Fee Calculator",
                    kind: CalculatorKind::FlatTransferTax(FlatTable::SouthDakota),
                },
                CalculatorDef {
                    slug: "syndication-waterfall",
                    title: "Syndication Waterfall Calculator",
                    kind: CalculatorKind::SyndicationWaterfall,
                },
            ]
        })
        .as_slice()
}

/// Look up a calculator by slug.
pub fn find(slug: &str) -> Option<&'static CalculatorDef> {
    catalog().iter().find(|def| def.slug == slug)
}
