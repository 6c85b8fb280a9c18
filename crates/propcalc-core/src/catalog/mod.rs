pub mod definitions;
pub mod runner;

pub use definitions::{catalog, find, CalculatorDef, CalculatorKind, FlatTable, TieredTable};
pub use runner::run;
