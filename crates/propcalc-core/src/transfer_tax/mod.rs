pub mod brackets;
pub mod flat_rate;
pub mod tables;
