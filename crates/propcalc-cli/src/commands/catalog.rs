use clap::Args;
use serde_json::Value;

use propcalc_core::catalog;
use propcalc_core::forms::FormValues;

use crate::input;

/// Arguments for running a registered calculator
#[derive(Args)]
pub struct CalcArgs {
    /// Calculator slug (see `propcalc list`)
    #[arg(long)]
    pub slug: String,

    /// Path to a JSON file of form values (field name to value)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calc(args: CalcArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let values: FormValues = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(values) = input::stdin::read_json()? {
        values
    } else {
        // every field falls back to its documented default
        FormValues::new()
    };

    let rows = catalog::run(&args.slug, &values)?;
    Ok(serde_json::to_value(rows)?)
}

/// Arguments for listing the registered calculators
#[derive(Args)]
pub struct ListArgs {}

pub fn run_list(_args: ListArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(catalog::catalog())?)
}
