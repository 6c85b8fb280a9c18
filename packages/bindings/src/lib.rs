use napi::Result as NapiResult;
use napi_derive::napi;

use propcalc_core::forms::FormValues;
use propcalc_core::transfer_tax::brackets::RateClass;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let loan: propcalc_core::amortization::loan::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        propcalc_core::amortization::loan::calculate_payment(&loan).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ScheduleRequest {
    loan: propcalc_core::amortization::loan::LoanTerms,
    #[serde(default)]
    extras: propcalc_core::amortization::schedule::ExtraPayments,
}

#[napi]
pub fn simulate_schedule(input_json: String) -> NapiResult<String> {
    let request: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        propcalc_core::amortization::schedule::simulate_schedule(&request.loan, &request.extras)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_extra_payments(input_json: String) -> NapiResult<String> {
    let request: ScheduleRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::amortization::schedule::compare_standard_vs_accelerated(
        &request.loan,
        &request.extras,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Transfer tax
// ---------------------------------------------------------------------------

#[derive(serde::Deserialize)]
struct TieredTaxRequest {
    amount: rust_decimal::Decimal,
    table_name: String,
    brackets: Vec<propcalc_core::transfer_tax::brackets::TaxBracket>,
    #[serde(default)]
    owner_occupant: bool,
}

#[napi]
pub fn transfer_tax(input_json: String) -> NapiResult<String> {
    let request: TieredTaxRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    // table validation happens here, before any calculation
    let table =
        propcalc_core::transfer_tax::brackets::BracketTable::new(request.table_name, request.brackets)
            .map_err(to_napi_error)?;
    let class = if request.owner_occupant {
        RateClass::Alternate
    } else {
        RateClass::Standard
    };
    let output =
        propcalc_core::transfer_tax::brackets::calculate_tiered_tax(request.amount, &table, class)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct FlatTaxRequest {
    amount: rust_decimal::Decimal,
    schedule: propcalc_core::transfer_tax::flat_rate::FlatRateSchedule,
}

#[napi]
pub fn flat_per_unit_tax(input_json: String) -> NapiResult<String> {
    let request: FlatTaxRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::transfer_tax::flat_rate::calculate_flat_tax(
        request.amount,
        &request.schedule,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Waterfall
// ---------------------------------------------------------------------------

#[napi]
pub fn allocate_waterfall(input_json: String) -> NapiResult<String> {
    let deal: propcalc_core::waterfall::distribution::WaterfallDeal =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = propcalc_core::waterfall::distribution::allocate_waterfall(&deal)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[napi]
pub fn run_calculator(slug: String, form_json: String) -> NapiResult<String> {
    let values: FormValues = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let rows = propcalc_core::catalog::run(&slug, &values).map_err(to_napi_error)?;
    serde_json::to_string(&rows).map_err(to_napi_error)
}

#[napi]
pub fn list_calculators() -> NapiResult<String> {
    serde_json::to_string(propcalc_core::catalog::catalog()).map_err(to_napi_error)
}
