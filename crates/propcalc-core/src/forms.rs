use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// A single value as submitted by a calculator form.
///
/// Web forms deliver numbers, numeric strings ("350000", "6.5%", "$1,200"),
/// and the occasional checkbox boolean. Variant order matters for the
/// untagged deserializer: booleans and numbers are tried before strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

/// Loosely-typed form input, field name to submitted value.
///
/// This is the only layer that performs coercion-with-default: every
/// accessor takes the field's documented default and substitutes it on a
/// missing or unparseable value, never returning an error. The arithmetic
/// modules take typed structs and reject bad domain values properly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FormValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FormValue) {
        self.0.insert(field.into(), value);
    }

    pub fn set_number(&mut self, field: impl Into<String>, value: f64) {
        self.insert(field, FormValue::Number(value));
    }

    pub fn set_text(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.insert(field, FormValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, field: impl Into<String>, value: bool) {
        self.insert(field, FormValue::Flag(value));
    }

    pub fn get(&self, field: &str) -> Option<&FormValue> {
        self.0.get(field)
    }

    /// Coerce a field to a decimal, `parseFloat`-style: a numeric prefix of
    /// a string parses ("6.5%" is 6.5), anything else yields `default`.
    pub fn decimal_or(&self, field: &str, default: Decimal) -> Decimal {
        match self.0.get(field) {
            Some(FormValue::Number(n)) => Decimal::from_f64(*n).unwrap_or(default),
            Some(FormValue::Text(s)) => parse_decimal_prefix(s).unwrap_or(default),
            Some(FormValue::Flag(_)) | None => default,
        }
    }

    /// Coerce a field to a non-negative integer, truncating toward zero.
    /// Negative or unparseable values yield `default`.
    pub fn integer_or(&self, field: &str, default: u32) -> u32 {
        let d = self.decimal_or(field, Decimal::from(default));
        if d < Decimal::ZERO {
            return default;
        }
        d.trunc().to_u32().unwrap_or(default)
    }

    /// Coerce a field to a boolean. Accepts real booleans, nonzero numbers,
    /// and the usual affirmative strings.
    pub fn flag_or(&self, field: &str, default: bool) -> bool {
        match self.0.get(field) {
            Some(FormValue::Flag(b)) => *b,
            Some(FormValue::Number(n)) => *n != 0.0,
            Some(FormValue::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => true,
                "false" | "no" | "n" | "off" | "0" => false,
                _ => default,
            },
            None => default,
        }
    }
}

/// Parse the leading numeric portion of a string the way `parseFloat` does,
/// after stripping currency symbols and thousands separators. A trailing
/// exponent ("1e5", "2.5E-3") is honored; an exponent too large for the
/// decimal range yields `None`.
fn parse_decimal_prefix(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$' && *c != '_')
        .collect();

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        match c {
            '+' | '-' if i == 0 => end = i + 1,
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    let mut mantissa = cleaned[..end].trim_end_matches('.').to_string();
    if mantissa.starts_with("-.") || mantissa.starts_with("+.") {
        mantissa.insert(1, '0');
    } else if mantissa.starts_with('.') {
        mantissa.insert(0, '0');
    }

    if let Some(exponent) = parse_exponent(&cleaned[end..]) {
        return Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok();
    }
    Decimal::from_str(&mantissa).ok()
}

/// A trailing exponent immediately after the mantissa, `parseFloat`-style:
/// `e`/`E`, an optional sign, then at least one digit. A bare `e` with no
/// digits is ignored rather than an error.
fn parse_exponent(s: &str) -> Option<i64> {
    let rest = s.strip_prefix(['e', 'E'])?;
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let exp: i64 = digits.parse().ok()?;
    Some(if negative { -exp } else { exp })
}
