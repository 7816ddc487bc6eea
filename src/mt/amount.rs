//! Amount and date grammar shared by every MT field (SPEC_FULL §4.1).
//!
//! Grounded on the teacher's `Field32A`/`Field61` raw-amount handling, but using
//! `rust_decimal::Decimal` instead of `f64` so that Testable Property 4 (exact
//! encode/decode round trip) holds for any value in `[0, 10^10)` with two-decimal
//! precision (SPEC_FULL §1A, §9).

use crate::errors::ConvertError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an MT/DATEV amount: digits, a single comma decimal separator, then
/// fractional digits. Rejects more than one separator. The sign never lives in
/// the token; callers apply direction separately.
pub fn parse_mt_amount(raw: &str) -> Result<Decimal, ConvertError> {
    if raw.matches(',').count() > 1 {
        return Err(ConvertError::MalformedAmount(format!(
            "multiple decimal separators in {raw:?}"
        )));
    }
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return Err(ConvertError::MalformedAmount(format!(
            "invalid characters in amount {raw:?}"
        )));
    }
    let normalized = if raw.contains(',') {
        raw.replace(',', ".")
    } else {
        raw.to_string()
    };
    Decimal::from_str(&normalized)
        .map_err(|e| ConvertError::MalformedAmount(format!("{raw:?}: {e}")))
}

/// Encode an amount using MT/DATEV comma-decimal, two fractional digits.
pub fn encode_mt_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}

/// Parse a pain/XML amount: digits, single period separator.
pub fn parse_xml_amount(raw: &str) -> Result<Decimal, ConvertError> {
    Decimal::from_str(raw).map_err(|e| ConvertError::MalformedAmount(format!("{raw:?}: {e}")))
}

/// Encode an amount using XML period-decimal, two fractional digits.
pub fn encode_xml_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Parse an MT `YYMMDD` date. Years 00-79 map to 2000-2079; 80-99 map to 1980-1999
/// (the conventional SWIFT pivot), matching the teacher's `SwiftDate::parse_yymmdd`.
pub fn parse_yymmdd(raw: &str) -> Result<NaiveDate, ConvertError> {
    if raw.len() != 6 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConvertError::MalformedDate(format!(
            "expected YYMMDD, got {raw:?}"
        )));
    }
    let yy: i32 = raw[0..2].parse().unwrap();
    let mm: u32 = raw[2..4].parse().unwrap();
    let dd: u32 = raw[4..6].parse().unwrap();
    let year = if yy < 80 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, mm, dd)
        .ok_or_else(|| ConvertError::MalformedDate(format!("invalid calendar date {raw:?}")))
}

pub fn encode_yymmdd(date: NaiveDate) -> String {
    let yy = date.format("%y").to_string();
    let mm = date.format("%m").to_string();
    let dd = date.format("%d").to_string();
    format!("{yy}{mm}{dd}")
}

/// Parse an MT `MMDD` entry/booking date, combining it with the year of a
/// reference date (SPEC_FULL §4.1's tag 61 entry date).
pub fn parse_mmdd_with_year_of(raw: &str, reference: NaiveDate) -> Result<NaiveDate, ConvertError> {
    if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConvertError::MalformedDate(format!(
            "expected MMDD, got {raw:?}"
        )));
    }
    let mm: u32 = raw[0..2].parse().unwrap();
    let dd: u32 = raw[2..4].parse().unwrap();
    NaiveDate::from_ymd_opt(reference.format("%Y").to_string().parse().unwrap(), mm, dd)
        .ok_or_else(|| ConvertError::MalformedDate(format!("invalid calendar date {raw:?}")))
}

pub fn encode_mmdd(date: NaiveDate) -> String {
    format!("{}{}", date.format("%m"), date.format("%d"))
}
