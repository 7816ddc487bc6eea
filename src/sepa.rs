//! SEPA micro-tag extractor (component G, SPEC_FULL §4.5).
//!
//! A single left-to-right pass recognizing `[A-Z]{4}+` tokens, rather than one
//! regex per subfield — kept linear per the "SEPA micro-parser" design note
//! (SPEC_FULL §9). IBAN/BIC detection is gated by validator callbacks so a
//! candidate substring must also pass its check before being reported.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structured references pulled out of an MT940/CAMT purpose string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SepaReferences {
    pub end_to_end_id: Option<String>,
    pub mandate_id: Option<String>,
    pub creditor_id: Option<String>,
    pub instruction_id: Option<String>,
    pub structured_purpose: Option<String>,
}

static TAG_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]{4})\+").unwrap());
static IBAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{2}\d{2}[A-Z0-9]{4}\d{7}[A-Z0-9]*").unwrap());
static BIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{4}[A-Z]{2}[A-Z0-9]{2}(?:[A-Z0-9]{3})?").unwrap());

/// Extracts `EREF+`/`MREF+`/`CRED+`/`KREF+`/`SVWZ+` tokens from free text. Pure
/// and order-independent: missing tags yield `None` for that slot.
pub fn extract_sepa_references(text: &str) -> SepaReferences {
    let mut matches: Vec<(usize, &str, usize)> = TAG_TOKEN_RE
        .captures_iter(text)
        .map(|c| {
            let whole = c.get(0).unwrap();
            (whole.start(), c.get(1).unwrap().as_str(), whole.end())
        })
        .collect();
    matches.sort_by_key(|(start, ..)| *start);

    let mut refs = SepaReferences::default();
    for (i, (_, tag, value_start)) in matches.iter().enumerate() {
        let value_end = matches.get(i + 1).map(|(start, ..)| *start).unwrap_or(text.len());
        let value = text[*value_start..value_end].trim().to_string();
        match *tag {
            "EREF" => refs.end_to_end_id = Some(value),
            "MREF" => refs.mandate_id = Some(value),
            "CRED" => refs.creditor_id = Some(value),
            "KREF" => refs.instruction_id = Some(value),
            "SVWZ" => refs.structured_purpose = Some(value),
            _ => {}
        }
    }
    refs
}

/// Validates an IBAN's check digits using the mod-97 algorithm (SPEC_FULL §4.5).
pub fn is_valid_iban(candidate: &str) -> bool {
    if candidate.len() < 15 || candidate.len() > 34 {
        return false;
    }
    if !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let rearranged = format!("{}{}", &candidate[4..], &candidate[..4]);
    let mut digits = String::with_capacity(rearranged.len() * 2);
    for c in rearranged.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c.is_ascii_uppercase() {
            digits.push_str(&(c as u32 - 'A' as u32 + 10).to_string());
        } else {
            return false;
        }
    }
    mod97(&digits) == 1
}

fn mod97(digits: &str) -> u32 {
    let mut remainder: u64 = 0;
    for c in digits.chars() {
        let digit = c.to_digit(10).unwrap() as u64;
        remainder = (remainder * 10 + digit) % 97;
    }
    remainder as u32
}

/// `true` when the candidate's length is a valid BIC length (8 or 11).
pub fn is_valid_bic(candidate: &str) -> bool {
    matches!(candidate.len(), 8 | 11) && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Scans free text for the first validated IBAN and BIC. A BIC immediately
/// followed by `/` in the source (the `BIC/account` convention) is excluded
/// from BIC detection to avoid it being mistaken for an IBAN prefix.
pub fn detect_iban_bic(text: &str) -> (Option<String>, Option<String>) {
    let iban = IBAN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .find(|candidate| is_valid_iban(candidate));

    let bic = BIC_RE
        .find_iter(text)
        .filter(|m| !text[m.end()..].starts_with('/'))
        .map(|m| m.as_str().to_string())
        .find(|candidate| is_valid_bic(candidate));

    (iban, bic)
}
