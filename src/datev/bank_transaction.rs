//! DATEV `BankTransaction`: the intermediate representation used specifically
//! by the MT940 ↔ DATEV converter (SPEC_FULL §4.4).
//!
//! This is a distinct, narrower row shape from the general [`super::row::DatevRow`]
//! / [`super::schema::Category::Buchungsstapel`] pair: the cross-format mapping in
//! §4.4 numbers its own fields (BLZ/BIC, account, statement number, dates, signed
//! amount, purpose, transaction code, currency) independently of the canonical
//! 125-column Buchungsstapel layout used for category-21 file validation. Treated
//! as an Open Question resolution (DESIGN.md): the two numbering schemes are kept
//! separate rather than forced into one.

use crate::value_types::Direction;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::Reference;

#[derive(Debug, Clone, PartialEq)]
pub struct BankTransaction {
    pub bank_code: Option<String>,
    pub account: String,
    pub statement_number: String,
    pub opening_balance_date: Option<NaiveDate>,
    pub value_date: NaiveDate,
    pub booking_date: Option<NaiveDate>,
    pub direction: Direction,
    pub amount: Decimal,
    pub purpose: Option<String>,
    pub transaction_type_code: String,
    pub currency: String,
    pub reference: Reference,
}

fn fmt_date(d: NaiveDate) -> String {
    d.format("%d%m%Y").to_string()
}

fn wrap_purpose(purpose: &str, slot_len: usize, slots: usize) -> Vec<String> {
    let mut out = Vec::new();
    let chars: Vec<char> = purpose.chars().collect();
    let mut i = 0;
    while i < chars.len() && out.len() < slots {
        let end = (i + slot_len).min(chars.len());
        out.push(chars[i..end].iter().collect());
        i = end;
    }
    out
}

impl BankTransaction {
    /// Encode to the field layout described by SPEC_FULL §4.4: field 1 = BLZ/BIC,
    /// field 2 = account, field 3 = statement number, field 4 = opening-balance
    /// date, field 5 = value date, field 6 = booking date, field 7 = signed
    /// amount, fields 12-14/19-24 = purpose split (removing `?nn` subfield codes
    /// and wrapped at 27 characters per slot), field 16 = transaction code,
    /// field 17 = currency.
    pub fn encode(&self) -> String {
        let mut fields = vec![String::new(); 24];
        fields[0] = self.bank_code.clone().unwrap_or_default();
        fields[1] = self.account.clone();
        fields[2] = self.statement_number.clone();
        fields[3] = self.opening_balance_date.map(fmt_date).unwrap_or_default();
        fields[4] = fmt_date(self.value_date);
        fields[5] = self.booking_date.map(fmt_date).unwrap_or_default();
        let signed = self.amount * Decimal::from(self.direction.sign());
        fields[6] = signed.round_dp(2).to_string().replace('.', ",");
        fields[15] = self.transaction_type_code.clone();
        fields[16] = self.currency.clone();
        if let Some(purpose) = &self.purpose {
            let stripped = strip_subfield_codes(purpose);
            let wrapped = wrap_purpose(&stripped, 27, 9);
            for (slot_index, text) in wrapped.iter().enumerate() {
                let field_index = if slot_index < 3 { 11 + slot_index } else { 18 + (slot_index - 3) };
                if field_index < fields.len() {
                    fields[field_index] = text.clone();
                }
            }
        }
        fields.join(";")
    }

    /// Decode a DATEV BankTransaction row. Permissive: rows with fewer than 7
    /// fields yield `None` per SPEC_FULL §4.4's reverse-mapping rule.
    pub fn decode(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(';').collect();
        if fields.len() < 7 {
            return None;
        }
        let bank_code = non_empty(fields[0]);
        let account = fields[1].to_string();
        let statement_number = sanitize(fields[2]);
        let opening_balance_date = fields.get(3).and_then(|f| parse_date(f));
        let value_date = fields.get(4).and_then(|f| parse_date(f)).unwrap_or_else(|| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        let booking_date = fields.get(5).and_then(|f| parse_date(f));
        let raw_amount = fields[6].replace(',', ".");
        let parsed: Decimal = raw_amount.parse().ok()?;
        let direction = if parsed.is_sign_negative() { Direction::Debit } else { Direction::Credit };
        let amount = parsed.abs();
        let mut transaction_type_code = fields.get(15).map(|s| s.to_string()).unwrap_or_default();
        if transaction_type_code.len() < 3 {
            transaction_type_code = "TRF".to_string();
        } else if transaction_type_code.len() > 3 {
            transaction_type_code.truncate(3);
        }
        let currency = fields.get(16).filter(|s| !s.is_empty()).map(|s| s.to_string()).unwrap_or_else(|| "EUR".to_string());
        let purpose_slots: Vec<&str> = [11usize, 12, 13, 18, 19, 20, 21, 22, 23]
            .iter()
            .filter_map(|&i| fields.get(i).copied())
            .filter(|s| !s.is_empty())
            .collect();
        let purpose = if purpose_slots.is_empty() { None } else { Some(purpose_slots.join("")) };

        let mt_reference = {
            let mut candidate = format!("{}{}", bank_code.clone().unwrap_or_default(), account);
            candidate.truncate(12);
            if candidate.is_empty() {
                crate::model::reference::NONREF.to_string()
            } else {
                candidate
            }
        };
        let reference = Reference::new("NTR", mt_reference).ok()?;

        Some(Self {
            bank_code,
            account,
            statement_number,
            opening_balance_date,
            value_date,
            booking_date,
            direction,
            amount,
            purpose,
            transaction_type_code,
            currency,
            reference,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn sanitize(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '/').collect::<String>()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 {
        return None;
    }
    let day: u32 = raw[0..2].parse().ok()?;
    let month: u32 = raw[2..4].parse().ok()?;
    let year: i32 = raw[4..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Removes SWIFT `?nn` subfield markers (e.g. `?20EREF+...`) from purpose text,
/// leaving the payload concatenated.
fn strip_subfield_codes(purpose: &str) -> String {
    let mut out = String::new();
    let mut chars = purpose.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '?' && chars.peek().is_some_and(|c| c.is_ascii_digit()) {
            chars.next();
            if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                chars.next();
            }
            continue;
        }
        out.push(c);
    }
    out
}
