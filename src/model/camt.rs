//! ISO 20022 camt (052/053/054) entity model (SPEC_FULL §3, §6).
//!
//! Grounded on `nimec77-ledger-bridge`'s `camt053_statement` model, which keeps a
//! single `CamtEntry` shape shared by all three camt variants rather than one
//! struct per message — the variants differ only in which balances/entries are
//! populated, not in the entry shape itself.

use crate::value_types::{CamtType, Direction, EntryStatus};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::Balance;
use super::party::Party;

/// A single booked or pending movement within a camt statement/report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamtEntry {
    pub amount: Decimal,
    pub currency: String,
    pub direction: Direction,
    pub status: EntryStatus,
    pub booking_date: NaiveDate,
    pub value_date: NaiveDate,
    /// 4-letter ISO bank transaction code domain/family proprietary code,
    /// e.g. `NTRF` (SPEC_FULL §4.4).
    pub bank_transaction_code: String,
    pub account_servicer_reference: Option<String>,
    pub end_to_end_id: Option<String>,
    pub mandate_id: Option<String>,
    pub creditor_id: Option<String>,
    pub instruction_id: Option<String>,
    pub entry_reference: Option<String>,
    pub remittance_information: Option<String>,
    pub counterparty: Option<Party>,
    /// Set when this entry reverses an earlier one (SPEC_FULL §3 edge case).
    pub is_reversal: bool,
}

impl CamtEntry {
    pub fn signed_amount(&self) -> Decimal {
        self.amount * Decimal::from(self.direction.sign())
    }
}

/// Account identification shared by every camt variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamtAccount {
    pub iban: Option<String>,
    pub other_id: Option<String>,
    pub currency: String,
    pub owner_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamtStatementBody {
    pub message_id: String,
    pub creation_date_time: DateTime<Utc>,
    pub statement_id: String,
    pub sequence_number: Option<u32>,
    pub account: CamtAccount,
    pub opening_balance: Option<Balance>,
    pub closing_balance: Option<Balance>,
    pub closing_available_balance: Option<Balance>,
    pub entries: Vec<CamtEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamtReportBody {
    pub message_id: String,
    pub creation_date_time: DateTime<Utc>,
    pub report_id: String,
    pub account: CamtAccount,
    /// `CLAV` balance (SPEC_FULL §4.4: "052 uses closing type `CLAV`").
    pub closing_available_balance: Option<Balance>,
    pub entries: Vec<CamtEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CamtNotificationBody {
    pub message_id: String,
    pub creation_date_time: DateTime<Utc>,
    pub notification_id: String,
    pub account: CamtAccount,
    pub entries: Vec<CamtEntry>,
}

/// A complete camt document, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CamtDocument {
    Camt052(CamtReportBody),
    Camt053(CamtStatementBody),
    Camt054(CamtNotificationBody),
}

impl CamtDocument {
    pub fn camt_type(&self) -> CamtType {
        match self {
            CamtDocument::Camt052(_) => CamtType::Camt052,
            CamtDocument::Camt053(_) => CamtType::Camt053,
            CamtDocument::Camt054(_) => CamtType::Camt054,
        }
    }

    pub fn entries(&self) -> &[CamtEntry] {
        match self {
            CamtDocument::Camt052(b) => &b.entries,
            CamtDocument::Camt053(b) => &b.entries,
            CamtDocument::Camt054(b) => &b.entries,
        }
    }

    pub fn account(&self) -> &CamtAccount {
        match self {
            CamtDocument::Camt052(b) => &b.account,
            CamtDocument::Camt053(b) => &b.account,
            CamtDocument::Camt054(b) => &b.account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn entry_signed_amount_follows_direction() {
        let entry = CamtEntry {
            amount: dec!(250.00),
            currency: "EUR".to_string(),
            direction: Direction::Debit,
            status: EntryStatus::Booked,
            booking_date: date(2025, 2, 1),
            value_date: date(2025, 2, 1),
            bank_transaction_code: "NTRF".to_string(),
            account_servicer_reference: None,
            end_to_end_id: None,
            mandate_id: None,
            creditor_id: None,
            instruction_id: None,
            entry_reference: None,
            remittance_information: None,
            counterparty: None,
            is_reversal: false,
        };
        assert_eq!(entry.signed_amount(), dec!(-250.00));
    }

    #[test]
    fn camt_type_matches_variant() {
        let body = CamtStatementBody {
            message_id: "MSG1".to_string(),
            creation_date_time: DateTime::from_timestamp(0, 0).unwrap(),
            statement_id: "STMT1".to_string(),
            sequence_number: Some(1),
            account: CamtAccount {
                iban: Some("DE89370400440532013000".to_string()),
                other_id: None,
                currency: "EUR".to_string(),
                owner_name: None,
            },
            opening_balance: None,
            closing_balance: None,
            closing_available_balance: None,
            entries: vec![],
        };
        let doc = CamtDocument::Camt053(body);
        assert_eq!(doc.camt_type(), CamtType::Camt053);
    }
}
