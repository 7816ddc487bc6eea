//! MT document and transaction entity model (SPEC_FULL §3).
//!
//! Modeled as a tagged union (`MtDocument`) over the fourteen in-scope MT types,
//! per the "tagged unions over inheritance" design note (SPEC_FULL §9). Grounded on
//! the teacher's per-message structs (`messages/mt940.rs`, `messages/mt103.rs`),
//! generalized to a closed enum rather than one struct per type, since this crate's
//! converters (§4.4) need to exhaustively match over "any MT document" rather than
//! dispatch through a trait object.

use crate::value_types::{ChargesCode, Direction, MtType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::Balance;
use super::party::Party;
use super::reference::Reference;
use super::transfer::TransferDetails;

/// Shared header carried by every MT document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtHeader {
    pub senders_reference: String,
    pub creation_timestamp: DateTime<Utc>,
}

impl MtHeader {
    pub fn new(senders_reference: impl Into<String>, creation_timestamp: DateTime<Utc>) -> Result<Self, crate::errors::ConvertError> {
        let senders_reference = senders_reference.into();
        if senders_reference.len() > 16 {
            return Err(crate::errors::ConvertError::FieldTooLong {
                name: "20".to_string(),
                limit: 16,
            });
        }
        Ok(Self {
            senders_reference,
            creation_timestamp,
        })
    }
}

/// A single leg of a payment-order batch (MT101/102/104 transactions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTransaction {
    pub reference: Reference,
    pub beneficiary: Party,
    pub transfer: TransferDetails,
    pub mandate_reference: Option<String>,
    pub charges: Option<ChargesCode>,
    pub purpose: Option<String>,
}

/// A single statement line (MT940/941/942/950 transactions, field 61/86).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTransaction {
    pub booking_date: NaiveDate,
    pub value_date: NaiveDate,
    pub direction: Direction,
    pub amount: Decimal,
    pub currency: String,
    pub reference: Reference,
    /// 3-letter MT transaction type code, e.g. `TRF`, `CHK` (SPEC_FULL §4.4 table).
    pub transaction_type_code: String,
    pub bank_reference: Option<String>,
    /// Free-text purpose, the concatenation of field 86 continuation lines.
    pub purpose: Option<String>,
}

impl StatementTransaction {
    pub fn signed_amount(&self) -> Decimal {
        self.amount * Decimal::from(self.direction.sign())
    }
}

/// A statement document's shared shape (MT940/941/942/950).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementBody {
    pub account_id: String,
    pub statement_number: String,
    pub opening_balance: Balance,
    pub closing_balance: Balance,
    pub transactions: Vec<StatementTransaction>,
    pub closing_available_balance: Option<Balance>,
    pub forward_available_balance: Option<Balance>,
}

impl StatementBody {
    /// Testable Property 1 / global invariant: `closing.signed = opening.signed + sum(tx.signed)`.
    pub fn verify_balance_invariant(&self) -> Result<(), crate::errors::ConvertError> {
        let computed = self.opening_balance.signed()
            + self
                .transactions
                .iter()
                .map(|t| t.signed_amount())
                .sum::<Decimal>();
        let computed = computed.round_dp(2);
        let declared = self.closing_balance.signed().round_dp(2);
        if computed != declared {
            return Err(crate::errors::ConvertError::BalanceInconsistent {
                opening: self.opening_balance.signed().to_string(),
                movements: (declared - self.opening_balance.signed()).to_string(),
                closing: declared.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleOrderBody {
    pub reference: Reference,
    pub ordering_customer: Party,
    pub beneficiary: Party,
    pub transfer: TransferDetails,
    pub charges: ChargesCode,
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOrderBody {
    pub reference: Reference,
    pub ordering_customer: Party,
    pub transactions: Vec<OrderTransaction>,
}

impl BatchOrderBody {
    pub fn control_sum(&self) -> Decimal {
        self.transactions.iter().map(|t| t.transfer.amount).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiTransferBody {
    pub reference: Reference,
    pub related_reference: Option<String>,
    pub transfer: TransferDetails,
    pub beneficiary_institution: Party,
    /// Present only for MT202COV: the underlying customer credit transfer.
    pub underlying_ordering_customer: Option<Party>,
    pub underlying_beneficiary: Option<Party>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationBody {
    pub reference: Reference,
    pub related_reference: Option<String>,
    pub transfer: TransferDetails,
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub account_id: String,
    pub requested_message_type: MtType,
    pub floor_limit: Option<Decimal>,
}

/// A complete MT document, tagged by its MT type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MtDocument {
    Mt101 { header: MtHeader, body: BatchOrderBody },
    Mt102 { header: MtHeader, body: BatchOrderBody },
    Mt103 { header: MtHeader, body: SingleOrderBody },
    Mt104 { header: MtHeader, body: BatchOrderBody },
    Mt200 { header: MtHeader, body: ConfirmationBody },
    Mt202 { header: MtHeader, body: FiTransferBody },
    Mt202Cov { header: MtHeader, body: FiTransferBody },
    Mt900 { header: MtHeader, body: ConfirmationBody },
    Mt910 { header: MtHeader, body: ConfirmationBody },
    Mt920 { header: MtHeader, body: RequestBody },
    Mt940 { header: MtHeader, body: StatementBody },
    Mt941 { header: MtHeader, body: StatementBody },
    Mt942 { header: MtHeader, body: StatementBody },
    Mt950 { header: MtHeader, body: StatementBody },
}

impl MtDocument {
    pub fn mt_type(&self) -> MtType {
        match self {
            MtDocument::Mt101 { .. } => MtType::MT101,
            MtDocument::Mt102 { .. } => MtType::MT102,
            MtDocument::Mt103 { .. } => MtType::MT103,
            MtDocument::Mt104 { .. } => MtType::MT104,
            MtDocument::Mt200 { .. } => MtType::MT200,
            MtDocument::Mt202 { .. } => MtType::MT202,
            MtDocument::Mt202Cov { .. } => MtType::MT202Cov,
            MtDocument::Mt900 { .. } => MtType::MT900,
            MtDocument::Mt910 { .. } => MtType::MT910,
            MtDocument::Mt920 { .. } => MtType::MT920,
            MtDocument::Mt940 { .. } => MtType::MT940,
            MtDocument::Mt941 { .. } => MtType::MT941,
            MtDocument::Mt942 { .. } => MtType::MT942,
            MtDocument::Mt950 { .. } => MtType::MT950,
        }
    }

    pub fn header(&self) -> &MtHeader {
        match self {
            MtDocument::Mt101 { header, .. }
            | MtDocument::Mt102 { header, .. }
            | MtDocument::Mt103 { header, .. }
            | MtDocument::Mt104 { header, .. }
            | MtDocument::Mt200 { header, .. }
            | MtDocument::Mt202 { header, .. }
            | MtDocument::Mt202Cov { header, .. }
            | MtDocument::Mt900 { header, .. }
            | MtDocument::Mt910 { header, .. }
            | MtDocument::Mt920 { header, .. }
            | MtDocument::Mt940 { header, .. }
            | MtDocument::Mt941 { header, .. }
            | MtDocument::Mt942 { header, .. }
            | MtDocument::Mt950 { header, .. } => header,
        }
    }

    /// Statement-family documents expose their body uniformly for the converters in §4.4.
    pub fn as_statement(&self) -> Option<&StatementBody> {
        match self {
            MtDocument::Mt940 { body, .. }
            | MtDocument::Mt941 { body, .. }
            | MtDocument::Mt942 { body, .. }
            | MtDocument::Mt950 { body, .. } => Some(body),
            _ => None,
        }
    }
}
