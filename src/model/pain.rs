//! ISO 20022 pain entity model (SPEC_FULL §3, §6).
//!
//! Grounded on `nimec77-ledger-bridge`'s group-header/payment-information layering
//! and the teacher's batch builders (`messages/mt101.rs` has the closest analogue:
//! a header carrying a control sum and a list of per-transaction entries).

use crate::value_types::PainType;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::party::Party;

/// Group header: message id, creation time, and the control totals that every
/// converter in §4.4 must recompute rather than copy from the source message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupHeader {
    pub message_id: String,
    pub creation_date_time: DateTime<Utc>,
    pub number_of_transactions: u32,
    pub control_sum: Decimal,
    pub initiating_party: Party,
}

/// A single credit-transfer or direct-debit instruction within a payment
/// information block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainTransaction {
    pub end_to_end_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub counterparty: Party,
    pub remittance_information: Option<String>,
    /// Present only for direct-debit variants (pain.008/010/011/017/018).
    pub mandate_id: Option<String>,
    pub creditor_id: Option<String>,
}

/// A payment-information block: one execution/collection date and debtor/creditor
/// agent shared by a batch of transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInformation {
    pub payment_information_id: String,
    pub requested_execution_date: NaiveDate,
    pub debtor: Party,
    pub transactions: Vec<PainTransaction>,
}

impl PaymentInformation {
    pub fn control_sum(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// A complete pain document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PainDocument {
    pub pain_type: PainType,
    pub group_header: GroupHeader,
    pub payment_information: Vec<PaymentInformation>,
}

impl PainDocument {
    /// Recomputes `number_of_transactions`/`control_sum` from the payment
    /// information blocks, per SPEC_FULL §4.4's "recompute, never copy" rule.
    pub fn recompute_totals(&mut self) {
        let count = self
            .payment_information
            .iter()
            .map(|p| p.transactions.len())
            .sum::<usize>();
        let sum = self
            .payment_information
            .iter()
            .map(|p| p.control_sum())
            .sum();
        self.group_header.number_of_transactions = count as u32;
        self.group_header.control_sum = sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_transaction(amount: Decimal) -> PainTransaction {
        PainTransaction {
            end_to_end_id: "E2E-1".to_string(),
            amount,
            currency: "EUR".to_string(),
            counterparty: Party::new().with_name("Beneficiary GmbH"),
            remittance_information: None,
            mandate_id: None,
            creditor_id: None,
        }
    }

    #[test]
    fn recompute_totals_sums_across_payment_information_blocks() {
        let mut doc = PainDocument {
            pain_type: PainType::Pain001,
            group_header: GroupHeader {
                message_id: "MSG1".to_string(),
                creation_date_time: DateTime::from_timestamp(0, 0).unwrap(),
                number_of_transactions: 0,
                control_sum: Decimal::ZERO,
                initiating_party: Party::new().with_name("Initiator"),
            },
            payment_information: vec![
                PaymentInformation {
                    payment_information_id: "PMT1".to_string(),
                    requested_execution_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    debtor: Party::new().with_name("Debtor"),
                    transactions: vec![sample_transaction(dec!(100)), sample_transaction(dec!(50))],
                },
                PaymentInformation {
                    payment_information_id: "PMT2".to_string(),
                    requested_execution_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    debtor: Party::new().with_name("Debtor"),
                    transactions: vec![sample_transaction(dec!(25))],
                },
            ],
        };
        doc.recompute_totals();
        assert_eq!(doc.group_header.number_of_transactions, 3);
        assert_eq!(doc.group_header.control_sum, dec!(175));
    }
}
