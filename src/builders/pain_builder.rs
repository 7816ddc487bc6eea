//! Fluent builder for pain.001/pain.008 batches (component E, SPEC_FULL §4.3).
//!
//! Mirrors [`super::mt_builder::BatchOrderBuilder`]'s `begin_transaction → … →
//! done` shape: each call accumulates one instruction, and `done()` recomputes
//! the group header's control sum/count rather than trusting a caller-supplied
//! value (SPEC_FULL §4.4's "recompute, never copy" rule).

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::errors::ConvertError;
use crate::model::{GroupHeader, PainDocument, PainTransaction, Party, PaymentInformation};
use crate::value_types::PainType;

#[derive(Debug, Clone, Default)]
pub struct PainBatchBuilder {
    message_id: Option<String>,
    initiating_party: Option<Party>,
    payment_information_id: Option<String>,
    requested_execution_date: Option<NaiveDate>,
    debtor: Option<Party>,
    transactions: Vec<PainTransaction>,
}

impl PainBatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn initiating_party(mut self, party: Party) -> Self {
        self.initiating_party = Some(party);
        self
    }

    pub fn payment_information_id(mut self, id: impl Into<String>) -> Self {
        self.payment_information_id = Some(id.into());
        self
    }

    pub fn requested_execution_date(mut self, date: NaiveDate) -> Self {
        self.requested_execution_date = Some(date);
        self
    }

    pub fn debtor(mut self, party: Party) -> Self {
        self.debtor = Some(party);
        self
    }

    /// Accumulates one credit-transfer or direct-debit instruction. `mandate_id`
    /// and `creditor_id` are only meaningful for direct-debit variants and are
    /// left `None` for pain.001.
    pub fn begin_transaction(
        mut self,
        end_to_end_id: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
        counterparty: Party,
        remittance_information: Option<String>,
        mandate_id: Option<String>,
        creditor_id: Option<String>,
    ) -> Result<Self, ConvertError> {
        counterparty.validate_embedded()?;
        self.transactions.push(PainTransaction {
            end_to_end_id: end_to_end_id.into(),
            amount,
            currency: currency.into(),
            counterparty,
            remittance_information,
            mandate_id,
            creditor_id,
        });
        Ok(self)
    }

    pub fn control_sum(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    pub fn done(self, pain_type: PainType) -> Result<PainDocument, ConvertError> {
        if self.transactions.is_empty() {
            return Err(ConvertError::EmptyBatch);
        }
        let message_id = self.message_id.ok_or_else(|| ConvertError::MissingField {
            name: "message_id".to_string(),
        })?;
        let initiating_party = self.initiating_party.ok_or_else(|| ConvertError::MissingField {
            name: "initiating_party".to_string(),
        })?;
        let payment_information_id = self.payment_information_id.ok_or_else(|| ConvertError::MissingField {
            name: "payment_information_id".to_string(),
        })?;
        let requested_execution_date = self.requested_execution_date.ok_or_else(|| ConvertError::MissingField {
            name: "requested_execution_date".to_string(),
        })?;
        let debtor = self.debtor.ok_or_else(|| ConvertError::MissingField {
            name: "debtor".to_string(),
        })?;
        debtor.validate_embedded()?;

        let mut document = PainDocument {
            pain_type,
            group_header: GroupHeader {
                message_id,
                creation_date_time: Utc::now(),
                number_of_transactions: 0,
                control_sum: Decimal::ZERO,
                initiating_party,
            },
            payment_information: vec![PaymentInformation {
                payment_information_id,
                requested_execution_date,
                debtor,
                transactions: self.transactions,
            }],
        };
        document.recompute_totals();
        Ok(document)
    }
}
