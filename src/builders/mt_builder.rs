//! Fluent builders for MT statement and order documents (component E,
//! SPEC_FULL §4.3). Each call returns a new builder state (copy-on-write); only
//! `build()` validates invariants and yields an immutable [`MtDocument`].

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::errors::ConvertError;
use crate::model::{
    Balance, BatchOrderBody, MtDocument, MtHeader, OrderTransaction, Party, Reference,
    SingleOrderBody, StatementBody, StatementTransaction, TransferDetails,
};
use crate::value_types::{BalanceType, ChargesCode, MtType};

/// Builds an MT940/941/942/950 statement document.
#[derive(Debug, Clone, Default)]
pub struct StatementBuilder {
    senders_reference: Option<String>,
    account_id: Option<String>,
    statement_number: Option<String>,
    opening_balance: Option<Balance>,
    closing_balance: Option<Balance>,
    transactions: Vec<StatementTransaction>,
    skip_balance_validation: bool,
}

impl StatementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn senders_reference(mut self, reference: impl Into<String>) -> Self {
        self.senders_reference = Some(reference.into());
        self
    }

    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    pub fn statement_number(mut self, number: impl Into<String>) -> Self {
        self.statement_number = Some(number.into());
        self
    }

    pub fn opening_balance(mut self, balance: Balance) -> Self {
        self.opening_balance = Some(balance);
        self
    }

    pub fn closing_balance(mut self, balance: Balance) -> Self {
        self.closing_balance = Some(balance);
        self
    }

    pub fn add_transaction(mut self, transaction: StatementTransaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn skip_balance_validation(mut self, skip: bool) -> Self {
        self.skip_balance_validation = skip;
        self
    }

    fn movements_sum(&self) -> Decimal {
        self.transactions.iter().map(|t| t.signed_amount()).sum()
    }

    /// Builds the document. If exactly one of opening/closing balance was
    /// supplied, the missing side is computed from the signed-sum invariant
    /// (SPEC_FULL §4.3); if both are supplied, they must be consistent unless
    /// `skip_balance_validation` was set.
    pub fn build(self, mt_type: MtType) -> Result<MtDocument, ConvertError> {
        if !mt_type.is_statement() {
            return Err(ConvertError::UnexpectedField {
                tag: "mt_type".to_string(),
                context: format!("{mt_type} is not a statement-family type"),
            });
        }
        let senders_reference = self.senders_reference.clone().ok_or_else(|| ConvertError::MissingField {
            name: "senders_reference".to_string(),
        })?;
        let account_id = self.account_id.clone().ok_or_else(|| ConvertError::MissingField {
            name: "account_id".to_string(),
        })?;

        let (opening_balance, closing_balance) = match (self.opening_balance.clone(), self.closing_balance.clone()) {
            (Some(opening), Some(closing)) => {
                if !self.skip_balance_validation {
                    let computed = (opening.signed() + self.movements_sum()).round_dp(2);
                    if computed != closing.signed().round_dp(2) {
                        return Err(ConvertError::BalanceInconsistent {
                            opening: opening.signed().to_string(),
                            movements: self.movements_sum().to_string(),
                            closing: closing.signed().to_string(),
                        });
                    }
                }
                (opening, closing)
            }
            (Some(opening), None) => {
                let computed_signed = opening.signed() + self.movements_sum();
                let date = self.transactions.last().map(|t| t.value_date).unwrap_or(opening.date());
                let closing = Balance::from_signed(computed_signed, date, opening.currency(), Some(BalanceType::Closing))?;
                (opening, closing)
            }
            (None, Some(closing)) => {
                let computed_signed = closing.signed() - self.movements_sum();
                let opening = Balance::from_signed(computed_signed, closing.date(), closing.currency(), Some(BalanceType::Final))?;
                (opening, closing)
            }
            (None, None) => {
                return Err(ConvertError::MissingField {
                    name: "opening_balance or closing_balance".to_string(),
                })
            }
        };

        let header = MtHeader::new(senders_reference, Utc::now())?;
        let body = StatementBody {
            account_id,
            statement_number: self.statement_number.unwrap_or_default(),
            opening_balance,
            closing_balance,
            transactions: self.transactions,
            closing_available_balance: None,
            forward_available_balance: None,
        };
        Ok(match mt_type {
            MtType::MT940 => MtDocument::Mt940 { header, body },
            MtType::MT941 => MtDocument::Mt941 { header, body },
            MtType::MT942 => MtDocument::Mt942 { header, body },
            MtType::MT950 => MtDocument::Mt950 { header, body },
            _ => unreachable!("guarded by is_statement() above"),
        })
    }
}

/// Builds an MT103 single customer credit-transfer order.
#[derive(Debug, Clone, Default)]
pub struct SingleOrderBuilder {
    senders_reference: Option<String>,
    ordering_customer: Option<Party>,
    beneficiary: Option<Party>,
    transfer: Option<TransferDetails>,
    charges: ChargesCode,
    purpose: Option<String>,
}

impl SingleOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn senders_reference(mut self, reference: impl Into<String>) -> Self {
        self.senders_reference = Some(reference.into());
        self
    }

    pub fn ordering_customer(mut self, party: Party) -> Self {
        self.ordering_customer = Some(party);
        self
    }

    pub fn beneficiary(mut self, party: Party) -> Self {
        self.beneficiary = Some(party);
        self
    }

    pub fn transfer(mut self, transfer: TransferDetails) -> Self {
        self.transfer = Some(transfer);
        self
    }

    pub fn charges(mut self, charges: ChargesCode) -> Self {
        self.charges = charges;
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn build(self) -> Result<MtDocument, ConvertError> {
        let senders_reference = self.senders_reference.ok_or_else(|| ConvertError::MissingField {
            name: "senders_reference".to_string(),
        })?;
        let ordering_customer = self.ordering_customer.ok_or_else(|| ConvertError::MissingField {
            name: "ordering_customer".to_string(),
        })?;
        ordering_customer.validate_embedded()?;
        let beneficiary = self.beneficiary.ok_or_else(|| ConvertError::MissingField {
            name: "beneficiary".to_string(),
        })?;
        beneficiary.validate_embedded()?;
        let transfer = self.transfer.ok_or_else(|| ConvertError::MissingField {
            name: "transfer".to_string(),
        })?;

        let header = MtHeader::new(senders_reference.clone(), Utc::now())?;
        Ok(MtDocument::Mt103 {
            header,
            body: SingleOrderBody {
                reference: Reference::new("NTR", senders_reference)?,
                ordering_customer,
                beneficiary,
                transfer,
                charges: self.charges,
                purpose: self.purpose,
            },
        })
    }
}

/// Builds an MT101/102/104 batch order via `begin_transaction → … → done`.
#[derive(Debug, Clone, Default)]
pub struct BatchOrderBuilder {
    senders_reference: Option<String>,
    ordering_customer: Option<Party>,
    transactions: Vec<OrderTransaction>,
}

impl BatchOrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn senders_reference(mut self, reference: impl Into<String>) -> Self {
        self.senders_reference = Some(reference.into());
        self
    }

    pub fn ordering_customer(mut self, party: Party) -> Self {
        self.ordering_customer = Some(party);
        self
    }

    /// Accumulates one batch leg. The per-transaction control sum/count is
    /// implicit in `self.transactions`; `control_sum()` reads it back out.
    pub fn begin_transaction(
        mut self,
        beneficiary: Party,
        value_date: NaiveDate,
        currency: impl Into<String>,
        amount: Decimal,
        reference_code: &str,
        customer_reference: impl Into<String>,
    ) -> Result<Self, ConvertError> {
        self.transactions.push(OrderTransaction {
            reference: Reference::new(reference_code, customer_reference)?,
            beneficiary,
            transfer: TransferDetails::new(value_date, currency, amount),
            mandate_reference: None,
            charges: None,
            purpose: None,
        });
        Ok(self)
    }

    pub fn control_sum(&self) -> Decimal {
        self.transactions.iter().map(|t| t.transfer.amount).sum()
    }

    pub fn done(self, mt_type: MtType) -> Result<MtDocument, ConvertError> {
        if !mt_type.is_batch_order() {
            return Err(ConvertError::UnexpectedField {
                tag: "mt_type".to_string(),
                context: format!("{mt_type} is not a batch-order type"),
            });
        }
        if self.transactions.is_empty() {
            return Err(ConvertError::EmptyBatch);
        }
        let senders_reference = self.senders_reference.clone().ok_or_else(|| ConvertError::MissingField {
            name: "senders_reference".to_string(),
        })?;
        let ordering_customer = self.ordering_customer.clone().ok_or_else(|| ConvertError::MissingField {
            name: "ordering_customer".to_string(),
        })?;
        ordering_customer.validate_embedded()?;

        let header = MtHeader::new(senders_reference.clone(), Utc::now())?;
        let body = BatchOrderBody {
            reference: Reference::new("NTR", senders_reference)?,
            ordering_customer,
            transactions: self.transactions,
        };
        Ok(match mt_type {
            MtType::MT101 => MtDocument::Mt101 { header, body },
            MtType::MT102 => MtDocument::Mt102 { header, body },
            MtType::MT104 => MtDocument::Mt104 { header, body },
            _ => unreachable!("guarded by is_batch_order() above"),
        })
    }
}
