//! TransferDetails entity (SPEC_FULL §3).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferDetails {
    pub value_date: NaiveDate,
    pub currency: String,
    pub amount: Decimal,
    pub original_amount: Option<Decimal>,
    pub original_currency: Option<String>,
    pub exchange_rate: Option<Decimal>,
}

impl TransferDetails {
    pub fn new(value_date: NaiveDate, currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            value_date,
            currency: currency.into(),
            amount,
            original_amount: None,
            original_currency: None,
            exchange_rate: None,
        }
    }

    pub fn with_fx(mut self, original_amount: Decimal, original_currency: impl Into<String>, rate: Decimal) -> Self {
        self.original_amount = Some(original_amount);
        self.original_currency = Some(original_currency.into());
        self.exchange_rate = Some(rate);
        self
    }

    pub fn is_fx(&self) -> bool {
        self.original_currency.is_some()
    }
}
