//! Balance entity (SPEC_FULL §3).

use crate::value_types::{BalanceType, Direction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A signed monetary amount at an instant.
///
/// Invariant: `amount >= 0`; the sign lives in `direction`, never in `amount`.
/// Constructed only through [`Balance::new`], which enforces the invariant, so every
/// live `Balance` is valid by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    direction: Direction,
    date: NaiveDate,
    currency: String,
    amount: Decimal,
    balance_type: Option<BalanceType>,
}

impl Balance {
    pub fn new(
        direction: Direction,
        date: NaiveDate,
        currency: impl Into<String>,
        amount: Decimal,
        balance_type: Option<BalanceType>,
    ) -> Result<Self, crate::errors::ConvertError> {
        if amount.is_sign_negative() {
            return Err(crate::errors::ConvertError::MalformedAmount(format!(
                "balance amount must be non-negative, got {amount}"
            )));
        }
        Ok(Self {
            direction,
            date,
            currency: currency.into(),
            amount,
            balance_type,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn balance_type(&self) -> Option<BalanceType> {
        self.balance_type
    }

    /// The signed value: `+amount` for credit, `-amount` for debit.
    pub fn signed(&self) -> Decimal {
        self.amount * Decimal::from(self.direction.sign())
    }

    /// Build a balance from a signed value, flipping direction to `Debit` when
    /// the value is negative (used when an opening balance is back-computed from
    /// closing - movements; SPEC_FULL §4.4, Testable Property 9).
    pub fn from_signed(
        signed: Decimal,
        date: NaiveDate,
        currency: impl Into<String>,
        balance_type: Option<BalanceType>,
    ) -> Result<Self, crate::errors::ConvertError> {
        let direction = if signed.is_sign_negative() {
            Direction::Debit
        } else {
            Direction::Credit
        };
        Self::new(direction, date, currency, signed.abs(), balance_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_negative_amount() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert!(Balance::new(Direction::Credit, date, "EUR", dec!(-1.00), None).is_err());
    }

    #[test]
    fn signed_applies_direction() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let credit = Balance::new(Direction::Credit, date, "EUR", dec!(100), None).unwrap();
        let debit = Balance::new(Direction::Debit, date, "EUR", dec!(100), None).unwrap();
        assert_eq!(credit.signed(), dec!(100));
        assert_eq!(debit.signed(), dec!(-100));
    }

    #[test]
    fn from_signed_flips_direction_on_negative() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let balance = Balance::from_signed(dec!(-50), date, "EUR", None).unwrap();
        assert_eq!(balance.direction(), Direction::Debit);
        assert_eq!(balance.amount(), dec!(50));
    }
}
