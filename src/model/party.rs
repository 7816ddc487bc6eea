//! Party entity: ordering customer or beneficiary (SPEC_FULL §3).

use crate::errors::ConvertError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub account: Option<String>,
    pub bic: Option<String>,
    pub name: Option<String>,
    pub address_lines: Vec<String>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_bic(mut self, bic: impl Into<String>) -> Self {
        self.bic = Some(bic.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address_line(mut self, line: impl Into<String>) -> Self {
        self.address_lines.push(line.into());
        self
    }

    /// Invariant: at least name or account must be present when the party is
    /// embedded in a transaction (SPEC_FULL §3).
    pub fn validate_embedded(&self) -> Result<(), ConvertError> {
        if self.name.is_none() && self.account.is_none() {
            return Err(ConvertError::MissingField {
                name: "party.name_or_account".to_string(),
            });
        }
        if self.address_lines.len() > 4 {
            return Err(ConvertError::FieldTooLong {
                name: "party.address_lines".to_string(),
                limit: 4,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_party() {
        assert!(Party::new().validate_embedded().is_err());
    }

    #[test]
    fn account_alone_is_sufficient() {
        assert!(Party::new()
            .with_account("DE89370400440532013000")
            .validate_embedded()
            .is_ok());
    }

    #[test]
    fn rejects_more_than_four_address_lines() {
        let party = Party::new()
            .with_name("Firma GmbH")
            .with_address_line("l1")
            .with_address_line("l2")
            .with_address_line("l3")
            .with_address_line("l4")
            .with_address_line("l5");
        assert!(party.validate_embedded().is_err());
    }
}
