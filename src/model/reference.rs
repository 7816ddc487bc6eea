//! Reference entity: MT transaction reference pair (SPEC_FULL §3).

use crate::errors::ConvertError;
use serde::{Deserialize, Serialize};

/// Reserved literal used when no customer reference is known.
pub const NONREF: &str = "NONREF";

/// A 3-char business-transaction code paired with an up-to-16-char customer
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    code: String,
    customer_reference: String,
}

impl Reference {
    pub fn new(code: impl Into<String>, customer_reference: impl Into<String>) -> Result<Self, ConvertError> {
        let code = code.into();
        let customer_reference = customer_reference.into();
        if code.len() != 3 {
            return Err(ConvertError::FieldTooLong {
                name: "reference.code".to_string(),
                limit: 3,
            });
        }
        if customer_reference.len() > 16 {
            return Err(ConvertError::FieldTooLong {
                name: "reference.customer_reference".to_string(),
                limit: 16,
            });
        }
        Ok(Self {
            code,
            customer_reference,
        })
    }

    pub fn nonref(code: impl Into<String>) -> Result<Self, ConvertError> {
        Self::new(code, NONREF)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn customer_reference(&self) -> &str {
        &self.customer_reference
    }
}
