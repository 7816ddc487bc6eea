//! Ambient configuration (SPEC_FULL §1A, §6.3): a small struct controlling
//! codec/converter behavior, passed by the caller — no environment variables
//! and no CLI surface are part of the core.

use chrono::NaiveDate;

use crate::value_types::Dialect;

/// Controls tag-86 subfield packing, balance-validation strictness, and the
/// DATEV metadata fields a caller would otherwise have to thread through every
/// builder/converter call by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecOptions {
    /// Selects `?20`…`?29` DATEV subfield packing vs. raw SWIFT free text for
    /// tag 86 (SPEC_FULL §4.1).
    pub dialect: Dialect,
    /// When set, a statement builder's mismatched opening/closing balance does
    /// not fail `build()` (SPEC_FULL §4.3).
    pub skip_balance_validation: bool,
    /// DATEV G/L account-number length, 4..=8 (SPEC_FULL §4.2).
    pub datev_account_length: u8,
    /// DATEV fiscal-year start, used when encoding a metadata row.
    pub datev_fiscal_year_start: NaiveDate,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Swift,
            skip_balance_validation: false,
            datev_account_length: 4,
            datev_fiscal_year_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }
}

impl CodecOptions {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_skip_balance_validation(mut self, skip: bool) -> Self {
        self.skip_balance_validation = skip;
        self
    }

    pub fn with_datev_account_length(mut self, len: u8) -> Self {
        self.datev_account_length = len;
        self
    }
}
