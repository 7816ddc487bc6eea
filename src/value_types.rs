//! Value types and enumerations shared across the MT, CAMT, pain, and DATEV models.
//!
//! Grounded on the teacher's `src/common.rs` (small enum + tag-constant module) and
//! `nimec77-ledger-bridge`'s `model.rs`, which keeps a single `BalanceType`/
//! `TransactionType` pair shared by every format instead of per-format duplicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credit/debit direction. The sign of a signed amount always comes from here,
/// never from the amount token itself (SPEC_FULL §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Credit,
    Debit,
}

impl Direction {
    pub fn sign(self) -> i64 {
        match self {
            Direction::Credit => 1,
            Direction::Debit => -1,
        }
    }

    /// Parse a single MT/DATEV direction character (`C`/`D`).
    pub fn from_cd_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Direction::Credit),
            'D' => Some(Direction::Debit),
            _ => None,
        }
    }

    pub fn to_cd_char(self) -> char {
        match self {
            Direction::Credit => 'C',
            Direction::Debit => 'D',
        }
    }

    /// Soll/Haben indicator used by the DATEV Soll/Haben-Kennzeichen column.
    pub fn to_soll_haben(self) -> &'static str {
        match self {
            Direction::Debit => "S",
            Direction::Credit => "H",
        }
    }

    pub fn from_soll_haben(s: &str) -> Option<Self> {
        match s {
            "S" => Some(Direction::Debit),
            "H" => Some(Direction::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Credit => "CREDIT",
            Direction::Debit => "DEBIT",
        })
    }
}

/// Balance type tag carried alongside an MT balance field / CAMT balance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    /// `F` — final (opening) balance.
    Final,
    /// `C` — closing balance (MT field tag), mapped to CAMT `CLBD`.
    Closing,
    /// `PRCD` — previous closing balance (CAMT).
    PreviousClosing,
    /// `CLBD` — closing booked balance (CAMT).
    ClosingBooked,
    /// `CLAV` — closing available balance (CAMT / MT field 64).
    ClosingAvailable,
}

impl BalanceType {
    pub fn camt_code(self) -> &'static str {
        match self {
            BalanceType::Final => "OPBD",
            BalanceType::Closing | BalanceType::ClosingBooked => "CLBD",
            BalanceType::PreviousClosing => "PRCD",
            BalanceType::ClosingAvailable => "CLAV",
        }
    }
}

/// The family of SWIFT MT statement/order/confirmation messages in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MtType {
    MT101,
    MT102,
    MT103,
    MT104,
    MT200,
    MT202,
    MT202Cov,
    MT900,
    MT910,
    MT920,
    MT940,
    MT941,
    MT942,
    MT950,
}

impl MtType {
    pub fn code(self) -> &'static str {
        match self {
            MtType::MT101 => "101",
            MtType::MT102 => "102",
            MtType::MT103 => "103",
            MtType::MT104 => "104",
            MtType::MT200 => "200",
            MtType::MT202 => "202",
            MtType::MT202Cov => "202COV",
            MtType::MT900 => "900",
            MtType::MT910 => "910",
            MtType::MT920 => "920",
            MtType::MT940 => "940",
            MtType::MT941 => "941",
            MtType::MT942 => "942",
            MtType::MT950 => "950",
        }
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            MtType::MT940 | MtType::MT941 | MtType::MT942 | MtType::MT950
        )
    }

    pub fn is_batch_order(self) -> bool {
        matches!(self, MtType::MT101 | MtType::MT102 | MtType::MT104)
    }

    pub fn is_confirmation(self) -> bool {
        matches!(self, MtType::MT200 | MtType::MT900 | MtType::MT910)
    }

    pub fn is_fi_transfer(self) -> bool {
        matches!(self, MtType::MT202 | MtType::MT202Cov)
    }

    /// Inverse of [`MtType::code`], used to resolve MT920's field 12
    /// (requested message type).
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "101" => MtType::MT101,
            "102" => MtType::MT102,
            "103" => MtType::MT103,
            "104" => MtType::MT104,
            "200" => MtType::MT200,
            "202" => MtType::MT202,
            "202COV" => MtType::MT202Cov,
            "900" => MtType::MT900,
            "910" => MtType::MT910,
            "920" => MtType::MT920,
            "940" => MtType::MT940,
            "941" => MtType::MT941,
            "942" => MtType::MT942,
            "950" => MtType::MT950,
            _ => return None,
        })
    }
}

impl fmt::Display for MtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MT{}", self.code())
    }
}

/// ISO 20022 camt document kind in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CamtType {
    Camt052,
    Camt053,
    Camt054,
}

impl CamtType {
    pub fn message_name(self) -> &'static str {
        match self {
            CamtType::Camt052 => "camt.052.001.08",
            CamtType::Camt053 => "camt.053.001.08",
            CamtType::Camt054 => "camt.054.001.08",
        }
    }
}

/// ISO 20022 pain document kind in scope (SPEC_FULL §6.1 namespace table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PainType {
    Pain001,
    Pain007,
    Pain008,
    Pain009,
    Pain010,
    Pain011,
    Pain012,
    Pain013,
    Pain014,
    Pain017,
    Pain018,
}

impl PainType {
    pub fn namespace(self) -> &'static str {
        match self {
            PainType::Pain001 => "urn:iso:std:iso:20022:tech:xsd:pain.001.001.12",
            PainType::Pain007 => "urn:iso:std:iso:20022:tech:xsd:pain.007.001.12",
            PainType::Pain008 => "urn:iso:std:iso:20022:tech:xsd:pain.008.001.11",
            PainType::Pain009 => "urn:iso:std:iso:20022:tech:xsd:pain.009.001.08",
            PainType::Pain010 => "urn:iso:std:iso:20022:tech:xsd:pain.010.001.08",
            PainType::Pain011 => "urn:iso:std:iso:20022:tech:xsd:pain.011.001.08",
            PainType::Pain012 => "urn:iso:std:iso:20022:tech:xsd:pain.012.001.08",
            PainType::Pain013 => "urn:iso:std:iso:20022:tech:xsd:pain.013.001.11",
            PainType::Pain014 => "urn:iso:std:iso:20022:tech:xsd:pain.014.001.11",
            PainType::Pain017 => "urn:iso:std:iso:20022:tech:xsd:pain.017.001.04",
            PainType::Pain018 => "urn:iso:std:iso:20022:tech:xsd:pain.018.001.04",
        }
    }

    pub fn root_tag(self) -> &'static str {
        match self {
            PainType::Pain001 => "CstmrCdtTrfInitn",
            PainType::Pain007 => "CstmrPmtRvsl",
            PainType::Pain008 => "CstmrDrctDbtInitn",
            PainType::Pain009 => "MndtInitnReq",
            PainType::Pain010 => "MndtAmdmntReq",
            PainType::Pain011 => "MndtCxlReq",
            PainType::Pain012 => "MndtAccptncRpt",
            PainType::Pain013 => "CdtrPmtActvtnReq",
            PainType::Pain014 => "CdtrPmtActvtnReqStsRpt",
            PainType::Pain017 => "MndtCpyReq",
            PainType::Pain018 => "MndtSspnsnReq",
        }
    }
}

/// SWIFT charges-bearer code (field 71A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChargesCode {
    /// `BEN` — beneficiary bears all charges.
    Beneficiary,
    /// `OUR` — ordering customer bears all charges.
    Ours,
    /// `SHA` — shared charges.
    #[default]
    Shared,
}

impl ChargesCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargesCode::Beneficiary => "BEN",
            ChargesCode::Ours => "OUR",
            ChargesCode::Shared => "SHA",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BEN" => Some(ChargesCode::Beneficiary),
            "OUR" => Some(ChargesCode::Ours),
            "SHA" => Some(ChargesCode::Shared),
            _ => None,
        }
    }
}

/// CAMT entry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Booked,
    Pending,
    Info,
}

impl EntryStatus {
    pub fn code(self) -> &'static str {
        match self {
            EntryStatus::Booked => "BOOK",
            EntryStatus::Pending => "PDNG",
            EntryStatus::Info => "INFO",
        }
    }
}

/// Output dialect for tag 86 subfield packing (SPEC_FULL §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Dialect {
    #[default]
    Swift,
    Datev,
}

/// Maps a 3-letter MT940 transaction type code to its 4-letter CAMT equivalent
/// (SPEC_FULL §4.4). Unseen codes default to `NTRF` (Open Question 1, DESIGN.md).
pub fn mt_code_to_camt_code(mt_code: &str) -> &'static str {
    match mt_code {
        "TRF" | "TRA" => "NTRF",
        "CHK" => "NCHK",
        "BOE" => "NBOE",
        "DCR" => "NDCR",
        "LCR" => "NLCR",
        "MSC" => "NMSC",
        "CHG" => "NCHG",
        "INT" => "NINT",
        "DIV" => "NDIV",
        "RTI" => "NRTI",
        _ => "NTRF",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_sign() {
        assert_eq!(Direction::Credit.sign(), 1);
        assert_eq!(Direction::Debit.sign(), -1);
    }

    #[test]
    fn direction_soll_haben_round_trip() {
        assert_eq!(Direction::from_soll_haben("S"), Some(Direction::Debit));
        assert_eq!(Direction::from_soll_haben("H"), Some(Direction::Credit));
        assert_eq!(Direction::Debit.to_soll_haben(), "S");
    }

    #[test]
    fn code_mapping_defaults_to_ntrf() {
        assert_eq!(mt_code_to_camt_code("TRF"), "NTRF");
        assert_eq!(mt_code_to_camt_code("XYZ"), "NTRF");
        assert_eq!(mt_code_to_camt_code("CHK"), "NCHK");
    }
}
