//! Error types for the conversion engine.
//!
//! All errors carry a stable kind and a human-readable reason; none carry a stack
//! trace, matching the "no stack traces are part of the contract" rule (SPEC_FULL §7).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Main error type for parsing, validation, and cross-format conversion.
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq)]
pub enum ConvertError {
    // --- Syntax ---
    #[error("malformed tag {tag}: {message}")]
    MalformedTag { tag: String, message: String },

    #[error("malformed amount: {0}")]
    MalformedAmount(String),

    #[error("malformed date: {0}")]
    MalformedDate(String),

    #[error("truncated message: missing mandatory tag {tag} for {message_type}")]
    TruncatedMessage { tag: String, message_type: String },

    #[error("unexpected field {tag} in {context}")]
    UnexpectedField { tag: String, context: String },

    #[error("duplicate tag {tag}")]
    DuplicateTag { tag: String },

    // --- Schema ---
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("unknown transaction code: {0}")]
    UnknownTransactionCode(String),

    #[error("field {name} too long: max {limit}")]
    FieldTooLong { name: String, limit: usize },

    #[error("field invalid in category {category} column {column} ({position}): {reason}")]
    FieldInvalid {
        category: String,
        column: String,
        position: usize,
        reason: String,
    },

    #[error("missing field: {name}")]
    MissingField { name: String },

    // --- Semantic ---
    #[error("balance inconsistent: opening {opening} + movements {movements} != closing {closing}")]
    BalanceInconsistent {
        opening: String,
        movements: String,
        closing: String,
    },

    #[error("control sum mismatch: declared {declared}, computed {computed}")]
    ControlSumMismatch { declared: String, computed: String },

    #[error("heterogeneous batch: {0}")]
    HeterogeneousBatch(String),

    #[error("empty batch")]
    EmptyBatch,

    // --- Infrastructure ---
    #[error("regex error: {0}")]
    Regex(String),

    #[error("json error: {0}")]
    Json(String),

    #[error("xml error: {0}")]
    Xml(String),
}

impl From<regex::Error> for ConvertError {
    fn from(err: regex::Error) -> Self {
        ConvertError::Regex(err.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Json(err.to_string())
    }
}

/// Non-fatal notice surfaced alongside a successful conversion result.
///
/// Distinct from [`ConvertError`]: a lossy conversion (e.g. MT940 -> MT941) still
/// succeeds, but the caller is told what was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Notice {
    TransactionsDropped { count: usize, reason: String },
}

/// A single row/element-scoped error, used when a batch operation (DATEV row
/// validation, `convert_multiple`) must keep processing past one failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    pub error: ConvertError,
    pub index: Option<usize>,
    pub tag: Option<String>,
}

impl ErrorContext {
    pub fn new(error: ConvertError) -> Self {
        Self {
            error,
            index: None,
            tag: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Accumulates non-fatal errors and warnings across a batch operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorCollection {
    pub errors: Vec<ErrorContext>,
    pub notices: Vec<Notice>,
}

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_error(&mut self, error: ErrorContext) {
        self.errors.push(error);
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
