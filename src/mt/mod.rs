//! SWIFT MT tag codec (component C, SPEC_FULL §4.1) and the top-level
//! `parse`/`serialize` programmatic surface of SPEC_FULL §6.3.

pub mod amount;
pub mod fields;
pub mod parser;
pub mod tokenizer;

use crate::errors::ConvertError;
use crate::model::MtDocument;
use crate::value_types::MtType;
use tracing::{debug, instrument};

/// Parses a block-4 MT body into its document, dispatching on the declared
/// message type (SPEC_FULL §6.3: `parse(bytes) -> document | Errors`).
#[instrument(skip(body))]
pub fn parse(body: &str, mt_type: MtType) -> Result<MtDocument, ConvertError> {
    debug!(len = body.len(), "parsing MT body");
    if mt_type.is_statement() {
        parser::parse_statement(body, mt_type)
    } else if mt_type.is_batch_order() {
        parser::parse_batch_order(body, mt_type)
    } else if mt_type == MtType::MT103 {
        parser::parse_single_order(body)
    } else if mt_type.is_confirmation() {
        parser::parse_confirmation(body, mt_type)
    } else if mt_type.is_fi_transfer() {
        parser::parse_fi_transfer(body, mt_type)
    } else if mt_type == MtType::MT920 {
        parser::parse_request(body)
    } else {
        Err(ConvertError::UnexpectedField {
            tag: mt_type.code().to_string(),
            context: "message type not supported by this codec build".to_string(),
        })
    }
}

/// Serializes a document back to its block-4 text form (SPEC_FULL §6.3:
/// `serialize(document, dialect?) -> bytes`). The dialect only affects tag 86
/// subfield packing and is applied by the SEPA module upstream of this codec.
#[instrument(skip(document))]
pub fn serialize(document: &MtDocument) -> Result<String, ConvertError> {
    debug!(mt_type = %document.mt_type(), "serializing MT document");
    match document {
        MtDocument::Mt940 { .. } | MtDocument::Mt941 { .. } | MtDocument::Mt942 { .. } | MtDocument::Mt950 { .. } => {
            parser::serialize_statement(document)
        }
        MtDocument::Mt103 { .. } => parser::serialize_single_order(document),
        MtDocument::Mt101 { .. } | MtDocument::Mt102 { .. } | MtDocument::Mt104 { .. } => parser::serialize_batch_order(document),
        MtDocument::Mt200 { .. } | MtDocument::Mt900 { .. } | MtDocument::Mt910 { .. } => parser::serialize_confirmation(document),
        MtDocument::Mt202 { .. } | MtDocument::Mt202Cov { .. } => parser::serialize_fi_transfer(document),
        MtDocument::Mt920 { .. } => parser::serialize_request(document),
    }
}
