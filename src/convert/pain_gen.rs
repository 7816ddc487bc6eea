//! pain.001/pain.008 XML generation (component F, SPEC_FULL §4.4): mechanical
//! mapping from the pain entity tree to namespaced XML via [`crate::xml::writer`].
//!
//! Number-of-transactions and control-sum are always recomputed from the
//! children at generation time (`PainDocument::recompute_totals`), ignoring
//! any pre-set value on the document passed in.

use crate::errors::ConvertError;
use crate::model::PainDocument;
use crate::xml::writer::write_pain_document;
use tracing::{debug, instrument};

/// Generates the namespaced XML body for a pain document, recomputing group
/// totals first so the emitted `NbOfTxs`/`CtrlSum` always matches the children.
#[instrument(skip(document))]
pub fn generate_pain_xml(document: &PainDocument) -> Result<String, ConvertError> {
    let mut document = document.clone();
    document.recompute_totals();
    debug!("recomputed pain group totals before XML generation");
    write_pain_document(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupHeader, Party, PainTransaction, PaymentInformation};
    use crate::value_types::PainType;
    use chrono::{DateTime, NaiveDate};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_document() -> PainDocument {
        PainDocument {
            pain_type: PainType::Pain001,
            group_header: GroupHeader {
                message_id: "MSG1".to_string(),
                creation_date_time: DateTime::from_timestamp(0, 0).unwrap(),
                number_of_transactions: 999,
                control_sum: Decimal::ZERO,
                initiating_party: Party::new().with_name("Initiator GmbH"),
            },
            payment_information: vec![PaymentInformation {
                payment_information_id: "PMT1".to_string(),
                requested_execution_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                debtor: Party::new().with_name("Debtor").with_account("DE89370400440532013000"),
                transactions: vec![PainTransaction {
                    end_to_end_id: "E2E-1".to_string(),
                    amount: dec!(250.00),
                    currency: "EUR".to_string(),
                    counterparty: Party::new().with_name("Beneficiary GmbH"),
                    remittance_information: Some("Invoice 42".to_string()),
                    mandate_id: None,
                    creditor_id: None,
                }],
            }],
        }
    }

    #[test]
    fn generated_xml_carries_recomputed_totals_not_the_stale_ones() {
        let xml = generate_pain_xml(&sample_document()).unwrap();
        assert!(xml.contains("<NbOfTxs>1</NbOfTxs>"));
        assert!(xml.contains("<CtrlSum>250.00</CtrlSum>"));
        assert!(!xml.contains("999"));
    }

    #[test]
    fn generated_xml_carries_correct_namespace() {
        let xml = generate_pain_xml(&sample_document()).unwrap();
        assert!(xml.contains("urn:iso:std:iso:20022:tech:xsd:pain.001.001.12"));
    }
}
