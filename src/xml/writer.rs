//! Generic ISO 20022 XML tree walker (component F, SPEC_FULL §4.4, §6.1).
//!
//! One mechanical writer walks the pain entity tree and emits namespaced,
//! pretty-printed XML; there is no bespoke per-pain-type serializer. Grounded
//! on the teacher's `quick-xml`-based header/body writers, generalized from
//! MT block structure to an element tree.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::errors::ConvertError;
use crate::model::{PainDocument, PainTransaction, Party, PaymentInformation};
use crate::value_types::PainType;

fn fmt_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn element(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> Result<(), ConvertError> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    Ok(())
}

fn write_party(writer: &mut Writer<Cursor<Vec<u8>>>, wrapper_tag: &str, party: &Party) -> Result<(), ConvertError> {
    writer
        .write_event(Event::Start(BytesStart::new(wrapper_tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::Start(BytesStart::new("Nm")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::Text(BytesText::new(party.name.as_deref().unwrap_or(""))))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("Nm")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    if let Some(account) = &party.account {
        writer
            .write_event(Event::Start(BytesStart::new("Id")))
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
        element(writer, "IBAN", account)?;
        writer
            .write_event(Event::End(BytesEnd::new("Id")))
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(wrapper_tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    Ok(())
}

fn write_transaction(writer: &mut Writer<Cursor<Vec<u8>>>, tx_tag: &str, counterparty_tag: &str, tx: &PainTransaction) -> Result<(), ConvertError> {
    writer
        .write_event(Event::Start(BytesStart::new(tx_tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    writer
        .write_event(Event::Start(BytesStart::new("PmtId")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    element(writer, "EndToEndId", &tx.end_to_end_id)?;
    writer
        .write_event(Event::End(BytesEnd::new("PmtId")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    writer
        .write_event(Event::Start(BytesStart::new("Amt")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    let mut instd_amt = BytesStart::new("InstdAmt");
    instd_amt.push_attribute(("Ccy", tx.currency.as_str()));
    writer
        .write_event(Event::Start(instd_amt))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::Text(BytesText::new(&fmt_amount(tx.amount))))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("InstdAmt")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("Amt")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    if let Some(mandate_id) = &tx.mandate_id {
        writer
            .write_event(Event::Start(BytesStart::new("MndtRltdInf")))
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
        element(writer, "MndtId", mandate_id)?;
        writer
            .write_event(Event::End(BytesEnd::new("MndtRltdInf")))
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
    }

    write_party(writer, counterparty_tag, &tx.counterparty)?;

    if let Some(remittance) = &tx.remittance_information {
        writer
            .write_event(Event::Start(BytesStart::new("RmtInf")))
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
        element(writer, "Ustrd", remittance)?;
        writer
            .write_event(Event::End(BytesEnd::new("RmtInf")))
            .map_err(|e| ConvertError::Xml(e.to_string()))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(tx_tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    Ok(())
}

fn write_payment_information(writer: &mut Writer<Cursor<Vec<u8>>>, is_direct_debit: bool, pmt: &PaymentInformation) -> Result<(), ConvertError> {
    writer
        .write_event(Event::Start(BytesStart::new("PmtInf")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    element(writer, "PmtInfId", &pmt.payment_information_id)?;
    element(writer, "ReqdExctnDt", &pmt.requested_execution_date.format("%Y-%m-%d").to_string())?;
    write_party(writer, if is_direct_debit { "Cdtr" } else { "Dbtr" }, &pmt.debtor)?;

    let (tx_tag, counterparty_tag) = if is_direct_debit { ("DrctDbtTxInf", "Dbtr") } else { ("CdtTrfTxInf", "Cdtr") };
    for tx in &pmt.transactions {
        write_transaction(writer, tx_tag, counterparty_tag, tx)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("PmtInf")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    Ok(())
}

/// Writes the full `Document` tree for a pain document. Caller is responsible
/// for calling [`PainDocument::recompute_totals`] first.
pub fn write_pain_document(document: &PainDocument) -> Result<String, ConvertError> {
    let is_direct_debit = matches!(document.pain_type, PainType::Pain008);
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    let mut doc_start = BytesStart::new("Document");
    doc_start.push_attribute(("xmlns", document.pain_type.namespace()));
    writer
        .write_event(Event::Start(doc_start))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    let root_tag = document.pain_type.root_tag();
    writer
        .write_event(Event::Start(BytesStart::new(root_tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    writer
        .write_event(Event::Start(BytesStart::new("GrpHdr")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    element(&mut writer, "MsgId", &document.group_header.message_id)?;
    element(
        &mut writer,
        "CreDtTm",
        &document.group_header.creation_date_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
    )?;
    element(&mut writer, "NbOfTxs", &document.group_header.number_of_transactions.to_string())?;
    element(&mut writer, "CtrlSum", &fmt_amount(document.group_header.control_sum))?;
    write_party(&mut writer, "InitgPty", &document.group_header.initiating_party)?;
    writer
        .write_event(Event::End(BytesEnd::new("GrpHdr")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    for pmt in &document.payment_information {
        write_payment_information(&mut writer, is_direct_debit, pmt)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(root_tag)))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new("Document")))
        .map_err(|e| ConvertError::Xml(e.to_string()))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| ConvertError::Xml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupHeader, PaymentInformation};
    use chrono::{DateTime, NaiveDate};
    use rust_decimal_macros::dec;

    fn sample() -> PainDocument {
        PainDocument {
            pain_type: PainType::Pain001,
            group_header: GroupHeader {
                message_id: "MSG1".to_string(),
                creation_date_time: DateTime::from_timestamp(0, 0).unwrap(),
                number_of_transactions: 1,
                control_sum: dec!(100.00),
                initiating_party: Party::new().with_name("Initiator"),
            },
            payment_information: vec![PaymentInformation {
                payment_information_id: "PMT1".to_string(),
                requested_execution_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                debtor: Party::new().with_name("Debtor"),
                transactions: vec![PainTransaction {
                    end_to_end_id: "E2E-1".to_string(),
                    amount: dec!(100.00),
                    currency: "EUR".to_string(),
                    counterparty: Party::new().with_name("Beneficiary"),
                    remittance_information: None,
                    mandate_id: None,
                    creditor_id: None,
                }],
            }],
        }
    }

    #[test]
    fn writes_xml_declaration_and_root_namespace() {
        let xml = write_pain_document(&sample()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns=\"urn:iso:std:iso:20022:tech:xsd:pain.001.001.12\""));
        assert!(xml.contains("<CstmrCdtTrfInitn>"));
    }

    #[test]
    fn direct_debit_uses_drctdbttxinf() {
        let mut doc = sample();
        doc.pain_type = PainType::Pain008;
        let xml = write_pain_document(&doc).unwrap();
        assert!(xml.contains("<DrctDbtTxInf>"));
    }
}
