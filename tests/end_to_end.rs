//! End-to-end scenarios exercising the public API surface across formats.

use cashmsg::builders::{PainBatchBuilder, SingleOrderBuilder};
use cashmsg::convert::mt_camt::mt940_to_camt053;
use cashmsg::datev::{Category, DatevDocument, DatevRow, Metadata};
use cashmsg::model::{CamtDocument, Party, TransferDetails};
use cashmsg::sepa::extract_sepa_references;
use cashmsg::value_types::{ChargesCode, Direction, EntryStatus, MtType, PainType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal_macros::dec;

const MT940_FRAGMENT: &str = "\
:20:REF12345
:25:DE89370400440532013000
:28C:1/1
:60F:C250115EUR1000,00
:61:2501150115C500,00NTRFREF001//BANK-REF
:86:Zahlung erhalten
:62F:C250115EUR1500,00
";

#[test]
fn s1_mt940_parses_and_re_serializes_to_the_same_statement() {
    let doc = cashmsg::mt::parse(MT940_FRAGMENT, MtType::MT940).unwrap();
    let body = doc.as_statement().unwrap();

    assert_eq!(body.opening_balance.direction(), Direction::Credit);
    assert_eq!(body.opening_balance.date(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    assert_eq!(body.opening_balance.amount(), dec!(1000.00));

    assert_eq!(body.transactions.len(), 1);
    assert_eq!(body.transactions[0].direction, Direction::Credit);
    assert_eq!(body.transactions[0].amount, dec!(500.00));
    assert_eq!(body.transactions[0].currency, "EUR");

    assert_eq!(body.closing_balance.direction(), Direction::Credit);
    assert_eq!(body.closing_balance.date(), NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    assert_eq!(body.closing_balance.amount(), dec!(1500.00));

    let text = cashmsg::mt::serialize(&doc).unwrap();
    let reparsed = cashmsg::mt::parse(&text, MtType::MT940).unwrap();
    assert_eq!(doc.as_statement().unwrap(), reparsed.as_statement().unwrap());
}

#[test]
fn s2_mt103_serializes_field_32a_with_value_date_currency_and_amount() {
    let doc = SingleOrderBuilder::new()
        .senders_reference("REF-001")
        .ordering_customer(Party::new().with_account("DE89370400440532013000").with_name("Firma GmbH"))
        .beneficiary(Party::new().with_account("DE91100000000123456789").with_name("Max Mustermann"))
        .transfer(TransferDetails::new(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(), "EUR", dec!(1000.00)))
        .charges(ChargesCode::Shared)
        .build()
        .unwrap();

    let text = cashmsg::mt::serialize(&doc).unwrap();
    assert!(text.contains("250315EUR1000,00"), "serialized MT103 did not contain field 32A: {text}");
}

#[test]
fn s3_mt940_to_camt053_maps_the_single_entry() {
    let doc = cashmsg::mt::parse(MT940_FRAGMENT, MtType::MT940).unwrap();
    let camt = mt940_to_camt053(&doc).unwrap();
    match camt {
        CamtDocument::Camt053(body) => {
            assert_eq!(body.entries.len(), 1);
            let entry = &body.entries[0];
            assert_eq!(entry.booking_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
            assert_eq!(entry.amount, dec!(500.00));
            assert_eq!(entry.direction, Direction::Credit);
            assert_eq!(entry.status, EntryStatus::Booked);
            assert_eq!(entry.bank_transaction_code, "NTRF");
        }
        other => panic!("expected camt.053, got {other:?}"),
    }
}

#[test]
fn s4_sepa_extraction_pulls_end_to_end_mandate_and_cleaned_purpose() {
    let refs = extract_sepa_references("EREF+END2END-42 MREF+MANDATE-7 SVWZ+Rechnung Nr 100");
    assert_eq!(refs.end_to_end_id.as_deref(), Some("END2END-42"));
    assert_eq!(refs.mandate_id.as_deref(), Some("MANDATE-7"));
    assert_eq!(refs.structured_purpose.as_deref(), Some("Rechnung Nr 100"));
}

#[test]
fn s5_pain001_batch_recomputes_control_sum_and_transaction_count() {
    let doc = PainBatchBuilder::new()
        .message_id("MSG-001")
        .initiating_party(Party::new().with_name("Initiator GmbH"))
        .payment_information_id("PMT-001")
        .requested_execution_date(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
        .debtor(Party::new().with_name("Debtor GmbH").with_account("DE89370400440532013000"))
        .begin_transaction("E2E-1", dec!(100.00), "EUR", Party::new().with_name("Beneficiary One"), None, None, None)
        .unwrap()
        .begin_transaction("E2E-2", dec!(250.00), "EUR", Party::new().with_name("Beneficiary Two"), None, None, None)
        .unwrap()
        .done(PainType::Pain001)
        .unwrap();

    let xml = cashmsg::convert::pain_gen::generate_pain_xml(&doc).unwrap();
    assert!(xml.contains("<NbOfTxs>2</NbOfTxs>"), "missing NbOfTxs=2 in: {xml}");
    assert!(xml.contains("<CtrlSum>350.00</CtrlSum>"), "missing CtrlSum=350.00 in: {xml}");
}

#[test]
fn s6_buchungsstapel_row_with_all_zero_umsatz_is_rejected_but_parsing_continues() {
    let schema_len = Category::Buchungsstapel.field_count();

    let mut bad_fields = vec![String::new(); schema_len];
    bad_fields[0] = "0000000000,00".to_string();
    bad_fields[1] = "S".to_string();
    bad_fields[6] = "1200".to_string();
    bad_fields[7] = "8400".to_string();
    bad_fields[9] = "0115".to_string();

    let mut good_fields = vec![String::new(); schema_len];
    good_fields[0] = "500,00".to_string();
    good_fields[1] = "H".to_string();
    good_fields[6] = "1200".to_string();
    good_fields[7] = "8400".to_string();
    good_fields[9] = "0115".to_string();

    let metadata = Metadata::new(
        Category::Buchungsstapel,
        NaiveDateTime::new(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
        1001,
        1,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        4,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        "Buchungsstapel",
        "EUR",
    )
    .unwrap();

    let doc = DatevDocument::new(
        metadata,
        vec![
            DatevRow::new(Category::Buchungsstapel, bad_fields),
            DatevRow::new(Category::Buchungsstapel, good_fields),
        ],
    );
    let text = doc.to_ascii();

    let (parsed, errors) = DatevDocument::from_ascii(&text).unwrap();
    assert_eq!(parsed.rows.len(), 1, "the all-zero-Umsatz row must be rejected, not emitted");
    assert_eq!(parsed.rows[0].fields[0], "500,00");
    assert!(errors.iter().any(|e| matches!(
        e,
        cashmsg::ConvertError::FieldInvalid { column, position, .. } if column == "umsatz" && *position == 1
    )));
}
