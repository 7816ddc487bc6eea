//! Property-based tests for the invariants of SPEC_FULL §8: the balance
//! invariant, DATEV per-column schema conformance, and amount round-tripping.

use cashmsg::builders::StatementBuilder;
use cashmsg::datev::Category;
use cashmsg::model::{Party, Reference, StatementTransaction, TransferDetails};
use cashmsg::mt::amount::{encode_mt_amount, parse_mt_amount};
use cashmsg::value_types::{Direction, MtType};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Credit), Just(Direction::Debit)]
}

proptest! {
    /// Invariant 1: `closing.signed = opening.signed + sum(tx.signed)` for any
    /// sequence of transactions the builder back-computes a closing balance from.
    #[test]
    fn invariant_1_balance_sum_holds_for_any_transaction_sequence(
        amounts in proptest::collection::vec((1u64..100_000u64, direction_strategy()), 0..8),
    ) {
        let opening = cashmsg::model::Balance::new(Direction::Credit, date(), "EUR", Decimal::new(100_000, 2), None).unwrap();
        let mut builder = StatementBuilder::new()
            .senders_reference("PROP01")
            .account_id("DE89370400440532013000")
            .opening_balance(opening);
        for (i, (cents, direction)) in amounts.iter().enumerate() {
            builder = builder.add_transaction(StatementTransaction {
                booking_date: date(),
                value_date: date(),
                direction: *direction,
                amount: Decimal::new(*cents as i64, 2),
                currency: "EUR".to_string(),
                reference: Reference::new("NTR", format!("TX{i}")).unwrap(),
                transaction_type_code: "TRF".to_string(),
                bank_reference: None,
                purpose: None,
            });
        }
        let doc = builder.build(MtType::MT940).unwrap();
        let body = doc.as_statement().unwrap();
        prop_assert!(body.verify_balance_invariant().is_ok());
    }

    /// Invariant 3: every DATEV `konto` value either matches its column regex
    /// (1-9 ASCII digits) or is empty (optional columns only; `konto` itself is
    /// required, so emptiness must fail).
    #[test]
    fn invariant_3_konto_column_accepts_exactly_its_digit_grammar(
        digits in "[0-9]{1,9}",
    ) {
        let schema = Category::Buchungsstapel.schema();
        let konto = schema.iter().find(|c| c.name == "konto").unwrap();
        prop_assert!(konto.validate(&digits));
    }

    #[test]
    fn invariant_3_konto_column_rejects_non_digit_text(
        text in "[a-zA-Z]{1,9}",
    ) {
        let schema = Category::Buchungsstapel.schema();
        let konto = schema.iter().find(|c| c.name == "konto").unwrap();
        prop_assert!(!konto.validate(&text));
    }

    #[test]
    fn invariant_3_optional_skonto_column_accepts_empty_or_matching(
        cents in 0u64..10_000_000u64,
    ) {
        let schema = Category::Buchungsstapel.schema();
        let skonto = schema.iter().find(|c| c.name == "skonto").unwrap();
        prop_assert!(skonto.validate(""));
        let value = encode_mt_amount(Decimal::new(cents as i64, 2));
        prop_assert!(skonto.validate(&value));
    }

    /// Invariant 4: `parse_amount(encode_amount(x)) = x` for any `x` in
    /// `[0, 10^10)` at two-decimal precision.
    #[test]
    fn invariant_4_amount_encode_decode_round_trips(
        cents in 0u64..1_000_000_000_000u64,
    ) {
        let amount = Decimal::new(cents as i64, 2);
        let encoded = encode_mt_amount(amount);
        let decoded = parse_mt_amount(&encoded).unwrap();
        prop_assert_eq!(decoded, amount);
    }
}

#[test]
fn single_order_builder_rejects_incomplete_party() {
    let result = cashmsg::builders::SingleOrderBuilder::new()
        .senders_reference("REF1")
        .ordering_customer(Party::new())
        .beneficiary(Party::new().with_name("Beneficiary"))
        .transfer(TransferDetails::new(date(), "EUR", Decimal::new(10000, 2)))
        .build();
    assert!(result.is_err());
}
