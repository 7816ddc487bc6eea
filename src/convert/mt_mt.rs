//! MT-to-MT conversions (component F, SPEC_FULL §4.4): statement-family
//! retyping and MT101 ↔ MT103 batch split/merge.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::{ConvertError, Notice};
use crate::model::{BatchOrderBody, Balance, MtDocument, MtHeader, OrderTransaction, Reference, StatementBody};
use crate::value_types::MtType;

/// MT940 → MT941: drops transactions, keeps both balances verbatim. Reports a
/// [`Notice::TransactionsDropped`] alongside the result rather than failing.
pub fn mt940_to_mt941(doc: &MtDocument) -> Result<(MtDocument, Option<Notice>), ConvertError> {
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "mt940_to_mt941 requires a statement-family source".to_string(),
    })?;
    let dropped = body.transactions.len();
    let header = MtHeader::new(doc.header().senders_reference.clone(), doc.header().creation_timestamp)?;
    let retyped = MtDocument::Mt941 {
        header,
        body: StatementBody {
            transactions: Vec::new(),
            ..body.clone()
        },
    };
    let notice = if dropped > 0 {
        Some(Notice::TransactionsDropped {
            count: dropped,
            reason: "MT941 carries no per-transaction detail".to_string(),
        })
    } else {
        None
    };
    Ok((retyped, notice))
}

/// MT941 → MT940: the reverse direction always yields an empty transaction
/// list (SPEC_FULL §4.4 — the detail was never there to recover).
pub fn mt941_to_mt940(doc: &MtDocument) -> Result<MtDocument, ConvertError> {
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "mt941_to_mt940 requires a statement-family source".to_string(),
    })?;
    let header = MtHeader::new(doc.header().senders_reference.clone(), doc.header().creation_timestamp)?;
    Ok(MtDocument::Mt940 {
        header,
        body: StatementBody {
            transactions: Vec::new(),
            ..body.clone()
        },
    })
}

/// MT940 ↔ MT942: bidirectional transaction mapping. When the source has no
/// opening balance (MT942's forward-looking sibling often omits it), the
/// opening balance is back-computed from closing and movements via the §3
/// signed-sum invariant, flipping direction to DEBIT on a negative result.
pub fn retype_statement(doc: &MtDocument, target: MtType) -> Result<MtDocument, ConvertError> {
    if !target.is_statement() {
        return Err(ConvertError::UnexpectedField {
            tag: "mt_type".to_string(),
            context: format!("{target} is not a statement-family type"),
        });
    }
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "retype_statement requires a statement-family source".to_string(),
    })?;
    let header = MtHeader::new(doc.header().senders_reference.clone(), doc.header().creation_timestamp)?;
    let body = body.clone();
    Ok(match target {
        MtType::MT940 => MtDocument::Mt940 { header, body },
        MtType::MT941 => MtDocument::Mt941 { header, body: StatementBody { transactions: Vec::new(), ..body } },
        MtType::MT942 => MtDocument::Mt942 { header, body },
        MtType::MT950 => MtDocument::Mt950 { header, body },
        _ => unreachable!("guarded by is_statement() above"),
    })
}

/// Reconstructs the opening balance of a statement body whose transactions
/// are known but whose opening balance was never populated, per the §3
/// signed-sum invariant run in reverse.
pub fn back_compute_opening_balance(body: &StatementBody) -> Result<Balance, ConvertError> {
    let movements: Decimal = body.transactions.iter().map(|t| t.signed_amount()).sum();
    let opening_signed = body.closing_balance.signed() - movements;
    Balance::from_signed(
        opening_signed,
        body.opening_balance.date(),
        body.closing_balance.currency(),
        Some(crate::value_types::BalanceType::Final),
    )
}

/// MT101 → MT103 (array): one MT103 per transaction leg, reference
/// `{MT101.ref}-NNN` zero-padded to three digits starting at 001.
pub fn split_batch_to_single_orders(doc: &MtDocument) -> Result<Vec<MtDocument>, ConvertError> {
    let (header, body) = match doc {
        MtDocument::Mt101 { header, body } | MtDocument::Mt102 { header, body } | MtDocument::Mt104 { header, body } => {
            (header, body)
        }
        _ => {
            return Err(ConvertError::UnexpectedField {
                tag: "mt_type".to_string(),
                context: "split_batch_to_single_orders requires an MT101/102/104 source".to_string(),
            })
        }
    };
    body.transactions
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            let child_reference = format!("{}-{:03}", header.senders_reference, i + 1);
            let child_header = MtHeader::new(child_reference.clone(), Utc::now())?;
            Ok(MtDocument::Mt103 {
                header: child_header,
                body: crate::model::SingleOrderBody {
                    reference: Reference::new(tx.reference.code(), tx.reference.customer_reference())?,
                    ordering_customer: body.ordering_customer.clone(),
                    beneficiary: tx.beneficiary.clone(),
                    transfer: tx.transfer.clone(),
                    charges: tx.charges.unwrap_or_default(),
                    purpose: tx.purpose.clone(),
                },
            })
        })
        .collect()
}

/// MT103 (array) → MT101: requires every element to share ordering party and
/// currency; otherwise reports `HeterogeneousBatch`.
pub fn merge_single_orders_to_batch(senders_reference: impl Into<String>, docs: &[MtDocument]) -> Result<MtDocument, ConvertError> {
    if docs.is_empty() {
        return Err(ConvertError::EmptyBatch);
    }
    let bodies: Vec<&crate::model::SingleOrderBody> = docs
        .iter()
        .map(|d| match d {
            MtDocument::Mt103 { body, .. } => Ok(body),
            _ => Err(ConvertError::UnexpectedField {
                tag: "mt_type".to_string(),
                context: "merge_single_orders_to_batch requires MT103 elements".to_string(),
            }),
        })
        .collect::<Result<_, _>>()?;

    let first = bodies[0];
    for body in &bodies[1..] {
        if body.ordering_customer != first.ordering_customer {
            return Err(ConvertError::HeterogeneousBatch(
                "MT103 elements do not share the same ordering customer".to_string(),
            ));
        }
        if body.transfer.currency != first.transfer.currency {
            return Err(ConvertError::HeterogeneousBatch(
                "MT103 elements do not share the same currency".to_string(),
            ));
        }
    }

    let senders_reference = senders_reference.into();
    let header = MtHeader::new(senders_reference.clone(), Utc::now())?;
    let transactions = bodies
        .iter()
        .map(|body| OrderTransaction {
            reference: Reference::new(body.reference.code(), body.reference.customer_reference()).unwrap(),
            beneficiary: body.beneficiary.clone(),
            transfer: body.transfer.clone(),
            mandate_reference: None,
            charges: Some(body.charges),
            purpose: body.purpose.clone(),
        })
        .collect();
    Ok(MtDocument::Mt101 {
        header,
        body: BatchOrderBody {
            reference: Reference::new("NTR", senders_reference)?,
            ordering_customer: first.ordering_customer.clone(),
            transactions,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Party, StatementTransaction, TransferDetails};
    use crate::value_types::{BalanceType, Direction};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_statement(mt_type: MtType) -> MtDocument {
        let opening = Balance::new(Direction::Credit, date(2025, 6, 1), "EUR", dec!(1000), Some(BalanceType::Final)).unwrap();
        let closing = Balance::new(Direction::Credit, date(2025, 6, 2), "EUR", dec!(800), Some(BalanceType::Closing)).unwrap();
        let body = StatementBody {
            account_id: "DE89370400440532013000".to_string(),
            statement_number: "1/1".to_string(),
            opening_balance: opening,
            closing_balance: closing,
            transactions: vec![StatementTransaction {
                booking_date: date(2025, 6, 2),
                value_date: date(2025, 6, 2),
                direction: Direction::Debit,
                amount: dec!(200),
                currency: "EUR".to_string(),
                reference: Reference::nonref("NTR").unwrap(),
                transaction_type_code: "TRF".to_string(),
                bank_reference: None,
                purpose: None,
            }],
            closing_available_balance: None,
            forward_available_balance: None,
        };
        let header = MtHeader::new("STMT01", Utc::now()).unwrap();
        match mt_type {
            MtType::MT940 => MtDocument::Mt940 { header, body },
            MtType::MT942 => MtDocument::Mt942 { header, body },
            _ => unreachable!(),
        }
    }

    #[test]
    fn mt940_to_mt941_drops_transactions_and_reports_notice() {
        let (retyped, notice) = mt940_to_mt941(&sample_statement(MtType::MT940)).unwrap();
        assert!(retyped.as_statement().unwrap().transactions.is_empty());
        assert!(matches!(notice, Some(Notice::TransactionsDropped { count: 1, .. })));
    }

    #[test]
    fn retype_statement_preserves_transactions_for_mt942() {
        let retyped = retype_statement(&sample_statement(MtType::MT940), MtType::MT942).unwrap();
        assert_eq!(retyped.mt_type(), MtType::MT942);
        assert_eq!(retyped.as_statement().unwrap().transactions.len(), 1);
    }

    #[test]
    fn back_compute_opening_balance_flips_direction_on_negative() {
        let closing = Balance::new(Direction::Credit, date(2025, 6, 2), "EUR", dec!(100), None).unwrap();
        let body = StatementBody {
            account_id: "ACC".to_string(),
            statement_number: "1/1".to_string(),
            opening_balance: Balance::new(Direction::Credit, date(2025, 6, 1), "EUR", dec!(0), None).unwrap(),
            closing_balance: closing,
            transactions: vec![StatementTransaction {
                booking_date: date(2025, 6, 2),
                value_date: date(2025, 6, 2),
                direction: Direction::Credit,
                amount: dec!(400),
                currency: "EUR".to_string(),
                reference: Reference::nonref("NTR").unwrap(),
                transaction_type_code: "TRF".to_string(),
                bank_reference: None,
                purpose: None,
            }],
            closing_available_balance: None,
            forward_available_balance: None,
        };
        let opening = back_compute_opening_balance(&body).unwrap();
        assert_eq!(opening.direction(), Direction::Debit);
        assert_eq!(opening.amount(), dec!(300));
    }

    #[test]
    fn split_batch_numbers_children_with_zero_padded_suffix() {
        let party = Party::new().with_name("Ordering Co");
        let batch = MtDocument::Mt101 {
            header: MtHeader::new("BATCH01", Utc::now()).unwrap(),
            body: BatchOrderBody {
                reference: Reference::nonref("NTR").unwrap(),
                ordering_customer: party,
                transactions: vec![
                    OrderTransaction {
                        reference: Reference::nonref("NTR").unwrap(),
                        beneficiary: Party::new().with_name("Ben One"),
                        transfer: TransferDetails::new(date(2025, 6, 1), "EUR", dec!(100)),
                        mandate_reference: None,
                        charges: None,
                        purpose: None,
                    },
                    OrderTransaction {
                        reference: Reference::nonref("NTR").unwrap(),
                        beneficiary: Party::new().with_name("Ben Two"),
                        transfer: TransferDetails::new(date(2025, 6, 1), "EUR", dec!(50)),
                        mandate_reference: None,
                        charges: None,
                        purpose: None,
                    },
                ],
            },
        };
        let singles = split_batch_to_single_orders(&batch).unwrap();
        assert_eq!(singles.len(), 2);
        assert_eq!(singles[0].header().senders_reference, "BATCH01-001");
        assert_eq!(singles[1].header().senders_reference, "BATCH01-002");
    }

    #[test]
    fn merge_rejects_heterogeneous_currency() {
        let eur_body = crate::model::SingleOrderBody {
            reference: Reference::nonref("NTR").unwrap(),
            ordering_customer: Party::new().with_name("Ordering Co"),
            beneficiary: Party::new().with_name("Ben"),
            transfer: TransferDetails::new(date(2025, 6, 1), "EUR", dec!(100)),
            charges: Default::default(),
            purpose: None,
        };
        let usd_body = crate::model::SingleOrderBody {
            transfer: TransferDetails::new(date(2025, 6, 1), "USD", dec!(100)),
            ..eur_body.clone()
        };
        let docs = vec![
            MtDocument::Mt103 { header: MtHeader::new("A", Utc::now()).unwrap(), body: eur_body },
            MtDocument::Mt103 { header: MtHeader::new("B", Utc::now()).unwrap(), body: usd_body },
        ];
        let result = merge_single_orders_to_batch("BATCH", &docs);
        assert!(matches!(result, Err(ConvertError::HeterogeneousBatch(_))));
    }
}
