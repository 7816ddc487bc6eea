//! MT940 ↔ DATEV `BankTransaction` conversion (component F, SPEC_FULL §4.4).
//!
//! A DATEV bank-transaction file is a sequence of semicolon-separated lines,
//! CRLF-joined, one per MT940 transaction — not the category/row grammar of
//! [`crate::datev::DatevDocument`] (see [`crate::datev::bank_transaction`]'s
//! module doc comment for why these stay separate schemas).

use crate::datev::BankTransaction;
use crate::errors::ConvertError;
use crate::model::{Balance, MtDocument, MtHeader, Reference, StatementBody, StatementTransaction};
use crate::value_types::{BalanceType, Direction};

fn extract_bank_code(account_id: &str) -> (Option<String>, String) {
    if let Some((prefix, rest)) = account_id.split_once('/')
        && crate::sepa::is_valid_bic(prefix)
    {
        return (Some(prefix.to_string()), rest.to_string());
    }
    (None, account_id.to_string())
}

/// Forward: one DATEV row per MT940 transaction, CRLF-joined into a file body.
pub fn mt940_to_datev_transactions(doc: &MtDocument) -> Result<String, ConvertError> {
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "mt940_to_datev_transactions requires a statement-family source".to_string(),
    })?;
    let (bank_code, account) = extract_bank_code(&body.account_id);
    let lines: Vec<String> = body
        .transactions
        .iter()
        .map(|tx| {
            BankTransaction {
                bank_code: bank_code.clone(),
                account: account.clone(),
                statement_number: body.statement_number.clone(),
                opening_balance_date: Some(body.opening_balance.date()),
                value_date: tx.value_date,
                booking_date: Some(tx.booking_date),
                direction: tx.direction,
                amount: tx.amount,
                purpose: tx.purpose.clone(),
                transaction_type_code: tx.transaction_type_code.clone(),
                currency: tx.currency.clone(),
                reference: Reference::new(tx.reference.code(), tx.reference.customer_reference()).unwrap_or_else(|_| tx.reference.clone()),
            }
            .encode()
        })
        .collect();
    Ok(lines.join("\r\n"))
}

/// Reverse: parses a DATEV bank-transaction file body into an MT940 document.
/// Rows with fewer than 7 fields are skipped (no transaction emitted). The
/// opening balance defaults to zero unless `opening_balance` is supplied.
pub fn datev_transactions_to_mt940(
    senders_reference: impl Into<String>,
    file_body: &str,
    opening_balance: Option<Balance>,
) -> Result<MtDocument, ConvertError> {
    let transactions: Vec<StatementTransaction> = file_body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(BankTransaction::decode)
        .map(|tx| StatementTransaction {
            booking_date: tx.booking_date.unwrap_or(tx.value_date),
            value_date: tx.value_date,
            direction: tx.direction,
            amount: tx.amount,
            currency: tx.currency,
            reference: tx.reference,
            transaction_type_code: tx.transaction_type_code,
            bank_reference: None,
            purpose: tx.purpose,
        })
        .collect();

    let currency = transactions.first().map(|t| t.currency.clone()).unwrap_or_else(|| "EUR".to_string());
    let value_date = transactions.first().map(|t| t.value_date).unwrap_or_else(|| chrono::Utc::now().date_naive());
    let opening = opening_balance.unwrap_or(Balance::new(Direction::Credit, value_date, currency.clone(), rust_decimal::Decimal::ZERO, Some(BalanceType::Final))?);
    let movements: rust_decimal::Decimal = transactions.iter().map(|t| t.signed_amount()).sum();
    let closing_date = transactions.last().map(|t| t.value_date).unwrap_or(value_date);
    let closing = Balance::from_signed(opening.signed() + movements, closing_date, currency, Some(BalanceType::Closing))?;

    let senders_reference = senders_reference.into();
    let header = MtHeader::new(senders_reference, chrono::Utc::now())?;
    Ok(MtDocument::Mt940 {
        header,
        body: StatementBody {
            account_id: "UNKNOWN".to_string(),
            statement_number: "1/1".to_string(),
            opening_balance: opening,
            closing_balance: closing,
            transactions,
            closing_available_balance: None,
            forward_available_balance: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MtHeader as Header, Reference as Ref, StatementBody as Body, StatementTransaction as Tx};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn forward_conversion_emits_one_line_per_transaction() {
        let opening = Balance::new(Direction::Credit, date(2025, 6, 1), "EUR", dec!(1000), None).unwrap();
        let closing = Balance::new(Direction::Credit, date(2025, 6, 2), "EUR", dec!(800), None).unwrap();
        let doc = MtDocument::Mt940 {
            header: Header::new("STMT01", chrono::Utc::now()).unwrap(),
            body: Body {
                account_id: "COBADEFF/DE89370400440532013000".to_string(),
                statement_number: "1/1".to_string(),
                opening_balance: opening,
                closing_balance: closing,
                transactions: vec![Tx {
                    booking_date: date(2025, 6, 2),
                    value_date: date(2025, 6, 2),
                    direction: Direction::Debit,
                    amount: dec!(200),
                    currency: "EUR".to_string(),
                    reference: Ref::nonref("NTR").unwrap(),
                    transaction_type_code: "TRF".to_string(),
                    bank_reference: None,
                    purpose: None,
                }],
                closing_available_balance: None,
                forward_available_balance: None,
            },
        };
        let file = mt940_to_datev_transactions(&doc).unwrap();
        assert_eq!(file.lines().count(), 1);
        assert!(file.contains("COBADEFF"));
    }

    #[test]
    fn reverse_conversion_skips_short_rows_and_recomputes_closing() {
        let file = "COBADEFF;DE89370400440532013000;1/1;01062025;02062025;02062025;-150,00;;;;;;;;;;EUR\r\nbad;row";
        let opening = Balance::new(Direction::Credit, date(2025, 6, 1), "EUR", dec!(1000), None).unwrap();
        let doc = datev_transactions_to_mt940("STMT02", file, Some(opening)).unwrap();
        let body = doc.as_statement().unwrap();
        assert_eq!(body.transactions.len(), 1);
        assert_eq!(body.closing_balance.signed(), dec!(850));
    }
}
