//! MT940 → CAMT052/053/054 conversion (component F, SPEC_FULL §4.4): the
//! principal migration path from SWIFT statement messages to ISO 20022.

use chrono::Utc;

use crate::errors::ConvertError;
use crate::model::{CamtAccount, CamtDocument, CamtEntry, CamtNotificationBody, CamtReportBody, CamtStatementBody, MtDocument, Party};
use crate::sepa::{detect_iban_bic, extract_sepa_references};
use crate::value_types::{mt_code_to_camt_code, BalanceType, EntryStatus};

/// Builds the `MT940-{refId}-{ts}` message id, truncated to 35 chars and
/// restricted to alphanumerics and `-` (SPEC_FULL §4.4).
fn synthesize_message_id(senders_reference: &str) -> String {
    let ts = Utc::now().format("%Y%m%d%H%M%S");
    let raw = format!("MT940-{senders_reference}-{ts}");
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-').collect();
    cleaned.chars().take(35).collect()
}

fn extract_bic_from_account(account_id: &str) -> Option<String> {
    if let Some((prefix, _)) = account_id.split_once('/')
        && crate::sepa::is_valid_bic(prefix)
    {
        return Some(prefix.to_string());
    }
    if let Some((prefix, _)) = account_id.split_once(' ')
        && crate::sepa::is_valid_bic(prefix)
    {
        return Some(prefix.to_string());
    }
    None
}

fn camt_account(account_id: &str, currency: &str) -> CamtAccount {
    let bic = extract_bic_from_account(account_id);
    let iban = account_id.rsplit(['/', ' ']).next().unwrap_or(account_id).to_string();
    CamtAccount {
        iban: Some(iban),
        other_id: bic,
        currency: currency.to_string(),
        owner_name: None,
    }
}

fn map_entry(tx: &crate::model::StatementTransaction) -> CamtEntry {
    let purpose = tx.purpose.clone().unwrap_or_default();
    let refs = extract_sepa_references(&purpose);
    let (iban, bic) = detect_iban_bic(&purpose);
    let counterparty = if iban.is_some() || bic.is_some() {
        Some(Party {
            account: iban,
            bic,
            name: None,
            address_lines: Vec::new(),
        })
    } else {
        None
    };
    let entry_reference = if tx.reference.customer_reference() == crate::model::reference::NONREF {
        None
    } else {
        Some(tx.reference.customer_reference().to_string())
    };
    CamtEntry {
        amount: tx.amount,
        currency: tx.currency.clone(),
        direction: tx.direction,
        status: EntryStatus::Booked,
        booking_date: tx.booking_date,
        value_date: tx.value_date,
        bank_transaction_code: mt_code_to_camt_code(&tx.transaction_type_code).to_string(),
        account_servicer_reference: tx.bank_reference.clone(),
        end_to_end_id: refs.end_to_end_id,
        mandate_id: refs.mandate_id,
        creditor_id: refs.creditor_id,
        instruction_id: refs.instruction_id,
        entry_reference,
        remittance_information: if purpose.is_empty() { None } else { Some(purpose) },
        counterparty,
        is_reversal: false,
    }
}

/// MT940 → camt.053: opening/closing balances carry `PRCD`/`CLBD`.
pub fn mt940_to_camt053(doc: &MtDocument) -> Result<CamtDocument, ConvertError> {
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "mt940_to_camt053 requires a statement-family source".to_string(),
    })?;
    let message_id = synthesize_message_id(&doc.header().senders_reference);
    let account = camt_account(&body.account_id, body.opening_balance.currency());
    let mut opening = body.opening_balance.clone();
    opening_balance_type(&mut opening, BalanceType::PreviousClosing);
    let mut closing = body.closing_balance.clone();
    opening_balance_type(&mut closing, BalanceType::ClosingBooked);
    Ok(CamtDocument::Camt053(CamtStatementBody {
        message_id: message_id.clone(),
        creation_date_time: doc.header().creation_timestamp,
        statement_id: message_id,
        sequence_number: None,
        account,
        opening_balance: Some(opening),
        closing_balance: Some(closing),
        closing_available_balance: None,
        entries: body.transactions.iter().map(map_entry).collect(),
    }))
}

/// MT940 → camt.052: identical entry construction, closing type `CLAV`.
pub fn mt940_to_camt052(doc: &MtDocument) -> Result<CamtDocument, ConvertError> {
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "mt940_to_camt052 requires a statement-family source".to_string(),
    })?;
    let message_id = synthesize_message_id(&doc.header().senders_reference);
    let account = camt_account(&body.account_id, body.opening_balance.currency());
    let mut closing_available = body.closing_balance.clone();
    opening_balance_type(&mut closing_available, BalanceType::ClosingAvailable);
    Ok(CamtDocument::Camt052(CamtReportBody {
        message_id: message_id.clone(),
        creation_date_time: doc.header().creation_timestamp,
        report_id: message_id,
        account,
        closing_available_balance: Some(closing_available),
        entries: body.transactions.iter().map(map_entry).collect(),
    }))
}

/// MT940 → camt.054: same entry construction, no balance info at all.
pub fn mt940_to_camt054(doc: &MtDocument) -> Result<CamtDocument, ConvertError> {
    let body = doc.as_statement().ok_or_else(|| ConvertError::UnexpectedField {
        tag: "mt_type".to_string(),
        context: "mt940_to_camt054 requires a statement-family source".to_string(),
    })?;
    let message_id = synthesize_message_id(&doc.header().senders_reference);
    let account = camt_account(&body.account_id, body.opening_balance.currency());
    Ok(CamtDocument::Camt054(CamtNotificationBody {
        message_id: message_id.clone(),
        creation_date_time: doc.header().creation_timestamp,
        notification_id: message_id,
        account,
        entries: body.transactions.iter().map(map_entry).collect(),
    }))
}

fn opening_balance_type(balance: &mut crate::model::Balance, balance_type: BalanceType) {
    *balance = crate::model::Balance::new(balance.direction(), balance.date(), balance.currency(), balance.amount(), Some(balance_type))
        .expect("re-tagging an already-valid balance cannot fail validation");
}
