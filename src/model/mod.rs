//! The shared entity model: value types that carry meaning across every wire
//! format, plus the three document trees (MT, camt, pain) converters operate on
//! (SPEC_FULL §3).

pub mod balance;
pub mod camt;
pub mod mt;
pub mod pain;
pub mod party;
pub mod reference;
pub mod transfer;

pub use balance::Balance;
pub use camt::{CamtAccount, CamtDocument, CamtEntry, CamtNotificationBody, CamtReportBody, CamtStatementBody};
pub use mt::{
    BatchOrderBody, ConfirmationBody, FiTransferBody, MtDocument, MtHeader, OrderTransaction,
    RequestBody, SingleOrderBody, StatementBody, StatementTransaction,
};
pub use pain::{GroupHeader, PainDocument, PainTransaction, PaymentInformation};
pub use party::Party;
pub use reference::Reference;
pub use transfer::TransferDetails;
