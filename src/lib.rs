//! # cashmsg
//!
//! Bidirectional codec and cross-format conversion engine for SWIFT MT,
//! ISO 20022 (pain/camt), and DATEV cash-management messages.
//!
//! ## Quick start
//! ```rust
//! use cashmsg::builders::StatementBuilder;
//! use cashmsg::model::Balance;
//! use cashmsg::value_types::{BalanceType, Direction, MtType};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> cashmsg::errors::Result<()> {
//! let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let opening = Balance::new(Direction::Credit, date, "EUR", dec!(1000.00), Some(BalanceType::Final))?;
//! let document = StatementBuilder::new()
//!     .senders_reference("STMT01")
//!     .account_id("DE89370400440532013000")
//!     .opening_balance(opening)
//!     .build(MtType::MT940)?;
//! let text = cashmsg::mt::serialize(&document)?;
//! assert!(text.contains(":20:STMT01"));
//! # Ok(())
//! # }
//! ```

pub mod builders;
pub mod config;
pub mod convert;
pub mod datev;
pub mod errors;
pub mod model;
pub mod mt;
pub mod sepa;
pub mod value_types;
pub mod xml;

pub use config::CodecOptions;
pub use errors::{ConvertError, Result};
