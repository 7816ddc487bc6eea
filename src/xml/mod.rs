//! ISO 20022 XML generation (SPEC_FULL §4.4, §6.1).

pub mod writer;
