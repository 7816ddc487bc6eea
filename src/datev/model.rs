//! A complete DATEV document: the three-row file shape of SPEC_FULL §4.2/§6.1.

use crate::errors::ConvertError;
use tracing::{instrument, warn};

use super::metadata::Metadata;
use super::row::DatevRow;
use super::schema::Category;

#[derive(Debug, Clone, PartialEq)]
pub struct DatevDocument {
    pub metadata: Metadata,
    pub rows: Vec<DatevRow>,
}

impl DatevDocument {
    pub fn new(metadata: Metadata, rows: Vec<DatevRow>) -> Self {
        Self { metadata, rows }
    }

    pub fn category(&self) -> Category {
        self.metadata.category
    }

    /// Serializes the three logical rows (metadata, field-header, data) with
    /// CRLF line terminators (SPEC_FULL §6.1).
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.metadata.to_row());
        out.push_str("\r\n");
        out.push_str(&field_header_row(self.category()));
        out.push_str("\r\n");
        for row in &self.rows {
            out.push_str(&row.to_csv_line());
            out.push_str("\r\n");
        }
        out
    }

    /// Parses a DATEV ASCII file. Row-level `FieldInvalid` errors are collected
    /// and returned alongside the document rather than aborting the parse
    /// (SPEC_FULL §4.2/§7): only a missing metadata or header row is fatal.
    #[instrument(skip(text))]
    pub fn from_ascii(text: &str) -> Result<(Self, Vec<ConvertError>), ConvertError> {
        let mut lines = text.lines();
        let metadata_line = lines.next().ok_or(ConvertError::TruncatedMessage {
            tag: "metadata".to_string(),
            message_type: "DATEV".to_string(),
        })?;
        let metadata = Metadata::from_row(metadata_line)?;
        let _header_line = lines.next().ok_or(ConvertError::TruncatedMessage {
            tag: "field-header".to_string(),
            message_type: "DATEV".to_string(),
        })?;
        let category = metadata.category;
        let mut rows = Vec::new();
        let mut errors = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row = DatevRow::from_csv_line(category, line);
            let row_errors = row.validate();
            if row.has_fatal_errors() {
                warn!(errors = row_errors.len(), "rejecting row with fatal validation errors");
                errors.extend(row_errors);
                continue;
            }
            errors.extend(row_errors);
            rows.push(row);
        }
        Ok((Self::new(metadata, rows), errors))
    }
}

fn field_header_row(category: Category) -> String {
    category
        .schema()
        .iter()
        .map(|c| c.alias.unwrap_or(c.display_name))
        .collect::<Vec<_>>()
        .join(";")
}
