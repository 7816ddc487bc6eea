//! DATEV data row: an ordered fixed-length vector of field values validated
//! against its category's schema (SPEC_FULL §3, §4.2).

use crate::errors::ConvertError;

use super::schema::Category;

/// One data row of a DATEV document: `fields.len() == category.field_count()`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatevRow {
    pub category: Category,
    pub fields: Vec<String>,
}

impl DatevRow {
    pub fn new(category: Category, fields: Vec<String>) -> Self {
        Self { category, fields }
    }

    /// Validation algorithm of SPEC_FULL §4.2: walk every column, collecting
    /// `FieldInvalid` for schema violations rather than failing at the first one.
    /// Returns all violations found; an empty vec means the row is valid.
    pub fn validate(&self) -> Vec<ConvertError> {
        let schema = self.category.schema();
        let mut errors = Vec::new();
        if self.fields.len() != schema.len() {
            errors.push(ConvertError::FieldInvalid {
                category: self.category.format_name().to_string(),
                column: "<row width>".to_string(),
                position: 0,
                reason: format!(
                    "expected {} fields, got {}",
                    schema.len(),
                    self.fields.len()
                ),
            });
            return errors;
        }
        for (i, (value, column)) in self.fields.iter().zip(schema.iter()).enumerate() {
            if !column.validate(value) {
                errors.push(ConvertError::FieldInvalid {
                    category: self.category.format_name().to_string(),
                    column: column.name.to_string(),
                    position: i + 1,
                    reason: format!("{value:?} does not satisfy column schema"),
                });
            }
        }
        errors
    }

    /// `true` when any violation is against a `required` column — those are
    /// fatal at the row level; violations against optional columns are
    /// collected but don't block emission of the row (SPEC_FULL §4.2, §7).
    pub fn has_fatal_errors(&self) -> bool {
        let schema = self.category.schema();
        self.fields
            .iter()
            .zip(schema.iter())
            .any(|(value, column)| column.required && !column.validate(value))
    }

    /// Serialize the row to a semicolon-separated CSV line, quoting fields whose
    /// column schema marks them as quoted.
    pub fn to_csv_line(&self) -> String {
        let schema = self.category.schema();
        let mut out = String::new();
        for (i, (value, column)) in self.fields.iter().zip(schema.iter()).enumerate() {
            if i > 0 {
                out.push(';');
            }
            if column.quoted && !value.is_empty() {
                out.push('"');
                out.push_str(value);
                out.push('"');
            } else {
                out.push_str(value);
            }
        }
        out
    }

    /// Parse a CSV line into a row of the given category, unquoting fields.
    /// Permissive about width mismatches — `validate()` reports those.
    pub fn from_csv_line(category: Category, line: &str) -> Self {
        let fields = split_csv_line(line)
            .into_iter()
            .map(|f| f.trim_matches('"').to_string())
            .collect();
        Self { category, fields }
    }
}

/// Splits a semicolon-separated line respecting quoted fields that may embed a
/// literal `;` inside double quotes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        if c != '"' || in_quotes {
            // keep quotes out of the field value except when literal-escaped;
            // DATEV never doubles quotes, so drop the delimiter quotes only.
        }
        if c == '"' {
            continue;
        }
        current.push(c);
    }
    fields.push(current);
    fields
}
