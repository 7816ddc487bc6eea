//! DATEV metadata (header) row: the first of the three logical rows in a DATEV
//! ASCII file (SPEC_FULL §4.2).

use crate::errors::ConvertError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use super::schema::Category;

/// The 31-field metadata row prefixed to every DATEV export.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// `"EXTF"` or `"DTVF"`.
    pub kind: String,
    pub category: Category,
    pub creation_timestamp: NaiveDateTime,
    pub consultant_number: u32,
    pub client_number: u32,
    pub fiscal_year_start: NaiveDate,
    pub account_length: u8,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub description: String,
    pub currency: String,
}

const VERSION: u32 = 700;
const FORMAT_VERSION: u32 = 13;

impl Metadata {
    pub fn new(
        category: Category,
        creation_timestamp: NaiveDateTime,
        consultant_number: u32,
        client_number: u32,
        fiscal_year_start: NaiveDate,
        account_length: u8,
        period_start: NaiveDate,
        period_end: NaiveDate,
        description: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self, ConvertError> {
        if !(4..=8).contains(&account_length) {
            return Err(ConvertError::FieldInvalid {
                category: category.format_name().to_string(),
                column: "Sachkontenlänge".to_string(),
                position: 10,
                reason: format!("account length must be 4..=8, got {account_length}"),
            });
        }
        Ok(Self {
            kind: "EXTF".to_string(),
            category,
            creation_timestamp,
            consultant_number,
            client_number,
            fiscal_year_start,
            account_length,
            period_start,
            period_end,
            description: description.into(),
            currency: currency.into(),
        })
    }

    /// Serialize the 31 semicolon-separated metadata fields.
    pub fn to_row(&self) -> String {
        let ts = self.creation_timestamp.format("%Y%m%d%H%M%S000");
        let fy = self.fiscal_year_start.format("%Y%m%d");
        let ps = self.period_start.format("%Y%m%d");
        let pe = self.period_end.format("%Y%m%d");
        format!(
            "\"{kind}\";{version};{category};\"{format_name}\";{format_version};{ts};;\"RE\";\"\";\"\";\
             {consultant};{client};{fy};{acct_len};{ps};{pe};\"{desc}\";\"\";1;0;0;\"{currency}\";;\"\";;;\"\";;;\"\"",
            kind = self.kind,
            version = VERSION,
            category = self.category.code(),
            format_name = self.category.format_name(),
            format_version = FORMAT_VERSION,
            consultant = self.consultant_number,
            client = self.client_number,
            acct_len = self.account_length,
            desc = self.description,
            currency = self.currency,
        )
    }

    /// Parse a metadata row back into its structured form. Permissive: only the
    /// fields this crate acts on are extracted; unknown trailing reserved slots
    /// are ignored.
    pub fn from_row(row: &str) -> Result<Self, ConvertError> {
        let fields: Vec<&str> = row.split(';').collect();
        if fields.len() < 16 {
            return Err(ConvertError::TruncatedMessage {
                tag: "metadata".to_string(),
                message_type: "DATEV".to_string(),
            });
        }
        let unquote = |s: &str| s.trim_matches('"').to_string();
        let kind = unquote(fields[0]);
        let category_code: u32 = fields[2]
            .parse()
            .map_err(|_| ConvertError::MalformedTag {
                tag: "category".to_string(),
                message: format!("non-numeric category code {:?}", fields[2]),
            })?;
        let category = Category::from_code(category_code).ok_or_else(|| ConvertError::FieldInvalid {
            category: "metadata".to_string(),
            column: "Kategorie".to_string(),
            position: 3,
            reason: format!("unknown category code {category_code}"),
        })?;
        let creation_timestamp = NaiveDateTime::parse_from_str(&fields[5][..14], "%Y%m%d%H%M%S")
            .map_err(|e| ConvertError::MalformedDate(e.to_string()))?;
        let consultant_number: u32 = fields[10].parse().unwrap_or(0);
        let client_number: u32 = fields[11].parse().unwrap_or(0);
        let fiscal_year_start = parse_yyyymmdd(fields[12])?;
        let account_length: u8 = fields[13].parse().unwrap_or(4);
        let period_start = parse_yyyymmdd(fields[14])?;
        let period_end = parse_yyyymmdd(fields[15])?;
        let description = fields.get(16).map(|f| unquote(f)).unwrap_or_default();
        let currency = fields.get(20).map(|f| unquote(f)).unwrap_or_else(|| "EUR".to_string());
        Ok(Self {
            kind,
            category,
            creation_timestamp,
            consultant_number,
            client_number,
            fiscal_year_start,
            account_length,
            period_start,
            period_end,
            description,
            currency,
        })
    }
}

fn parse_yyyymmdd(raw: &str) -> Result<NaiveDate, ConvertError> {
    if raw.len() != 8 {
        return Err(ConvertError::MalformedDate(format!("expected YYYYMMDD, got {raw:?}")));
    }
    let year: i32 = raw[0..4].parse().map_err(|_| ConvertError::MalformedDate(raw.to_string()))?;
    let month: u32 = raw[4..6].parse().map_err(|_| ConvertError::MalformedDate(raw.to_string()))?;
    let day: u32 = raw[6..8].parse().map_err(|_| ConvertError::MalformedDate(raw.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ConvertError::MalformedDate(raw.to_string()))
}

#[allow(dead_code)]
fn fiscal_year_index(of: NaiveDate, start: NaiveDate) -> i32 {
    of.year() - start.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn sample() -> Metadata {
        Metadata::new(
            Category::Buchungsstapel,
            NaiveDateTime::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            1001,
            1,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            4,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
            "Buchungsstapel",
            "EUR",
        )
        .unwrap()
    }

    #[test]
    fn rejects_account_length_out_of_range() {
        let result = Metadata::new(
            Category::Buchungsstapel,
            NaiveDateTime::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()),
            1001,
            1,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            12,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 31).unwrap(),
            "x",
            "EUR",
        );
        assert!(result.is_err());
    }

    #[test]
    fn row_round_trips_through_parse() {
        let meta = sample();
        let row = meta.to_row();
        let parsed = Metadata::from_row(&row).unwrap();
        assert_eq!(parsed.category, Category::Buchungsstapel);
        assert_eq!(parsed.consultant_number, 1001);
        assert_eq!(parsed.account_length, 4);
        assert_eq!(parsed.fiscal_year_start, meta.fiscal_year_start);
    }
}
