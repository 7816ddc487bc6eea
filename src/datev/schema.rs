//! Per-category DATEV column schemas (SPEC_FULL §4.2, §6.2).
//!
//! Grounded on `cvrt-gmbh-faktura`'s `datev::extf` module (the 700-format header/
//! column-header/data-row layout), generalized from its single hard-coded
//! Buchungsstapel layout into a schema table per category, each indexed by
//! position and carrying a compiled validation regex — the "global enum tables →
//! static data" design note (SPEC_FULL §9).

use once_cell::sync::Lazy;
use regex::Regex;

/// Logical datatype of a column, used only for documentation/introspection; the
/// regex is what actually gates validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Decimal,
    Date,
    Enum,
    Text,
}

/// A single column's schema entry (SPEC_FULL §4.2).
pub struct ColumnSpec {
    pub name: &'static str,
    pub display_name: &'static str,
    pub max_len: usize,
    pub datatype: ColumnType,
    pub regex: Option<Regex>,
    pub quoted: bool,
    pub required: bool,
    /// Alternate display name accepted on ingest (SPEC_FULL §4.2 header aliases).
    pub alias: Option<&'static str>,
    /// An all-zero amount (e.g. `"0000000000,00"`) is rejected even though it
    /// matches the decimal regex (SPEC_FULL §8 S6).
    pub reject_zero: bool,
}

impl ColumnSpec {
    fn new(
        name: &'static str,
        display_name: &'static str,
        max_len: usize,
        datatype: ColumnType,
        pattern: Option<&str>,
        required: bool,
    ) -> Self {
        let regex = pattern.map(|p| Regex::new(p).expect("static DATEV column regex must compile"));
        // Quoting policy: a regex anchored on a leading `"` marks a quoted field
        // (SPEC_FULL §4.2); our patterns validate unquoted content, so quoting is
        // instead declared explicitly by datatype: text and enum columns are quoted.
        let quoted = matches!(datatype, ColumnType::Text | ColumnType::Enum);
        Self {
            name,
            display_name,
            max_len,
            datatype,
            regex,
            quoted,
            required,
            alias: None,
            reject_zero: false,
        }
    }

    fn with_alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    fn with_reject_zero(mut self) -> Self {
        self.reject_zero = true;
        self
    }

    /// Generate a filler column for schema width not covered by a named field in
    /// this crate (DATEV categories run up to 254 columns; only the columns this
    /// crate's converters populate are named explicitly).
    fn filler(index: usize) -> Self {
        Self {
            name: Box::leak(format!("feld_{index}").into_boxed_str()),
            display_name: Box::leak(format!("Feld {index}").into_boxed_str()),
            max_len: 210,
            datatype: ColumnType::Text,
            regex: None,
            quoted: true,
            required: false,
            alias: None,
            reject_zero: false,
        }
    }

    pub fn validate(&self, value: &str) -> bool {
        if value.is_empty() {
            return !self.required;
        }
        if value.len() > self.max_len {
            return false;
        }
        if self.reject_zero
            && value.chars().all(|c| c.is_ascii_digit() || c == ',')
            && value.chars().any(|c| c.is_ascii_digit())
            && value.chars().filter(|c| c.is_ascii_digit()).all(|c| c == '0')
        {
            return false;
        }
        match &self.regex {
            Some(re) => re.is_match(value),
            None => true,
        }
    }
}

/// The seven in-scope DATEV document categories (SPEC_FULL §6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Code 16 — Debitoren/Kreditoren.
    Debitoren,
    /// Code 20 — Kontenbeschriftungen.
    Kontenbeschriftungen,
    /// Code 21 — Buchungsstapel.
    Buchungsstapel,
    /// Code 46 — Zahlungsbedingungen.
    Zahlungsbedingungen,
    /// Code 48 — Diverse Adressen.
    DiverseAdressen,
    /// Code 65 — Wiederkehrende Buchungen.
    WiederkehrendeBuchungen,
    /// Code 66 — Natural-Stapel.
    NaturalStapel,
}

impl Category {
    pub fn code(self) -> u32 {
        match self {
            Category::Debitoren => 16,
            Category::Kontenbeschriftungen => 20,
            Category::Buchungsstapel => 21,
            Category::Zahlungsbedingungen => 46,
            Category::DiverseAdressen => 48,
            Category::WiederkehrendeBuchungen => 65,
            Category::NaturalStapel => 66,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            16 => Some(Category::Debitoren),
            20 => Some(Category::Kontenbeschriftungen),
            21 => Some(Category::Buchungsstapel),
            46 => Some(Category::Zahlungsbedingungen),
            48 => Some(Category::DiverseAdressen),
            65 => Some(Category::WiederkehrendeBuchungen),
            66 => Some(Category::NaturalStapel),
            _ => None,
        }
    }

    pub fn format_name(self) -> &'static str {
        match self {
            Category::Debitoren => "Debitoren/Kreditoren",
            Category::Kontenbeschriftungen => "Kontenbeschriftungen",
            Category::Buchungsstapel => "Buchungsstapel",
            Category::Zahlungsbedingungen => "Zahlungsbedingungen",
            Category::DiverseAdressen => "Diverse Adressen",
            Category::WiederkehrendeBuchungen => "Wiederkehrende Buchungen",
            Category::NaturalStapel => "Natural-Stapel",
        }
    }

    pub fn field_count(self) -> usize {
        match self {
            Category::Debitoren => 254,
            Category::Kontenbeschriftungen => 4,
            Category::Buchungsstapel => 125,
            Category::Zahlungsbedingungen => 31,
            Category::DiverseAdressen => 191,
            Category::WiederkehrendeBuchungen => 101,
            Category::NaturalStapel => 15,
        }
    }

    pub fn schema(self) -> &'static [ColumnSpec] {
        match self {
            Category::Debitoren => &DEBITOREN_SCHEMA,
            Category::Kontenbeschriftungen => &KONTENBESCHRIFTUNGEN_SCHEMA,
            Category::Buchungsstapel => &BUCHUNGSSTAPEL_SCHEMA,
            Category::Zahlungsbedingungen => &ZAHLUNGSBEDINGUNGEN_SCHEMA,
            Category::DiverseAdressen => &DIVERSE_ADRESSEN_SCHEMA,
            Category::WiederkehrendeBuchungen => &WIEDERKEHRENDE_BUCHUNGEN_SCHEMA,
            Category::NaturalStapel => &NATURAL_STAPEL_SCHEMA,
        }
    }
}

fn padded(mut core: Vec<ColumnSpec>, total: usize) -> Vec<ColumnSpec> {
    let start = core.len() + 1;
    for i in start..=total {
        core.push(ColumnSpec::filler(i));
    }
    core
}

static BUCHUNGSSTAPEL_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("umsatz", "Umsatz (ohne Soll/Haben-Kz)", 17, ColumnType::Decimal, Some(r"^\d{1,13}(,\d{1,2})?$"), true)
            .with_reject_zero(),
        ColumnSpec::new("soll_haben_kennzeichen", "Soll/Haben-Kennzeichen", 1, ColumnType::Enum, Some(r"^[SH]$"), true),
        ColumnSpec::new("wkz_umsatz", "WKZ Umsatz", 3, ColumnType::Text, Some(r"^[A-Z]{3}$"), false),
        ColumnSpec::new("kurs", "Kurs", 11, ColumnType::Decimal, Some(r"^\d{1,6}(,\d{1,6})?$"), false),
        ColumnSpec::new("basisumsatz", "Basisumsatz", 17, ColumnType::Decimal, Some(r"^\d{1,13}(,\d{1,2})?$"), false),
        ColumnSpec::new("wkz_basisumsatz", "WKZ Basisumsatz", 3, ColumnType::Text, Some(r"^[A-Z]{3}$"), false),
        ColumnSpec::new("konto", "Konto", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("gegenkonto", "Gegenkonto (ohne BU-Schlüssel)", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("bu_schluessel", "BU-Schlüssel", 4, ColumnType::Text, Some(r"^[A-Z0-9]{1,4}$"), false),
        ColumnSpec::new("belegdatum", "Belegdatum", 4, ColumnType::Date, Some(r"^\d{4}$"), true),
        ColumnSpec::new("belegfeld_1", "Belegfeld 1", 36, ColumnType::Text, None, false),
        ColumnSpec::new("belegfeld_2", "Belegfeld 2", 12, ColumnType::Text, None, false),
        ColumnSpec::new("skonto", "Skonto", 17, ColumnType::Decimal, Some(r"^\d{1,13}(,\d{1,2})?$"), false),
        ColumnSpec::new("buchungstext", "Buchungstext", 60, ColumnType::Text, None, false),
        ColumnSpec::new("postensperre", "Postensperre", 1, ColumnType::Enum, Some(r"^[01]$"), false),
        ColumnSpec::new("diverse_adressnummer", "Diverse Adressnummer", 9, ColumnType::Text, None, false),
        ColumnSpec::new("geschaeftspartnerbank", "Geschäftspartnerbank", 7, ColumnType::Integer, Some(r"^\d{1,7}$"), false),
        ColumnSpec::new("sachverhalt", "Sachverhalt", 2, ColumnType::Integer, Some(r"^\d{1,2}$"), false),
        ColumnSpec::new("zinssperre", "Zinssperre", 1, ColumnType::Enum, Some(r"^[01]$"), false),
        ColumnSpec::new("eu_land_ustid", "EU-Land u. USt-IdNr.", 15, ColumnType::Text, Some(r"^[A-Z]{2}[A-Z0-9]{2,13}$"), false),
        ColumnSpec::new("leistungsdatum", "Leistungsdatum", 8, ColumnType::Date, Some(r"^\d{8}$"), false),
        ColumnSpec::new("datum_zuord", "Datum Zuord. Steuerperiode", 8, ColumnType::Date, Some(r"^\d{8}$"), false),
        ColumnSpec::new("faelligkeit", "Fälligkeit", 8, ColumnType::Date, Some(r"^\d{8}$"), false),
        ColumnSpec::new("generalumkehr", "Generalumkehr", 1, ColumnType::Enum, Some(r"^[01]$"), false),
        ColumnSpec::new("il_leistungskennzeichen", "il-Leistungskennzeichen", 3, ColumnType::Text, None, false),
        ColumnSpec::new("mandatsreferenz", "EU-Steuersatz u. EU-Steuertext", 15, ColumnType::Text, None, false)
            .with_alias("Mandatsreferenz n"),
    ];
    padded(core, Category::Buchungsstapel.field_count())
});

static KONTENBESCHRIFTUNGEN_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("konto", "Konto", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("kontobeschriftung", "Kontenbeschriftung", 40, ColumnType::Text, None, true)
            .with_alias("Kontobeschriftung"),
        ColumnSpec::new("sprach_id", "Sprach-ID", 2, ColumnType::Text, Some(r"^[a-z]{2}$"), false)
            .with_alias("SprachId"),
    ];
    padded(core, Category::Kontenbeschriftungen.field_count())
});

static DEBITOREN_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("konto", "Konto", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("name", "Name (Adressatentyp unbekannt)", 50, ColumnType::Text, None, true),
        ColumnSpec::new("unternehmen", "Unternehmen", 50, ColumnType::Text, None, false),
        ColumnSpec::new("kurzbezeichnung", "Kurzbezeichnung", 15, ColumnType::Text, None, false),
        ColumnSpec::new("strasse", "Straße", 36, ColumnType::Text, None, false),
        ColumnSpec::new("plz", "Postleitzahl", 10, ColumnType::Text, None, false),
        ColumnSpec::new("ort", "Ort", 30, ColumnType::Text, None, false),
        ColumnSpec::new("land", "Land", 2, ColumnType::Text, Some(r"^[A-Z]{2}$"), false),
        ColumnSpec::new("iban", "IBAN", 34, ColumnType::Text, Some(r"^[A-Z]{2}\d{2}[A-Z0-9]{4,30}$"), false),
        ColumnSpec::new("bic", "SWIFT-Code", 11, ColumnType::Text, Some(r"^[A-Z]{6}[A-Z0-9]{2}([A-Z0-9]{3})?$"), false)
            .with_alias("Bankbezeichnung"),
        ColumnSpec::new("bankname", "Bankbezeichnung", 27, ColumnType::Text, None, false),
        ColumnSpec::new("bankkontonummer", "Bankkonto-Nummer", 10, ColumnType::Text, None, false)
            .with_alias("Bank-Kontonummer"),
        ColumnSpec::new("ust_idnr", "EU-Land u. USt-IdNr.", 15, ColumnType::Text, None, false),
        ColumnSpec::new("steuernummer", "Steuernummer", 16, ColumnType::Text, None, false),
    ];
    padded(core, Category::Debitoren.field_count())
});

static ZAHLUNGSBEDINGUNGEN_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("key", "Schlüssel", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("bezeichnung", "Bezeichnung", 30, ColumnType::Text, None, true),
        ColumnSpec::new("faelligkeit_in_tagen", "Fälligkeit in Tagen", 3, ColumnType::Integer, Some(r"^\d{1,3}$"), false),
        ColumnSpec::new("skonto_prozent", "Skonto in Prozent", 6, ColumnType::Decimal, Some(r"^\d{1,3}(,\d{1,2})?$"), false),
        ColumnSpec::new("skonto_tage", "Skonto innerhalb Tagen", 3, ColumnType::Integer, Some(r"^\d{1,3}$"), false),
    ];
    padded(core, Category::Zahlungsbedingungen.field_count())
});

static DIVERSE_ADRESSEN_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("adressnummer", "Adressnummer", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("name", "Name (Adressatentyp unbekannt)", 50, ColumnType::Text, None, true),
        ColumnSpec::new("strasse", "Straße", 36, ColumnType::Text, None, false),
        ColumnSpec::new("plz", "Postleitzahl", 10, ColumnType::Text, None, false)
            .with_alias("Leerfeld"),
        ColumnSpec::new("ort", "Ort", 30, ColumnType::Text, None, false),
        ColumnSpec::new("land", "Land", 2, ColumnType::Text, Some(r"^[A-Z]{2}$"), false),
    ];
    padded(core, Category::DiverseAdressen.field_count())
});

static WIEDERKEHRENDE_BUCHUNGEN_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("umsatz", "Umsatz (ohne Soll/Haben-Kz)", 17, ColumnType::Decimal, Some(r"^\d{1,13}(,\d{1,2})?$"), true),
        ColumnSpec::new("soll_haben_kennzeichen", "Soll/Haben-Kennzeichen", 1, ColumnType::Enum, Some(r"^[SH]$"), true),
        ColumnSpec::new("konto", "Konto", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("gegenkonto", "Gegenkonto (ohne BU-Schlüssel)", 9, ColumnType::Integer, Some(r"^\d{1,9}$"), true),
        ColumnSpec::new("bu_schluessel", "BU-Schlüssel", 4, ColumnType::Text, Some(r"^[A-Z0-9]{1,4}$"), false),
        ColumnSpec::new("gueltig_von", "Gültig von", 8, ColumnType::Date, Some(r"^\d{8}$"), false)
            .with_alias("Bankverb … Gültig von"),
        ColumnSpec::new("gueltig_bis", "Gültig bis", 8, ColumnType::Date, Some(r"^\d{8}$"), false),
        ColumnSpec::new("turnus", "Turnus", 2, ColumnType::Integer, Some(r"^\d{1,2}$"), false),
        ColumnSpec::new("buchungstext", "Buchungstext", 60, ColumnType::Text, None, false),
    ];
    padded(core, Category::WiederkehrendeBuchungen.field_count())
});

static NATURAL_STAPEL_SCHEMA: Lazy<Vec<ColumnSpec>> = Lazy::new(|| {
    let core = vec![
        ColumnSpec::new("belegnummer", "Belegnummer", 36, ColumnType::Text, None, true),
        ColumnSpec::new("datum", "Datum", 8, ColumnType::Date, Some(r"^\d{8}$"), true),
        ColumnSpec::new("betrag", "Betrag", 17, ColumnType::Decimal, Some(r"^\d{1,13}(,\d{1,2})?$"), true),
        ColumnSpec::new("waehrung", "Währung", 3, ColumnType::Text, Some(r"^[A-Z]{3}$"), false),
        ColumnSpec::new("text", "Buchungstext", 60, ColumnType::Text, None, false),
    ];
    padded(core, Category::NaturalStapel.field_count())
});
