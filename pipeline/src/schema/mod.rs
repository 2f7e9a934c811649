//! Maps raw table headers onto canonical field names.
//!
//! Header text differs between revisions of the gazette even for the same
//! logical column, so every known variant is listed in [HEADER_ALIASES].


use hashbrown::HashMap;

use crate::{
    config::ExtractionType,
    records::PositionType,
    table::{Row, Table},
    textfix::clean_text,
};

/// Canonical field names.
pub mod fields {
    pub const COUNTY_CODE: &str = "county_code";
    pub const COUNTY_NAME: &str = "county_name";
    pub const CONSTITUENCY_CODE: &str = "constituency_code";
    pub const CONSTITUENCY_NAME: &str = "constituency_name";
    pub const WARD_CODE: &str = "ward_code";
    pub const WARD_NAME: &str = "ward_name";
    pub const REG_CENTRE_CODE: &str = "reg_centre_code";
    pub const STATION_NAME: &str = "station_name";
    pub const POLLING_STATION_CODE: &str = "polling_station_code";
    pub const POLLING_STATION_NAME: &str = "polling_station_name";
    pub const REGISTERED_VOTERS: &str = "registered_voters";
    pub const SURNAME: &str = "surname";
    pub const OTHER_NAMES: &str = "other_names";
    pub const SYMBOL: &str = "symbol";
    pub const PARTY_CODE: &str = "party_code";
    pub const PARTY_NAME: &str = "party_name";
    pub const PARTY_ABBREVIATION: &str = "party_abbreviation";
}

/// Column count of every polling station table.
pub const POLLING_STATION_COLUMN_COUNT: usize = 11;

/// Known header texts (after whitespace normalisation, compared without
/// regard to case) and the canonical field each denotes. The first matching
/// entry wins.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("County Code", fields::COUNTY_CODE),
    ("County Name", fields::COUNTY_NAME),
    ("County Names", fields::COUNTY_NAME),
    ("County", fields::COUNTY_NAME),
    ("Const. Code", fields::CONSTITUENCY_CODE),
    ("Const . Code", fields::CONSTITUENCY_CODE),
    ("Const Code", fields::CONSTITUENCY_CODE),
    ("Constituency Code", fields::CONSTITUENCY_CODE),
    ("Const. Name", fields::CONSTITUENCY_NAME),
    ("Const Name", fields::CONSTITUENCY_NAME),
    ("Constituency Name", fields::CONSTITUENCY_NAME),
    ("CAW Code", fields::WARD_CODE),
    ("CAW Name", fields::WARD_NAME),
    ("CAW", fields::WARD_NAME),
    ("Reg. Centre Code", fields::REG_CENTRE_CODE),
    ("Registration Centre Name", fields::STATION_NAME),
    ("Reg. Centre Name", fields::STATION_NAME),
    ("Polling Station Code", fields::POLLING_STATION_CODE),
    ("Polling Station Name", fields::POLLING_STATION_NAME),
    ("Reg. Voters", fields::REGISTERED_VOTERS),
    ("Surname", fields::SURNAME),
    ("Other Names", fields::OTHER_NAMES),
    ("Symbol", fields::SYMBOL),
    ("Party Code", fields::PARTY_CODE),
    ("Party Name", fields::PARTY_NAME),
    ("Party Abrv", fields::PARTY_ABBREVIATION),
    ("Party Abrv.", fields::PARTY_ABBREVIATION),
    ("Party Abrr.", fields::PARTY_ABBREVIATION),
];

/// Header produced when the detector merges the county code and county name
/// headers into the first of the two columns, leaving the second blank.
const MERGED_COUNTY_HEADER: &str = "County Code County";

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("table has no header row")]
    MissingHeader,
    #[error("table is not a grid: row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("unexpected column count ({actual}), expected {expected} columns")]
    ColumnCount { expected: usize, actual: usize },
}

/// A table whose header row has been replaced by canonical column names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl CanonicalTable {
    /// Promotes the header row of `raw` to column names and maps them onto
    /// canonical field names.
    ///
    /// Polling station tables must have exactly
    /// [POLLING_STATION_COLUMN_COUNT] columns. Candidate tables are mapped
    /// best-effort, and unrecognised headers are kept as-is.
    pub fn normalize(raw: Table, extraction_type: ExtractionType) -> Result<Self, SchemaError> {
        let mut rows = raw.0.into_iter();
        let header = rows.next().ok_or(SchemaError::MissingHeader)?;

        let rows: Vec<Row> = rows.collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(SchemaError::Ragged {
                    row: i + 1,
                    expected: header.len(),
                    actual: row.len(),
                });
            }
        }

        if extraction_type == ExtractionType::PollingStationData
            && header.len() != POLLING_STATION_COLUMN_COUNT
        {
            return Err(SchemaError::ColumnCount {
                expected: POLLING_STATION_COLUMN_COUNT,
                actual: header.len(),
            });
        }

        Ok(Self {
            columns: canonical_columns(header),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows keyed by column name. Where two columns share a name, the
    /// leftmost wins.
    pub fn records(&self) -> impl Iterator<Item = RawRecord> + '_ {
        self.rows.iter().map(|row| {
            let mut record = RawRecord::default();
            for (column, cell) in self.columns.iter().zip(row.iter()) {
                record.0.entry_ref(column.as_str()).or_insert_with(|| cell.clone());
            }
            record
        })
    }

    /// Administrative level of the candidates listed in this table.
    pub fn position_level(&self) -> PositionType {
        infer_position_level(&self.columns)
    }
}

/// A single data row, keyed by column name. Cells the detector left out are
/// simply absent.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawRecord(pub HashMap<String, String>);

impl RawRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: &str, value: String) {
        self.0.insert(field.to_string(), value);
    }

    /// Whether `field` is absent, empty, or the literal placeholder `nan`.
    pub fn is_missing(&self, field: &str) -> bool {
        match self.get(field) {
            None => true,
            Some(value) => value.is_empty() || value.eq_ignore_ascii_case("nan"),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Normalises header text and renames known headers to canonical names.
fn canonical_columns(header: Row) -> Vec<String> {
    let mut columns: Vec<String> = header
        .0
        .into_iter()
        .map(|mut text| {
            clean_text(&mut text);
            text
        })
        .collect();

    if columns.iter().any(|c| c == MERGED_COUNTY_HEADER) {
        for column in columns.iter_mut() {
            if column == MERGED_COUNTY_HEADER {
                *column = "County Code".to_string();
            } else if column.is_empty() {
                *column = "County".to_string();
            }
        }
    }

    columns
        .into_iter()
        .map(|column| match canonical_name(&column) {
            Some(name) => name.to_string(),
            None => column,
        })
        .collect()
}

/// Looks up the canonical field name for normalised header text.
pub fn canonical_name(header: &str) -> Option<&'static str> {
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(header))
        .map(|&(_, name)| name)
}

/// Infers which office a candidate table lists from its columns. The finest
/// administrative level mentioned wins: ward, then constituency, then county.
pub fn infer_position_level<S: AsRef<str>>(columns: &[S]) -> PositionType {
    let mentions = |word: &str| {
        columns
            .iter()
            .any(|c| c.as_ref().to_lowercase().contains(word))
    };

    if mentions("ward") {
        PositionType::CountyAssemblyMember
    } else if mentions("constituency") {
        PositionType::ParliamentMember
    } else if mentions("county") {
        PositionType::Senator
    } else {
        PositionType::Unknown
    }
}
