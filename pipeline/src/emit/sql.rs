//! Rendering of a [NormalizedDataset] as SQL `INSERT` statements.

use std::fmt::{self, Display, Write};

use super::NormalizedDataset;

/// A literal value in an `INSERT` tuple.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SqlValue<'a> {
    Int(u64),
    Text(&'a str),
    Null,
}

impl From<u64> for SqlValue<'_> {
    fn from(value: u64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<usize> for SqlValue<'_> {
    fn from(value: usize) -> Self {
        SqlValue::Int(value as u64)
    }
}

impl<'a> From<&'a str> for SqlValue<'a> {
    fn from(value: &'a str) -> Self {
        SqlValue::Text(value)
    }
}

impl<'a, T> From<Option<T>> for SqlValue<'a>
where
    T: Into<SqlValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

impl Display for SqlValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(value) => write!(f, "{value}"),
            SqlValue::Text(text) => write!(f, "\"{}\"", escape_text(text)),
            SqlValue::Null => f.write_str("NULL"),
        }
    }
}

/// Escapes text for a double-quoted SQL string literal.
pub fn escape_text(text: &str) -> String {
    text.replace('"', "\"\"").replace('\n', " ").trim().to_string()
}

struct Tuple<'v, 'a>(&'v [SqlValue<'a>]);

impl Display for Tuple<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        let mut iterator = self.0.iter().peekable();
        while let Some(value) = iterator.next() {
            write!(f, "{value}")?;
            if iterator.peek().is_some() {
                f.write_str(", ")?;
            }
        }
        f.write_str(")")
    }
}

/// Writes one `INSERT` statement for `rows` into `out`. Nothing is written
/// for an empty table.
fn write_insert(out: &mut String, table: &str, rows: &[Vec<SqlValue<'_>>]) -> fmt::Result {
    if rows.is_empty() {
        log::debug!("Table {table} has no rows.");
        return Ok(());
    }
    if !out.is_empty() {
        out.push('\n');
    }
    writeln!(out, "INSERT INTO {table} VALUES")?;
    for (i, row) in rows.iter().enumerate() {
        let terminator = if i + 1 == rows.len() { ";" } else { "," };
        writeln!(out, "{}{terminator}", Tuple(row))?;
    }
    Ok(())
}

/// Renders every table of `dataset`, parents before children.
pub fn render(dataset: &NormalizedDataset) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let positions: Vec<Vec<SqlValue>> = dataset
        .positions
        .iter()
        .map(|name| vec![name.as_str().into()])
        .collect();
    write_insert(&mut out, "positions", &positions)?;

    let parties: Vec<Vec<SqlValue>> = dataset
        .parties
        .iter()
        .map(|party| {
            vec![
                party.id.into(),
                party.name.as_str().into(),
                party.abbreviation.as_str().into(),
            ]
        })
        .collect();
    write_insert(&mut out, "parties", &parties)?;

    let counties: Vec<Vec<SqlValue>> = dataset
        .counties
        .iter()
        .map(|county| vec![county.code.into(), county.name.as_str().into()])
        .collect();
    write_insert(&mut out, "counties", &counties)?;

    let constituencies: Vec<Vec<SqlValue>> = dataset
        .constituencies
        .iter()
        .map(|c| vec![c.code.into(), c.county_code.into(), c.name.as_str().into()])
        .collect();
    write_insert(&mut out, "constituencies", &constituencies)?;

    let wards: Vec<Vec<SqlValue>> = dataset
        .wards
        .iter()
        .map(|w| vec![w.code.into(), w.constituency_code.into(), w.name.as_str().into()])
        .collect();
    write_insert(&mut out, "wards", &wards)?;

    let stations: Vec<Vec<SqlValue>> = dataset
        .stations
        .iter()
        .map(|s| {
            vec![
                s.id.into(),
                s.ward_code.into(),
                s.polling_station_code.into(),
                s.name.as_str().into(),
                s.registered_voters.into(),
            ]
        })
        .collect();
    write_insert(&mut out, "stations", &stations)?;

    let candidates: Vec<Vec<SqlValue>> = dataset
        .candidates
        .iter()
        .map(|c| {
            vec![
                c.id.into(),
                c.name.as_str().into(),
                c.gender.as_str().into(),
                c.photo.as_deref().into(),
                c.position.as_str().into(),
                c.party_id.into(),
                c.station_id.into(),
            ]
        })
        .collect();
    write_insert(&mut out, "candidates", &candidates)?;

    Ok(out)
}
