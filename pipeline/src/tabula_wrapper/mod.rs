//! The table detector: the external step turning PDF pages into raw grids.

pub mod singlethreaded;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::{
    config::{ExtractionSettings, PageRange, pdf::TabulaExtractionMethod},
    table::{Row, Table},
};

/// Detects the tables within a range of pages of a PDF file.
#[cfg_attr(test, mockall::automock)]
pub trait TableDetector {
    /// Returns one raw [Table] per detected table, in page order. No
    /// normalisation of rows or columns is performed.
    fn detect_tables(&self, request: &DetectionRequest) -> Result<Vec<Table>>;
}

/// Single request to a [TableDetector].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetectionRequest {
    pub pdf_path: PathBuf,
    pub pages: PageRange,
    pub method: TabulaExtractionMethod,
    pub password: Option<String>,
}

impl DetectionRequest {
    pub fn new(pdf_path: &Path, settings: &ExtractionSettings) -> Self {
        Self {
            pdf_path: pdf_path.to_owned(),
            pages: settings.pages.clone(),
            method: settings.method,
            password: settings.password.clone(),
        }
    }
}

/// A sequence of extracted tables from a PDF file, as output by Tabula.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct JsonTableSet(pub Vec<JsonTable>);

/// A single extracted table from a PDF file.
#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct JsonTable {
    pub extraction_method: String,
    pub page_number: i32,
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub right: f32,
    pub bottom: f32,
    pub data: Vec<JsonRow>,
}

/// A single extracted table row from a PDF file.
#[derive(Deserialize, Debug)]
pub struct JsonRow(pub Vec<JsonCell>);

/// A single extracted table cell from a PDF file.
#[allow(dead_code)]
#[derive(Deserialize, Debug)]
pub struct JsonCell {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub text: String,
}

impl From<JsonTable> for Table {
    fn from(value: JsonTable) -> Self {
        Table(value.data.into_iter().map(Into::into).collect())
    }
}

impl From<JsonRow> for Row {
    fn from(value: JsonRow) -> Self {
        Row(value.0.into_iter().map(|cell| cell.text).collect())
    }
}
