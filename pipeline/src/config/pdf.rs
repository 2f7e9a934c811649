use serde::{Deserialize, Serialize};

/// Extraction algorithm for Tabula to use.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabulaExtractionMethod {
    Guess,
    /// Gazette tables are ruled, so lattice detection is the default.
    #[default]
    Lattice,
    Stream,
}

impl TabulaExtractionMethod {
    pub fn to_tabula_extraction_method(self) -> tabula::ExtractionMethod {
        match self {
            TabulaExtractionMethod::Stream => tabula::ExtractionMethod::Basic,
            TabulaExtractionMethod::Guess => tabula::ExtractionMethod::Decide,
            TabulaExtractionMethod::Lattice => tabula::ExtractionMethod::Spreadsheet,
        }
    }
}
