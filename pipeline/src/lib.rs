//! Conversion of election gazette tables into relational records.
//!
//! Raw tables come from a [tabula_wrapper::TableDetector], are mapped onto
//! canonical columns by [schema], repaired row by row by [reconcile] and
//! [candidate], and are finally numbered and written out by [emit].

pub mod candidate;
pub mod config;
pub mod emit;
pub mod extract;
pub mod reconcile;
pub mod records;
pub mod schema;
pub mod stations;
pub mod table;
pub mod tabula_wrapper;
pub mod textfix;
pub mod tokens;
#[cfg(test)]
mod testutil;
