//! Runs one extraction over a gazette PDF: detects its tables and turns them
//! into canonical records.

#[cfg(test)]
mod tests;

use std::path::Path;

use anyhow::{Context, Result};

use crate::{
    candidate::{bind_station, build_candidate},
    config::{ExtractionSettings, ExtractionType},
    reconcile::reconcile,
    records::{Candidate, PollingStation},
    schema::CanonicalTable,
    stations::StationIndex,
    table::Table,
    tabula_wrapper::{DetectionRequest, TableDetector},
};

/// Extracts and reconciles every polling station row on the configured
/// pages.
///
/// Fails if any detected table does not have the polling station layout, in
/// which case no stations are returned.
pub fn extract_polling_stations(
    detector: &dyn TableDetector,
    pdf_path: &Path,
    settings: &ExtractionSettings,
) -> Result<Vec<PollingStation>> {
    let tables = detect_canonical_tables(
        detector,
        pdf_path,
        settings,
        ExtractionType::PollingStationData,
    )?;

    let stations: Vec<PollingStation> = tables
        .iter()
        .flat_map(CanonicalTable::records)
        .map(|record| reconcile(&record))
        .collect();

    log::info!(
        "Extracted {} polling station rows from {} tables.",
        stations.len(),
        tables.len()
    );
    Ok(stations)
}

/// Extracts candidates on the configured pages, binding each to a polling
/// station from `stations`.
pub fn extract_candidates(
    detector: &dyn TableDetector,
    pdf_path: &Path,
    settings: &ExtractionSettings,
    stations: Vec<PollingStation>,
) -> Result<Vec<Candidate>> {
    let index = StationIndex::build(stations);
    let tables =
        detect_canonical_tables(detector, pdf_path, settings, ExtractionType::CandidateData)?;

    let mut candidates = Vec::new();
    let mut rejected = 0usize;
    for (table_idx, table) in tables.iter().enumerate() {
        let position_type = table.position_level();
        log::debug!("Candidate table {table_idx} lists {position_type} candidates.");

        for record in table.records() {
            match build_candidate(&record, position_type) {
                Some(mut candidate) => {
                    bind_station(&mut candidate, &index);
                    candidates.push(candidate);
                }
                None => {
                    log::debug!("Dropped candidate row without a name: {record:?}.");
                    rejected += 1;
                }
            }
        }
    }

    let unbound = candidates
        .iter()
        .filter(|c| c.voting_station.is_none())
        .count();
    log::info!(
        "Extracted {} candidates from {} tables ({} rows dropped, {} without a polling station).",
        candidates.len(),
        tables.len(),
        rejected,
        unbound,
    );
    Ok(candidates)
}

fn detect_canonical_tables(
    detector: &dyn TableDetector,
    pdf_path: &Path,
    settings: &ExtractionSettings,
    extraction_type: ExtractionType,
) -> Result<Vec<CanonicalTable>> {
    let request = DetectionRequest::new(pdf_path, settings);
    let raw_tables = detector
        .detect_tables(&request)
        .with_context(|| format!("detecting {extraction_type} tables in {pdf_path:?}"))?;

    raw_tables
        .into_iter()
        .enumerate()
        .filter(|(table_idx, table)| keep_table(*table_idx, table))
        .map(|(table_idx, table)| {
            CanonicalTable::normalize(table, extraction_type).with_context(|| {
                format!("normalizing {extraction_type} table {table_idx} of pages {}", settings.pages)
            })
        })
        .collect()
}

fn keep_table(table_idx: usize, table: &Table) -> bool {
    if table.is_empty() {
        log::warn!("Skipping empty table {table_idx}.");
        false
    } else {
        true
    }
}
