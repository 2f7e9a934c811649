//! Numbering of the extracted records into a normalized relational dataset.
//!
//! Rows that fail integrity checks are dropped here rather than reported as
//! errors, and references that cannot be resolved become nulls. A dataset
//! never contains a foreign key to a row it does not also contain.


pub mod sql;

use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashMap;
use serde::Serialize;

use crate::records::{Candidate, PollingStation};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Party {
    pub id: usize,
    pub code: String,
    pub name: String,
    pub abbreviation: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct County {
    pub code: u64,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Constituency {
    pub code: u64,
    pub county_code: Option<u64>,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Ward {
    pub code: u64,
    pub constituency_code: Option<u64>,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Station {
    pub id: usize,
    pub ward_code: u64,
    pub polling_station_code: u64,
    pub name: String,
    pub registered_voters: u64,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CandidateRow {
    pub id: usize,
    pub name: String,
    pub gender: String,
    pub photo: Option<String>,
    pub position: String,
    pub party_id: Option<usize>,
    pub station_id: Option<usize>,
}

/// The relational form of one extraction. Each collection is in emission
/// order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct NormalizedDataset {
    pub positions: Vec<String>,
    pub parties: Vec<Party>,
    pub counties: Vec<County>,
    pub constituencies: Vec<Constituency>,
    pub wards: Vec<Ward>,
    pub stations: Vec<Station>,
    pub candidates: Vec<CandidateRow>,
}

impl NormalizedDataset {
    /// Builds the dataset from reconciled stations and candidates.
    ///
    /// Output order depends only on the input, so repeated runs over the same
    /// gazette produce identical output.
    pub fn build(stations: &[PollingStation], candidates: &[Candidate]) -> Self {
        let (emitted_stations, station_ids) = number_stations(stations);
        let parties = collect_parties(candidates);
        let candidates = number_candidates(candidates, &parties, &station_ids);

        let counties = collect_counties(stations);
        let constituencies = collect_constituencies(stations, &counties);
        let wards = collect_wards(stations, &constituencies);

        let dataset = Self {
            positions: collect_positions(&candidates),
            parties,
            counties,
            constituencies,
            wards,
            stations: emitted_stations,
            candidates,
        };

        log::info!(
            "Normalized {} of {} polling stations, {} candidates, {} parties, {} counties, {} constituencies and {} wards.",
            dataset.stations.len(),
            stations.len(),
            dataset.candidates.len(),
            dataset.parties.len(),
            dataset.counties.len(),
            dataset.constituencies.len(),
            dataset.wards.len(),
        );

        dataset
    }
}

/// Parses a code or count that must be a plain non-negative integer.
pub fn parse_code(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Checks a station's integrity, returning it without an id if it may be
/// emitted.
fn valid_station(station: &PollingStation) -> Option<Station> {
    let name = station.display_name();
    if name.is_empty() {
        return None;
    }
    Some(Station {
        id: 0,
        ward_code: parse_code(&station.ward_code)?,
        polling_station_code: parse_code(&station.polling_station_code)?,
        name: name.to_string(),
        registered_voters: parse_code(&station.registered_voters)?,
    })
}

/// Assigns ids 1..N to the valid stations in input order. Returns the
/// stations and the id of each polling station code.
fn number_stations(stations: &[PollingStation]) -> (Vec<Station>, HashMap<u64, usize>) {
    let mut emitted: Vec<Station> = Vec::new();
    let mut ids: HashMap<u64, usize> = HashMap::new();
    let mut rejected = 0usize;

    for station in stations {
        let Some(mut row) = valid_station(station) else {
            log::debug!("Dropped invalid polling station {station:?}.");
            rejected += 1;
            continue;
        };
        if ids.contains_key(&row.polling_station_code) {
            log::debug!(
                "Dropped duplicate polling station code {}.",
                row.polling_station_code
            );
            rejected += 1;
            continue;
        }
        row.id = emitted.len() + 1;
        ids.insert(row.polling_station_code, row.id);
        emitted.push(row);
    }

    if rejected > 0 {
        log::info!("Dropped {rejected} polling stations that failed integrity checks.");
    }
    (emitted, ids)
}

/// Parties keyed by code, numbered 1..N in code order. The first name and
/// abbreviation seen for a code are kept.
fn collect_parties(candidates: &[Candidate]) -> Vec<Party> {
    let mut by_code: BTreeMap<&str, &Candidate> = BTreeMap::new();
    for candidate in candidates {
        if candidate.party_code.is_empty() || candidate.party_name.is_empty() {
            continue;
        }
        by_code
            .entry(candidate.party_code.as_str())
            .or_insert(candidate);
    }

    by_code
        .into_iter()
        .enumerate()
        .map(|(i, (code, candidate))| Party {
            id: i + 1,
            code: code.to_string(),
            name: candidate.party_name.clone(),
            abbreviation: candidate.party_abbreviation.clone(),
        })
        .collect()
}

fn number_candidates(
    candidates: &[Candidate],
    parties: &[Party],
    station_ids: &HashMap<u64, usize>,
) -> Vec<CandidateRow> {
    let party_ids: HashMap<&str, usize> = parties
        .iter()
        .map(|party| (party.code.as_str(), party.id))
        .collect();

    let mut unbound = 0usize;
    let rows: Vec<CandidateRow> = candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let station_id = candidate
                .voting_station
                .as_deref()
                .and_then(parse_code)
                .and_then(|code| station_ids.get(&code).copied());
            if station_id.is_none() {
                log::debug!(
                    "Candidate {:?} has no emitted polling station (bound to {:?}).",
                    candidate.name,
                    candidate.voting_station,
                );
                unbound += 1;
            }

            CandidateRow {
                id: i + 1,
                name: candidate.name.clone(),
                gender: candidate.gender.clone(),
                photo: candidate.photo.clone().filter(|photo| !photo.is_empty()),
                position: candidate.position_type.to_string(),
                party_id: party_ids.get(candidate.party_code.as_str()).copied(),
                station_id,
            }
        })
        .collect();

    if unbound > 0 {
        log::info!("{unbound} candidates have no polling station.");
    }
    rows
}

fn collect_positions(candidates: &[CandidateRow]) -> Vec<String> {
    candidates
        .iter()
        .map(|candidate| candidate.position.as_str())
        .filter(|position| !position.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// An administrative unit as collected from station rows.
struct UnitEntry<'a> {
    parent: Option<u64>,
    name: &'a str,
}

/// Collects one row per unit code from every station row whose `code` field
/// is an integer. The first integer parent code and the first non-empty name
/// seen for a code are kept.
fn collect_units<'a>(
    stations: &'a [PollingStation],
    code: fn(&PollingStation) -> &str,
    parent: fn(&PollingStation) -> &str,
    name: fn(&PollingStation) -> &str,
) -> BTreeMap<u64, UnitEntry<'a>> {
    let mut by_code: BTreeMap<u64, UnitEntry<'a>> = BTreeMap::new();
    for station in stations {
        let Some(unit_code) = parse_code(code(station)) else {
            continue;
        };
        let parent_code = parse_code(parent(station));
        let unit_name = name(station);
        let entry = by_code.entry(unit_code).or_insert(UnitEntry {
            parent: parent_code,
            name: unit_name,
        });
        match (entry.parent, parent_code) {
            (None, Some(_)) => entry.parent = parent_code,
            (Some(kept), Some(other)) if kept != other => {
                log::debug!("Unit {unit_code} has parents {kept} and {other}, keeping {kept}.");
            }
            _ => {}
        }
        if entry.name.is_empty() {
            entry.name = unit_name;
        }
    }
    by_code
}

fn collect_counties(stations: &[PollingStation]) -> Vec<County> {
    collect_units(stations, |s| s.county_code.as_str(), |_| "", |s| s.county_name.as_str())
        .into_iter()
        .map(|(code, unit)| County {
            code,
            name: unit.name.to_string(),
        })
        .collect()
}

/// Constituencies whose county is not collected get a null county code.
fn collect_constituencies(
    stations: &[PollingStation],
    counties: &[County],
) -> Vec<Constituency> {
    collect_units(
        stations,
        |s| s.constituency_code.as_str(),
        |s| s.county_code.as_str(),
        |s| s.constituency_name.as_str(),
    )
    .into_iter()
    .map(|(code, unit)| Constituency {
        code,
        county_code: unit
            .parent
            .filter(|parent| counties.iter().any(|county| county.code == *parent)),
        name: unit.name.to_string(),
    })
    .collect()
}

/// Wards whose constituency is not collected get a null constituency code.
fn collect_wards(stations: &[PollingStation], constituencies: &[Constituency]) -> Vec<Ward> {
    collect_units(
        stations,
        |s| s.ward_code.as_str(),
        |s| s.constituency_code.as_str(),
        |s| s.ward_name.as_str(),
    )
    .into_iter()
    .map(|(code, unit)| Ward {
        code,
        constituency_code: unit.parent.filter(|parent| {
            constituencies
                .iter()
                .any(|constituency| constituency.code == *parent)
        }),
        name: unit.name.to_string(),
    })
    .collect()
}
