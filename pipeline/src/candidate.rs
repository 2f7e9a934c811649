//! Building [Candidate] records from candidate table rows.

use crate::{
    reconcile::{CANDIDATE_REPAIR_RULES, apply_rules, code_text, name_text},
    records::{Candidate, Location, PositionType, UNKNOWN_GENDER},
    schema::{RawRecord, fields},
    stations::StationIndex,
    textfix::fix_inline_spaces,
};

/// Builds a candidate from one row of a candidate table listing candidates
/// for `position_type`.
///
/// Returns `None` for rows without a candidate name, which are continuation
/// or spacer rows left by the table detector. `voting_station` is left
/// unset; see [bind_station].
pub fn build_candidate(record: &RawRecord, position_type: PositionType) -> Option<Candidate> {
    let mut record = record.clone();
    apply_rules(&CANDIDATE_REPAIR_RULES, &mut record);

    let name = [
        name_text(&record, fields::OTHER_NAMES),
        name_text(&record, fields::SURNAME),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");
    if name.is_empty() {
        return None;
    }

    let photo = Some(name_text(&record, fields::SYMBOL)).filter(|s| !s.is_empty());
    let fixed = |field: &str| fix_inline_spaces(&name_text(&record, field));

    Some(Candidate {
        name,
        gender: UNKNOWN_GENDER.to_string(),
        photo,
        position_type,
        party_name: fixed(fields::PARTY_NAME),
        party_abbreviation: fixed(fields::PARTY_ABBREVIATION),
        party_code: fixed(fields::PARTY_CODE),
        location: Location {
            county_code: code_text(&record, fields::COUNTY_CODE),
            county_name: fixed(fields::COUNTY_NAME),
            constituency_code: code_text(&record, fields::CONSTITUENCY_CODE),
            constituency_name: fixed(fields::CONSTITUENCY_NAME),
            ward_code: code_text(&record, fields::WARD_CODE),
            ward_name: fixed(fields::WARD_NAME),
        },
        voting_station: None,
    })
}

/// Sets `voting_station` to the code of the station the index selects for
/// the candidate, or clears it when none matches.
pub fn bind_station(candidate: &mut Candidate, index: &StationIndex) {
    candidate.voting_station = index
        .resolve(&candidate.location, candidate.position_type)
        .map(|station| station.polling_station_code.clone());

    if candidate.voting_station.is_none() {
        log::debug!(
            "No polling station found for {:?} ({}) at {:?}.",
            candidate.name,
            candidate.position_type,
            candidate.location,
        );
    }
}
