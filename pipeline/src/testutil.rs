//! Gazette-shaped fixtures shared by tests in this crate.

use crate::{
    records::{Candidate, Location, PollingStation, PositionType},
    table::{Row, Table},
};

/// Header row as it appears in the polling station pages of the gazette.
pub const STATION_HEADER: [&str; 11] = [
    "County \nCode",
    "County \nName",
    "Const\n. \nCode",
    "Const.  \nName",
    "CAW \nCode",
    "CAW Name",
    "Reg. \nCentre \nCode",
    "Registration \nCentre Name",
    "Polling Station \nCode",
    "Polling Station Name",
    "Reg. \nVoters",
];

/// Header row of the ward level candidate pages.
pub const WARD_CANDIDATE_HEADER: [&str; 11] = [
    "County \nCode",
    "County \nName",
    "Const. \nCode",
    "Const. \nName",
    "CAW \nCode",
    "CAW Name",
    "Surname",
    "Other \nNames",
    "Party \nCode",
    "Party Name",
    "Party \nAbrv",
];

/// A polling station table row with the given ward, station code and
/// registered voters.
pub fn station_row(ward_code: &str, station_code: &str, voters: &str) -> Row {
    Row::from([
        "047",
        "NAIROBI CITY",
        "288",
        "KIBRA",
        ward_code,
        "SARANGOMBE",
        "001",
        "OLYMPIC PRI SCH",
        station_code,
        "OLYMPIC PRI SCH",
        voters,
    ])
}

pub fn station_table(rows: impl IntoIterator<Item = Row>) -> Table {
    let mut table = Table::from([STATION_HEADER]);
    table.extend(rows);
    table
}

/// A ward level candidate table row.
pub fn ward_candidate_row(ward_code: &str, surname: &str, other_names: &str, party_code: &str) -> Row {
    Row::from([
        "047",
        "NAIROBI CITY",
        "288",
        "KIBRA",
        ward_code,
        "SARANGOMBE",
        surname,
        other_names,
        party_code,
        "ORANGE DEMOCRATIC MOVEMENT",
        "ODM",
    ])
}

pub fn ward_candidate_table(rows: impl IntoIterator<Item = Row>) -> Table {
    let mut table = Table::from([WARD_CANDIDATE_HEADER]);
    table.extend(rows);
    table
}

/// A reconciled polling station in Kibra, Nairobi.
pub fn kibra_station(ward_code: &str, station_code: &str, voters: &str) -> PollingStation {
    PollingStation {
        county_code: "047".into(),
        county_name: "NAIROBI CITY".into(),
        constituency_code: "288".into(),
        constituency_name: "KIBRA".into(),
        ward_code: ward_code.into(),
        ward_name: format!("WARD {ward_code}"),
        station_name: "OLYMPIC PRI SCH".into(),
        polling_station_code: station_code.into(),
        polling_station_name: format!("STATION {station_code}"),
        registered_voters: voters.into(),
    }
}

/// A ward level candidate bound to `voting_station`.
pub fn ward_candidate(name: &str, ward_code: &str, voting_station: Option<&str>) -> Candidate {
    Candidate {
        name: name.into(),
        gender: "unknown".into(),
        photo: None,
        position_type: PositionType::CountyAssemblyMember,
        party_name: "ORANGE DEMOCRATIC MOVEMENT".into(),
        party_abbreviation: "ODM".into(),
        party_code: "2".into(),
        location: Location {
            county_code: "047".into(),
            county_name: "NAIROBI CITY".into(),
            constituency_code: "288".into(),
            constituency_name: "KIBRA".into(),
            ward_code: ward_code.into(),
            ward_name: format!("WARD {ward_code}"),
        },
        voting_station: voting_station.map(str::to_string),
    }
}
