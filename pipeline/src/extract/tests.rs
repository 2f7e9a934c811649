use std::path::PathBuf;

use anyhow::{Result, anyhow};
use googletest::prelude::*;
use testutils::anyhow_downcasts_to;

use super::*;
use crate::{
    config::ExtractionConfig,
    records::{Location, PositionType},
    schema::SchemaError,
    table::Row,
    tabula_wrapper::MockTableDetector,
    testutil::*,
};

fn pdf_path() -> PathBuf {
    PathBuf::from("gazette.pdf")
}

/// Expects exactly one detection request for `settings`, answered with
/// `tables`.
fn detector_returning(settings: &ExtractionSettings, tables: Vec<Table>) -> MockTableDetector {
    let mut detector = MockTableDetector::new();
    detector
        .expect_detect_tables()
        .with(mockall::predicate::eq(DetectionRequest::new(
            &pdf_path(),
            settings,
        )))
        .times(1)
        .returning(move |_| Ok(tables.clone()));
    detector
}

#[gtest]
#[test_log::test]
fn test_extracts_stations_from_every_table_in_order() -> Result<()> {
    let settings = ExtractionConfig::default().polling_station_data;

    // GIVEN: two station tables separated by an empty one.
    let detector = detector_returning(
        &settings,
        vec![
            station_table([
                station_row("1442", "04728814420101", "612"),
                station_row("1442", "04728814420102", "598"),
            ]),
            Table::default(),
            station_table([station_row("1443", "04728814430101", "301")]),
        ],
    );

    // WHEN:
    let stations = extract_polling_stations(&detector, &pdf_path(), &settings)?;

    // THEN: rows of all tables are reconciled in detection order.
    expect_that!(
        stations,
        elements_are![
            field!(PollingStation.polling_station_code, eq("04728814420101")),
            field!(PollingStation.polling_station_code, eq("04728814420102")),
            field!(PollingStation.polling_station_code, eq("04728814430101")),
        ]
    );
    expect_that!(
        stations[2],
        eq(&PollingStation {
            county_code: "047".into(),
            county_name: "NAIROBI CITY".into(),
            constituency_code: "288".into(),
            constituency_name: "KIBRA".into(),
            ward_code: "1443".into(),
            ward_name: "SARANGOMBE".into(),
            station_name: "OLYMPIC PRI SCH".into(),
            polling_station_code: "04728814430101".into(),
            polling_station_name: "OLYMPIC PRI SCH".into(),
            registered_voters: "301".into(),
        })
    );
    Ok(())
}

#[gtest]
fn test_repairs_merged_station_cells() -> Result<()> {
    let settings = ExtractionConfig::default().polling_station_data;

    // GIVEN: a row whose station code cell also holds the station name.
    let mut row = station_row("1442", "04728814420101 OLYMPIC\nPRI SCH", "612");
    row[9] = String::new();
    let detector = detector_returning(&settings, vec![station_table([row])]);

    // WHEN:
    let stations = extract_polling_stations(&detector, &pdf_path(), &settings)?;

    // THEN:
    expect_that!(
        stations,
        elements_are![all![
            field!(PollingStation.polling_station_code, eq("04728814420101")),
            field!(PollingStation.polling_station_name, eq("OLYMPIC PRI SCH")),
        ]]
    );
    Ok(())
}

#[gtest]
fn test_station_table_with_wrong_column_count_is_fatal() {
    let settings = ExtractionConfig::default().polling_station_data;

    // GIVEN: a good table followed by one missing a column.
    let detector = detector_returning(
        &settings,
        vec![
            station_table([station_row("1442", "04728814420101", "612")]),
            Table::from([STATION_HEADER[..10].to_vec(), vec!["x"; 10]]),
        ],
    );

    // WHEN:
    let result = extract_polling_stations(&detector, &pdf_path(), &settings);

    // THEN: no stations are returned.
    expect_that!(
        result,
        err(anyhow_downcasts_to::<SchemaError, _>(eq(
            &SchemaError::ColumnCount {
                expected: 11,
                actual: 10,
            }
        )))
    );
}

#[gtest]
fn test_ragged_candidate_table_is_fatal() {
    let settings = ExtractionConfig::default().candidate_data;

    // GIVEN: a candidate table whose second row lost two cells.
    let mut short_row = ward_candidate_row("1443", "ROE", "RICHARD", "7");
    short_row.truncate(9);
    let detector = detector_returning(
        &settings,
        vec![ward_candidate_table([
            ward_candidate_row("1442", "DOE", "JANE", "2"),
            short_row,
        ])],
    );

    // WHEN:
    let result = extract_candidates(&detector, &pdf_path(), &settings, Vec::new());

    // THEN: no candidates are returned.
    expect_that!(
        result,
        err(anyhow_downcasts_to::<SchemaError, _>(eq(&SchemaError::Ragged {
            row: 2,
            expected: 11,
            actual: 9,
        })))
    );
}

#[gtest]
fn test_detector_failure_is_reported() {
    let settings = ExtractionConfig::default().polling_station_data;
    let mut detector = MockTableDetector::new();
    detector
        .expect_detect_tables()
        .returning(|_| Err(anyhow!("JVM unavailable")));

    let result = extract_polling_stations(&detector, &pdf_path(), &settings);

    expect_that!(
        result,
        err(displays_as(contains_substring(
            "detecting polling_station_data tables"
        )))
    );
}

#[gtest]
#[test_log::test]
fn test_candidates_are_bound_to_first_station_of_their_ward() -> Result<()> {
    let settings = ExtractionConfig::default().candidate_data;
    let stations = vec![
        PollingStation {
            ward_code: "1".into(),
            polling_station_code: "1001".into(),
            station_name: "Hall A".into(),
            registered_voters: "50".into(),
            ..Default::default()
        },
        PollingStation {
            ward_code: "1".into(),
            polling_station_code: "1002".into(),
            station_name: "Hall B".into(),
            registered_voters: "70".into(),
            ..Default::default()
        },
    ];

    // GIVEN: a ward level candidate table, including a spacer row with no
    // name.
    let detector = detector_returning(
        &settings,
        vec![ward_candidate_table([
            ward_candidate_row("1", "DOE", "JANE", "2"),
            ward_candidate_row("1", "", "", ""),
            ward_candidate_row("7", "ROE", "RICHARD", "2"),
        ])],
    );

    // WHEN:
    let candidates = extract_candidates(&detector, &pdf_path(), &settings, stations)?;

    // THEN:
    expect_that!(
        candidates,
        elements_are![
            all![
                field!(Candidate.name, eq("JANE DOE")),
                field!(Candidate.position_type, eq(&PositionType::CountyAssemblyMember)),
                field!(Candidate.party_abbreviation, eq("ODM")),
                field!(Candidate.voting_station, some(eq("1001"))),
            ],
            all![
                field!(Candidate.name, eq("RICHARD ROE")),
                field!(Candidate.voting_station, none()),
            ],
        ]
    );
    Ok(())
}

#[gtest]
fn test_constituency_candidates_use_constituency_stations() -> Result<()> {
    let settings = ExtractionConfig::default().candidate_data;
    let stations = vec![
        kibra_station("1442", "04728814420101", "612"),
        kibra_station("1443", "04728814430101", "301"),
    ];

    // GIVEN: a table without ward columns, so it lists members of
    // parliament.
    let detector = detector_returning(
        &settings,
        vec![Table::from([
            Row::from([
                "County Code County",
                "",
                "Const. \nCode",
                "Const. \nName",
                "Surname",
                "Other Names",
                "Symbol",
            ]),
            Row::from(["047", "NAIROBI CITY", "288", "KIBRA", "DOE", "JOHN", "lion.png"]),
        ])],
    );

    // WHEN:
    let candidates = extract_candidates(&detector, &pdf_path(), &settings, stations)?;

    // THEN:
    expect_that!(
        candidates,
        elements_are![all![
            field!(Candidate.position_type, eq(&PositionType::ParliamentMember)),
            field!(Candidate.photo, some(eq("lion.png"))),
            field!(
                Candidate.location,
                field!(Location.county_name, eq("NAIROBI CITY"))
            ),
            field!(Candidate.voting_station, some(eq("04728814420101"))),
        ]]
    );
    Ok(())
}
