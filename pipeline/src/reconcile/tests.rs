use googletest::prelude::*;
use map_macro::hashbrown::hash_map;

use super::*;

fn record(cells: &[(&str, &str)]) -> RawRecord {
    cells.iter().copied().collect()
}

fn complete_row() -> RawRecord {
    record(&[
        (fields::COUNTY_CODE, "047"),
        (fields::COUNTY_NAME, "NAIROBI CITY"),
        (fields::CONSTITUENCY_CODE, "288"),
        (fields::CONSTITUENCY_NAME, "KIBRA"),
        (fields::WARD_CODE, "1442"),
        (fields::WARD_NAME, "SARANGOMBE"),
        (fields::REG_CENTRE_CODE, "001"),
        (fields::STATION_NAME, "OLYMPIC PRI SCH"),
        (fields::POLLING_STATION_CODE, "04728814420101"),
        (fields::POLLING_STATION_NAME, "OLYMPIC PRI SCH"),
        (fields::REGISTERED_VOTERS, "612"),
    ])
}

fn complete_station() -> PollingStation {
    PollingStation {
        county_code: "047".into(),
        county_name: "NAIROBI CITY".into(),
        constituency_code: "288".into(),
        constituency_name: "KIBRA".into(),
        ward_code: "1442".into(),
        ward_name: "SARANGOMBE".into(),
        station_name: "OLYMPIC PRI SCH".into(),
        polling_station_code: "04728814420101".into(),
        polling_station_name: "OLYMPIC PRI SCH".into(),
        registered_voters: "612".into(),
    }
}

#[gtest]
fn test_rule_order_is_fixed() {
    let targets: Vec<&str> = STATION_REPAIR_RULES.iter().map(|r| r.target).collect();
    expect_that!(
        targets,
        elements_are![
            eq(&fields::POLLING_STATION_NAME),
            eq(&fields::POLLING_STATION_CODE),
            eq(&fields::CONSTITUENCY_CODE),
            eq(&fields::CONSTITUENCY_NAME),
            eq(&fields::REGISTERED_VOTERS),
            eq(&fields::WARD_CODE),
            eq(&fields::WARD_NAME),
        ]
    );
}

#[gtest]
fn test_complete_row_is_unchanged() {
    expect_that!(reconcile(&complete_row()), eq(&complete_station()));
}

#[gtest]
fn test_is_deterministic() {
    let mut row = complete_row();
    row.set(fields::POLLING_STATION_NAME, String::new());
    row.set(fields::POLLING_STATION_CODE, "04728814420101 OLYMPIC\nPRI SCH".into());

    let first = reconcile(&row);
    let second = reconcile(&row);
    expect_that!(first, eq(&second));
    expect_that!(
        serde_json::to_string(&first).ok(),
        eq(&serde_json::to_string(&second).ok())
    );
}

#[gtest]
fn test_station_name_from_station_code() {
    let mut row = complete_row();
    row.set(fields::POLLING_STATION_NAME, "nan".into());
    row.set(fields::POLLING_STATION_CODE, "04728814420101 OLYMPIC PRI SCH".into());

    let station = reconcile(&row);
    expect_that!(station.polling_station_code, eq("04728814420101"));
    expect_that!(station.polling_station_name, eq("OLYMPIC PRI SCH"));
}

#[gtest]
fn test_station_code_from_centre_name_wins_over_station_name() {
    let mut row = complete_row();
    row.0.remove(fields::POLLING_STATION_CODE);
    row.set(fields::POLLING_STATION_NAME, "11 OLYMPIC PRI SCH".into());
    row.set(fields::STATION_NAME, "OLYMPIC PRI SCH 22".into());

    let station = reconcile(&row);
    expect_that!(station.polling_station_code, eq("22"));
    expect_that!(station.polling_station_name, eq("OLYMPIC PRI SCH"));
    expect_that!(station.station_name, eq("OLYMPIC PRI SCH"));
}

#[gtest]
fn test_registered_voters_follow_recovered_station_code() {
    // Rule 2 takes the first number, leaving the voter count for rule 5.
    let mut row = complete_row();
    row.set(fields::POLLING_STATION_CODE, "".into());
    row.set(fields::REGISTERED_VOTERS, "".into());
    row.set(fields::STATION_NAME, "".into());
    row.set(fields::POLLING_STATION_NAME, "04728814420101 OLYMPIC PRI SCH 612".into());

    let station = reconcile(&row);
    expect_that!(station.polling_station_code, eq("04728814420101"));
    expect_that!(station.registered_voters, eq("612"));
    expect_that!(station.polling_station_name, eq("OLYMPIC PRI SCH"));
}

#[gtest]
fn test_constituency_code_from_county_name() {
    let mut row = complete_row();
    row.set(fields::CONSTITUENCY_CODE, "NaN".into());
    row.set(fields::COUNTY_NAME, "NAIROBI CITY 288".into());

    let station = reconcile(&row);
    expect_that!(station.constituency_code, eq("288"));
    expect_that!(station.county_name, eq("NAIROBI CITY"));
}

#[gtest]
fn test_constituency_and_ward_names_from_ward_code() {
    // Rule 4 leaves only the code in ward_code, so rule 7 finds no name.
    let mut row = complete_row();
    row.0.remove(fields::CONSTITUENCY_NAME);
    row.0.remove(fields::WARD_NAME);
    row.set(fields::WARD_CODE, "KIBRA 1442".into());

    let station = reconcile(&row);
    expect_that!(station.ward_code, eq("1442"));
    expect_that!(station.constituency_name, eq("KIBRA"));
    expect_that!(station.ward_name, eq(""));
}

#[gtest]
fn test_ward_code_from_ward_name_after_constituency_name() {
    let mut row = complete_row();
    row.set(fields::WARD_CODE, "".into());
    row.set(fields::CONSTITUENCY_NAME, "KIBRA 1442".into());
    row.set(fields::WARD_NAME, "1443 LAINI SABA".into());

    let station = reconcile(&row);
    expect_that!(station.ward_code, eq("1443"));
    expect_that!(station.constituency_name, eq("KIBRA"));
    expect_that!(station.ward_name, eq("LAINI SABA"));
}

#[gtest]
fn test_ward_name_from_ward_code() {
    let mut row = complete_row();
    row.set(fields::WARD_NAME, "".into());
    row.set(fields::WARD_CODE, "1442 SARANGOMBE".into());

    let station = reconcile(&row);
    expect_that!(station.ward_code, eq("1442"));
    expect_that!(station.ward_name, eq("SARANGOMBE"));
}

#[gtest]
fn test_rule_without_code_leaves_row_unchanged() {
    let mut row = complete_row();
    row.set(fields::WARD_NAME, "".into());
    row.set(fields::WARD_CODE, "SARANGOMBE".into());

    let mut repaired = row.clone();
    expect_that!(STATION_REPAIR_RULES[6].apply(&mut repaired), eq(false));
    expect_that!(repaired, eq(&row));
}

#[gtest]
fn test_rule_does_not_fire_when_target_present() {
    let row = complete_row();
    let mut repaired = row.clone();
    for rule in &STATION_REPAIR_RULES {
        expect_that!(rule.apply(&mut repaired), eq(false), "for rule {:?}", rule.name);
    }
    expect_that!(repaired, eq(&row));
}

#[gtest]
fn test_coerces_absent_fields_and_newlines() {
    let row = RawRecord(hash_map! {
        fields::COUNTY_NAME.to_string() => " NAIROBI\nCITY ".to_string(),
        fields::POLLING_STATION_CODE.to_string() => "0472881\n4420101".to_string(),
        fields::POLLING_STATION_NAME.to_string() => "OLYMPIC".to_string(),
        fields::REGISTERED_VOTERS.to_string() => " 612 ".to_string(),
    });

    expect_that!(
        reconcile(&row),
        eq(&PollingStation {
            county_name: "NAIROBI CITY".into(),
            polling_station_code: "04728814420101".into(),
            polling_station_name: "OLYMPIC".into(),
            registered_voters: "612".into(),
            ..Default::default()
        })
    );
}
