//! Per-row repair of polling station tables.
//!
//! The table detector sometimes merges a code and a name into one cell,
//! leaving a neighbouring cell empty. Each [RepairRule] recognises one such
//! pattern observed across gazette revisions. The rules run in the fixed
//! order of [STATION_REPAIR_RULES]; later rules read fields written by
//! earlier ones.

#[cfg(test)]
mod tests;

use crate::{
    records::PollingStation,
    schema::{RawRecord, fields},
    tokens,
};

/// A single repair, applied when its target field is missing.
pub struct RepairRule {
    pub name: &'static str,
    /// The rule fires only when this field is missing, see
    /// [RawRecord::is_missing].
    pub target: &'static str,
    apply: fn(&mut RawRecord) -> bool,
}

impl RepairRule {
    /// Applies the rule if its target is missing. Returns whether `record`
    /// changed.
    pub fn apply(&self, record: &mut RawRecord) -> bool {
        record.is_missing(self.target) && (self.apply)(record)
    }
}

impl std::fmt::Debug for RepairRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepairRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

pub const STATION_REPAIR_RULES: [RepairRule; 7] = [
    RepairRule {
        name: "station name from station code",
        target: fields::POLLING_STATION_NAME,
        apply: |r| {
            split_into(
                r,
                fields::POLLING_STATION_CODE,
                fields::POLLING_STATION_CODE,
                fields::POLLING_STATION_NAME,
            )
        },
    },
    RepairRule {
        name: "station code from station names",
        target: fields::POLLING_STATION_CODE,
        apply: |r| {
            let from_polling = split_into(
                r,
                fields::POLLING_STATION_NAME,
                fields::POLLING_STATION_CODE,
                fields::POLLING_STATION_NAME,
            );
            let from_centre = split_into(
                r,
                fields::STATION_NAME,
                fields::POLLING_STATION_CODE,
                fields::STATION_NAME,
            );
            from_polling || from_centre
        },
    },
    RepairRule {
        name: "constituency code from county name",
        target: fields::CONSTITUENCY_CODE,
        apply: |r| {
            split_into(
                r,
                fields::COUNTY_NAME,
                fields::CONSTITUENCY_CODE,
                fields::COUNTY_NAME,
            )
        },
    },
    RepairRule {
        name: "constituency name from ward code",
        target: fields::CONSTITUENCY_NAME,
        apply: |r| {
            split_into(
                r,
                fields::WARD_CODE,
                fields::WARD_CODE,
                fields::CONSTITUENCY_NAME,
            )
        },
    },
    RepairRule {
        name: "registered voters from station name",
        target: fields::REGISTERED_VOTERS,
        apply: |r| {
            split_into(
                r,
                fields::POLLING_STATION_NAME,
                fields::REGISTERED_VOTERS,
                fields::POLLING_STATION_NAME,
            )
        },
    },
    RepairRule {
        name: "ward code from constituency or ward name",
        target: fields::WARD_CODE,
        apply: |r| {
            let from_constituency = split_into(
                r,
                fields::CONSTITUENCY_NAME,
                fields::WARD_CODE,
                fields::CONSTITUENCY_NAME,
            );
            let from_ward = split_into(r, fields::WARD_NAME, fields::WARD_CODE, fields::WARD_NAME);
            from_constituency || from_ward
        },
    },
    RepairRule {
        name: "ward name from ward code",
        target: fields::WARD_NAME,
        apply: |r| split_into(r, fields::WARD_CODE, fields::WARD_CODE, fields::WARD_NAME),
    },
];

/// Ward repairs applied to candidate tables. Candidate tables of some
/// revisions merge the ward code and name in either column.
pub const CANDIDATE_REPAIR_RULES: [RepairRule; 2] = [
    RepairRule {
        name: "candidate ward name from ward code",
        target: fields::WARD_NAME,
        apply: |r| split_into(r, fields::WARD_CODE, fields::WARD_CODE, fields::WARD_NAME),
    },
    RepairRule {
        name: "candidate ward code from ward name",
        target: fields::WARD_CODE,
        apply: |r| split_into(r, fields::WARD_NAME, fields::WARD_CODE, fields::WARD_NAME),
    },
];

/// Splits the `source` cell with [tokens::split]. When a code is found it is
/// written to `code_field` and the remaining text to `text_field`, and true
/// is returned. Otherwise `record` is unchanged.
fn split_into(
    record: &mut RawRecord,
    source: &str,
    code_field: &str,
    text_field: &str,
) -> bool {
    let split = tokens::split(record.get(source));
    match split.code {
        Some(code) => {
            record.set(code_field, code);
            record.set(text_field, split.text);
            true
        }
        None => false,
    }
}

/// Repairs a polling station row and coerces it to a [PollingStation].
///
/// This is a pure function of `record`.
pub fn reconcile(record: &RawRecord) -> PollingStation {
    let mut record = record.clone();
    apply_rules(&STATION_REPAIR_RULES, &mut record);

    PollingStation {
        county_code: code_text(&record, fields::COUNTY_CODE),
        county_name: name_text(&record, fields::COUNTY_NAME),
        constituency_code: code_text(&record, fields::CONSTITUENCY_CODE),
        constituency_name: name_text(&record, fields::CONSTITUENCY_NAME),
        ward_code: code_text(&record, fields::WARD_CODE),
        ward_name: name_text(&record, fields::WARD_NAME),
        station_name: name_text(&record, fields::STATION_NAME),
        polling_station_code: record
            .get(fields::POLLING_STATION_CODE)
            .unwrap_or_default()
            .replace('\n', "")
            .trim()
            .to_string(),
        polling_station_name: name_text(&record, fields::POLLING_STATION_NAME),
        registered_voters: code_text(&record, fields::REGISTERED_VOTERS),
    }
}

/// Applies each of `rules` in order.
pub fn apply_rules(rules: &[RepairRule], record: &mut RawRecord) {
    for rule in rules {
        if rule.apply(record) {
            log::trace!("Applied repair rule {:?}.", rule.name);
        }
    }
}

pub(crate) fn code_text(record: &RawRecord, field: &str) -> String {
    record.get(field).unwrap_or_default().trim().to_string()
}

pub(crate) fn name_text(record: &RawRecord, field: &str) -> String {
    record
        .get(field)
        .unwrap_or_default()
        .replace('\n', " ")
        .trim()
        .to_string()
}
