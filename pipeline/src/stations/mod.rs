//! Binds candidates to a representative polling station.


use hashbrown::HashMap;

use crate::records::{Location, PollingStation, PositionType};

/// Administrative level at which stations are grouped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Level {
    Ward,
    Constituency,
    County,
}

impl Level {
    fn unit_name(self, station: &PollingStation) -> &str {
        match self {
            Level::Ward => &station.ward_name,
            Level::Constituency => &station.constituency_name,
            Level::County => &station.county_name,
        }
    }

    fn location_code(self, location: &Location) -> &str {
        match self {
            Level::Ward => &location.ward_code,
            Level::Constituency => &location.constituency_code,
            Level::County => &location.county_code,
        }
    }

    fn location_name(self, location: &Location) -> &str {
        match self {
            Level::Ward => &location.ward_name,
            Level::Constituency => &location.constituency_name,
            Level::County => &location.county_name,
        }
    }
}

/// Station indices grouped by code, keeping groups and their members in the
/// order first seen.
#[derive(Debug, Default)]
struct Grouping {
    order: Vec<String>,
    groups: HashMap<String, Vec<usize>>,
}

impl Grouping {
    fn insert(&mut self, code: &str, station_idx: usize) {
        match self.groups.get_mut(code) {
            Some(group) => group.push(station_idx),
            None => {
                self.order.push(code.to_string());
                self.groups.insert(code.to_string(), vec![station_idx]);
            }
        }
    }

    fn get(&self, code: &str) -> &[usize] {
        self.groups.get(code).map(Vec::as_slice).unwrap_or_default()
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().flat_map(|code| self.get(code).iter().copied())
    }
}

/// Lookup of polling stations by ward, constituency and county.
///
/// Built once from the complete list of stations, then only read.
#[derive(Debug, Default)]
pub struct StationIndex {
    stations: Vec<PollingStation>,
    by_ward: Grouping,
    by_constituency: Grouping,
    by_county: Grouping,
}

impl StationIndex {
    pub fn build(stations: Vec<PollingStation>) -> Self {
        let mut index = Self::default();
        for (i, station) in stations.iter().enumerate() {
            index.by_ward.insert(&station.ward_code, i);
            index.by_constituency.insert(&station.constituency_code, i);
            index.by_county.insert(&station.county_code, i);
        }
        index.stations = stations;

        log::info!(
            "Indexed {} polling stations in {} wards, {} constituencies and {} counties.",
            index.stations.len(),
            index.by_ward.order.len(),
            index.by_constituency.order.len(),
            index.by_county.order.len(),
        );

        index
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    fn grouping(&self, level: Level) -> &Grouping {
        match level {
            Level::Ward => &self.by_ward,
            Level::Constituency => &self.by_constituency,
            Level::County => &self.by_county,
        }
    }

    /// Selects the station representing `location` for a candidate standing
    /// for `position`.
    ///
    /// The location code at the level of the office is looked up first. If
    /// that finds nothing, the first station whose name at that level
    /// matches by [normalize_name] is chosen. Offices of unknown level are
    /// looked up by county code only.
    pub fn resolve(&self, location: &Location, position: PositionType) -> Option<&PollingStation> {
        use PositionType::*;
        let (level, by_name) = match position {
            CountyAssemblyMember => (Level::Ward, true),
            ParliamentMember => (Level::Constituency, true),
            Senator | Governor | WomenRepresentative => (Level::County, true),
            Unknown => (Level::County, false),
        };

        let grouping = self.grouping(level);

        let code = level.location_code(location);
        if !code.is_empty() {
            if let Some(&i) = grouping.get(code).first() {
                return Some(&self.stations[i]);
            }
        }

        if !by_name {
            return None;
        }
        let name = normalize_name(level.location_name(location));
        if name.is_empty() {
            return None;
        }
        grouping
            .iter()
            .map(|i| &self.stations[i])
            .find(|station| normalize_name(level.unit_name(station)) == name)
    }
}

/// Normalises an administrative unit name for comparison: lowercased, with
/// any " constituency" suffix word and periods removed.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .replace(" constituency", "")
        .replace('.', "")
        .trim()
        .to_string()
}
