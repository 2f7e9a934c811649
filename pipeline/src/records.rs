//! Canonical records produced by reconciliation, and read back from JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Office a candidate stands for, which fixes the administrative level at
/// which the candidate is bound to a polling station.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum PositionType {
    #[serde(rename = "Member of County Assembly", alias = "County-Assembly-Member")]
    #[strum(serialize = "Member of County Assembly")]
    CountyAssemblyMember,
    #[serde(rename = "Member of Parliament", alias = "Parliament-Member")]
    #[strum(serialize = "Member of Parliament")]
    ParliamentMember,
    Senator,
    Governor,
    #[serde(rename = "Women Rep", alias = "Women-Representative")]
    #[strum(serialize = "Women Rep")]
    WomenRepresentative,
    #[default]
    Unknown,
}

/// A single polling station row, with every field as cleaned text.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct PollingStation {
    #[serde(deserialize_with = "lenient_string")]
    pub county_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub county_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub constituency_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub constituency_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ward_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ward_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub station_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub polling_station_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub polling_station_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub registered_voters: String,
}

impl PollingStation {
    /// Name to publish for the station, preferring the polling station name
    /// over the registration centre name.
    pub fn display_name(&self) -> &str {
        if self.polling_station_name.is_empty() {
            &self.station_name
        } else {
            &self.polling_station_name
        }
    }
}

/// Administrative location of a candidate. Which fields are populated
/// depends on the level of the office.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "lenient_string")]
    pub county_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub county_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub constituency_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub constituency_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ward_code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ward_name: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Candidate {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    #[serde(deserialize_with = "lenient_option")]
    pub photo: Option<String>,
    pub position_type: PositionType,
    #[serde(deserialize_with = "lenient_string")]
    pub party_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub party_abbreviation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub party_code: String,
    #[serde(flatten)]
    pub location: Location,
    /// `polling_station_code` of the station the candidate is bound to.
    #[serde(deserialize_with = "lenient_option")]
    pub voting_station: Option<String>,
}

/// Gender is not published in the gazette.
pub const UNKNOWN_GENDER: &str = "unknown";

/// Accepts strings, numbers, booleans or null as text. JSON written by other
/// tools often carries codes as numbers.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_option(deserializer)?.unwrap_or_default())
}

fn lenient_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}
