//! Configuration of which pages hold which tables.

use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub mod pages;
pub mod pdf;

pub use pages::PageRange;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported extraction type: {0:?}")]
    UnsupportedExtractionType(String),
    #[error("invalid page range: {0:?}")]
    InvalidPageRange(String),
}

/// Kind of table being extracted from the gazette.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ExtractionType {
    PollingStationData,
    CandidateData,
}

impl ExtractionType {
    /// Parses an extraction type key such as `"candidate_data"`.
    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        key.parse()
            .map_err(|_| ConfigError::UnsupportedExtractionType(key.to_string()))
    }
}

/// How to extract the tables of one [ExtractionType].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExtractionSettings {
    pub pages: PageRange,
    #[serde(default)]
    pub method: pdf::TabulaExtractionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ExtractionSettings {
    fn with_pages(first: i32, last: i32) -> Self {
        Self {
            pages: PageRange::from_static(first, last),
            method: Default::default(),
            password: None,
        }
    }
}

/// Per-[ExtractionType] settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtractionConfig {
    pub polling_station_data: ExtractionSettings,
    pub candidate_data: ExtractionSettings,
}

impl Default for ExtractionConfig {
    /// Layout of the 2025 by-election gazette.
    fn default() -> Self {
        Self {
            polling_station_data: ExtractionSettings::with_pages(14, 79),
            candidate_data: ExtractionSettings::with_pages(1, 13),
        }
    }
}

impl ExtractionConfig {
    pub fn get(&self, extraction_type: ExtractionType) -> &ExtractionSettings {
        match extraction_type {
            ExtractionType::PollingStationData => &self.polling_station_data,
            ExtractionType::CandidateData => &self.candidate_data,
        }
    }

    /// Reads YAML overrides of the defaults. The document is a mapping from
    /// extraction type key to [ExtractionSettings]; absent keys keep their
    /// defaults.
    pub fn from_yaml_reader<R: Read>(reader: R) -> Result<Self> {
        let overrides: HashMap<String, ExtractionSettings> =
            serde_yaml_ng::from_reader(reader).context("parsing extraction config")?;

        let mut cfg = Self::default();
        for (key, settings) in overrides {
            match ExtractionType::from_key(&key)? {
                ExtractionType::PollingStationData => cfg.polling_station_data = settings,
                ExtractionType::CandidateData => cfg.candidate_data = settings,
            }
        }
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening extraction config {:?}", path))?;
        Self::from_yaml_reader(file).with_context(|| format!("loading {:?}", path))
    }
}
