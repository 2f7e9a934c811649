use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::Visitor};

use super::ConfigError;

/// Set of 1-based PDF page numbers, written as `"14-79"`, `"3"` or
/// `"1-3,7"`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRange {
    spans: Vec<(i32, i32)>,
}

impl PageRange {
    /// Creates a [PageRange] covering `first..=last`.
    pub fn new(first: i32, last: i32) -> Result<Self, ConfigError> {
        Self::from_spans(vec![(first, last)], || format!("{first}-{last}"))
    }

    /// Creates a [PageRange] from literal page numbers known to be valid.
    pub(crate) fn from_static(first: i32, last: i32) -> Self {
        debug_assert!(0 < first && first <= last);
        Self {
            spans: vec![(first, last)],
        }
    }

    fn from_spans<F>(spans: Vec<(i32, i32)>, text: F) -> Result<Self, ConfigError>
    where
        F: Fn() -> String,
    {
        if spans.is_empty() || spans.iter().any(|&(first, last)| first < 1 || last < first) {
            return Err(ConfigError::InvalidPageRange(text()));
        }
        Ok(Self { spans })
    }

    /// Every page number in the range, in the order written.
    pub fn pages(&self) -> Vec<i32> {
        self.spans
            .iter()
            .flat_map(|&(first, last)| first..=last)
            .collect()
    }
}

impl FromStr for PageRange {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidPageRange(s.to_string());
        let parse_page = |p: &str| p.trim().parse::<i32>().map_err(|_| invalid());

        let spans = s
            .split(',')
            .map(|span| match span.split_once('-') {
                Some((first, last)) => Ok((parse_page(first)?, parse_page(last)?)),
                None => parse_page(span).map(|page| (page, page)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_spans(spans, || s.to_string())
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(first, last)) in self.spans.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if first == last {
                write!(f, "{first}")?;
            } else {
                write!(f, "{first}-{last}")?;
            }
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for PageRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(PageRangeVisitor)
    }
}

struct PageRangeVisitor;

impl<'de> Visitor<'de> for PageRangeVisitor {
    type Value = PageRange;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a page range such as \"14-79\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        PageRange::from_str(v).map_err(E::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let page = i32::try_from(v).map_err(E::custom)?;
        PageRange::new(page, page).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let page = i32::try_from(v).map_err(E::custom)?;
        PageRange::new(page, page).map_err(E::custom)
    }
}

impl Serialize for PageRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
