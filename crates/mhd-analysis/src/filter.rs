//! Pure record filters.
//!
//! Every filter borrows its input and returns the matching records in input
//! order. Identical inputs always give identical outputs.

use std::fmt;
use std::str::FromStr;

use mhd_model::numeric::parse_int;
use mhd_model::{ModelError, Record, Region};
use serde::{Deserialize, Serialize};

/// Year that relative periods are measured from.
pub const REFERENCE_YEAR: i32 = 2023;

/// Keeps records whose code belongs to the named region.
///
/// `"global"` returns every record unchanged. An unknown region name matches
/// nothing.
pub fn filter_by_region<'a, R: Record>(records: &'a [R], region: &str) -> Vec<&'a R> {
    match region.parse::<Region>() {
        Ok(region) => filter_region(records, region),
        Err(_) => {
            tracing::debug!(region, "unknown region, nothing matches");
            Vec::new()
        }
    }
}

/// Keeps records admitted by `region`.
pub fn filter_region<R: Record>(records: &[R], region: Region) -> Vec<&R> {
    records.iter().filter(|r| region.admits(r.code())).collect()
}

/// A requested year, given as a number or as text.
///
/// Text is read like `parseInt`: leading whitespace and sign are accepted and
/// trailing garbage is ignored. Text without a leading integer matches no
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSelector(Option<i32>);

impl YearSelector {
    pub fn year(self) -> Option<i32> {
        self.0
    }

    pub fn matches(self, year: Option<i32>) -> bool {
        self.0.is_some() && self.0 == year
    }
}

impl From<i32> for YearSelector {
    fn from(year: i32) -> Self {
        Self(Some(year))
    }
}

impl From<&str> for YearSelector {
    fn from(text: &str) -> Self {
        Self(parse_int(text).and_then(|year| i32::try_from(year).ok()))
    }
}

impl From<&String> for YearSelector {
    fn from(text: &String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Option<i32>> for YearSelector {
    fn from(year: Option<i32>) -> Self {
        Self(year)
    }
}

/// Keeps records observed in the selected year.
pub fn filter_by_year<R: Record>(records: &[R], year: impl Into<YearSelector>) -> Vec<&R> {
    let selector = year.into();
    records.iter().filter(|r| selector.matches(r.year())).collect()
}

/// Named time window relative to [`REFERENCE_YEAR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    /// The last five years.
    Recent,
    /// The last ten years.
    Decade,
}

impl Period {
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Recent => "recent",
            Self::Decade => "decade",
        }
    }

    /// Earliest year inside the period, `None` for [`Period::All`].
    pub const fn first_year(self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Recent => Some(REFERENCE_YEAR - 5),
            Self::Decade => Some(REFERENCE_YEAR - 10),
        }
    }

    pub fn contains(self, year: Option<i32>) -> bool {
        match self.first_year() {
            None => true,
            Some(first) => year.is_some_and(|year| year >= first),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "recent" => Ok(Self::Recent),
            "decade" => Ok(Self::Decade),
            _ => Err(ModelError::UnknownPeriod(s.to_string())),
        }
    }
}

/// Keeps records inside the period.
pub fn filter_by_period<R: Record>(records: &[R], period: Period) -> Vec<&R> {
    records.iter().filter(|r| period.contains(r.year())).collect()
}
