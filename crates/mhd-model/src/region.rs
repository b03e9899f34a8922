//! Static region table mapping region names to ISO-3166 alpha-3 codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const AMERICAS: &[&str] = &[
    "USA", "CAN", "MEX", "BRA", "ARG", "COL", "PER", "CHL", "VEN", "ECU", "BOL", "PRY", "URY",
    "GUY", "SUR", "GUF",
];

const EUROPE: &[&str] = &[
    "GBR", "FRA", "DEU", "ITA", "ESP", "PRT", "NLD", "BEL", "CHE", "AUT", "SWE", "NOR", "DNK",
    "FIN", "ISL", "IRL", "GRC", "POL", "ROU", "CZE", "HUN", "BGR", "SRB", "HRV", "SVK", "SVN",
    "LTU", "LVA", "EST", "CYP", "LUX", "MLT", "MNE", "MKD", "ALB", "BIH",
];

const ASIA: &[&str] = &[
    "CHN", "JPN", "IND", "IDN", "PAK", "BGD", "PHL", "VNM", "THA", "MYS", "MMR", "NPL", "KOR",
    "PRK", "LKA", "KHM", "LAO", "SGP", "BRN", "TLS", "MDV", "BTN",
];

const AFRICA: &[&str] = &[
    "ZAF", "NGA", "EGY", "DZA", "MAR", "TUN", "LBY", "SDN", "ETH", "KEN", "TZA", "UGA", "GHA",
    "CIV", "CMR", "ZWE", "ZMB", "AGO", "MOZ", "NAM", "BWA", "SEN", "MLI", "BFA", "NER", "TCD",
    "GIN", "SOM", "RWA", "BDI", "BEN", "MRT", "GAB", "SLE", "LBR", "TGO", "ERI", "GNB", "LSO",
    "SWZ", "DJI", "COM", "CPV", "STP",
];

const OCEANIA: &[&str] = &[
    "AUS", "NZL", "PNG", "FJI", "SLB", "VUT", "WSM", "TON", "KIR", "FSM", "MHL", "PLW", "NRU",
    "TUV",
];

/// Named region. `Global` is the identity region and has no code set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Global,
    Americas,
    Europe,
    Asia,
    Africa,
    Oceania,
}

impl Region {
    pub const ALL: [Self; 6] = [
        Self::Global,
        Self::Americas,
        Self::Europe,
        Self::Asia,
        Self::Africa,
        Self::Oceania,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Americas => "americas",
            Self::Europe => "europe",
            Self::Asia => "asia",
            Self::Africa => "africa",
            Self::Oceania => "oceania",
        }
    }

    /// Country codes bound to the region (empty for `Global`).
    pub const fn codes(self) -> &'static [&'static str] {
        match self {
            Self::Global => &[],
            Self::Americas => AMERICAS,
            Self::Europe => EUROPE,
            Self::Asia => ASIA,
            Self::Africa => AFRICA,
            Self::Oceania => OCEANIA,
        }
    }

    /// Returns true if the region admits a record with this code.
    ///
    /// `Global` admits everything, including records without a code.
    pub fn admits(self, code: Option<&str>) -> bool {
        match self {
            Self::Global => true,
            _ => code.is_some_and(|code| self.codes().contains(&code)),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|region| region.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownRegion(s.to_string()))
    }
}
