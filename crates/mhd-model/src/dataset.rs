//! Dataset identifiers and the dataset catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable key selecting a raw source and its normalisation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Catalog entry for this identifier, if it is one of the known datasets.
    pub fn known(&self) -> Option<KnownDataset> {
        KnownDataset::from_id(&self.0)
    }

    /// Typed shape produced for this identifier.
    pub fn record_kind(&self) -> RecordKind {
        self.known().map_or(RecordKind::Raw, KnownDataset::record_kind)
    }

    /// File name of the raw source (`<id>.csv` for unknown identifiers).
    pub fn file_name(&self) -> String {
        match self.known() {
            Some(known) => known.file_name().to_string(),
            None => format!("{}.csv", self.0),
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatasetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<KnownDataset> for DatasetId {
    fn from(value: KnownDataset) -> Self {
        Self::new(value.id())
    }
}

/// Typed record shape selected by a dataset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Prevalence,
    Burden,
    TreatmentGap,
    PopulationCoverage,
    UsDepressiveSymptoms,
    CountriesWithData,
    /// Unknown dataset; records pass through untyped.
    Raw,
}

/// The datasets shipped with the source collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownDataset {
    MentalIllnessesPrevalence,
    BurdenDiseaseMentalIllness,
    DepressionPrevalenceCoverage,
    MentalIllnessesCoverage,
    AnxietyTreatmentGap,
    UsDepressiveSymptoms,
    CountriesWithData,
}

impl KnownDataset {
    pub const ALL: [Self; 7] = [
        Self::MentalIllnessesPrevalence,
        Self::BurdenDiseaseMentalIllness,
        Self::DepressionPrevalenceCoverage,
        Self::MentalIllnessesCoverage,
        Self::AnxietyTreatmentGap,
        Self::UsDepressiveSymptoms,
        Self::CountriesWithData,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.id() == id)
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::MentalIllnessesPrevalence => "mental-illnesses-prevalence",
            Self::BurdenDiseaseMentalIllness => "burden-disease-mental-illness",
            Self::DepressionPrevalenceCoverage => "depression-prevalence-coverage",
            Self::MentalIllnessesCoverage => "mental-illnesses-coverage",
            Self::AnxietyTreatmentGap => "anxiety-treatment-gap",
            Self::UsDepressiveSymptoms => "us-depressive-symptoms",
            Self::CountriesWithData => "countries-with-data",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::MentalIllnessesPrevalence => "mental-illnesses-prevalence.csv",
            Self::BurdenDiseaseMentalIllness => "burden-disease-mental-illness.csv",
            Self::DepressionPrevalenceCoverage => "depression-prevalence-coverage.csv",
            Self::MentalIllnessesCoverage => "mental-illnesses-coverage.csv",
            Self::AnxietyTreatmentGap => "anxiety-treatment-gap.csv",
            Self::UsDepressiveSymptoms => "us-depressive-symptoms.csv",
            Self::CountriesWithData => "countries-with-data.csv",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::MentalIllnessesPrevalence => {
                "Prevalence of mental disorders by country and year"
            }
            Self::BurdenDiseaseMentalIllness => {
                "Disease burden (DALYs) for each mental disorder"
            }
            Self::DepressionPrevalenceCoverage => {
                "Adult population covered by primary data on major depression prevalence"
            }
            Self::MentalIllnessesCoverage => {
                "Adult population covered by primary data on mental illness prevalence"
            }
            Self::AnxietyTreatmentGap => "Treatment gap for anxiety disorders",
            Self::UsDepressiveSymptoms => "Depressive symptoms across the US population",
            Self::CountriesWithData => {
                "Number of countries with primary prevalence data"
            }
        }
    }

    pub const fn record_kind(self) -> RecordKind {
        match self {
            Self::MentalIllnessesPrevalence => RecordKind::Prevalence,
            Self::BurdenDiseaseMentalIllness => RecordKind::Burden,
            Self::DepressionPrevalenceCoverage | Self::MentalIllnessesCoverage => {
                RecordKind::PopulationCoverage
            }
            Self::AnxietyTreatmentGap => RecordKind::TreatmentGap,
            Self::UsDepressiveSymptoms => RecordKind::UsDepressiveSymptoms,
            Self::CountriesWithData => RecordKind::CountriesWithData,
        }
    }
}

impl fmt::Display for KnownDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
