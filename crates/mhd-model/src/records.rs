//! Typed record shapes, one per dataset schema.
//!
//! Every numeric field is a plain `f64` that defaults to 0 when the source
//! cell was missing or unparsable, so consumers can do arithmetic without
//! checking. Only the population-coverage shape carries optional measures;
//! every shape keeps its year optional so a blank Year never reads as a
//! real year.
//!
//! Heterogeneous access goes through [`Record::field_value`], which answers
//! by field name and reports unknown names as absent.

use serde::{Deserialize, Serialize};

use crate::dataset::RecordKind;
use crate::fields::resolve_field;
use crate::numeric::is_year;
use crate::raw::{RawRecord, RawValue};

/// Capabilities shared by every record shape.
pub trait Record {
    /// Country or aggregate name.
    fn entity(&self) -> &str;

    /// ISO-3166 alpha-3 code or aggregate sentinel, when the shape has one.
    fn code(&self) -> Option<&str>;

    /// Observation year.
    fn year(&self) -> Option<i32>;

    /// Numeric field by name or disorder alias; `None` for unknown names.
    fn field_value(&self, key: &str) -> Option<f64>;

    /// Identifier for derived points: the code when present, else the entity.
    fn id(&self) -> &str {
        match self.code() {
            Some(code) if !code.is_empty() => code,
            _ => self.entity(),
        }
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn entity(&self) -> &str {
        (**self).entity()
    }

    fn code(&self) -> Option<&str> {
        (**self).code()
    }

    fn year(&self) -> Option<i32> {
        (**self).year()
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        (**self).field_value(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PrevalenceRecord {
    pub entity: String,
    pub code: Option<String>,
    /// Observation year; `None` when the source cell is blank or not a 4-digit year.
    pub year: Option<i32>,
    pub schizophrenia: f64,
    pub depression: f64,
    pub anxiety: f64,
    pub bipolar: f64,
    pub eating_disorders: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BurdenRecord {
    pub entity: String,
    pub code: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "DepressionDALYs")]
    pub depression_dalys: f64,
    #[serde(rename = "SchizophreniaDALYs")]
    pub schizophrenia_dalys: f64,
    #[serde(rename = "BipolarDALYs")]
    pub bipolar_dalys: f64,
    #[serde(rename = "EatingDisordersDALYs")]
    pub eating_disorders_dalys: f64,
    #[serde(rename = "AnxietyDALYs")]
    pub anxiety_dalys: f64,
}

/// Treatment shares in percent; not guaranteed to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TreatmentGapRecord {
    pub entity: String,
    pub code: Option<String>,
    pub year: Option<i32>,
    pub adequate_treatment: f64,
    pub other_treatments: f64,
    pub untreated: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PopulationCoverageRecord {
    pub entity: String,
    pub code: Option<String>,
    pub year: Option<i32>,
    pub major_depression: f64,
    pub bipolar_disorder: Option<f64>,
    pub eating_disorders: Option<f64>,
    pub dysthymia: Option<f64>,
    pub schizophrenia: Option<f64>,
    pub anxiety_disorders: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UsDepressiveSymptomsRecord {
    pub entity: String,
    pub year: Option<i32>,
    pub nearly_every_day: f64,
    pub more_than_half_days: f64,
    pub several_days: f64,
    pub not_at_all: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountriesWithDataRecord {
    pub entity: String,
    pub year: Option<i32>,
    pub number_of_countries: f64,
}

impl Record for PrevalenceRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        match resolve_field(key) {
            "Year" => self.year.map(f64::from),
            "Schizophrenia" => Some(self.schizophrenia),
            "Depression" => Some(self.depression),
            "Anxiety" => Some(self.anxiety),
            "Bipolar" => Some(self.bipolar),
            "EatingDisorders" => Some(self.eating_disorders),
            _ => None,
        }
    }
}

impl Record for BurdenRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        match key {
            "Year" => self.year.map(f64::from),
            "DepressionDALYs" => Some(self.depression_dalys),
            "SchizophreniaDALYs" => Some(self.schizophrenia_dalys),
            "BipolarDALYs" => Some(self.bipolar_dalys),
            "EatingDisordersDALYs" => Some(self.eating_disorders_dalys),
            "AnxietyDALYs" => Some(self.anxiety_dalys),
            _ => None,
        }
    }
}

impl Record for TreatmentGapRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        match key {
            "Year" => self.year.map(f64::from),
            "AdequateTreatment" => Some(self.adequate_treatment),
            "OtherTreatments" => Some(self.other_treatments),
            "Untreated" => Some(self.untreated),
            _ => None,
        }
    }
}

impl Record for PopulationCoverageRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        match key {
            "Year" => self.year.map(f64::from),
            "MajorDepression" => Some(self.major_depression),
            "BipolarDisorder" => self.bipolar_disorder,
            "EatingDisorders" => self.eating_disorders,
            "Dysthymia" => self.dysthymia,
            "Schizophrenia" => self.schizophrenia,
            "AnxietyDisorders" => self.anxiety_disorders,
            _ => None,
        }
    }
}

impl Record for UsDepressiveSymptomsRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn code(&self) -> Option<&str> {
        None
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        match key {
            "Year" => self.year.map(f64::from),
            "NearlyEveryDay" => Some(self.nearly_every_day),
            "MoreThanHalfDays" => Some(self.more_than_half_days),
            "SeveralDays" => Some(self.several_days),
            "NotAtAll" => Some(self.not_at_all),
            _ => None,
        }
    }
}

impl Record for CountriesWithDataRecord {
    fn entity(&self) -> &str {
        &self.entity
    }

    fn code(&self) -> Option<&str> {
        None
    }

    fn year(&self) -> Option<i32> {
        self.year
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        match key {
            "Year" => self.year.map(f64::from),
            "NumberOfCountries" => Some(self.number_of_countries),
            _ => None,
        }
    }
}

impl Record for RawRecord {
    fn entity(&self) -> &str {
        match self.get("Entity") {
            Some(RawValue::Text(text)) => text.as_str(),
            _ => "",
        }
    }

    fn code(&self) -> Option<&str> {
        match self.get("Code") {
            Some(RawValue::Text(text)) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    fn year(&self) -> Option<i32> {
        self.get("Year")
            .and_then(RawValue::as_i32)
            .filter(|year| is_year(*year))
    }

    /// Only cells coerced to numbers count; text is absent, as in the
    /// source's type checks.
    fn field_value(&self, key: &str) -> Option<f64> {
        let key = resolve_field(key);
        match self.get(key) {
            Some(RawValue::Number(value)) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }
}

/// A normalised record of any shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedRecord {
    Prevalence(PrevalenceRecord),
    Burden(BurdenRecord),
    TreatmentGap(TreatmentGapRecord),
    PopulationCoverage(PopulationCoverageRecord),
    UsDepressiveSymptoms(UsDepressiveSymptomsRecord),
    CountriesWithData(CountriesWithDataRecord),
    Raw(RawRecord),
}

impl TypedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Prevalence(_) => RecordKind::Prevalence,
            Self::Burden(_) => RecordKind::Burden,
            Self::TreatmentGap(_) => RecordKind::TreatmentGap,
            Self::PopulationCoverage(_) => RecordKind::PopulationCoverage,
            Self::UsDepressiveSymptoms(_) => RecordKind::UsDepressiveSymptoms,
            Self::CountriesWithData(_) => RecordKind::CountriesWithData,
            Self::Raw(_) => RecordKind::Raw,
        }
    }

    pub fn as_prevalence(&self) -> Option<&PrevalenceRecord> {
        match self {
            Self::Prevalence(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_burden(&self) -> Option<&BurdenRecord> {
        match self {
            Self::Burden(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_treatment_gap(&self) -> Option<&TreatmentGapRecord> {
        match self {
            Self::TreatmentGap(record) => Some(record),
            _ => None,
        }
    }

    fn inner(&self) -> &dyn Record {
        match self {
            Self::Prevalence(record) => record,
            Self::Burden(record) => record,
            Self::TreatmentGap(record) => record,
            Self::PopulationCoverage(record) => record,
            Self::UsDepressiveSymptoms(record) => record,
            Self::CountriesWithData(record) => record,
            Self::Raw(record) => record,
        }
    }
}

impl Record for TypedRecord {
    fn entity(&self) -> &str {
        self.inner().entity()
    }

    fn code(&self) -> Option<&str> {
        self.inner().code()
    }

    fn year(&self) -> Option<i32> {
        self.inner().year()
    }

    fn field_value(&self, key: &str) -> Option<f64> {
        self.inner().field_value(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prevalence() -> PrevalenceRecord {
        PrevalenceRecord {
            entity: "Brazil".to_string(),
            code: Some("BRA".to_string()),
            year: Some(2015),
            schizophrenia: 0.3,
            depression: 4.2,
            anxiety: 6.1,
            bipolar: 0.8,
            eating_disorders: 0.4,
        }
    }

    #[test]
    fn test_field_value_by_alias_and_name() {
        let record = prevalence();
        assert_eq!(record.field_value("depression"), Some(4.2));
        assert_eq!(record.field_value("Depression"), Some(4.2));
        assert_eq!(record.field_value("eating"), Some(0.4));
        assert_eq!(record.field_value("Unknown"), None);
    }

    #[test]
    fn test_typed_record_delegates() {
        let record = TypedRecord::Prevalence(prevalence());
        assert_eq!(record.entity(), "Brazil");
        assert_eq!(record.code(), Some("BRA"));
        assert_eq!(record.year(), Some(2015));
        assert_eq!(record.id(), "BRA");
        assert_eq!(record.kind(), RecordKind::Prevalence);
    }

    #[test]
    fn test_id_falls_back_to_entity() {
        let record = UsDepressiveSymptomsRecord {
            entity: "Little interest".to_string(),
            year: Some(2014),
            nearly_every_day: 5.0,
            more_than_half_days: 6.0,
            several_days: 20.0,
            not_at_all: 69.0,
        };
        assert_eq!(record.id(), "Little interest");
    }

    #[test]
    fn test_raw_record_field_value_requires_number() {
        let record = RawRecord::new()
            .with("Entity", RawValue::Text("Brazil".into()))
            .with("Year", RawValue::Number(2015.0))
            .with("Depression", RawValue::Number(4.2))
            .with("Notes", RawValue::Text("n/a".into()));
        assert_eq!(record.field_value("depression"), Some(4.2));
        assert_eq!(record.field_value("Notes"), None);
        assert_eq!(record.year(), Some(2015));
        assert_eq!(record.code(), None);
    }

    #[test]
    fn test_optional_coverage_fields() {
        let record = PopulationCoverageRecord {
            entity: "World".to_string(),
            code: None,
            year: Some(2019),
            major_depression: 45.0,
            bipolar_disorder: None,
            eating_disorders: Some(12.0),
            dysthymia: None,
            schizophrenia: None,
            anxiety_disorders: None,
        };
        assert_eq!(record.field_value("BipolarDisorder"), None);
        assert_eq!(record.field_value("EatingDisorders"), Some(12.0));
    }
}
