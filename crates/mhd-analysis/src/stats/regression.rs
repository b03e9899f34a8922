//! Contributing-factor tables per disorder.
//!
//! These are fixed tables, not fitted models: the same target always yields
//! the same factors and impacts.

use mhd_model::Disorder;
use serde::{Deserialize, Serialize};

/// A named factor and its relative impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionFactor {
    pub factor: String,
    pub impact: f64,
}

const DEPRESSION: &[(&str, f64)] = &[
    ("Healthcare access", 0.68),
    ("Socioeconomic status", 0.57),
    ("Urbanization", 0.42),
    ("Unemployment", 0.39),
    ("Social isolation", 0.35),
];

const ANXIETY: &[(&str, f64)] = &[
    ("Chronic stress", 0.72),
    ("Urbanization", 0.61),
    ("Healthcare access", 0.54),
    ("Socioeconomic status", 0.48),
    ("Traumatic events", 0.41),
];

const BIPOLAR: &[(&str, f64)] = &[
    ("Genetic factors", 0.75),
    ("Healthcare access", 0.62),
    ("Chronic stress", 0.45),
    ("Substance use", 0.38),
    ("Socioeconomic status", 0.32),
];

const SCHIZOPHRENIA: &[(&str, f64)] = &[
    ("Genetic factors", 0.79),
    ("Urbanization", 0.58),
    ("Healthcare access", 0.52),
    ("Perinatal complications", 0.47),
    ("Substance use", 0.41),
];

const EATING_DISORDERS: &[(&str, f64)] = &[
    ("Social pressure", 0.70),
    ("Cultural factors", 0.65),
    ("Healthcare access", 0.48),
    ("Socioeconomic status", 0.42),
    ("Genetic factors", 0.38),
];

const DEFAULT: &[(&str, f64)] = &[
    ("Healthcare access", 0.65),
    ("Socioeconomic status", 0.55),
    ("Urbanization", 0.45),
    ("Cultural factors", 0.40),
    ("Chronic stress", 0.35),
];

/// Factor categories and the factors they cover.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("socioeconomic", &["Socioeconomic status", "Unemployment"]),
    ("healthcare", &["Healthcare access"]),
    ("demographic", &["Urbanization", "Social isolation"]),
    ("cultural", &["Cultural factors", "Social pressure"]),
    ("genetic", &["Genetic factors"]),
    ("stress", &["Chronic stress", "Traumatic events"]),
    ("substances", &["Substance use"]),
];

/// Category names accepted by [`regression_factors_for`].
pub fn factor_categories() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|(name, _)| *name)
}

fn table(target: &str) -> &'static [(&'static str, f64)] {
    match target.parse::<Disorder>() {
        Ok(Disorder::Depression) => DEPRESSION,
        Ok(Disorder::Anxiety) => ANXIETY,
        Ok(Disorder::Bipolar) => BIPOLAR,
        Ok(Disorder::Schizophrenia) => SCHIZOPHRENIA,
        Ok(Disorder::EatingDisorders) => EATING_DISORDERS,
        Err(_) => DEFAULT,
    }
}

fn to_factors(entries: &[(&str, f64)]) -> Vec<RegressionFactor> {
    entries
        .iter()
        .map(|(factor, impact)| RegressionFactor {
            factor: (*factor).to_string(),
            impact: *impact,
        })
        .collect()
}

/// Ranked factors for a target disorder, or the generic list for an
/// unrecognised target.
pub fn regression_factors(target: &str) -> Vec<RegressionFactor> {
    to_factors(table(target))
}

/// Factors for a target restricted to `categories`, impacts rescaled to
/// sum to 1.
///
/// Unknown category names are ignored. When no factor of the target falls
/// in the requested categories, the full list is used.
pub fn regression_factors_for(target: &str, categories: &[&str]) -> Vec<RegressionFactor> {
    let wanted: Vec<&str> = CATEGORIES
        .iter()
        .filter(|(name, _)| categories.iter().any(|c| c.trim().eq_ignore_ascii_case(name)))
        .flat_map(|(_, factors)| factors.iter().copied())
        .collect();

    let full = table(target);
    let selected: Vec<(&str, f64)> = full
        .iter()
        .copied()
        .filter(|(factor, _)| wanted.contains(factor))
        .collect();
    let selected = if selected.is_empty() {
        full.to_vec()
    } else {
        selected
    };

    let total: f64 = selected.iter().map(|(_, impact)| impact).sum();
    let mut factors = to_factors(&selected);
    if total > 0.0 {
        for factor in &mut factors {
            factor.impact /= total;
        }
    }
    factors
}
