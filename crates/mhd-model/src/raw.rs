//! Untyped records produced by the parser.

use serde::{Deserialize, Serialize};

use crate::numeric::{looks_numeric, parse_float, parse_int};

/// A single cell after type coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Empty cell.
    Null,
    /// Cell that looked numeric.
    Number(f64),
    /// Any other cell, trimmed.
    Text(String),
}

impl RawValue {
    /// Coerces a cell: numeric-looking text becomes a number, empty text
    /// becomes `Null`, everything else stays text.
    pub fn coerce(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        if looks_numeric(trimmed)
            && let Ok(value) = trimmed.parse::<f64>()
        {
            return Self::Number(value);
        }
        Self::Text(trimmed.to_string())
    }

    /// Returns true for `Null` and for blank text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Number(_) => false,
            Self::Text(text) => text.trim().is_empty(),
        }
    }

    /// `parseFloat`-style conversion: numbers pass through, text yields its
    /// leading number, anything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Number(_) => None,
            Self::Text(text) => parse_float(text),
        }
    }

    /// Integer conversion used for years.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Null => None,
            Self::Number(value) if value.is_finite() => Some(value.trunc() as i32),
            Self::Number(_) => None,
            Self::Text(text) => parse_int(text).and_then(|v| i32::try_from(v).ok()),
        }
    }

    /// Text view of the cell; numbers are rendered without a trailing `.0`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Number(value) => Some(format_number(*value)),
            Self::Text(text) => Some(text.clone()),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// An ordered mapping from normalised header to cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, replacing any previous value under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Builder-style [`Self::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: RawValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Looks up the first candidate key present in the record.
    ///
    /// Each candidate is tried by exact match first; if none matches, keys
    /// are compared in compact form (alphanumerics only, case-insensitive)
    /// so that `"Untreated,conditional"` finds `"Untreatedconditional"`.
    pub fn lookup(&self, candidates: &[&str]) -> Option<&RawValue> {
        if let Some(value) = candidates.iter().find_map(|key| self.get(key)) {
            return Some(value);
        }
        candidates.iter().find_map(|candidate| {
            let wanted = compact_key(candidate);
            if wanted.is_empty() {
                return None;
            }
            self.fields
                .iter()
                .find(|(k, _)| compact_key(k) == wanted)
                .map(|(_, v)| v)
        })
    }

    /// Returns the entity name when present and non-blank.
    pub fn entity(&self) -> Option<String> {
        self.get("Entity")
            .and_then(RawValue::as_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Lower-cased alphanumerics of a key.
pub fn compact_key(key: &str) -> String {
    key.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce() {
        assert_eq!(RawValue::coerce("4.2"), RawValue::Number(4.2));
        assert_eq!(RawValue::coerce("  "), RawValue::Null);
        assert_eq!(RawValue::coerce(" BRA "), RawValue::Text("BRA".to_string()));
        assert_eq!(RawValue::coerce("4.2%"), RawValue::Text("4.2%".to_string()));
    }

    #[test]
    fn test_as_f64_and_i32() {
        assert_eq!(RawValue::Text("4.2%".into()).as_f64(), Some(4.2));
        assert_eq!(RawValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(RawValue::Number(2019.0).as_i32(), Some(2019));
        assert_eq!(RawValue::Text("2019".into()).as_i32(), Some(2019));
        assert_eq!(RawValue::Null.as_i32(), None);
    }

    #[test]
    fn test_as_text_renders_integers_plainly() {
        assert_eq!(RawValue::Number(2019.0).as_text().as_deref(), Some("2019"));
        assert_eq!(RawValue::Number(4.5).as_text().as_deref(), Some("4.5"));
    }

    #[test]
    fn test_lookup_prefers_exact_then_compact() {
        let record = RawRecord::new()
            .with("Untreated,conditional", RawValue::Number(80.0))
            .with("Depression", RawValue::Number(4.0));
        assert_eq!(
            record.lookup(&["Untreatedconditional"]),
            Some(&RawValue::Number(80.0))
        );
        assert_eq!(
            record.lookup(&["Missing", "Depression"]),
            Some(&RawValue::Number(4.0))
        );
        assert_eq!(record.lookup(&["Anxiety"]), None);
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut record = RawRecord::new();
        record.insert("Year", RawValue::Number(2015.0));
        record.insert("Year", RawValue::Number(2016.0));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Year"), Some(&RawValue::Number(2016.0)));
    }

    #[test]
    fn test_entity_requires_non_blank_text() {
        let record = RawRecord::new().with("Entity", RawValue::Null);
        assert_eq!(record.entity(), None);
        let record = RawRecord::new().with("Entity", RawValue::Text("Brazil".into()));
        assert_eq!(record.entity().as_deref(), Some("Brazil"));
    }
}
