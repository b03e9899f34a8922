//! Header canonicalisation and column layout.
//!
//! Source headers are long human-readable labels such as
//! `"Depressive disorders (share of population) - Sex: Both - Age: Age-standardized"`.
//! [`normalize_header`] reduces them to stable keys (`"Depressivedisorders"`)
//! and [`ColumnLayout`] assigns each column its key, resolving collisions and
//! dropping columns whose key is empty.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use mhd_model::{RawRecord, RawValue};
use regex::Regex;

/// Parenthesised annotation, shortest match, may span lines.
static PARENTHESIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\(.*?\)").expect("Invalid parenthesis regex"));

/// Everything from the first whitespace-delimited hyphen to the end.
static HYPHEN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\s-\s.*$").expect("Invalid hyphen-suffix regex"));

/// Canonicalises a raw header.
///
/// Removes byte-order marks and parenthesised annotations, cuts the text
/// after a `" - "` separator, then removes all whitespace. The result is a
/// fixed point: normalising it again returns it unchanged. It may be empty.
pub fn normalize_header(raw: &str) -> String {
    let without_bom: String = raw.chars().filter(|&ch| ch != '\u{feff}').collect();
    let without_parens = PARENTHESIZED.replace_all(&without_bom, "");
    let without_suffix = HYPHEN_SUFFIX.replace(&without_parens, "");
    without_suffix
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect()
}

/// Alphanumeric characters of a raw header, case preserved.
///
/// Used as the key for columns whose canonical keys collide, e.g.
/// `"DALYsrateSexBothAgeAgestandardizedCauseDepressivedisorders"`.
pub fn compact_header(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_alphanumeric()).collect()
}

/// Key assignment for every column of a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    keys: Vec<Option<String>>,
}

impl ColumnLayout {
    /// Builds the layout for a header row.
    ///
    /// Columns whose canonical key is shared with another column are keyed
    /// by their compact form instead. Columns left with an empty or
    /// duplicate key are unusable and skipped.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let canonical: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for key in &canonical {
            *counts.entry(key.as_str()).or_default() += 1;
        }

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(headers.len());
        for (raw, key) in headers.iter().zip(&canonical) {
            let key = if counts.get(key.as_str()).copied().unwrap_or(0) > 1 {
                compact_header(raw.as_ref())
            } else {
                key.clone()
            };
            if key.is_empty() || !seen.insert(key.clone()) {
                tracing::debug!(header = raw.as_ref(), "skipping unusable column");
                keys.push(None);
            } else {
                keys.push(Some(key));
            }
        }
        Self { keys }
    }

    /// Number of columns in the header row, usable or not.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of columns with a usable key.
    pub fn usable(&self) -> usize {
        self.keys.iter().flatten().count()
    }

    /// Key of a column, `None` if the column is skipped or out of range.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).and_then(Option::as_deref)
    }

    /// Maps a row of cells onto the layout, coercing each cell.
    ///
    /// Cells beyond the header width and cells of skipped columns are
    /// dropped; missing trailing cells are simply absent.
    pub fn record_from<'a, I>(&self, cells: I) -> RawRecord
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut record = RawRecord::new();
        for (index, cell) in cells.into_iter().enumerate() {
            if let Some(key) = self.key(index) {
                record.insert(key, RawValue::coerce(cell));
            }
        }
        record
    }
}
