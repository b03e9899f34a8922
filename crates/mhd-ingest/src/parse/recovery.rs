//! Line-oriented recovery for text the strict reader rejects.

use mhd_model::RawRecord;

use crate::error::{ParseError, Result};
use crate::header::ColumnLayout;

use super::{DataOrigin, ParseInput, ParseStrategy};

/// Minimum number of fields a recovered line must have.
const MIN_FIELDS: usize = 3;

/// Second strategy: splits lines by hand and keeps the plausible ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecoveryParser;

impl ParseStrategy for RecoveryParser {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Recovered
    }

    fn parse(&self, input: &ParseInput<'_>) -> Result<Vec<RawRecord>> {
        parse_recovered(input.require_text()?)
    }
}

/// Splits a line on commas, honouring double quotes.
///
/// A comma inside quotes does not split, `""` inside quotes is a literal
/// quote, and every field is trimmed. An unterminated quote swallows the
/// rest of the line into the current field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Parses text one line at a time.
///
/// The first non-blank line is the header. A data line is kept when it has
/// at least three fields, a non-blank `Entity`, and a non-blank `Year` or
/// `Code`.
///
/// # Errors
///
/// - [`ParseError::NoHeader`] if there is no non-blank line
/// - [`ParseError::InsufficientData`] if no line is kept
pub fn parse_recovered(text: &str) -> Result<Vec<RawRecord>> {
    let mut lines = text
        .split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or(ParseError::NoHeader)?;
    let layout = ColumnLayout::from_headers(&split_fields(header));
    if layout.usable() == 0 {
        return Err(ParseError::NoHeader);
    }

    let mut records = Vec::new();
    let mut rejected = 0_usize;
    for (line_number, line) in lines {
        let fields = split_fields(line);
        if fields.len() < MIN_FIELDS {
            tracing::trace!(
                line = line_number,
                fields = fields.len(),
                reason = "too few fields",
                "line rejected"
            );
            rejected += 1;
            continue;
        }
        let record = layout.record_from(fields.iter().map(String::as_str));
        if is_plausible(&record) {
            tracing::trace!(line = line_number, "line kept");
            records.push(record);
        } else {
            tracing::trace!(
                line = line_number,
                reason = "no entity, or neither year nor code",
                "line rejected"
            );
            rejected += 1;
        }
    }

    if rejected > 0 {
        tracing::debug!(kept = records.len(), rejected, "recovery dropped lines");
    }
    if records.is_empty() {
        return Err(ParseError::InsufficientData {
            strategy: DataOrigin::Recovered,
        });
    }
    Ok(records)
}

fn is_plausible(record: &RawRecord) -> bool {
    let present = |key: &str| record.get(key).is_some_and(|value| !value.is_empty());
    record.entity().is_some() && (present("Year") || present("Code"))
}
