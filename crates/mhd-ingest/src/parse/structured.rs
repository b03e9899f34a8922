//! Strict delimited-text parsing with a header row.

use csv::ReaderBuilder;
use mhd_model::RawRecord;

use crate::error::{ParseError, Result};
use crate::header::ColumnLayout;

use super::{DataOrigin, ParseInput, ParseStrategy};

/// First strategy: the `csv` reader in strict mode.
///
/// Rows must have as many fields as the header; a ragged row or an
/// unterminated quote fails the whole parse so that recovery can take over.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredParser;

impl ParseStrategy for StructuredParser {
    fn origin(&self) -> DataOrigin {
        DataOrigin::Structured
    }

    fn parse(&self, input: &ParseInput<'_>) -> Result<Vec<RawRecord>> {
        parse_structured(input.require_text()?)
    }
}

/// Parses text with a header row, skipping blank lines and coercing
/// numeric-looking cells.
///
/// # Errors
///
/// - [`ParseError::Structured`] if the reader rejects the input
/// - [`ParseError::NoHeader`] if no header column has a usable key
/// - [`ParseError::InsufficientData`] if no data row remains
pub fn parse_structured(text: &str) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let layout = ColumnLayout::from_headers(&headers);
    if layout.usable() == 0 {
        return Err(ParseError::NoHeader);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        records.push(layout.record_from(row.iter()));
    }

    if records.is_empty() {
        return Err(ParseError::InsufficientData {
            strategy: DataOrigin::Structured,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhd_model::RawValue;

    #[test]
    fn test_parse_simple() {
        let records =
            parse_structured("Entity,Year,Depression(%)\nBrazil,2015,4.2\nGlobal,2015,3.9\n")
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Depression"), Some(&RawValue::Number(4.2)));
        assert_eq!(records[1].entity().as_deref(), Some("Global"));
    }

    #[test]
    fn test_parse_quoted_header_with_comma() {
        let text = "Entity,Code,Year,\"Untreated, conditional\"\nBrazil,BRA,2017,80.1\n";
        let records = parse_structured(text).unwrap();
        assert_eq!(
            records[0].get("Untreated,conditional"),
            Some(&RawValue::Number(80.1))
        );
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let records = parse_structured("Entity,Year\n\nBrazil,2015\n,\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let result = parse_structured("Entity,Year,Depression\nBrazil,2015\n");
        assert!(matches!(result, Err(ParseError::Structured { .. })));
    }

    #[test]
    fn test_parse_rejects_unterminated_quote() {
        let result = parse_structured("Entity,Year,Depression\n\"Brazil,2015,4.2\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(matches!(parse_structured(""), Err(ParseError::NoHeader)));
        assert!(matches!(
            parse_structured("Entity,Year\n"),
            Err(ParseError::InsufficientData { .. })
        ));
    }
}
