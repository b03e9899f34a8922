//! Property tests for header normalisation and line splitting.

use mhd_ingest::{normalize_header, split_fields};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in any::<String>()) {
        let once = normalize_header(&raw);
        prop_assert_eq!(normalize_header(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_header_like_text(
        raw in r"[A-Za-z ()\-:,%\t]{0,40}"
    ) {
        let once = normalize_header(&raw);
        prop_assert_eq!(normalize_header(&once), once.clone());
        prop_assert!(!once.chars().any(char::is_whitespace));
    }

    #[test]
    fn split_without_quotes_matches_plain_split(line in r"[a-z0-9 ,.]{0,40}") {
        let expected: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
        prop_assert_eq!(split_fields(&line), expected);
    }
}
