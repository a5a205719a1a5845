//! Classify free search text into a location or a term that needs a lookup.

use crate::core::chrom::is_primary_chromosome;
use crate::core::types::{ErrorKind, LocationQuery};

/// What the classifier decided about one piece of search text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Text is a position or a range and needs no lookup
    Location(LocationQuery),
    /// Text is a dbSNP rs-number; resolve through omnisearch
    RsNumber(String),
    /// Anything else; resolve as a gene symbol or identifier
    GeneTerm(String),
    /// Text matched a location pattern but cannot be represented
    Invalid(ErrorKind),
}

/// Result of matching a coordinate field
enum Coordinate {
    Value(u64),
    /// Well-formed digits that do not fit in a `u64`
    Overflow,
}

/// Classify search text.
///
/// Every pattern must consume the whole input, surrounding whitespace included;
/// a prefix match is not a match. Callers trim with
/// [`validate_query`](crate::utils::validation::validate_query). Patterns, in order of specificity:
///
/// 1. `(chr)?{1-22|X|Y|MT}:{pos}` gives a single-base variant
/// 2. `(chr)?{1-22|X|Y|MT}:{start}-{end}` gives a range
/// 3. `rs{n}` gives an rs-number lookup
///
/// Anything else, including `chr23:100`, is a gene term. Coordinates are decimal
/// integers without a leading zero. The `chr` prefix is kept on the returned
/// chromosome.
///
/// ```
/// use fivex_search::parsing::query::{classify, Classification};
/// use fivex_search::LocationQuery;
///
/// assert_eq!(
///     classify("chr7:101258000"),
///     Classification::Location(LocationQuery::variant("chr7", 101_258_000))
/// );
/// assert_eq!(
///     classify("2:1000-2000"),
///     Classification::Location(LocationQuery::range("2", 1000, 2000))
/// );
/// assert_eq!(classify("rs7412"), Classification::RsNumber("rs7412".to_string()));
/// assert_eq!(classify("APOE"), Classification::GeneTerm("APOE".to_string()));
/// ```
#[must_use]
pub fn classify(text: &str) -> Classification {
    if text.trim().is_empty() {
        return Classification::Invalid(ErrorKind::ParseFailure);
    }

    if let Some(classification) = classify_location(text) {
        tracing::debug!("Classified '{}' as location", text);
        return classification;
    }

    if is_rs_number(text) {
        tracing::debug!("Classified '{}' as rs-number", text);
        return Classification::RsNumber(text.to_string());
    }

    tracing::debug!("Classified '{}' as gene term", text);
    Classification::GeneTerm(text.to_string())
}

/// Match the position and range patterns. `None` means neither pattern matched
/// the full text.
fn classify_location(text: &str) -> Option<Classification> {
    let (chrom, coords) = text.split_once(':')?;
    if !is_primary_chromosome(chrom) {
        return None;
    }

    // A range has exactly one '-', so a position can never swallow it
    match coords.split_once('-') {
        None => {
            let pos = parse_coordinate(coords)?;
            Some(match pos {
                Coordinate::Value(pos) => {
                    Classification::Location(LocationQuery::variant(chrom, pos))
                }
                Coordinate::Overflow => overflow(text),
            })
        }
        Some((start, end)) => {
            let start = parse_coordinate(start)?;
            let end = parse_coordinate(end)?;
            Some(match (start, end) {
                (Coordinate::Value(start), Coordinate::Value(end)) => {
                    Classification::Location(LocationQuery::range(chrom, start, end))
                }
                _ => overflow(text),
            })
        }
    }
}

fn overflow(text: &str) -> Classification {
    tracing::debug!("Coordinate out of range in query '{}'", text);
    Classification::Invalid(ErrorKind::ParseFailure)
}

/// Parse `[1-9][0-9]*`. Returns `None` when the text is not in that form.
fn parse_coordinate(s: &str) -> Option<Coordinate> {
    if !is_positive_integer(s) {
        return None;
    }
    Some(s.parse().map_or(Coordinate::Overflow, Coordinate::Value))
}

fn is_positive_integer(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b'1'..=b'9') => bytes.all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

/// Check for a dbSNP identifier such as `rs7412`
#[must_use]
pub fn is_rs_number(text: &str) -> bool {
    text.strip_prefix("rs").is_some_and(is_positive_integer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(text: &str) -> LocationQuery {
        match classify(text) {
            Classification::Location(query) => query,
            other => panic!("expected location for '{text}', got {other:?}"),
        }
    }

    #[test]
    fn test_positions() {
        assert_eq!(
            location("chr7:101258000"),
            LocationQuery::variant("chr7", 101_258_000)
        );
        assert_eq!(location("X:5530600"), LocationQuery::variant("X", 5_530_600));
        assert_eq!(location("MT:73"), LocationQuery::variant("MT", 73));
        assert_eq!(location("22:1"), LocationQuery::variant("22", 1));
    }

    #[test]
    fn test_ranges_are_not_positions() {
        assert_eq!(location("2:1000-2000"), LocationQuery::range("2", 1000, 2000));
        assert_eq!(
            location("chr19:44905000-44910000"),
            LocationQuery::range("chr19", 44_905_000, 44_910_000)
        );
        // start <= end is not checked here
        assert_eq!(location("3:500-100"), LocationQuery::range("3", 500, 100));
    }

    #[test]
    fn test_surrounding_whitespace_is_part_of_the_match() {
        for text in ["  1:12345", "1:12345 \n", " rs7412"] {
            assert_eq!(classify(text), Classification::GeneTerm(text.to_string()));
        }
    }

    #[test]
    fn test_partial_matches_fall_through_to_gene_term() {
        for text in [
            "chr23:100",
            "chr1:100-",
            "chr1:-100",
            "chr1:1-2-3",
            "chr1:0100",
            "chr1:0",
            "chr1:12a",
            "chr1:",
            "chrM:100",
            "x:100",
            "chr1 :100",
            "1:1,000",
        ] {
            assert_eq!(
                classify(text),
                Classification::GeneTerm(text.to_string()),
                "'{text}' should be a gene term"
            );
        }
    }

    #[test]
    fn test_rs_numbers() {
        assert_eq!(classify("rs7412"), Classification::RsNumber("rs7412".to_string()));
        assert!(is_rs_number("rs1"));
        assert!(!is_rs_number("rs"));
        assert!(!is_rs_number("rs0123"));
        assert!(!is_rs_number("RS7412"));
        assert!(!is_rs_number("rs7412a"));
        assert_eq!(
            classify("rs7412x"),
            Classification::GeneTerm("rs7412x".to_string())
        );
    }

    #[test]
    fn test_overflowing_coordinates_are_rejected() {
        assert_eq!(
            classify("1:99999999999999999999999"),
            Classification::Invalid(ErrorKind::ParseFailure)
        );
        assert_eq!(
            classify("1:100-99999999999999999999999"),
            Classification::Invalid(ErrorKind::ParseFailure)
        );
    }

    #[test]
    fn test_empty_input_is_invalid() {
        assert_eq!(classify(""), Classification::Invalid(ErrorKind::ParseFailure));
        assert_eq!(classify("   "), Classification::Invalid(ErrorKind::ParseFailure));
    }
}
