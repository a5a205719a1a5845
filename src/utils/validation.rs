//! Validation of search text received from users.

/// Longest search text accepted (characters)
pub const MAX_QUERY_LENGTH: usize = 256;

/// Security validation error types
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty search query")]
    EmptyQuery,
    #[error("Search query too long: exceeds {MAX_QUERY_LENGTH} characters")]
    QueryTooLong,
    #[error("Search query contains control characters")]
    InvalidCharacters,
}

/// Validate raw search text before classification.
///
/// Returns the trimmed text. Rejects empty input, input longer than
/// [`MAX_QUERY_LENGTH`], and input containing control characters (null bytes,
/// newlines inside the text) that no location, rs-number or gene symbol contains.
///
/// # Errors
///
/// Returns `ValidationError::EmptyQuery`, `ValidationError::QueryTooLong` or
/// `ValidationError::InvalidCharacters`.
///
/// # Examples
///
/// ```
/// use fivex_search::utils::validation::{validate_query, ValidationError};
///
/// assert_eq!(validate_query("  APOE "), Ok("APOE"));
/// assert_eq!(validate_query(""), Err(ValidationError::EmptyQuery));
/// assert_eq!(validate_query("AP\0OE"), Err(ValidationError::InvalidCharacters));
/// ```
pub fn validate_query(text: &str) -> Result<&str, ValidationError> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }

    if trimmed.chars().count() > MAX_QUERY_LENGTH {
        return Err(ValidationError::QueryTooLong);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(trimmed)
}
