//! Prompt input validation
//!
//! The prompt layer re-asks on failure, so every rule here maps to one
//! user-facing message. Validators are pure functions over the raw input
//! string and are safe to call from `cliclack`'s validate hooks.

use thiserror::Error;

/// A rejected prompt input, carrying the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("API prefix has to begin with a `/`.")]
    MissingLeadingSlash,

    #[error("please enter API prefix without trailing  `/`.")]
    TrailingSlash,

    #[error("Can’t be an empty string.")]
    EmptyString,
}

/// Validate an API URL prefix (e.g. `/api`).
///
/// The leading-slash rule is checked before the trailing-slash rule, so a
/// bare `/` is rejected with the trailing-slash message.
pub fn validate_api_prefix(input: &str) -> Result<(), ValidationError> {
    if !input.starts_with('/') {
        return Err(ValidationError::MissingLeadingSlash);
    }
    if input.ends_with('/') {
        return Err(ValidationError::TrailingSlash);
    }
    Ok(())
}

/// Validate a custom header name or value.
///
/// Whitespace-only input counts as empty.
pub fn validate_custom_header(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyString);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_prefix_accepts_leading_slash() {
        assert_eq!(validate_api_prefix("/api"), Ok(()));
        assert_eq!(validate_api_prefix("/api/v2"), Ok(()));
    }

    #[test]
    fn test_api_prefix_rejects_missing_leading_slash() {
        assert_eq!(
            validate_api_prefix("api"),
            Err(ValidationError::MissingLeadingSlash)
        );
        assert_eq!(
            validate_api_prefix(""),
            Err(ValidationError::MissingLeadingSlash)
        );
    }

    #[test]
    fn test_api_prefix_rejects_trailing_slash() {
        assert_eq!(
            validate_api_prefix("/api/"),
            Err(ValidationError::TrailingSlash)
        );
    }

    #[test]
    fn test_api_prefix_bare_slash_hits_trailing_rule() {
        // "/" passes the leading-slash check, so the trailing rule reports it
        assert_eq!(validate_api_prefix("/"), Err(ValidationError::TrailingSlash));
    }

    #[test]
    fn test_api_prefix_messages_are_verbatim() {
        assert_eq!(
            validate_api_prefix("api").unwrap_err().to_string(),
            "API prefix has to begin with a `/`."
        );
        assert_eq!(
            validate_api_prefix("/api/").unwrap_err().to_string(),
            "please enter API prefix without trailing  `/`."
        );
    }

    #[test]
    fn test_custom_header_accepts_non_empty() {
        assert_eq!(validate_custom_header("x-powered-by"), Ok(()));
    }

    #[test]
    fn test_custom_header_rejects_empty() {
        assert_eq!(
            validate_custom_header(""),
            Err(ValidationError::EmptyString)
        );
    }

    #[test]
    fn test_custom_header_rejects_whitespace_only() {
        assert_eq!(
            validate_custom_header("   "),
            Err(ValidationError::EmptyString)
        );
        assert_eq!(
            validate_custom_header("\t\n"),
            Err(ValidationError::EmptyString)
        );
    }

    #[test]
    fn test_custom_header_message_is_verbatim() {
        assert_eq!(
            validate_custom_header(" ").unwrap_err().to_string(),
            "Can’t be an empty string."
        );
    }

    #[test]
    fn test_validators_are_deterministic() {
        for input in ["/api", "/api/", "api", "/", "", "   ", "x-powered-by"] {
            assert_eq!(validate_api_prefix(input), validate_api_prefix(input));
            assert_eq!(validate_custom_header(input), validate_custom_header(input));
        }
    }
}
