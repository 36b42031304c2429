//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::board::Mark;

/// Validates that a mark is `x` or `0`, ignoring case.
///
/// # Examples
///
/// ```ignore
/// validate_mark("x") // Ok
/// validate_mark("X") // Ok
/// validate_mark("o") // Err - letter o, not zero
/// ```
pub fn validate_mark(value: &str) -> Result<(), ValidationError> {
    value.parse::<Mark>().map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("mark");
        error.message = Some(err.to_string().into());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mark_valid() {
        assert!(validate_mark("x").is_ok());
        assert!(validate_mark("X").is_ok());
        assert!(validate_mark("0").is_ok());
    }

    #[test]
    fn test_validate_mark_invalid() {
        assert!(validate_mark("o").is_err()); // letter, not digit
        assert!(validate_mark("").is_err());
        assert!(validate_mark("xx").is_err());
        let err = validate_mark("y").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("invalid type y"));
    }
}
