//! Validation helpers for DTOs.

use validator::ValidationError;

/// Length of a league invite code.
pub const INVITE_CODE_LENGTH: usize = 8;

/// Validates that an invite code is exactly 8 uppercase alphanumerics.
///
/// # Examples
///
/// ```ignore
/// validate_invite_code("K7TQ2MRX") // Ok
/// validate_invite_code("k7tq2mrx") // Err - lowercase
/// validate_invite_code("K7TQ2")    // Err - too short
/// ```
pub fn validate_invite_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != INVITE_CODE_LENGTH {
        let mut err = ValidationError::new("invite_code_length");
        err.message = Some(
            format!(
                "Invite code must be exactly {INVITE_CODE_LENGTH} characters (got {})",
                code.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        let mut err = ValidationError::new("invite_code_format");
        err.message =
            Some("Invite code must contain only uppercase letters and digits".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invite_code_valid() {
        assert!(validate_invite_code("K7TQ2MRX").is_ok());
        assert!(validate_invite_code("AAAA2222").is_ok());
        assert!(validate_invite_code("99999999").is_ok());
    }

    #[test]
    fn test_validate_invite_code_invalid_length() {
        assert!(validate_invite_code("K7TQ2MR").is_err()); // too short
        assert!(validate_invite_code("K7TQ2MRXX").is_err()); // too long
        assert!(validate_invite_code("").is_err()); // empty
    }

    #[test]
    fn test_validate_invite_code_invalid_format() {
        assert!(validate_invite_code("k7tq2mrx").is_err()); // lowercase
        assert!(validate_invite_code("K7TQ2MR!").is_err()); // punctuation
        assert!(validate_invite_code("K7TQ 2MR").is_err()); // space
    }
}
