//! Username and password shape rules
//!
//! Registration rejects here before anything is hashed or stored, so a
//! failed call has no side effects.

use crate::error::ApiError;

/// Special characters a password may use to satisfy the composition rule.
const SPECIAL_CHARS: &str = "!@#$%^&*()_-+=<>?";

const USERNAME_MESSAGE: &str =
    "Username must be 4-20 characters and contain only letters, numbers, or underscores.";

const PASSWORD_MESSAGE: &str =
    "Password must contain uppercase, number, special character, and be at least 16 characters long.";

/// Usernames are 4-20 characters of ASCII letters, digits, or underscores.
pub fn validate_username(username: &str) -> Result<(), ApiError> {
    let well_formed = (4..=20).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');

    if well_formed {
        Ok(())
    } else {
        Err(ApiError::Validation(USERNAME_MESSAGE.to_string()))
    }
}

/// Passwords need an uppercase letter, a digit, a special character, and
/// at least 16 characters.
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    let long_enough = password.chars().count() >= 16;

    if has_uppercase && has_digit && has_special && long_enough {
        Ok(())
    } else {
        Err(ApiError::Validation(PASSWORD_MESSAGE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_usernames() {
        for username in ["jane", "jane_doe", "JaneDoe99", "a_b_", "x".repeat(20).as_str()] {
            assert!(validate_username(username).is_ok(), "rejected {username}");
        }
    }

    #[test]
    fn rejects_short_and_long_usernames() {
        assert!(validate_username("abc").is_err());
        assert!(validate_username(&"x".repeat(21)).is_err());
        assert!(validate_username("").is_err());
    }

    #[test]
    fn rejects_usernames_with_forbidden_characters() {
        for username in ["jane doe", "jane-doe", "jane.doe", "jane@doe", "jänedoe"] {
            assert!(validate_username(username).is_err(), "accepted {username}");
        }
    }

    #[test]
    fn accepts_a_compliant_password() {
        assert!(validate_password("Correct-Horse-Battery-9").is_ok());
    }

    #[test]
    fn rejects_password_missing_uppercase() {
        assert!(validate_password("correct-horse-battery-9").is_err());
    }

    #[test]
    fn rejects_password_missing_digit() {
        assert!(validate_password("Correct-Horse-Battery!").is_err());
    }

    #[test]
    fn rejects_password_missing_special_character() {
        assert!(validate_password("CorrectHorseBattery9x").is_err());
    }

    #[test]
    fn rejects_password_shorter_than_sixteen() {
        // 15 characters, every other rule satisfied.
        assert!(validate_password("Ab1!Ab1!Ab1!Ab1").is_err());
        // 16 characters passes.
        assert!(validate_password("Ab1!Ab1!Ab1!Ab1!").is_ok());
    }
}
