//! Edge Case Tests for the Account Protection Core
//!
//! Boundary conditions in:
//! - Lockout arming and expiry (LOCK-01 to LOCK-05)
//! - Session token lifetime (TOK-01 to TOK-03)
//! - Credential policy boundaries (POL-01 to POL-04)

#[cfg(test)]
mod lockout_tests {
    use time::{Duration, OffsetDateTime};

    use super::super::lockout::LockoutPolicy;

    fn at(unix: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(unix).unwrap()
    }

    // =========================================================================
    // LOCK-01: Two failures leave the account unlocked
    // =========================================================================
    #[test]
    fn two_failures_do_not_lock() {
        let policy = LockoutPolicy::default();
        assert!(policy.lockout_after(2).is_none());
    }

    // =========================================================================
    // LOCK-02: The third failure arms exactly two minutes of lockout
    // =========================================================================
    #[test]
    fn third_failure_locks_for_two_minutes() {
        let policy = LockoutPolicy::default();
        assert_eq!(policy.lockout_after(3), Some(Duration::minutes(2)));
    }

    // =========================================================================
    // LOCK-03: One second before expiry the account is still locked
    // =========================================================================
    #[test]
    fn locked_one_second_before_expiry() {
        let now = at(1_700_000_000);
        let until = now + Duration::seconds(1);
        assert!(LockoutPolicy::is_locked(Some(until), now));
    }

    // =========================================================================
    // LOCK-04: At the expiry instant the next attempt is evaluated normally
    // =========================================================================
    #[test]
    fn unlocked_at_the_expiry_instant() {
        let now = at(1_700_000_000);
        assert!(!LockoutPolicy::is_locked(Some(now), now));
    }

    // =========================================================================
    // LOCK-05: A failure after expiry relocks immediately (counter stayed >= 3)
    // =========================================================================
    #[test]
    fn failure_after_expiry_relocks() {
        let policy = LockoutPolicy::default();
        // Counter was 3 when the first lockout armed; the post-expiry
        // failure takes it to 4 and must re-arm.
        assert_eq!(policy.lockout_after(4), Some(Duration::minutes(2)));
    }
}

#[cfg(test)]
mod token_tests {
    use std::sync::Arc;

    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    use resumatch_shared::{Clock, SystemClock};

    use super::super::jwt::{Claims, JwtManager, TokenError, SESSION_TTL};

    const SECRET: &str = "test-secret-key-for-edge-cases";

    fn manager() -> JwtManager {
        JwtManager::new(SECRET, SESSION_TTL, Arc::new(SystemClock))
    }

    fn token_expiring_in(secs: i64) -> String {
        let now = SystemClock.now_utc().unix_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "jane_doe".to_string(),
            iat: now - 60,
            exp: now + secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    // =========================================================================
    // TOK-01: A token still inside its 30-minute window is accepted
    // =========================================================================
    #[test]
    fn token_is_accepted_before_expiry() {
        assert!(manager().verify_token(&token_expiring_in(30)).is_ok());
    }

    // =========================================================================
    // TOK-02: A token past its window is rejected as expired
    // =========================================================================
    #[test]
    fn token_is_rejected_after_expiry() {
        assert!(matches!(
            manager().verify_token(&token_expiring_in(-30)),
            Err(TokenError::Expired)
        ));
    }

    // =========================================================================
    // TOK-03: A wrong-secret token is rejected even with a far-future expiry
    // =========================================================================
    #[test]
    fn wrong_secret_beats_claimed_expiry() {
        let foreign = JwtManager::new("another-secret", SESSION_TTL, Arc::new(SystemClock));
        let token = foreign
            .generate_token(Uuid::new_v4(), "jane_doe")
            .unwrap();

        assert!(matches!(
            manager().verify_token(&token),
            Err(TokenError::InvalidSignature)
        ));
    }
}

#[cfg(test)]
mod policy_tests {
    use super::super::policy::{validate_password, validate_username};

    // =========================================================================
    // POL-01: Username length boundaries (4 and 20 pass; 3 and 21 fail)
    // =========================================================================
    #[test]
    fn username_length_boundaries() {
        assert!(validate_username("abcd").is_ok());
        assert!(validate_username(&"a".repeat(20)).is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    // =========================================================================
    // POL-02: Password length boundary sits at exactly 16 characters
    // =========================================================================
    #[test]
    fn password_length_boundary() {
        assert!(validate_password("Abcdefghijklm1!x").is_ok()); // 16
        assert!(validate_password("Abcdefghijklm1!").is_err()); // 15
    }

    // =========================================================================
    // POL-03: Every character in the special set satisfies the rule
    // =========================================================================
    #[test]
    fn each_special_character_is_accepted() {
        for special in "!@#$%^&*()_-+=<>?".chars() {
            let password = format!("Abcdefghijklmn1{special}");
            assert!(
                validate_password(&password).is_ok(),
                "rejected special character {special:?}"
            );
        }
    }

    // =========================================================================
    // POL-04: Characters outside the special set do not satisfy the rule
    // =========================================================================
    #[test]
    fn other_punctuation_does_not_count_as_special() {
        assert!(validate_password("Abcdefghijklmn1.").is_err());
        assert!(validate_password("Abcdefghijklmn1 ").is_err());
        assert!(validate_password("Abcdefghijklmn1~").is_err());
    }
}
