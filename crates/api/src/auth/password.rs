//! Password hashing
//!
//! Thin wrapper over bcrypt so the rest of the crate never touches the
//! algorithm directly. The plaintext is consumed here and must never be
//! logged or stored. Comparison goes through bcrypt's own constant-time
//! verify, never string equality on hashes.

use bcrypt::BcryptError;

/// Hash a plaintext password with the given cost factor.
///
/// Cost comes from configuration (`BCRYPT_COST`, default 12). bcrypt
/// generates and embeds a random salt per call, so two hashes of the
/// same password differ.
pub fn hash_password(plain: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(plain, cost)
}

/// Check a plaintext candidate against a stored hash.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plain, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost (4) keeps the test suite fast; production uses
    // the configured cost (default 12).
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("Correct-Horse-Battery-9", TEST_COST).unwrap();
        assert!(verify_password("Correct-Horse-Battery-9", &hash).unwrap());
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("Correct-Horse-Battery-9", TEST_COST).unwrap();
        assert!(!verify_password("Wrong-Horse-Battery-9", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("Correct-Horse-Battery-9", TEST_COST).unwrap();
        let second = hash_password("Correct-Horse-Battery-9", TEST_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn cost_factor_is_embedded_in_the_hash() {
        let hash = hash_password("Correct-Horse-Battery-9", TEST_COST).unwrap();
        assert!(hash.starts_with("$2b$04$"), "unexpected hash shape: {hash}");
    }

    #[test]
    fn garbage_hash_is_an_error_not_a_match() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
