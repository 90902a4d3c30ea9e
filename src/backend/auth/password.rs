/**
 * Password Hashing
 *
 * This module wraps bcrypt for one-way salted password hashing and
 * verification. Hashes embed their own salt and cost, so verification
 * needs no extra state; mismatch comparison is constant-time inside
 * bcrypt itself.
 */

use bcrypt::BcryptError;

/// Work factor used when none is configured.
///
/// Matches the cost the stored hashes were created with; raising it only
/// affects newly created hashes.
pub const DEFAULT_HASH_COST: u32 = 10;

/// Password hasher with a fixed work factor.
///
/// Constructed once at startup from `ServerConfig` and carried in
/// `AppState`. Hashing failures (work factor out of range, RNG failure)
/// are infrastructure errors, never credential errors.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    ///
    /// The bcrypt hash string (salt and cost embedded), or a `BcryptError`
    /// if hashing itself fails.
    pub fn hash(&self, plaintext: &str) -> Result<String, BcryptError> {
        bcrypt::hash(plaintext, self.cost)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Returns
    ///
    /// `Ok(true)` on a match, `Ok(false)` on a mismatch. `Err` means the
    /// comparison could not be performed at all (e.g. a malformed hash)
    /// and must be treated as an infrastructure failure by the caller.
    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, BcryptError> {
        bcrypt::verify(plaintext, hash)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost; keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hash = hasher.hash("Abc12345!").unwrap();

        assert!(hasher.verify("Abc12345!", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password_fails() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hash = hasher.hash("Abc12345!").unwrap();

        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hasher = PasswordHasher::new(TEST_COST);
        let hash = hasher.hash("Abc12345!").unwrap();

        assert_ne!(hash, "Abc12345!");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new(TEST_COST);
        let first = hasher.hash("Abc12345!").unwrap();
        let second = hasher.hash("Abc12345!").unwrap();

        // Same plaintext, different salt, different hash.
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::new(TEST_COST);
        assert!(hasher.verify("Abc12345!", "not-a-bcrypt-hash").is_err());
    }
}
