use crate::error::security::PasswordHashError;

/// Turns user credentials into the form kept by the store.
pub trait PasswordHashService: Send + Sync {
    /// Hashes `pwd` into a PHC string.
    fn hash_password(&self, pwd: &str) -> Result<String, PasswordHashError>;
}
