pub mod security {
    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Algorithm, Argon2, Params, Version,
    };

    use crate::{domain::service::PasswordHashService, error::security::PasswordHashError};

    pub struct Argon2HashService(Argon2<'static>);

    impl Argon2HashService {
        pub fn new() -> Self {
            Self(Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(
                    Params::DEFAULT_M_COST,
                    Params::DEFAULT_T_COST,
                    Params::DEFAULT_P_COST,
                    Some(Params::DEFAULT_OUTPUT_LEN),
                )
                .expect("Expect valid default Argon2 params"),
            ))
        }
    }

    impl Default for Argon2HashService {
        fn default() -> Self {
            Self::new()
        }
    }

    impl PasswordHashService for Argon2HashService {
        fn hash_password(&self, pwd: &str) -> Result<String, PasswordHashError> {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            let hash = self.0.hash_password(pwd.as_bytes(), &salt)?;
            Ok(hash.to_string())
        }
    }

    #[cfg(test)]
    mod tests {
        use argon2::password_hash::{PasswordHash, PasswordVerifier};

        use super::*;

        #[test]
        fn hashes_into_verifiable_phc_string() {
            let service = Argon2HashService::new();
            let hash = service.hash_password("secure:12345678").unwrap();
            assert!(hash.starts_with("$argon2id$v=19$"));

            let parsed = PasswordHash::new(&hash).unwrap();
            assert!(service.0.verify_password(b"secure:12345678", &parsed).is_ok());
            assert!(matches!(
                service.0.verify_password(b"secure:87654321", &parsed),
                Err(password_hash::Error::Password)
            ));
        }

        #[test]
        fn salts_every_hash() {
            let service = Argon2HashService::new();
            let first = service.hash_password("same").unwrap();
            let second = service.hash_password("same").unwrap();
            assert_ne!(first, second);
        }
    }
}
