use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::crypto::CredentialsHasher;

/// Argon2id password hashing, run on the blocking pool.
#[derive(Default, Clone)]
pub struct ArgonPasswordHasher {
    hasher: Argon2<'static>,
}

#[async_trait]
impl CredentialsHasher for ArgonPasswordHasher {
    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|_| AppError::PasswordHashError)
        })
        .await
        .map_err(|_| AppError::PasswordHashError)?
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> AppResult<bool> {
        let password = password.to_owned();
        let hashed = hashed.to_owned();
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hashed).map_err(|_| AppError::InvalidCredentials)?;
            Ok(hasher.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|_| AppError::InvalidCredentials)?
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use crate::adapter::crypto::argon2::ArgonPasswordHasher;
    use crate::application::app_error::AppError;
    use crate::application::interface::crypto::CredentialsHasher;

    const PASSWORD: &str = "Freelance#2024";

    #[fixture]
    fn hasher() -> ArgonPasswordHasher {
        ArgonPasswordHasher::default()
    }

    #[rstest]
    #[tokio::test]
    async fn test_hash_then_verify(hasher: ArgonPasswordHasher) {
        let hash = hasher.hash_password(PASSWORD).await.unwrap();

        assert_ne!(hash, PASSWORD);
        assert!(hasher.verify_password(PASSWORD, &hash).await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn test_wrong_password_is_rejected(hasher: ArgonPasswordHasher) {
        let hash = hasher.hash_password(PASSWORD).await.unwrap();

        assert!(!hasher.verify_password("freelance#2024", &hash).await.unwrap());
    }

    #[rstest]
    #[tokio::test]
    async fn test_salts_differ(hasher: ArgonPasswordHasher) {
        let first = hasher.hash_password(PASSWORD).await.unwrap();
        let second = hasher.hash_password(PASSWORD).await.unwrap();

        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn test_malformed_hash(hasher: ArgonPasswordHasher) {
        let result = hasher.verify_password(PASSWORD, "not-a-phc-string").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }
}
