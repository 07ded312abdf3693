use async_trait::async_trait;

use crate::application::app_error::AppResult;

#[async_trait]
pub trait CredentialsHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> AppResult<String>;
    async fn verify_password(&self, password: &str, hashed: &str) -> AppResult<bool>;
}

/// Authenticity checks for payment gateway callbacks.
pub trait SignatureVerifier: Send + Sync {
    /// Client checkout callback, signed over `order_id|payment_id` with the API secret.
    fn verify_payment(&self, order_id: &str, payment_id: &str, signature: &str) -> AppResult<()>;
    /// Server-to-server webhook, signed over the raw body with the webhook secret.
    fn verify_webhook(&self, body: &[u8], signature: &str) -> AppResult<()>;
}
