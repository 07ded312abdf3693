use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::crypto::SignatureVerifier;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 checks for gateway callbacks. Signatures arrive hex encoded.
#[derive(Clone)]
pub struct HmacSignatureVerifier {
    key_secret: String,
    webhook_secret: String,
}

impl HmacSignatureVerifier {
    pub fn new(key_secret: String, webhook_secret: String) -> Self {
        Self {
            key_secret,
            webhook_secret,
        }
    }

    fn verify(secret: &str, message: &[u8], signature: &str) -> AppResult<()> {
        let expected = hex::decode(signature.trim()).map_err(|_| AppError::SignatureMismatch)?;
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            warn!("Unusable signing secret: {}", e);
            AppError::SignatureMismatch
        })?;
        mac.update(message);
        // constant-time comparison
        mac.verify_slice(&expected).map_err(|_| AppError::SignatureMismatch)
    }
}

impl SignatureVerifier for HmacSignatureVerifier {
    fn verify_payment(&self, order_id: &str, payment_id: &str, signature: &str) -> AppResult<()> {
        let message = format!("{}|{}", order_id, payment_id);
        Self::verify(&self.key_secret, message.as_bytes(), signature)
    }

    fn verify_webhook(&self, body: &[u8], signature: &str) -> AppResult<()> {
        Self::verify(&self.webhook_secret, body, signature)
    }
}

/// Hex HMAC-SHA256 of `message`, the same way the gateway signs it.
pub fn sign(secret: &str, message: &[u8]) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AppError::Validation("Signing secret is not usable".to_string()))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
