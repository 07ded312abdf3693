use std::sync::Arc;

use crate::adapter::crypto::argon2::ArgonPasswordHasher;
use crate::adapter::crypto::signature::HmacSignatureVerifier;
use crate::adapter::payment::local::LocalPaymentGateway;
use crate::adapter::payment::razorpay::RazorpayGateway;
use crate::application::interface::payment::PaymentGateway;
use crate::infra::config::{AppConfig, PaymentConfig, PaymentProvider};
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod constants;
pub mod db;
pub mod setup;
pub mod state;

fn payment_gateway(config: &PaymentConfig) -> Arc<dyn PaymentGateway> {
    match config.provider {
        PaymentProvider::Razorpay => Arc::new(RazorpayGateway::new(
            config.api_base_url.clone(),
            config.key_id.clone(),
            config.key_secret.clone(),
        )),
        PaymentProvider::Local => Arc::new(LocalPaymentGateway),
    }
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db(config).await?;
    let payment = &config.payment;

    Ok(AppState {
        pool,
        hasher: Arc::new(ArgonPasswordHasher::default()),
        config: Arc::new(config.clone()),
        payment_gateway: payment_gateway(payment),
        signature_verifier: Arc::new(HmacSignatureVerifier::new(
            payment.key_secret.clone(),
            payment.webhook_secret.clone(),
        )),
    })
}
