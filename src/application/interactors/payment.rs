use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::pagination::PageDTO;
use crate::application::dto::payment::{
    CapturePaymentDTO, CreatePaymentOrderDTO, GetPaymentListDTO, PaymentDTO, PaymentOrderDTO, VerifyPaymentDTO,
    WebhookAckDTO, WebhookDTO,
};
use crate::application::interface::crypto::SignatureVerifier;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::contract::{ContractReader, ContractWriter};
use crate::application::interface::gateway::gig::GigReader;
use crate::application::interface::gateway::notification::NotificationWriter;
use crate::application::interface::gateway::payment::{PaymentReader, PaymentWriter};
use crate::application::interface::gateway::user::UserWriter;
use crate::application::interface::payment::{CreateOrderRequest, PaymentGateway};
use crate::domain::entities::contract::Contract;
use crate::domain::entities::gig::Gig;
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::domain::entities::payment::{Payment, PaymentStatus, PaymentTarget};
use crate::domain::entities::user::User;
use crate::domain::services::contract_lifecycle::mark_disputed;
use crate::domain::services::settlement::net_of_fee;

#[derive(Clone)]
pub struct CreatePaymentOrderInteractor {
    db_session: Arc<dyn DBSession>,
    gig_reader: Arc<dyn GigReader>,
    contract_reader: Arc<dyn ContractReader>,
    payment_writer: Arc<dyn PaymentWriter>,
    payment_gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentOrderInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        gig_reader: Arc<dyn GigReader>,
        contract_reader: Arc<dyn ContractReader>,
        payment_writer: Arc<dyn PaymentWriter>,
        payment_gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            db_session,
            gig_reader,
            contract_reader,
            payment_writer,
            payment_gateway,
        }
    }

    /// Resolves `(target, client, freelancer, amount)` for the payable item.
    async fn resolve_target(
        &self,
        target_type: &str,
        target_id: String,
    ) -> AppResult<(PaymentTarget, Id<User>, Id<User>, i64)> {
        match target_type {
            "gig" => {
                let gig_id: Id<Gig> = target_id.try_into()?;
                let gig = self.gig_reader.find_by_id(&gig_id).await?.ok_or(AppError::GigNotFound)?;
                let freelancer_id = gig
                    .freelancer_id
                    .ok_or_else(|| AppError::Validation("No freelancer is assigned to this gig".to_string()))?;
                Ok((PaymentTarget::Gig(gig.id), gig.client_id, freelancer_id, gig.budget))
            }
            "contract" => {
                let contract_id: Id<Contract> = target_id.try_into()?;
                let contract = self
                    .contract_reader
                    .find_by_id(&contract_id)
                    .await?
                    .ok_or(AppError::ContractNotFound)?;
                Ok((
                    PaymentTarget::Contract(contract.id),
                    contract.client_id,
                    contract.freelancer_id,
                    contract.budget,
                ))
            }
            other => Err(AppError::Validation(format!("Unknown payment target `{}`", other))),
        }
    }

    pub async fn execute(&self, dto: CreatePaymentOrderDTO) -> AppResult<PaymentOrderDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let (target, client_id, freelancer_id, amount) = self.resolve_target(&dto.target_type, dto.target_id).await?;
        if client_id != user_id {
            return Err(AppError::Forbidden("Only the client can pay for this item".to_string()));
        }

        let target_id = match &target {
            PaymentTarget::Gig(id) => id.value.to_string(),
            PaymentTarget::Contract(id) => id.value.to_string(),
        };
        let order = self
            .payment_gateway
            .create_order(CreateOrderRequest {
                amount,
                currency: dto.currency,
                receipt: format!("{}_{}", target.kind(), Utc::now().timestamp_millis()),
                notes: json!({
                    "target_type": target.kind(),
                    "target_id": target_id,
                    "client_id": client_id.value.to_string(),
                    "freelancer_id": freelancer_id.value.to_string(),
                }),
            })
            .await?;

        let payment = Payment::new(
            order.order_id,
            client_id,
            freelancer_id,
            target,
            order.amount,
            order.currency,
        );
        self.payment_writer.insert(payment.clone()).await?;
        self.db_session.commit().await?;
        info!("Payment order {} created for {} {}", payment.order_id, payment.target.kind(), target_id);

        Ok(PaymentOrderDTO {
            payment_id: payment.id.value.to_string(),
            order_id: payment.order_id,
            amount: payment.amount,
            currency: payment.currency,
            key_id: dto.key_id,
        })
    }
}

/// The one capture path shared by the checkout callback and the webhook.
/// Keyed on `order_id`: only the first capture credits the users.
#[derive(Clone)]
pub struct CapturePaymentInteractor {
    db_session: Arc<dyn DBSession>,
    payment_reader: Arc<dyn PaymentReader>,
    payment_writer: Arc<dyn PaymentWriter>,
    user_writer: Arc<dyn UserWriter>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl CapturePaymentInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        payment_reader: Arc<dyn PaymentReader>,
        payment_writer: Arc<dyn PaymentWriter>,
        user_writer: Arc<dyn UserWriter>,
        notification_writer: Arc<dyn NotificationWriter>,
    ) -> Self {
        Self {
            db_session,
            payment_reader,
            payment_writer,
            user_writer,
            notification_writer,
        }
    }

    async fn capture(&self, payment: Payment, payment_id: String) -> AppResult<Payment> {
        if !self.payment_writer.capture(&payment.order_id, &payment_id).await? {
            info!("Order {} already captured, nothing to do", payment.order_id);
            return Ok(payment);
        }

        let earned = net_of_fee(payment.amount);
        self.user_writer
            .record_payment_totals(&payment.client_id, &payment.freelancer_id, payment.amount, earned)
            .await?;

        let notification = Notification::new(
            payment.freelancer_id.clone(),
            NotificationKind::PaymentCaptured,
            "Payment received",
            format!("A payment of {} {} was captured", payment.amount, payment.currency),
            json!({
                "order_id": payment.order_id,
                "payment_id": payment_id,
                "amount": payment.amount,
                "net_amount": earned,
            }),
        );
        self.notification_writer.insert(notification).await?;

        let mut payment = payment;
        payment.status = PaymentStatus::Paid;
        payment.payment_id = Some(payment_id);
        payment.updated_at = Utc::now();
        info!("Order {} captured", payment.order_id);
        Ok(payment)
    }

    pub async fn execute(&self, dto: CapturePaymentDTO) -> AppResult<PaymentDTO> {
        let payment = self
            .payment_reader
            .find_by_order_id(&dto.order_id)
            .await?
            .ok_or(AppError::PaymentNotFound)?;
        let payment = self.capture(payment, dto.payment_id).await?;
        self.db_session.commit().await?;
        Ok(payment.into())
    }
}

#[derive(Clone)]
pub struct VerifyPaymentInteractor {
    signature_verifier: Arc<dyn SignatureVerifier>,
    payment_reader: Arc<dyn PaymentReader>,
    capture: CapturePaymentInteractor,
}

impl VerifyPaymentInteractor {
    pub fn new(
        signature_verifier: Arc<dyn SignatureVerifier>,
        payment_reader: Arc<dyn PaymentReader>,
        capture: CapturePaymentInteractor,
    ) -> Self {
        Self {
            signature_verifier,
            payment_reader,
            capture,
        }
    }

    pub async fn execute(&self, dto: VerifyPaymentDTO) -> AppResult<PaymentDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        if let Err(err) = self
            .signature_verifier
            .verify_payment(&dto.order_id, &dto.payment_id, &dto.signature)
        {
            warn!("Rejected checkout callback for order {}", dto.order_id);
            return Err(err);
        }

        let payment = self
            .payment_reader
            .find_by_order_id(&dto.order_id)
            .await?
            .ok_or(AppError::PaymentNotFound)?;
        if payment.client_id != user_id {
            return Err(AppError::Forbidden("Only the paying client can confirm this payment".to_string()));
        }

        self.capture
            .execute(CapturePaymentDTO {
                order_id: dto.order_id,
                payment_id: dto.payment_id,
            })
            .await
    }
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    payload: WebhookPayload,
}

#[derive(Debug, Default, Deserialize)]
struct WebhookPayload {
    payment: Option<WebhookEntity<WebhookPayment>>,
}

#[derive(Debug, Deserialize)]
struct WebhookEntity<T> {
    entity: T,
}

#[derive(Debug, Deserialize)]
struct WebhookPayment {
    id: String,
    order_id: String,
}

#[derive(Clone)]
pub struct HandleWebhookInteractor {
    db_session: Arc<dyn DBSession>,
    signature_verifier: Arc<dyn SignatureVerifier>,
    payment_reader: Arc<dyn PaymentReader>,
    payment_writer: Arc<dyn PaymentWriter>,
    contract_reader: Arc<dyn ContractReader>,
    contract_writer: Arc<dyn ContractWriter>,
    notification_writer: Arc<dyn NotificationWriter>,
    capture: CapturePaymentInteractor,
}

impl HandleWebhookInteractor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db_session: Arc<dyn DBSession>,
        signature_verifier: Arc<dyn SignatureVerifier>,
        payment_reader: Arc<dyn PaymentReader>,
        payment_writer: Arc<dyn PaymentWriter>,
        contract_reader: Arc<dyn ContractReader>,
        contract_writer: Arc<dyn ContractWriter>,
        notification_writer: Arc<dyn NotificationWriter>,
        capture: CapturePaymentInteractor,
    ) -> Self {
        Self {
            db_session,
            signature_verifier,
            payment_reader,
            payment_writer,
            contract_reader,
            contract_writer,
            notification_writer,
            capture,
        }
    }

    async fn payment_of(&self, event: &WebhookEvent) -> AppResult<(Payment, String)> {
        let entity = event
            .payload
            .payment
            .as_ref()
            .ok_or_else(|| AppError::Validation(format!("Webhook `{}` carries no payment", event.event)))?;
        let payment = self
            .payment_reader
            .find_by_order_id(&entity.entity.order_id)
            .await?
            .ok_or(AppError::PaymentNotFound)?;
        Ok((payment, entity.entity.id.clone()))
    }

    async fn notify(
        &self,
        recipient: Id<User>,
        kind: NotificationKind,
        title: &str,
        message: String,
        payment: &Payment,
    ) -> AppResult<()> {
        let notification = Notification::new(
            recipient,
            kind,
            title,
            message,
            json!({
                "order_id": payment.order_id,
                "target_type": payment.target.kind(),
            }),
        );
        self.notification_writer.insert(notification).await?;
        Ok(())
    }

    async fn payment_failed(&self, payment: Payment, payment_id: String) -> AppResult<()> {
        if self.payment_writer.mark_failed(&payment.order_id, Some(payment_id)).await? {
            self.notify(
                payment.client_id.clone(),
                NotificationKind::PaymentFailed,
                "Payment failed",
                format!("Your payment for order {} failed", payment.order_id),
                &payment,
            )
            .await?;
        }
        self.db_session.commit().await
    }

    async fn payment_disputed(&self, payment: Payment) -> AppResult<()> {
        if let PaymentTarget::Contract(contract_id) = &payment.target {
            if let Some(mut contract) = self.contract_reader.find_by_id(contract_id).await? {
                match mark_disputed(&mut contract, Utc::now()) {
                    Ok(previous) => {
                        if !self.contract_writer.update_status(&contract, previous).await? {
                            warn!("Contract {} changed while recording a dispute", contract.id);
                        }
                    }
                    Err(err) => warn!("Dispute on contract {} not applied: {}", contract.id, err),
                }
            }
        }

        for recipient in [payment.client_id.clone(), payment.freelancer_id.clone()] {
            self.notify(
                recipient,
                NotificationKind::PaymentDisputed,
                "Payment disputed",
                format!("A dispute was raised on order {}", payment.order_id),
                &payment,
            )
            .await?;
        }
        self.db_session.commit().await
    }

    pub async fn execute(&self, dto: WebhookDTO) -> AppResult<WebhookAckDTO> {
        if let Err(err) = self.signature_verifier.verify_webhook(&dto.body, &dto.signature) {
            warn!("Rejected webhook with a bad signature");
            return Err(err);
        }
        let event: WebhookEvent = serde_json::from_slice(&dto.body)
            .map_err(|e| AppError::Validation(format!("Malformed webhook body: {}", e)))?;

        let handled = match event.event.as_str() {
            "payment.captured" => {
                let (payment, payment_id) = self.payment_of(&event).await?;
                self.capture
                    .execute(CapturePaymentDTO {
                        order_id: payment.order_id,
                        payment_id,
                    })
                    .await?;
                true
            }
            "payment.failed" => {
                let (payment, payment_id) = self.payment_of(&event).await?;
                self.payment_failed(payment, payment_id).await?;
                true
            }
            "payment.dispute.created" => {
                let (payment, _) = self.payment_of(&event).await?;
                self.payment_disputed(payment).await?;
                true
            }
            other => {
                info!("Ignoring webhook event {}", other);
                false
            }
        };

        Ok(WebhookAckDTO {
            event: event.event,
            handled,
        })
    }
}

#[derive(Clone)]
pub struct GetPaymentListInteractor {
    payment_reader: Arc<dyn PaymentReader>,
}

impl GetPaymentListInteractor {
    pub fn new(payment_reader: Arc<dyn PaymentReader>) -> Self {
        Self { payment_reader }
    }

    pub async fn execute(&self, dto: GetPaymentListDTO) -> AppResult<PageDTO<PaymentDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let (page, per_page, offset) = dto.page.bounds();
        let total = self.payment_reader.count_for_user(&user_id).await?;
        let payments = self.payment_reader.get_for_user(&user_id, per_page, offset).await?;
        Ok(PageDTO {
            total,
            page,
            per_page,
            items: payments.into_iter().map(PaymentDTO::from).collect(),
        })
    }
}
