use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::schema::payment::{
    CreatePaymentOrderRequest, PaymentListResponse, PaymentOrderResponse, PaymentResponse, VerifyPaymentRequest,
    WebhookAckResponse,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::payment::{CreatePaymentOrderDTO, GetPaymentListDTO, VerifyPaymentDTO, WebhookDTO};
use crate::application::interactors::payment::{
    CreatePaymentOrderInteractor, GetPaymentListInteractor, HandleWebhookInteractor, VerifyPaymentInteractor,
};
use crate::infra::config::AppConfig;

pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

#[utoipa::path(
    post,
    path = "/payments/orders",
    tag = "Payments",
    request_body = CreatePaymentOrderRequest,
    responses(
        (status = 201, description = "Gateway order created", body = PaymentOrderResponse),
        (status = 400, description = "Unknown target type or nobody to pay", body = ErrorResponse),
        (status = 403, description = "Only the target's client can pay", body = ErrorResponse),
        (status = 404, description = "Gig or contract not found", body = ErrorResponse),
        (status = 500, description = "Payment gateway failure", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_payment_order(
    auth_user: AuthUser,
    interactor: CreatePaymentOrderInteractor,
    State(config): State<Arc<AppConfig>>,
    ValidJson(payload): ValidJson<CreatePaymentOrderRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreatePaymentOrderDTO {
        user_id: auth_user.user_id,
        target_type: payload.target_type,
        target_id: payload.target_id,
        currency: config.payment.currency.clone(),
        key_id: config.payment.key_id.clone(),
    };
    let order = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(PaymentOrderResponse::from(order))))
}

#[utoipa::path(
    post,
    path = "/payments/verify",
    tag = "Payments",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature valid, payment captured", body = PaymentResponse),
        (
            status = 400,
            description = "Signature mismatch",
            body = ErrorResponse,
            example = json!({ "error": "Payment signature mismatch", "kind": "signature_mismatch" })
        ),
        (status = 403, description = "Caller is not the paying client", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn verify_payment(
    auth_user: AuthUser,
    interactor: VerifyPaymentInteractor,
    ValidJson(payload): ValidJson<VerifyPaymentRequest>,
) -> AppResult<Json<PaymentResponse>> {
    let dto = VerifyPaymentDTO {
        user_id: auth_user.user_id,
        order_id: payload.razorpay_order_id,
        payment_id: payload.razorpay_payment_id,
        signature: payload.razorpay_signature,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/payments/webhook",
    tag = "Payments",
    request_body(content = String, description = "Raw gateway event, signed in the `X-Razorpay-Signature` header"),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAckResponse),
        (status = 400, description = "Missing or invalid signature, or malformed body", body = ErrorResponse)
    )
)]
pub async fn payment_webhook(
    interactor: HandleWebhookInteractor,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAckResponse>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::SignatureMismatch)?;
    let dto = WebhookDTO {
        body: body.to_vec(),
        signature: signature.to_string(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Payments where the caller is payer or payee", body = PaymentListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_payment_list(
    auth_user: AuthUser,
    interactor: GetPaymentListInteractor,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<PaymentListResponse>> {
    let dto = GetPaymentListDTO {
        user_id: auth_user.user_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rstest::rstest;
    use tower::ServiceExt;

    use crate::adapter::crypto::signature::sign;
    use crate::adapter::http::routes::payment::SIGNATURE_HEADER;
    use crate::infra::app::create_app;
    use crate::infra::state::AppState;
    use crate::tests::fixtures::{lazy_app_state, TEST_WEBHOOK_SECRET};
    use crate::tests::helpers::body_json;

    fn webhook_request(body: &'static [u8], signature: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/payments/webhook")
            .header("content-type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_webhook_without_signature_is_rejected(lazy_app_state: AppState) {
        let app = create_app(lazy_app_state.config.as_ref(), lazy_app_state.clone());

        let response = app
            .oneshot(webhook_request(br#"{"event":"payment.captured","payload":{}}"#, None))
            .await
            .unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "signature_mismatch");
    }

    #[rstest]
    #[tokio::test]
    async fn test_webhook_signed_with_wrong_secret_is_rejected(lazy_app_state: AppState) {
        let app = create_app(lazy_app_state.config.as_ref(), lazy_app_state.clone());
        let body: &'static [u8] = br#"{"event":"payment.captured","payload":{}}"#;
        let signature = sign("someone_else", body).unwrap();

        let response = app.oneshot(webhook_request(body, Some(signature))).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signed_unknown_event_is_acknowledged(lazy_app_state: AppState) {
        let app = create_app(lazy_app_state.config.as_ref(), lazy_app_state.clone());
        let body: &'static [u8] = br#"{"event":"order.paid","payload":{}}"#;
        let signature = sign(TEST_WEBHOOK_SECRET, body).unwrap();

        let response = app.oneshot(webhook_request(body, Some(signature))).await.unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["event"], "order.paid");
        assert_eq!(json["handled"], false);
    }

    #[rstest]
    #[tokio::test]
    async fn test_signed_malformed_body_is_rejected(lazy_app_state: AppState) {
        let app = create_app(lazy_app_state.config.as_ref(), lazy_app_state.clone());
        let body: &'static [u8] = b"not json";
        let signature = sign(TEST_WEBHOOK_SECRET, body).unwrap();

        let response = app.oneshot(webhook_request(body, Some(signature))).await.unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation_error");
    }
}
