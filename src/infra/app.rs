use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{self, HeaderName};
use axum::routing::{get, patch, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use crate::adapter::http::docs::{docs_ui, openapi_json};
use crate::adapter::http::middleware::auth::auth_middleware;
use crate::adapter::http::routes::payment::SIGNATURE_HEADER;
use crate::adapter::http::routes::{
    auth, contract, discussion, gig, invitation, notification, payment, presence, project, user, withdrawal,
    workspace,
};
use crate::infra::config::AppConfig;
use crate::infra::state::AppState;

const ALLOWED_METHODS: [http::Method; 4] = [
    http::Method::POST,
    http::Method::GET,
    http::Method::PATCH,
    http::Method::DELETE,
];

fn allowed_headers() -> [HeaderName; 3] {
    [CONTENT_TYPE, COOKIE, HeaderName::from_static(SIGNATURE_HEADER)]
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    let has_wildcard = config.application.allow_origins.iter().any(|s| s == "*");

    if has_wildcard {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers(allowed_headers());
    }
    let origins: Vec<http::HeaderValue> = config
        .application
        .allow_origins
        .iter()
        .filter_map(|s| {
            s.parse::<http::HeaderValue>()
                .map_err(|e| {
                    tracing::warn!("Failed to parse origin '{}': {}", s, e);
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(allowed_headers())
        .allow_credentials(true)
}

fn protected(state: &AppState, routes: Router<AppState>) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

pub fn auth_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/login", post(auth::login));
    let protected_routes = protected(&state, Router::new().route("/logout", post(auth::logout)));

    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn user_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/register", post(user::register));
    let protected_routes = protected(
        &state,
        Router::new().route("/me", get(user::get_me).patch(user::update_profile)),
    );

    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn workspace_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route("/", post(workspace::create_workspace).get(workspace::get_workspace_list))
            .route(
                "/{workspace_id}",
                get(workspace::get_workspace)
                    .patch(workspace::update_workspace)
                    .delete(workspace::delete_workspace),
            )
            .route("/{workspace_id}/members", get(workspace::get_workspace_members))
            .route(
                "/{workspace_id}/members/{user_id}",
                patch(workspace::update_member_role).delete(workspace::remove_member),
            )
            .route("/{workspace_id}/leave", post(workspace::leave_workspace))
            .route("/{workspace_id}/invitations", post(invitation::invite_member))
            .route(
                "/{workspace_id}/projects",
                post(project::create_project).get(project::get_project_list),
            )
            .route(
                "/{workspace_id}/discussions",
                post(discussion::create_discussion).get(discussion::get_discussion_list),
            ),
    )
}

pub fn invitation_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route("/", get(invitation::get_my_invitations))
            .route("/{token}/accept", post(invitation::accept_invitation))
            .route("/{token}/decline", post(invitation::decline_invitation)),
    )
}

pub fn project_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route(
                "/{project_id}",
                get(project::get_project)
                    .patch(project::update_project)
                    .delete(project::delete_project),
            )
            .route("/{project_id}/members", post(project::assign_project_member)),
    )
}

pub fn discussion_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route(
                "/{discussion_id}",
                get(discussion::get_discussion).patch(discussion::update_discussion),
            )
            .route("/{discussion_id}/messages", post(discussion::post_message)),
    )
}

pub fn gig_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/", get(gig::get_open_gigs))
        .route("/{gig_id}", get(gig::get_gig));
    let protected_routes = protected(
        &state,
        Router::new()
            .route("/", post(gig::create_gig))
            .route("/{gig_id}/accept", post(gig::accept_gig))
            .route("/{gig_id}/complete", post(gig::complete_gig)),
    );

    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn contract_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route("/", post(contract::create_contract).get(contract::get_contract_list))
            .route("/{contract_id}", get(contract::get_contract))
            .route("/{contract_id}/status", patch(contract::update_contract_status))
            .route(
                "/{contract_id}/milestones/{milestone_id}",
                patch(contract::update_milestone_status),
            ),
    )
}

pub fn payment_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/webhook", post(payment::payment_webhook));
    let protected_routes = protected(
        &state,
        Router::new()
            .route("/", get(payment::get_payment_list))
            .route("/orders", post(payment::create_payment_order))
            .route("/verify", post(payment::verify_payment)),
    );

    Router::new().merge(public_routes).merge(protected_routes)
}

pub fn withdrawal_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route(
                "/",
                post(withdrawal::request_withdrawal).get(withdrawal::get_withdrawal_list),
            )
            .route("/balance", get(withdrawal::get_balance))
            .route("/{withdrawal_id}/cancel", post(withdrawal::cancel_withdrawal)),
    )
}

pub fn notification_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route("/", get(notification::get_notification_list))
            .route("/read-all", post(notification::mark_all_notifications_read))
            .route("/{notification_id}/read", post(notification::mark_notification_read)),
    )
}

pub fn presence_router(state: AppState) -> Router<AppState> {
    protected(
        &state,
        Router::new()
            .route("/heartbeat", post(presence::heartbeat))
            .route("/online", get(presence::get_online_users)),
    )
}

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_router(state.clone()))
        .nest("/users", user_router(state.clone()))
        .nest("/workspaces", workspace_router(state.clone()))
        .nest("/invitations", invitation_router(state.clone()))
        .nest("/projects", project_router(state.clone()))
        .nest("/discussions", discussion_router(state.clone()))
        .nest("/gigs", gig_router(state.clone()))
        .nest("/contracts", contract_router(state.clone()))
        .nest("/payments", payment_router(state.clone()))
        .nest("/withdrawals", withdrawal_router(state.clone()))
        .nest("/notifications", notification_router(state.clone()))
        .nest("/presence", presence_router(state))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs_ui))
}

pub fn create_app(config: &AppConfig, state: AppState) -> Router {
    let cors = build_cors(config);
    Router::new()
        .merge(router(state.clone()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &http::Request<_>| {
                    let request_id = Uuid::now_v7();
                    tracing::info_span!(
                        "http-request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                        request_id = %request_id
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
