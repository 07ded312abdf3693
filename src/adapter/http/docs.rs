use axum::{response::Html, Json};
use utoipa::{
    openapi::{
        security::{ApiKey, ApiKeyValue, SecurityScheme},
        OpenApi as OpenApiDoc,
    },
    Modify, OpenApi,
};

use crate::adapter::http::{
    app_error_impl::ErrorResponse,
    routes::{auth, contract, discussion, gig, invitation, notification, payment, presence, project, user, withdrawal, workspace},
    schema::{
        auth::{LoginRequest, MessageResponse},
        contract::{
            ContractListResponse, ContractResponse, CreateContractRequest, MilestoneResponse, NewMilestoneRequest,
            UpdateContractStatusRequest, UpdateMilestoneStatusRequest,
        },
        discussion::{
            CreateDiscussionRequest, DiscussionListResponse, DiscussionMessageResponse, DiscussionResponse,
            ParticipantResponse, PostMessageRequest, UpdateDiscussionRequest,
        },
        gig::{CreateGigRequest, GigListResponse, GigResponse},
        invitation::{InvitationResponse, InviteMemberRequest},
        notification::{MarkAllReadResponse, NotificationListResponse, NotificationResponse},
        payment::{
            CreatePaymentOrderRequest, PaymentListResponse, PaymentOrderResponse, PaymentResponse,
            VerifyPaymentRequest, WebhookAckResponse,
        },
        presence::OnlineUsersResponse,
        project::{
            AssignProjectMemberRequest, CreateProjectRequest, ProjectListResponse, ProjectMemberResponse,
            ProjectResponse, UpdateProjectRequest,
        },
        user::{CreateUserRequest, UpdateProfileRequest, UserResponse},
        withdrawal::{
            BalanceResponse, BankDetailsRequest, RequestWithdrawalRequest, WithdrawalListResponse, WithdrawalResponse,
        },
        workspace::{
            CreateWorkspaceRequest, UpdateMemberRoleRequest, UpdateWorkspaceRequest, WorkspaceListResponse,
            WorkspaceMemberResponse, WorkspaceResponse,
        },
        ValidPassword,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookieAuth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("session_id"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        auth::login,
        auth::logout,
        user::register,
        user::get_me,
        user::update_profile,
        workspace::create_workspace,
        workspace::get_workspace_list,
        workspace::get_workspace,
        workspace::update_workspace,
        workspace::delete_workspace,
        workspace::get_workspace_members,
        workspace::update_member_role,
        workspace::remove_member,
        workspace::leave_workspace,
        invitation::invite_member,
        invitation::get_my_invitations,
        invitation::accept_invitation,
        invitation::decline_invitation,
        project::create_project,
        project::get_project_list,
        project::get_project,
        project::update_project,
        project::delete_project,
        project::assign_project_member,
        discussion::create_discussion,
        discussion::get_discussion_list,
        discussion::get_discussion,
        discussion::post_message,
        discussion::update_discussion,
        gig::create_gig,
        gig::get_open_gigs,
        gig::get_gig,
        gig::accept_gig,
        gig::complete_gig,
        contract::create_contract,
        contract::get_contract_list,
        contract::get_contract,
        contract::update_contract_status,
        contract::update_milestone_status,
        payment::create_payment_order,
        payment::verify_payment,
        payment::payment_webhook,
        payment::get_payment_list,
        withdrawal::get_balance,
        withdrawal::request_withdrawal,
        withdrawal::get_withdrawal_list,
        withdrawal::cancel_withdrawal,
        notification::get_notification_list,
        notification::mark_notification_read,
        notification::mark_all_notifications_read,
        presence::heartbeat,
        presence::get_online_users
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            LoginRequest,
            ValidPassword,
            CreateUserRequest,
            UpdateProfileRequest,
            UserResponse,
            CreateWorkspaceRequest,
            UpdateWorkspaceRequest,
            UpdateMemberRoleRequest,
            WorkspaceResponse,
            WorkspaceListResponse,
            WorkspaceMemberResponse,
            InviteMemberRequest,
            InvitationResponse,
            CreateProjectRequest,
            UpdateProjectRequest,
            AssignProjectMemberRequest,
            ProjectMemberResponse,
            ProjectResponse,
            ProjectListResponse,
            CreateDiscussionRequest,
            PostMessageRequest,
            UpdateDiscussionRequest,
            DiscussionMessageResponse,
            ParticipantResponse,
            DiscussionResponse,
            DiscussionListResponse,
            CreateGigRequest,
            GigResponse,
            GigListResponse,
            NewMilestoneRequest,
            CreateContractRequest,
            UpdateContractStatusRequest,
            UpdateMilestoneStatusRequest,
            MilestoneResponse,
            ContractResponse,
            ContractListResponse,
            CreatePaymentOrderRequest,
            PaymentOrderResponse,
            VerifyPaymentRequest,
            PaymentResponse,
            PaymentListResponse,
            WebhookAckResponse,
            BankDetailsRequest,
            RequestWithdrawalRequest,
            BalanceResponse,
            WithdrawalResponse,
            WithdrawalListResponse,
            NotificationResponse,
            NotificationListResponse,
            MarkAllReadResponse,
            OnlineUsersResponse
        )
    ),
    tags(
        (name = "Auth"),
        (name = "Users"),
        (name = "Workspaces"),
        (name = "Invitations"),
        (name = "Projects"),
        (name = "Discussions"),
        (name = "Gigs"),
        (name = "Contracts", description = "Contract offers, status transitions and milestones"),
        (name = "Payments", description = "Gateway orders, checkout verification and webhooks"),
        (name = "Withdrawals", description = "Balance settlement and payout requests"),
        (name = "Notifications"),
        (name = "Presence")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>GigConnect API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}
