use axum::extract::rejection::JsonRejection;
use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[source] sqlx::Error),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("Workspace not found")]
    WorkspaceNotFound,

    #[error("Workspace member not found")]
    MemberNotFound,

    #[error("Invitation not found")]
    InvitationNotFound,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Discussion not found")]
    DiscussionNotFound,

    #[error("Gig not found")]
    GigNotFound,

    #[error("Contract not found")]
    ContractNotFound,

    #[error("Milestone not found")]
    MilestoneNotFound,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Withdrawal not found")]
    WithdrawalNotFound,

    #[error("Notification not found")]
    NotificationNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Cannot move {entity} from `{from}` to `{to}`")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("Validation error: {0}")]
    ValidationErrors(#[from] validator::ValidationErrors),

    #[error("Invalid JSON body: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Payment signature mismatch")]
    SignatureMismatch,

    #[error("{0}")]
    Conflict(String),

    #[error("Failed to hash password")]
    PasswordHashError,

    #[error("Payment gateway error: {0}")]
    PaymentGatewayError(String),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),
}

impl AppError {
    /// Stable machine-readable error kind returned to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::WorkspaceNotFound
            | AppError::MemberNotFound
            | AppError::InvitationNotFound
            | AppError::ProjectNotFound
            | AppError::DiscussionNotFound
            | AppError::GigNotFound
            | AppError::ContractNotFound
            | AppError::MilestoneNotFound
            | AppError::PaymentNotFound
            | AppError::WithdrawalNotFound
            | AppError::NotificationNotFound
            | AppError::UserNotFound => "not_found",
            AppError::Forbidden(_) => "forbidden",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::InsufficientBalance { .. } => "insufficient_balance",
            AppError::InvalidId(_)
            | AppError::Validation(_)
            | AppError::ValidationErrors(_)
            | AppError::JsonRejection(_) => "validation_error",
            AppError::SignatureMismatch => "signature_mismatch",
            AppError::Conflict(_) => "conflict",
            AppError::InvalidCredentials => "unauthorized",
            AppError::DatabaseError(_)
            | AppError::PasswordHashError
            | AppError::PaymentGatewayError(_)
            | AppError::InvalidHeaderValue(_) => "internal",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Resource already exists ({})",
                db.constraint().unwrap_or("unique constraint")
            )),
            _ => AppError::DatabaseError(err),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
