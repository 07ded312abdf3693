use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GigStatus {
    Open,
    Assigned,
    Completed,
    Cancelled,
}

impl GigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GigStatus::Open => "open",
            GigStatus::Assigned => "assigned",
            GigStatus::Completed => "completed",
            GigStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for GigStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(GigStatus::Open),
            "assigned" => Ok(GigStatus::Assigned),
            "completed" => Ok(GigStatus::Completed),
            "cancelled" => Ok(GigStatus::Cancelled),
            other => Err(AppError::Validation(format!("Unknown gig status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gig {
    pub id: Id<Gig>,
    pub client_id: Id<User>,
    pub freelancer_id: Option<Id<User>>,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub status: GigStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Gig {
    pub fn new(
        client_id: Id<User>,
        title: String,
        description: String,
        budget: i64,
        deadline: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            client_id,
            freelancer_id: None,
            title,
            description,
            budget,
            deadline,
            status: GigStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }
}
