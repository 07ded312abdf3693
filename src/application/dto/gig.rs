use chrono::{DateTime, Utc};

use crate::domain::entities::gig::Gig;

#[derive(Debug, Clone)]
pub struct CreateGigDTO {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct GigActionDTO {
    pub user_id: String,
    pub gig_id: String,
}

#[derive(Debug, Clone)]
pub struct GigDTO {
    pub id: String,
    pub client_id: String,
    pub freelancer_id: Option<String>,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Gig> for GigDTO {
    fn from(gig: Gig) -> Self {
        Self {
            id: gig.id.value.to_string(),
            client_id: gig.client_id.value.to_string(),
            freelancer_id: gig.freelancer_id.map(|id| id.value.to_string()),
            title: gig.title,
            description: gig.description,
            budget: gig.budget,
            deadline: gig.deadline,
            status: gig.status.as_str().to_string(),
            created_at: gig.created_at,
            updated_at: gig.updated_at,
        }
    }
}
