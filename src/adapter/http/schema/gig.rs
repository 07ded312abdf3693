use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::gig::GigDTO;
use crate::infra::constants::MAX_AMOUNT;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "title": "Logo design",
    "description": "Vector logo for a bakery",
    "budget": 500000,
    "deadline": "2026-11-30T00:00:00Z"
}))]
pub struct CreateGigRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    /// Smallest currency unit.
    #[validate(range(min = 1, max = MAX_AMOUNT, message = "Budget must be between 1 and 10^12"))]
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GigResponse {
    pub id: String,
    pub client_id: String,
    pub freelancer_id: Option<String>,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    #[schema(example = "open")]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GigDTO> for GigResponse {
    fn from(dto: GigDTO) -> Self {
        Self {
            id: dto.id,
            client_id: dto.client_id,
            freelancer_id: dto.freelancer_id,
            title: dto.title,
            description: dto.description,
            budget: dto.budget,
            deadline: dto.deadline,
            status: dto.status,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

page_response!(GigListResponse, GigResponse);
