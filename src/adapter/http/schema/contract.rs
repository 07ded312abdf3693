use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::contract::{ContractDTO, MilestoneDTO, NewMilestoneDTO};
use crate::infra::constants::MAX_AMOUNT;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NewMilestoneRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 1, max = MAX_AMOUNT, message = "Milestone amount must be between 1 and 10^12"))]
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
}

impl From<NewMilestoneRequest> for NewMilestoneDTO {
    fn from(request: NewMilestoneRequest) -> Self {
        Self {
            title: request.title,
            amount: request.amount,
            due_date: request.due_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "freelancer_id": "019c47ec-183d-744e-b11d-cd409015bf14",
    "title": "Mobile app MVP",
    "description": "Two screens and a login",
    "budget": 1500000,
    "milestones": [
        { "title": "Design", "amount": 500000 },
        { "title": "Build", "amount": 1000000 }
    ]
}))]
pub struct CreateContractRequest {
    pub freelancer_id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, max = MAX_AMOUNT, message = "Budget must be between 1 and 10^12"))]
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    #[validate(nested)]
    #[serde(default)]
    pub milestones: Vec<NewMilestoneRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({ "status": "declined", "reason": "Timeline does not work for me" }))]
pub struct UpdateContractStatusRequest {
    /// Target status, e.g. `in-progress`, `declined`, `completed`.
    pub status: String,
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMilestoneStatusRequest {
    #[schema(example = "in-progress")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MilestoneResponse {
    pub id: String,
    pub title: String,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
    #[schema(example = "pending")]
    pub status: String,
    pub position: i32,
}

impl From<MilestoneDTO> for MilestoneResponse {
    fn from(dto: MilestoneDTO) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            amount: dto.amount,
            due_date: dto.due_date,
            status: dto.status,
            position: dto.position,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContractResponse {
    pub id: String,
    pub client_id: String,
    pub freelancer_id: String,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    #[schema(example = "pending-acceptance")]
    pub status: String,
    pub milestones: Vec<MilestoneResponse>,
    pub decline_reason: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContractDTO> for ContractResponse {
    fn from(dto: ContractDTO) -> Self {
        Self {
            id: dto.id,
            client_id: dto.client_id,
            freelancer_id: dto.freelancer_id,
            title: dto.title,
            description: dto.description,
            budget: dto.budget,
            deadline: dto.deadline,
            status: dto.status,
            milestones: dto.milestones.into_iter().map(MilestoneResponse::from).collect(),
            decline_reason: dto.decline_reason,
            accepted_at: dto.accepted_at,
            completed_at: dto.completed_at,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

page_response!(ContractListResponse, ContractResponse);
