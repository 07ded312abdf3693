use chrono::{DateTime, Utc};

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::contract::{Contract, Milestone};

#[derive(Debug, Clone)]
pub struct NewMilestoneDTO {
    pub title: String,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CreateContractDTO {
    pub user_id: String,
    pub freelancer_id: String,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub milestones: Vec<NewMilestoneDTO>,
}

#[derive(Debug, Clone)]
pub struct GetContractDTO {
    pub user_id: String,
    pub contract_id: String,
}

#[derive(Debug, Clone)]
pub struct GetContractListDTO {
    pub user_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone)]
pub struct UpdateContractStatusDTO {
    pub user_id: String,
    pub contract_id: String,
    pub status: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateMilestoneStatusDTO {
    pub user_id: String,
    pub contract_id: String,
    pub milestone_id: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct MilestoneDTO {
    pub id: String,
    pub title: String,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
    pub position: i32,
}

impl From<Milestone> for MilestoneDTO {
    fn from(milestone: Milestone) -> Self {
        Self {
            id: milestone.id.value.to_string(),
            title: milestone.title,
            amount: milestone.amount,
            due_date: milestone.due_date,
            status: milestone.status.as_str().to_string(),
            position: milestone.position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContractDTO {
    pub id: String,
    pub client_id: String,
    pub freelancer_id: String,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub status: String,
    pub milestones: Vec<MilestoneDTO>,
    pub decline_reason: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contract> for ContractDTO {
    fn from(contract: Contract) -> Self {
        Self {
            id: contract.id.value.to_string(),
            client_id: contract.client_id.value.to_string(),
            freelancer_id: contract.freelancer_id.value.to_string(),
            title: contract.title,
            description: contract.description,
            budget: contract.budget,
            deadline: contract.deadline,
            status: contract.status.as_str().to_string(),
            milestones: contract.milestones.into_iter().map(MilestoneDTO::from).collect(),
            decline_reason: contract.decline_reason,
            accepted_at: contract.accepted_at,
            completed_at: contract.completed_at,
            created_at: contract.created_at,
            updated_at: contract.updated_at,
        }
    }
}
