use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractStatus {
    PendingAcceptance,
    Accepted,
    InProgress,
    Completed,
    Cancelled,
    Declined,
    Disputed,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::PendingAcceptance => "pending-acceptance",
            ContractStatus::Accepted => "accepted",
            ContractStatus::InProgress => "in-progress",
            ContractStatus::Completed => "completed",
            ContractStatus::Cancelled => "cancelled",
            ContractStatus::Declined => "declined",
            ContractStatus::Disputed => "disputed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ContractStatus::Completed | ContractStatus::Cancelled | ContractStatus::Declined | ContractStatus::Disputed
        )
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending-acceptance" => Ok(ContractStatus::PendingAcceptance),
            "accepted" => Ok(ContractStatus::Accepted),
            "in-progress" => Ok(ContractStatus::InProgress),
            "completed" => Ok(ContractStatus::Completed),
            "cancelled" => Ok(ContractStatus::Cancelled),
            "declined" => Ok(ContractStatus::Declined),
            "disputed" => Ok(ContractStatus::Disputed),
            other => Err(AppError::Validation(format!("Unknown contract status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneStatus {
    Pending,
    InProgress,
    Completed,
    Approved,
}

impl MilestoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "pending",
            MilestoneStatus::InProgress => "in-progress",
            MilestoneStatus::Completed => "completed",
            MilestoneStatus::Approved => "approved",
        }
    }
}

impl FromStr for MilestoneStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MilestoneStatus::Pending),
            "in-progress" => Ok(MilestoneStatus::InProgress),
            "completed" => Ok(MilestoneStatus::Completed),
            "approved" => Ok(MilestoneStatus::Approved),
            other => Err(AppError::Validation(format!("Unknown milestone status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Milestone {
    pub id: Id<Milestone>,
    pub contract_id: Id<Contract>,
    pub title: String,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
    pub status: MilestoneStatus,
    pub position: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMilestone {
    pub title: String,
    pub amount: i64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Contract {
    pub id: Id<Contract>,
    pub client_id: Id<User>,
    pub freelancer_id: Id<User>,
    pub title: String,
    pub description: String,
    pub budget: i64,
    pub deadline: Option<DateTime<Utc>>,
    pub status: ContractStatus,
    pub milestones: Vec<Milestone>,
    pub decline_reason: Option<String>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    pub fn new(
        client_id: Id<User>,
        freelancer_id: Id<User>,
        title: String,
        description: String,
        budget: i64,
        deadline: Option<DateTime<Utc>>,
        milestones: Vec<NewMilestone>,
    ) -> Self {
        let now = Utc::now();
        let id: Id<Contract> = Id::generate();
        let milestones = milestones
            .into_iter()
            .enumerate()
            .map(|(index, m)| Milestone {
                id: Id::generate(),
                contract_id: id.clone(),
                title: m.title,
                amount: m.amount,
                due_date: m.due_date,
                status: MilestoneStatus::Pending,
                position: index as i32 + 1,
                updated_at: now,
            })
            .collect();

        Self {
            id,
            client_id,
            freelancer_id,
            title,
            description,
            budget,
            deadline,
            status: ContractStatus::PendingAcceptance,
            milestones,
            decline_reason: None,
            accepted_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_party(&self, user_id: &Id<User>) -> bool {
        &self.client_id == user_id || &self.freelancer_id == user_id
    }
}
