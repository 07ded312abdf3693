use chrono::{DateTime, Utc};

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::contract::{Contract, ContractStatus, Milestone, MilestoneStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::NotificationKind;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractParty {
    Client,
    Freelancer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub previous: ContractStatus,
    pub notify_client: Option<NotificationKind>,
}

pub fn party_of(contract: &Contract, actor_id: &Id<User>) -> Option<ContractParty> {
    if &contract.freelancer_id == actor_id {
        Some(ContractParty::Freelancer)
    } else if &contract.client_id == actor_id {
        Some(ContractParty::Client)
    } else {
        None
    }
}

/// Statuses reachable from `from` through a party action. `disputed` is only
/// entered through [`mark_disputed`].
pub fn allowed_next(from: ContractStatus) -> &'static [ContractStatus] {
    match from {
        ContractStatus::PendingAcceptance => &[ContractStatus::Accepted, ContractStatus::Declined],
        ContractStatus::Accepted => &[ContractStatus::InProgress, ContractStatus::Cancelled],
        ContractStatus::InProgress => &[ContractStatus::Completed, ContractStatus::Cancelled],
        ContractStatus::Completed | ContractStatus::Cancelled | ContractStatus::Declined | ContractStatus::Disputed => {
            &[]
        }
    }
}

fn invalid(from: ContractStatus, to: ContractStatus) -> AppError {
    AppError::InvalidTransition {
        entity: "contract",
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Validates a status change requested by `actor_id` without touching the contract.
///
/// Party membership is checked before the transition table.
pub fn check_transition(contract: &Contract, actor_id: &Id<User>, next: ContractStatus) -> AppResult<ContractParty> {
    let party = party_of(contract, actor_id)
        .ok_or_else(|| AppError::Forbidden("Only the contract parties may change its status".to_string()))?;

    if !allowed_next(contract.status).contains(&next) {
        return Err(invalid(contract.status, next));
    }

    if contract.status == ContractStatus::PendingAcceptance && party != ContractParty::Freelancer {
        return Err(AppError::Forbidden(
            "Only the freelancer may accept or decline an offer".to_string(),
        ));
    }

    Ok(party)
}

/// Applies a checked transition and its side effects to the in-memory contract.
pub fn apply_transition(
    contract: &mut Contract,
    actor_id: &Id<User>,
    next: ContractStatus,
    reason: Option<String>,
    now: DateTime<Utc>,
) -> AppResult<TransitionOutcome> {
    check_transition(contract, actor_id, next)?;

    let previous = contract.status;
    let notify_client = match next {
        ContractStatus::Accepted => {
            contract.accepted_at = Some(now);
            Some(NotificationKind::ContractAccepted)
        }
        ContractStatus::Declined => {
            contract.decline_reason = Some(reason.unwrap_or_else(|| "No reason provided".to_string()));
            Some(NotificationKind::ContractDeclined)
        }
        ContractStatus::Completed => {
            contract.completed_at = Some(now);
            None
        }
        _ => None,
    };
    contract.status = next;
    contract.updated_at = now;

    Ok(TransitionOutcome {
        previous,
        notify_client,
    })
}

/// Moves an active contract into the terminal `disputed` state.
pub fn mark_disputed(contract: &mut Contract, now: DateTime<Utc>) -> AppResult<ContractStatus> {
    let previous = contract.status;
    if !matches!(previous, ContractStatus::Accepted | ContractStatus::InProgress) {
        return Err(invalid(previous, ContractStatus::Disputed));
    }
    contract.status = ContractStatus::Disputed;
    contract.updated_at = now;
    Ok(previous)
}

fn milestone_step(from: MilestoneStatus, to: MilestoneStatus) -> Option<ContractParty> {
    match (from, to) {
        (MilestoneStatus::Pending, MilestoneStatus::InProgress) => Some(ContractParty::Freelancer),
        (MilestoneStatus::InProgress, MilestoneStatus::Completed) => Some(ContractParty::Freelancer),
        (MilestoneStatus::Completed, MilestoneStatus::Approved) => Some(ContractParty::Client),
        _ => None,
    }
}

/// Advances one milestone of an in-progress contract.
pub fn advance_milestone<'a>(
    contract: &'a mut Contract,
    actor_id: &Id<User>,
    milestone_id: &Id<Milestone>,
    next: MilestoneStatus,
    now: DateTime<Utc>,
) -> AppResult<&'a Milestone> {
    let party = party_of(contract, actor_id)
        .ok_or_else(|| AppError::Forbidden("Only the contract parties may update milestones".to_string()))?;

    if contract.status != ContractStatus::InProgress {
        return Err(AppError::InvalidTransition {
            entity: "milestone",
            from: format!("contract {}", contract.status),
            to: next.as_str().to_string(),
        });
    }

    let milestone = contract
        .milestones
        .iter_mut()
        .find(|m| &m.id == milestone_id)
        .ok_or(AppError::MilestoneNotFound)?;

    let Some(required) = milestone_step(milestone.status, next) else {
        return Err(AppError::InvalidTransition {
            entity: "milestone",
            from: milestone.status.as_str().to_string(),
            to: next.as_str().to_string(),
        });
    };
    if required != party {
        return Err(AppError::Forbidden(format!(
            "Only the {} may move a milestone to {}",
            match required {
                ContractParty::Client => "client",
                ContractParty::Freelancer => "freelancer",
            },
            next.as_str()
        )));
    }

    milestone.status = next;
    milestone.updated_at = now;
    Ok(milestone)
}
