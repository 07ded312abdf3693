use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::contract::{
    ContractDTO, CreateContractDTO, GetContractDTO, GetContractListDTO, MilestoneDTO, UpdateContractStatusDTO,
    UpdateMilestoneStatusDTO,
};
use crate::application::dto::pagination::PageDTO;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::contract::{ContractReader, ContractWriter};
use crate::application::interface::gateway::notification::NotificationWriter;
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::contract::{Contract, ContractStatus, Milestone, MilestoneStatus, NewMilestone};
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::domain::entities::user::User;
use crate::domain::services::contract_lifecycle::{advance_milestone, apply_transition};

#[derive(Clone)]
pub struct CreateContractInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    contract_writer: Arc<dyn ContractWriter>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl CreateContractInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        contract_writer: Arc<dyn ContractWriter>,
        notification_writer: Arc<dyn NotificationWriter>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            contract_writer,
            notification_writer,
        }
    }

    pub async fn execute(&self, dto: CreateContractDTO) -> AppResult<ContractDTO> {
        let client_id: Id<User> = dto.user_id.try_into()?;
        let freelancer_id: Id<User> = dto.freelancer_id.try_into()?;

        let client = self
            .user_reader
            .find_by_id(&client_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        if !client.is_client() {
            return Err(AppError::Forbidden("Only clients can offer contracts".to_string()));
        }
        let freelancer = self
            .user_reader
            .find_by_id(&freelancer_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        if !freelancer.is_freelancer() {
            return Err(AppError::Validation("Contracts can only be offered to freelancers".to_string()));
        }

        if dto.budget <= 0 {
            return Err(AppError::Validation("Contract budget must be positive".to_string()));
        }
        if dto.milestones.iter().any(|m| m.amount <= 0) {
            return Err(AppError::Validation("Milestone amounts must be positive".to_string()));
        }

        let milestones = dto
            .milestones
            .into_iter()
            .map(|m| NewMilestone {
                title: m.title,
                amount: m.amount,
                due_date: m.due_date,
            })
            .collect();
        let contract = Contract::new(
            client_id,
            freelancer_id,
            dto.title,
            dto.description,
            dto.budget,
            dto.deadline,
            milestones,
        );
        self.contract_writer.insert(contract.clone()).await?;

        let notification = Notification::new(
            freelancer.id.clone(),
            NotificationKind::ContractOffered,
            "New contract offer",
            format!("{} offered you the contract \"{}\"", client.username, contract.title),
            json!({
                "contract_id": contract.id.value.to_string(),
                "client_id": client.id.value.to_string(),
                "budget": contract.budget,
            }),
        );
        self.notification_writer.insert(notification).await?;
        self.db_session.commit().await?;
        info!("Contract {} offered to {}", contract.id, freelancer.id);
        Ok(contract.into())
    }
}

#[derive(Clone)]
pub struct GetContractListInteractor {
    contract_reader: Arc<dyn ContractReader>,
}

impl GetContractListInteractor {
    pub fn new(contract_reader: Arc<dyn ContractReader>) -> Self {
        Self { contract_reader }
    }

    pub async fn execute(&self, dto: GetContractListDTO) -> AppResult<PageDTO<ContractDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let (page, per_page, offset) = dto.page.bounds();
        let total = self.contract_reader.count_for_user(&user_id).await?;
        let contracts = self.contract_reader.get_for_user(&user_id, per_page, offset).await?;
        Ok(PageDTO {
            total,
            page,
            per_page,
            items: contracts.into_iter().map(ContractDTO::from).collect(),
        })
    }
}

#[derive(Clone)]
pub struct GetContractInteractor {
    contract_reader: Arc<dyn ContractReader>,
}

impl GetContractInteractor {
    pub fn new(contract_reader: Arc<dyn ContractReader>) -> Self {
        Self { contract_reader }
    }

    pub async fn execute(&self, dto: GetContractDTO) -> AppResult<ContractDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let contract_id: Id<Contract> = dto.contract_id.try_into()?;
        let contract = self
            .contract_reader
            .find_by_id(&contract_id)
            .await?
            .ok_or(AppError::ContractNotFound)?;
        if !contract.is_party(&user_id) {
            return Err(AppError::Forbidden("Only the contract parties may view it".to_string()));
        }
        Ok(contract.into())
    }
}

#[derive(Clone)]
pub struct UpdateContractStatusInteractor {
    db_session: Arc<dyn DBSession>,
    contract_reader: Arc<dyn ContractReader>,
    contract_writer: Arc<dyn ContractWriter>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl UpdateContractStatusInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        contract_reader: Arc<dyn ContractReader>,
        contract_writer: Arc<dyn ContractWriter>,
        notification_writer: Arc<dyn NotificationWriter>,
    ) -> Self {
        Self {
            db_session,
            contract_reader,
            contract_writer,
            notification_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateContractStatusDTO) -> AppResult<ContractDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let contract_id: Id<Contract> = dto.contract_id.try_into()?;
        let next: ContractStatus = dto.status.parse()?;

        let mut contract = self
            .contract_reader
            .find_by_id(&contract_id)
            .await?
            .ok_or(AppError::ContractNotFound)?;
        let outcome = apply_transition(&mut contract, &user_id, next, dto.reason, Utc::now())?;

        // Compare-and-set on the status we read; a concurrent writer wins.
        if !self.contract_writer.update_status(&contract, outcome.previous).await? {
            warn!(
                "Contract {} changed concurrently while moving {} -> {}",
                contract.id, outcome.previous, next
            );
            return Err(AppError::InvalidTransition {
                entity: "contract",
                from: outcome.previous.to_string(),
                to: next.to_string(),
            });
        }

        if let Some(kind) = outcome.notify_client {
            let (title, message) = match kind {
                NotificationKind::ContractDeclined => (
                    "Contract declined",
                    format!(
                        "Your contract \"{}\" was declined: {}",
                        contract.title,
                        contract.decline_reason.as_deref().unwrap_or_default()
                    ),
                ),
                _ => (
                    "Contract accepted",
                    format!("Your contract \"{}\" was accepted", contract.title),
                ),
            };
            let notification = Notification::new(
                contract.client_id.clone(),
                kind,
                title,
                message,
                json!({
                    "contract_id": contract.id.value.to_string(),
                    "freelancer_id": contract.freelancer_id.value.to_string(),
                }),
            );
            self.notification_writer.insert(notification).await?;
        }

        self.db_session.commit().await?;
        info!("Contract {} moved {} -> {}", contract.id, outcome.previous, next);
        Ok(contract.into())
    }
}

#[derive(Clone)]
pub struct UpdateMilestoneStatusInteractor {
    db_session: Arc<dyn DBSession>,
    contract_reader: Arc<dyn ContractReader>,
    contract_writer: Arc<dyn ContractWriter>,
}

impl UpdateMilestoneStatusInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        contract_reader: Arc<dyn ContractReader>,
        contract_writer: Arc<dyn ContractWriter>,
    ) -> Self {
        Self {
            db_session,
            contract_reader,
            contract_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateMilestoneStatusDTO) -> AppResult<MilestoneDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let contract_id: Id<Contract> = dto.contract_id.try_into()?;
        let milestone_id: Id<Milestone> = dto.milestone_id.try_into()?;
        let next: MilestoneStatus = dto.status.parse()?;

        let mut contract = self
            .contract_reader
            .find_by_id(&contract_id)
            .await?
            .ok_or(AppError::ContractNotFound)?;
        let previous = contract
            .milestones
            .iter()
            .find(|m| m.id == milestone_id)
            .map(|m| m.status);
        let milestone = advance_milestone(&mut contract, &user_id, &milestone_id, next, Utc::now())?.clone();
        let previous = previous.ok_or(AppError::MilestoneNotFound)?;

        if !self.contract_writer.update_milestone(&milestone, previous).await? {
            return Err(AppError::InvalidTransition {
                entity: "milestone",
                from: previous.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        self.db_session.commit().await?;
        Ok(milestone.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::contract::{
        CreateContractDTO, GetContractDTO, NewMilestoneDTO, UpdateContractStatusDTO, UpdateMilestoneStatusDTO,
    };
    use crate::application::interactors::contract::{
        CreateContractInteractor, GetContractInteractor, UpdateContractStatusInteractor,
        UpdateMilestoneStatusInteractor,
    };
    use crate::application::interactors::mocks::{
        committing_session, MockContractReaderMock, MockContractWriterMock, MockDBSessionMock,
        MockNotificationWriterMock, MockUserReaderMock,
    };
    use crate::domain::entities::contract::{Contract, ContractStatus, MilestoneStatus, NewMilestone};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::notification::NotificationKind;
    use crate::domain::entities::user::{User, UserRole};

    struct Parties {
        client: User,
        freelancer: User,
    }

    // Fixtures
    #[fixture]
    fn parties() -> Parties {
        Parties {
            client: User::new(
                "client".to_string(),
                "client@example.com".to_string(),
                "hash".to_string(),
                UserRole::Client,
                None,
            ),
            freelancer: User::new(
                "freelancer".to_string(),
                "freelancer@example.com".to_string(),
                "hash".to_string(),
                UserRole::Freelancer,
                None,
            ),
        }
    }

    // Helpers
    fn contract_between(parties: &Parties, status: ContractStatus) -> Contract {
        let mut contract = Contract::new(
            parties.client.id.clone(),
            parties.freelancer.id.clone(),
            "Landing page".to_string(),
            "Build a landing page".to_string(),
            20_000,
            None,
            vec![NewMilestone {
                title: "Design".to_string(),
                amount: 8_000,
                due_date: None,
            }],
        );
        contract.status = status;
        contract
    }

    fn reader_for(contract: Contract) -> MockContractReaderMock {
        let mut contract_reader = MockContractReaderMock::new();
        contract_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(contract.clone())));
        contract_reader
    }

    fn users(parties: &Parties) -> MockUserReaderMock {
        let mut user_reader = MockUserReaderMock::new();
        let known = vec![parties.client.clone(), parties.freelancer.clone()];
        user_reader
            .expect_find_by_id()
            .returning(move |id| Ok(known.iter().find(|u| &u.id == id).cloned()));
        user_reader
    }

    fn status_dto(actor: &User, contract: &Contract, status: &str, reason: Option<&str>) -> UpdateContractStatusDTO {
        UpdateContractStatusDTO {
            user_id: actor.id.value.to_string(),
            contract_id: contract.id.value.to_string(),
            status: status.to_string(),
            reason: reason.map(str::to_string),
        }
    }

    // CreateContractInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_offer_notifies_freelancer(parties: Parties) {
        let mut contract_writer = MockContractWriterMock::new();
        contract_writer
            .expect_insert()
            .withf(|c| c.status == ContractStatus::PendingAcceptance && c.milestones.len() == 1)
            .times(1)
            .returning(|c| Ok(c.id));
        let mut notification_writer = MockNotificationWriterMock::new();
        let freelancer_id = parties.freelancer.id.clone();
        notification_writer
            .expect_insert()
            .withf(move |n| n.recipient_id == freelancer_id && n.kind == NotificationKind::ContractOffered)
            .times(1)
            .returning(|n| Ok(n.id));

        let dto = CreateContractInteractor::new(
            Arc::new(committing_session()),
            Arc::new(users(&parties)),
            Arc::new(contract_writer),
            Arc::new(notification_writer),
        )
        .execute(CreateContractDTO {
            user_id: parties.client.id.value.to_string(),
            freelancer_id: parties.freelancer.id.value.to_string(),
            title: "Landing page".to_string(),
            description: "Build it".to_string(),
            budget: 20_000,
            deadline: None,
            milestones: vec![NewMilestoneDTO {
                title: "Design".to_string(),
                amount: 8_000,
                due_date: None,
            }],
        })
        .await
        .unwrap();

        assert_eq!(dto.status, "pending-acceptance");
        assert_eq!(dto.milestones[0].position, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_offer_to_a_client_is_rejected(parties: Parties) {
        let result = CreateContractInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(users(&parties)),
            Arc::new(MockContractWriterMock::new()),
            Arc::new(MockNotificationWriterMock::new()),
        )
        .execute(CreateContractDTO {
            user_id: parties.client.id.value.to_string(),
            freelancer_id: parties.client.id.value.to_string(),
            title: "Self hire".to_string(),
            description: String::new(),
            budget: 1_000,
            deadline: None,
            milestones: Vec::new(),
        })
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    // GetContractInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_outsider_cannot_view_contract(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::Accepted);
        let result = GetContractInteractor::new(Arc::new(reader_for(contract.clone())))
            .execute(GetContractDTO {
                user_id: Id::<User>::generate().value.to_string(),
                contract_id: contract.id.value.to_string(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    // UpdateContractStatusInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_freelancer_accepts_and_client_is_notified(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::PendingAcceptance);
        let mut contract_writer = MockContractWriterMock::new();
        contract_writer
            .expect_update_status()
            .withf(|c, expected| {
                c.status == ContractStatus::Accepted
                    && c.accepted_at.is_some()
                    && *expected == ContractStatus::PendingAcceptance
            })
            .times(1)
            .returning(|_, _| Ok(true));
        let mut notification_writer = MockNotificationWriterMock::new();
        let client_id = parties.client.id.clone();
        notification_writer
            .expect_insert()
            .withf(move |n| n.recipient_id == client_id && n.kind == NotificationKind::ContractAccepted)
            .times(1)
            .returning(|n| Ok(n.id));

        let dto = UpdateContractStatusInteractor::new(
            Arc::new(committing_session()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(contract_writer),
            Arc::new(notification_writer),
        )
        .execute(status_dto(&parties.freelancer, &contract, "accepted", None))
        .await
        .unwrap();

        assert_eq!(dto.status, "accepted");
        assert!(dto.accepted_at.is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn test_decline_without_reason_uses_default(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::PendingAcceptance);
        let mut contract_writer = MockContractWriterMock::new();
        contract_writer.expect_update_status().returning(|_, _| Ok(true));
        let mut notification_writer = MockNotificationWriterMock::new();
        notification_writer
            .expect_insert()
            .withf(|n| n.kind == NotificationKind::ContractDeclined)
            .times(1)
            .returning(|n| Ok(n.id));

        let dto = UpdateContractStatusInteractor::new(
            Arc::new(committing_session()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(contract_writer),
            Arc::new(notification_writer),
        )
        .execute(status_dto(&parties.freelancer, &contract, "declined", None))
        .await
        .unwrap();

        assert_eq!(dto.decline_reason.as_deref(), Some("No reason provided"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_outsider_is_forbidden_before_table_check(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::Completed);
        let outsider = User::new(
            "outsider".to_string(),
            "outsider@example.com".to_string(),
            "hash".to_string(),
            UserRole::Freelancer,
            None,
        );

        let result = UpdateContractStatusInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(MockContractWriterMock::new()),
            Arc::new(MockNotificationWriterMock::new()),
        )
        .execute(status_dto(&outsider, &contract, "in-progress", None))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_skipping_acceptance_is_invalid(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::PendingAcceptance);

        let result = UpdateContractStatusInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(MockContractWriterMock::new()),
            Arc::new(MockNotificationWriterMock::new()),
        )
        .execute(status_dto(&parties.freelancer, &contract, "in-progress", None))
        .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTransition { entity: "contract", .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_concurrent_loser_gets_invalid_transition(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::InProgress);
        let mut contract_writer = MockContractWriterMock::new();
        contract_writer.expect_update_status().times(1).returning(|_, _| Ok(false));

        let result = UpdateContractStatusInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(contract_writer),
            Arc::new(MockNotificationWriterMock::new()),
        )
        .execute(status_dto(&parties.client, &contract, "completed", None))
        .await;

        match result.unwrap_err() {
            AppError::InvalidTransition { entity, from, to } => {
                assert_eq!(entity, "contract");
                assert_eq!(from, "in-progress");
                assert_eq!(to, "completed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // UpdateMilestoneStatusInteractor tests
    fn milestone_dto(actor: &User, contract: &Contract, status: &str) -> UpdateMilestoneStatusDTO {
        UpdateMilestoneStatusDTO {
            user_id: actor.id.value.to_string(),
            contract_id: contract.id.value.to_string(),
            milestone_id: contract.milestones[0].id.value.to_string(),
            status: status.to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_freelancer_starts_milestone(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::InProgress);
        let mut contract_writer = MockContractWriterMock::new();
        contract_writer
            .expect_update_milestone()
            .withf(|m, expected| m.status == MilestoneStatus::InProgress && *expected == MilestoneStatus::Pending)
            .times(1)
            .returning(|_, _| Ok(true));

        let dto = UpdateMilestoneStatusInteractor::new(
            Arc::new(committing_session()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(contract_writer),
        )
        .execute(milestone_dto(&parties.freelancer, &contract, "in-progress"))
        .await
        .unwrap();

        assert_eq!(dto.status, "in-progress");
    }

    #[rstest]
    #[tokio::test]
    async fn test_milestone_on_accepted_contract_is_invalid(parties: Parties) {
        let contract = contract_between(&parties, ContractStatus::Accepted);

        let result = UpdateMilestoneStatusInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(MockContractWriterMock::new()),
        )
        .execute(milestone_dto(&parties.freelancer, &contract, "in-progress"))
        .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTransition { entity: "milestone", .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_client_cannot_complete_milestone(parties: Parties) {
        let mut contract = contract_between(&parties, ContractStatus::InProgress);
        contract.milestones[0].status = MilestoneStatus::InProgress;

        let result = UpdateMilestoneStatusInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(reader_for(contract.clone())),
            Arc::new(MockContractWriterMock::new()),
        )
        .execute(milestone_dto(&parties.client, &contract, "completed"))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }
}
