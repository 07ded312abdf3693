use std::sync::Arc;

use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::pagination::PageDTO;
use crate::application::dto::project::{
    AssignProjectMemberDTO, CreateProjectDTO, GetProjectDTO, GetProjectListDTO, ProjectDTO, UpdateProjectDTO,
};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::project::{ProjectReader, ProjectWriter};
use crate::application::interface::gateway::workspace::{WorkspaceMemberReader, WorkspaceReader};
use crate::application::interactors::workspace::load_workspace;
use crate::domain::entities::id::Id;
use crate::domain::entities::project::{Project, ProjectMemberRole, ProjectPriority, ProjectStatus};
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::{Workspace, WorkspaceMember};
use crate::domain::services::access::{authorize, effective_role, WorkspaceAction};

fn non_negative(field: &str, value: i64) -> AppResult<i64> {
    if value < 0 {
        return Err(AppError::Validation(format!("{} cannot be negative", field)));
    }
    Ok(value)
}

#[derive(Clone)]
pub struct CreateProjectInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_writer: Arc<dyn ProjectWriter>,
}

impl CreateProjectInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_writer: Arc<dyn ProjectWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            project_writer,
        }
    }

    pub async fn execute(&self, dto: CreateProjectDTO) -> AppResult<ProjectDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let priority: ProjectPriority = dto.priority.parse()?;
        let budget = non_negative("Budget", dto.budget)?;

        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::CreateContent)?;

        let project = Project::new(workspace_id, user_id, dto.name, dto.description, priority, budget, dto.due_date);
        self.project_writer.insert(project.clone()).await?;
        self.db_session.commit().await?;
        info!("Project {} created in workspace {}", project.id, project.workspace_id);

        Ok(project.into())
    }
}

#[derive(Clone)]
pub struct GetProjectListInteractor {
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
}

impl GetProjectListInteractor {
    pub fn new(
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_reader: Arc<dyn ProjectReader>,
    ) -> Self {
        Self {
            workspace_reader,
            member_reader,
            project_reader,
        }
    }

    pub async fn execute(&self, dto: GetProjectListDTO) -> AppResult<PageDTO<ProjectDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::Read)?;

        let (page, per_page, offset) = dto.page.bounds();
        let total = self.project_reader.count_projects(&workspace_id).await?;
        let projects = self.project_reader.get_all(&workspace_id, per_page, offset).await?;

        Ok(PageDTO {
            total,
            page,
            per_page,
            items: projects.into_iter().map(ProjectDTO::from).collect(),
        })
    }
}

/// Loads a project and checks `action` against its workspace.
async fn authorized_project(
    workspace_reader: &dyn WorkspaceReader,
    member_reader: &dyn WorkspaceMemberReader,
    project_reader: &dyn ProjectReader,
    user_id: &Id<User>,
    project_id: &Id<Project>,
    action: WorkspaceAction,
) -> AppResult<(Project, Workspace, Vec<WorkspaceMember>)> {
    let project = project_reader
        .find_by_id(project_id)
        .await?
        .ok_or(AppError::ProjectNotFound)?;
    let (workspace, members) = load_workspace(workspace_reader, member_reader, &project.workspace_id).await?;
    authorize(&workspace, &members, user_id, action)?;
    Ok((project, workspace, members))
}

#[derive(Clone)]
pub struct GetProjectInteractor {
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
}

impl GetProjectInteractor {
    pub fn new(
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_reader: Arc<dyn ProjectReader>,
    ) -> Self {
        Self {
            workspace_reader,
            member_reader,
            project_reader,
        }
    }

    pub async fn execute(&self, dto: GetProjectDTO) -> AppResult<ProjectDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let project_id: Id<Project> = dto.project_id.try_into()?;
        let (project, _, _) = authorized_project(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            self.project_reader.as_ref(),
            &user_id,
            &project_id,
            WorkspaceAction::Read,
        )
        .await?;
        Ok(project.into())
    }
}

#[derive(Clone)]
pub struct UpdateProjectInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
    project_writer: Arc<dyn ProjectWriter>,
}

impl UpdateProjectInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_reader: Arc<dyn ProjectReader>,
        project_writer: Arc<dyn ProjectWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            project_reader,
            project_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateProjectDTO) -> AppResult<ProjectDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let project_id: Id<Project> = dto.project_id.try_into()?;
        let status: Option<ProjectStatus> = dto.status.as_deref().map(str::parse).transpose()?;
        let priority: Option<ProjectPriority> = dto.priority.as_deref().map(str::parse).transpose()?;
        let budget = dto.budget.map(|b| non_negative("Budget", b)).transpose()?;
        let earnings = dto.earnings.map(|e| non_negative("Earnings", e)).transpose()?;

        let (mut project, _, _) = authorized_project(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            self.project_reader.as_ref(),
            &user_id,
            &project_id,
            WorkspaceAction::UpdateContent,
        )
        .await?;

        if let Some(name) = dto.name {
            project.name = name;
        }
        if let Some(description) = dto.description {
            project.description = Some(description);
        }
        if let Some(priority) = priority {
            project.priority = priority;
        }
        if let Some(budget) = budget {
            project.budget = budget;
        }
        if let Some(earnings) = earnings {
            project.earnings = earnings;
        }
        if let Some(due_date) = dto.due_date {
            project.due_date = Some(due_date);
        }
        if let Some(status) = status {
            project.set_status(status);
        }
        // Applied after the status so that reaching 100 always completes.
        if let Some(progress) = dto.progress {
            project.set_progress(progress);
        }
        project.updated_at = chrono::Utc::now();

        self.project_writer.update(project.clone()).await?;
        self.db_session.commit().await?;
        Ok(project.into())
    }
}

#[derive(Clone)]
pub struct DeleteProjectInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
    project_writer: Arc<dyn ProjectWriter>,
}

impl DeleteProjectInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_reader: Arc<dyn ProjectReader>,
        project_writer: Arc<dyn ProjectWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            project_reader,
            project_writer,
        }
    }

    pub async fn execute(&self, dto: GetProjectDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let project_id: Id<Project> = dto.project_id.try_into()?;
        authorized_project(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            self.project_reader.as_ref(),
            &user_id,
            &project_id,
            WorkspaceAction::DeleteContent,
        )
        .await?;

        self.project_writer.delete(&project_id).await?;
        self.db_session.commit().await?;
        info!("Project {} deleted by {}", project_id, user_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct AssignProjectMemberInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
    project_writer: Arc<dyn ProjectWriter>,
}

impl AssignProjectMemberInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_reader: Arc<dyn ProjectReader>,
        project_writer: Arc<dyn ProjectWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            project_reader,
            project_writer,
        }
    }

    pub async fn execute(&self, dto: AssignProjectMemberDTO) -> AppResult<ProjectDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let project_id: Id<Project> = dto.project_id.try_into()?;
        let assignee_id: Id<User> = dto.member_user_id.try_into()?;
        let role: ProjectMemberRole = dto.role.parse()?;

        let (mut project, workspace, members) = authorized_project(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            self.project_reader.as_ref(),
            &user_id,
            &project_id,
            WorkspaceAction::UpdateContent,
        )
        .await?;

        if effective_role(&workspace, &members, &assignee_id).is_none() {
            return Err(AppError::MemberNotFound);
        }

        project.assign(assignee_id.clone(), role);
        let assignment = project
            .members
            .iter()
            .find(|m| m.user_id == assignee_id)
            .cloned()
            .ok_or(AppError::MemberNotFound)?;
        self.project_writer.upsert_member(&project_id, assignment).await?;
        self.db_session.commit().await?;
        Ok(project.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::pagination::PageRequestDTO;
    use crate::application::dto::project::{
        AssignProjectMemberDTO, CreateProjectDTO, GetProjectDTO, GetProjectListDTO, UpdateProjectDTO,
    };
    use crate::application::interactors::mocks::{
        committing_session, MockDBSessionMock, MockProjectReaderMock, MockProjectWriterMock,
        MockWorkspaceMemberReaderMock, MockWorkspaceReaderMock,
    };
    use crate::application::interactors::project::{
        AssignProjectMemberInteractor, CreateProjectInteractor, DeleteProjectInteractor, GetProjectListInteractor,
        UpdateProjectInteractor,
    };
    use crate::domain::entities::id::Id;
    use crate::domain::entities::project::{Project, ProjectMemberRole, ProjectPriority, ProjectStatus};
    use crate::domain::entities::user::User;
    use crate::domain::entities::workspace::{Workspace, WorkspaceMember, WorkspaceMemberRole, WorkspaceSettings};

    // Constants
    const OWNER_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";
    const MEMBER_ID: &str = "019c47ec-2160-7e53-bf7e-06db2a1bad85";
    const VIEWER_ID: &str = "019c47ec-29d3-72c4-ba24-a32534f95a71";
    const STRANGER_ID: &str = "019c47ec-3a11-7b0e-9d51-5c0f1d0e7a42";

    fn id(value: &str) -> Id<User> {
        value.to_string().try_into().unwrap()
    }

    #[derive(Clone)]
    struct Setup {
        workspace: Workspace,
        members: Vec<WorkspaceMember>,
        project: Project,
    }

    // Fixtures
    #[fixture]
    fn setup() -> Setup {
        let workspace = Workspace::new(id(OWNER_ID), "Studio".to_string(), None, WorkspaceSettings::default());
        let members = vec![
            WorkspaceMember::new(workspace.id.clone(), id(MEMBER_ID), WorkspaceMemberRole::Member),
            WorkspaceMember::new(workspace.id.clone(), id(VIEWER_ID), WorkspaceMemberRole::Viewer),
        ];
        let project = Project::new(
            workspace.id.clone(),
            id(OWNER_ID),
            "Website".to_string(),
            None,
            ProjectPriority::Medium,
            50_000,
            None,
        );
        Setup {
            workspace,
            members,
            project,
        }
    }

    // Helpers
    fn readers(setup: &Setup) -> (MockWorkspaceReaderMock, MockWorkspaceMemberReaderMock, MockProjectReaderMock) {
        let mut workspace_reader = MockWorkspaceReaderMock::new();
        let mut member_reader = MockWorkspaceMemberReaderMock::new();
        let mut project_reader = MockProjectReaderMock::new();
        let workspace = setup.workspace.clone();
        let members = setup.members.clone();
        let project = setup.project.clone();
        workspace_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(workspace.clone())));
        member_reader.expect_list().returning(move |_| Ok(members.clone()));
        project_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(project.clone())));
        (workspace_reader, member_reader, project_reader)
    }

    fn update_dto(setup: &Setup, actor: &str) -> UpdateProjectDTO {
        UpdateProjectDTO {
            user_id: actor.to_string(),
            project_id: setup.project.id.value.to_string(),
            name: None,
            description: None,
            status: None,
            priority: None,
            progress: None,
            budget: None,
            earnings: None,
            due_date: None,
        }
    }

    fn update_interactor(setup: &Setup, db_session: MockDBSessionMock) -> UpdateProjectInteractor {
        let (workspace_reader, member_reader, project_reader) = readers(setup);
        let mut project_writer = MockProjectWriterMock::new();
        project_writer.expect_update().returning(|_| Ok(()));
        UpdateProjectInteractor::new(
            Arc::new(db_session),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(project_reader),
            Arc::new(project_writer),
        )
    }

    // CreateProjectInteractor tests
    #[rstest]
    #[case(OWNER_ID, true)]
    #[case(MEMBER_ID, true)]
    #[case(VIEWER_ID, false)]
    #[case(STRANGER_ID, false)]
    #[tokio::test]
    async fn test_create_project_permissions(setup: Setup, #[case] actor: &str, #[case] allowed: bool) {
        let (workspace_reader, member_reader, _) = readers(&setup);
        let mut project_writer = MockProjectWriterMock::new();
        let db_session = if allowed {
            project_writer.expect_insert().times(1).returning(|p| Ok(p.id));
            committing_session()
        } else {
            MockDBSessionMock::new()
        };

        let result = CreateProjectInteractor::new(
            Arc::new(db_session),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(project_writer),
        )
        .execute(CreateProjectDTO {
            user_id: actor.to_string(),
            workspace_id: setup.workspace.id.value.to_string(),
            name: "Mobile app".to_string(),
            description: None,
            priority: "high".to_string(),
            budget: 10_000,
            due_date: None,
        })
        .await;

        match result {
            Ok(project) => {
                assert!(allowed);
                assert_eq!(project.status, "planning");
                assert_eq!(project.priority, "high");
            }
            Err(error) => {
                assert!(!allowed);
                assert!(matches!(error, AppError::Forbidden(_)));
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_project_rejects_negative_budget(setup: Setup) {
        let result = CreateProjectInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(MockWorkspaceReaderMock::new()),
            Arc::new(MockWorkspaceMemberReaderMock::new()),
            Arc::new(MockProjectWriterMock::new()),
        )
        .execute(CreateProjectDTO {
            user_id: OWNER_ID.to_string(),
            workspace_id: setup.workspace.id.value.to_string(),
            name: "Mobile app".to_string(),
            description: None,
            priority: "low".to_string(),
            budget: -1,
            due_date: None,
        })
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    // UpdateProjectInteractor tests
    #[rstest]
    #[case(150, 100, "completed")]
    #[case(100, 100, "completed")]
    #[case(40, 40, "planning")]
    #[case(-10, 0, "planning")]
    #[tokio::test]
    async fn test_update_progress_is_clamped(
        setup: Setup,
        #[case] progress: i32,
        #[case] expected: i32,
        #[case] status: &str,
    ) {
        let mut dto = update_dto(&setup, MEMBER_ID);
        dto.progress = Some(progress);

        let project = update_interactor(&setup, committing_session())
            .execute(dto)
            .await
            .unwrap();

        assert_eq!(project.progress, expected);
        assert_eq!(project.status, status);
        assert_eq!(project.completed_at.is_some(), status == "completed");
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_status_then_full_progress_completes(setup: Setup) {
        let mut dto = update_dto(&setup, OWNER_ID);
        dto.status = Some(ProjectStatus::OnHold.as_str().to_string());
        dto.progress = Some(100);

        let project = update_interactor(&setup, committing_session())
            .execute(dto)
            .await
            .unwrap();

        assert_eq!(project.status, "completed");
    }

    #[rstest]
    #[tokio::test]
    async fn test_viewer_cannot_update(setup: Setup) {
        let mut dto = update_dto(&setup, VIEWER_ID);
        dto.name = Some("Renamed".to_string());

        let result = update_interactor(&setup, MockDBSessionMock::new()).execute(dto).await;
        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_unknown_project_is_not_found(setup: Setup) {
        let mut project_reader = MockProjectReaderMock::new();
        project_reader.expect_find_by_id().returning(|_| Ok(None));

        let result = UpdateProjectInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(MockWorkspaceReaderMock::new()),
            Arc::new(MockWorkspaceMemberReaderMock::new()),
            Arc::new(project_reader),
            Arc::new(MockProjectWriterMock::new()),
        )
        .execute(update_dto(&setup, OWNER_ID))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::ProjectNotFound));
    }

    // DeleteProjectInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_member_cannot_delete_project(setup: Setup) {
        let (workspace_reader, member_reader, project_reader) = readers(&setup);

        let result = DeleteProjectInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(project_reader),
            Arc::new(MockProjectWriterMock::new()),
        )
        .execute(GetProjectDTO {
            user_id: MEMBER_ID.to_string(),
            project_id: setup.project.id.value.to_string(),
        })
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    // GetProjectListInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_project_list_clamps_page_size(setup: Setup) {
        let (workspace_reader, member_reader, mut project_reader) = readers(&setup);
        let project = setup.project.clone();
        project_reader.expect_count_projects().returning(|_| Ok(1));
        project_reader
            .expect_get_all()
            .withf(|_, limit, offset| *limit == 100 && *offset == 0)
            .returning(move |_, _, _| Ok(vec![project.clone()]));

        let page = GetProjectListInteractor::new(
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(project_reader),
        )
        .execute(GetProjectListDTO {
            user_id: VIEWER_ID.to_string(),
            workspace_id: setup.workspace.id.value.to_string(),
            page: PageRequestDTO {
                page: 0,
                per_page: 500,
            },
        })
        .await
        .unwrap();

        assert_eq!(page.per_page, 100);
        assert_eq!(page.items.len(), 1);
    }

    // AssignProjectMemberInteractor tests
    #[rstest]
    #[case(MEMBER_ID, true)]
    #[case(OWNER_ID, true)]
    #[case(STRANGER_ID, false)]
    #[tokio::test]
    async fn test_assignee_must_belong_to_workspace(setup: Setup, #[case] assignee: &str, #[case] allowed: bool) {
        let (workspace_reader, member_reader, project_reader) = readers(&setup);
        let mut project_writer = MockProjectWriterMock::new();
        let db_session = if allowed {
            project_writer
                .expect_upsert_member()
                .withf(|_, m| m.role == ProjectMemberRole::Lead)
                .times(1)
                .returning(|_, _| Ok(()));
            committing_session()
        } else {
            MockDBSessionMock::new()
        };

        let result = AssignProjectMemberInteractor::new(
            Arc::new(db_session),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(project_reader),
            Arc::new(project_writer),
        )
        .execute(AssignProjectMemberDTO {
            user_id: OWNER_ID.to_string(),
            project_id: setup.project.id.value.to_string(),
            member_user_id: assignee.to_string(),
            role: "lead".to_string(),
        })
        .await;

        match result {
            Ok(project) => {
                assert!(allowed);
                assert_eq!(project.members.len(), 1);
                assert_eq!(project.members[0].user_id, assignee);
            }
            Err(error) => {
                assert!(!allowed);
                assert!(matches!(error, AppError::MemberNotFound));
            }
        }
    }
}
