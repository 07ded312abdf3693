use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::pagination::PageDTO;
use crate::application::dto::workspace::{
    CreateWorkspaceDTO, DeleteWorkspaceDTO, GetWorkspaceDTO, GetWorkspaceListDTO, LeaveWorkspaceDTO,
    RemoveMemberDTO, UpdateMemberRoleDTO, UpdateWorkspaceDTO, WorkspaceDTO, WorkspaceMemberDTO,
};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::project::ProjectReader;
use crate::application::interface::gateway::workspace::{
    WorkspaceMemberReader, WorkspaceMemberWriter, WorkspaceReader, WorkspaceWriter,
};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::{Workspace, WorkspaceMember, WorkspaceMemberRole, WorkspaceSettings};
use crate::domain::services::access::{authorize, authorize_member_change, effective_role, WorkspaceAction};

/// Loads an active workspace together with its member list.
pub(crate) async fn load_workspace(
    workspace_reader: &dyn WorkspaceReader,
    member_reader: &dyn WorkspaceMemberReader,
    workspace_id: &Id<Workspace>,
) -> AppResult<(Workspace, Vec<WorkspaceMember>)> {
    let workspace = workspace_reader
        .find_by_id(workspace_id)
        .await?
        .ok_or(AppError::WorkspaceNotFound)?;
    let members = member_reader.list(workspace_id).await?;
    Ok((workspace, members))
}

/// The owner plus every distinct member row that is not the owner's.
fn member_count(workspace: &Workspace, members: &[WorkspaceMember]) -> i64 {
    members.iter().filter(|m| !workspace.is_owner(&m.user_id)).count() as i64 + 1
}

#[derive(Clone)]
pub struct CreateWorkspaceInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_writer: Arc<dyn WorkspaceWriter>,
}

impl CreateWorkspaceInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, workspace_writer: Arc<dyn WorkspaceWriter>) -> Self {
        Self {
            db_session,
            workspace_writer,
        }
    }

    pub async fn execute(&self, dto: CreateWorkspaceDTO) -> AppResult<WorkspaceDTO> {
        let owner_user_id: Id<User> = dto.owner_user_id.try_into()?;
        let settings = WorkspaceSettings {
            is_public: dto.is_public,
            allow_member_invite: dto.allow_member_invite,
        };
        let workspace = Workspace::new(owner_user_id, dto.name, dto.description, settings);

        self.workspace_writer.insert(workspace.clone()).await?;
        self.db_session.commit().await?;
        info!("Workspace {} created", workspace.id);

        Ok(WorkspaceDTO::new(workspace, Some("owner".to_string()), 1, 0))
    }
}

#[derive(Clone)]
pub struct GetWorkspaceListInteractor {
    workspace_reader: Arc<dyn WorkspaceReader>,
}

impl GetWorkspaceListInteractor {
    pub fn new(workspace_reader: Arc<dyn WorkspaceReader>) -> Self {
        Self { workspace_reader }
    }

    pub async fn execute(&self, dto: GetWorkspaceListDTO) -> AppResult<PageDTO<WorkspaceDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let (page, per_page, offset) = dto.page.bounds();

        let total = self.workspace_reader.count_accessible_by_user(&user_id).await?;
        let views = self
            .workspace_reader
            .find_accessible_by_user(&user_id, per_page, offset)
            .await?;

        let items = views
            .into_iter()
            .map(|view| WorkspaceDTO::new(view.workspace, Some(view.user_role), view.total_members, view.total_projects))
            .collect();

        Ok(PageDTO {
            total,
            page,
            per_page,
            items,
        })
    }
}

#[derive(Clone)]
pub struct GetWorkspaceInteractor {
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
}

impl GetWorkspaceInteractor {
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

    pub async fn execute(&self, dto: GetWorkspaceDTO) -> AppResult<WorkspaceDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::Read)?;

        let role = effective_role(&workspace, &members, &user_id).map(|r| r.as_str().to_string());
        let total_members = member_count(&workspace, &members);
        let total_projects = self.project_reader.count_projects(&workspace_id).await?;

        Ok(WorkspaceDTO::new(workspace, role, total_members, total_projects))
    }
}

#[derive(Clone)]
pub struct UpdateWorkspaceInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    project_reader: Arc<dyn ProjectReader>,
    workspace_writer: Arc<dyn WorkspaceWriter>,
}

impl UpdateWorkspaceInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        project_reader: Arc<dyn ProjectReader>,
        workspace_writer: Arc<dyn WorkspaceWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            project_reader,
            workspace_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateWorkspaceDTO) -> AppResult<WorkspaceDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (mut workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::UpdateWorkspace)?;

        if let Some(name) = dto.name {
            workspace.name = name;
        }
        if let Some(description) = dto.description {
            workspace.description = Some(description);
        }
        if let Some(is_public) = dto.is_public {
            workspace.settings.is_public = is_public;
        }
        if let Some(allow_member_invite) = dto.allow_member_invite {
            workspace.settings.allow_member_invite = allow_member_invite;
        }
        workspace.updated_at = Utc::now();

        self.workspace_writer.update(workspace.clone()).await?;
        self.db_session.commit().await?;

        let role = effective_role(&workspace, &members, &user_id).map(|r| r.as_str().to_string());
        let total_members = member_count(&workspace, &members);
        let total_projects = self.project_reader.count_projects(&workspace_id).await?;
        Ok(WorkspaceDTO::new(workspace, role, total_members, total_projects))
    }
}

#[derive(Clone)]
pub struct DeleteWorkspaceInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    workspace_writer: Arc<dyn WorkspaceWriter>,
}

impl DeleteWorkspaceInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        workspace_writer: Arc<dyn WorkspaceWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            workspace_writer,
        }
    }

    pub async fn execute(&self, dto: DeleteWorkspaceDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::DeleteWorkspace)?;

        self.workspace_writer.deactivate(&workspace_id).await?;
        self.db_session.commit().await?;
        info!("Workspace {} deactivated by {}", workspace_id, user_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct GetWorkspaceMembersInteractor {
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
}

impl GetWorkspaceMembersInteractor {
    pub fn new(workspace_reader: Arc<dyn WorkspaceReader>, member_reader: Arc<dyn WorkspaceMemberReader>) -> Self {
        Self {
            workspace_reader,
            member_reader,
        }
    }

    /// The owner is listed first with the `owner` role.
    pub async fn execute(&self, dto: GetWorkspaceDTO) -> AppResult<Vec<WorkspaceMemberDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::Read)?;

        let owner = WorkspaceMemberDTO {
            user_id: workspace.owner_user_id.value.to_string(),
            role: "owner".to_string(),
            joined_at: workspace.created_at,
        };
        Ok(std::iter::once(owner)
            .chain(
                members
                    .into_iter()
                    .filter(|m| m.user_id != workspace.owner_user_id)
                    .map(WorkspaceMemberDTO::from),
            )
            .collect())
    }
}

#[derive(Clone)]
pub struct UpdateMemberRoleInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    member_writer: Arc<dyn WorkspaceMemberWriter>,
}

impl UpdateMemberRoleInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        member_writer: Arc<dyn WorkspaceMemberWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            member_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateMemberRoleDTO) -> AppResult<WorkspaceMemberDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let target_id: Id<User> = dto.target_user_id.try_into()?;
        let role: WorkspaceMemberRole = dto.role.parse()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;

        let mut target = authorize_member_change(&workspace, &members, &user_id, &target_id)?.clone();
        self.member_writer.update_role(&workspace_id, &target_id, role).await?;
        self.db_session.commit().await?;
        info!("Member {} of workspace {} is now {}", target_id, workspace_id, role.as_str());

        target.role = role;
        Ok(target.into())
    }
}

#[derive(Clone)]
pub struct RemoveMemberInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    member_writer: Arc<dyn WorkspaceMemberWriter>,
}

impl RemoveMemberInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        member_writer: Arc<dyn WorkspaceMemberWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            member_writer,
        }
    }

    pub async fn execute(&self, dto: RemoveMemberDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let target_id: Id<User> = dto.target_user_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;

        authorize_member_change(&workspace, &members, &user_id, &target_id)?;
        self.member_writer.delete(&workspace_id, &target_id).await?;
        self.db_session.commit().await?;
        info!("Member {} removed from workspace {}", target_id, workspace_id);
        Ok(())
    }
}

#[derive(Clone)]
pub struct LeaveWorkspaceInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    member_writer: Arc<dyn WorkspaceMemberWriter>,
}

impl LeaveWorkspaceInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        member_writer: Arc<dyn WorkspaceMemberWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            member_writer,
        }
    }

    pub async fn execute(&self, dto: LeaveWorkspaceDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;

        if workspace.is_owner(&user_id) {
            return Err(AppError::Forbidden("The workspace owner cannot leave it".to_string()));
        }
        if !members.iter().any(|m| m.user_id == user_id) {
            return Err(AppError::MemberNotFound);
        }

        self.member_writer.delete(&workspace_id, &user_id).await?;
        self.db_session.commit().await?;
        Ok(())
    }
}
