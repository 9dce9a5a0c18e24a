use std::sync::Arc;

use async_trait::async_trait;
use rollup::{can_manage_project, can_view, Scope};

use crate::domain::{
    models::{Actor, AssignOutcome, Membership, ProjectId, ProjectRole, UserId},
    ports::{
        inbound::MembershipService,
        outbound::{DirectoryRepository, MembershipRepository},
    },
    ReportingError,
};

pub struct MembershipServiceImpl<M, D> {
    memberships: Arc<M>,
    directory: Arc<D>,
}

impl<M, D> MembershipServiceImpl<M, D> {
    pub fn new(memberships: Arc<M>, directory: Arc<D>) -> Self {
        Self {
            memberships,
            directory,
        }
    }
}

impl<M, D> MembershipServiceImpl<M, D>
where
    M: MembershipRepository,
    D: DirectoryRepository,
{
    async fn ensure_project(&self, project_id: &ProjectId) -> Result<(), ReportingError> {
        self.directory
            .get_project(project_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ReportingError::not_found(format!("project {project_id}")))
    }
}

#[async_trait]
impl<M, D> MembershipService for MembershipServiceImpl<M, D>
where
    M: MembershipRepository,
    D: DirectoryRepository,
{
    async fn members(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
    ) -> Result<Vec<Membership>, ReportingError> {
        ReportingError::authorize(can_view(actor, Scope::Project(*project_id)))?;
        self.ensure_project(project_id).await?;

        let mut members = self.memberships.active_members(project_id).await?;
        members.sort_by(|a, b| (&a.user_name, a.user_id).cmp(&(&b.user_name, b.user_id)));

        Ok(members)
    }

    async fn assign(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        user_id: &UserId,
        role: ProjectRole,
    ) -> Result<AssignOutcome, ReportingError> {
        ReportingError::authorize(can_manage_project(actor, *project_id))?;
        // Project admins may add members but not promote them.
        ReportingError::authorize(role != ProjectRole::ProjectAdmin || actor.is_admin())?;

        self.ensure_project(project_id).await?;
        let user = self
            .directory
            .get_user(user_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("user {user_id}")))?;
        if !user.is_active {
            return Err(ReportingError::validation(format!(
                "{} is not an active user",
                user.full_name()
            )));
        }

        let outcome = self.memberships.assign(project_id, user_id, role).await?;
        tracing::debug!(project = %project_id, user = %user_id, %role, ?outcome, "assigned member");

        Ok(outcome)
    }

    async fn remove(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<(), ReportingError> {
        ReportingError::authorize(can_manage_project(actor, *project_id))?;

        if !self.memberships.remove(project_id, user_id).await? {
            return Err(ReportingError::not_found(format!(
                "membership of user {user_id} in project {project_id}"
            )));
        }
        tracing::debug!(project = %project_id, user = %user_id, "removed member");

        Ok(())
    }
}
