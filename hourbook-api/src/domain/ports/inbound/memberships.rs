use async_trait::async_trait;

use crate::domain::{
    models::{Actor, AssignOutcome, Membership, ProjectId, ProjectRole, UserId},
    ReportingError,
};

#[async_trait]
pub trait MembershipService: Send + Sync + 'static {
    async fn members(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
    ) -> Result<Vec<Membership>, ReportingError>;

    async fn assign(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        user_id: &UserId,
        role: ProjectRole,
    ) -> Result<AssignOutcome, ReportingError>;

    async fn remove(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<(), ReportingError>;
}
