use async_trait::async_trait;

use crate::domain::{
    models::{AssignOutcome, Membership, ProjectId, ProjectRole, UserId},
    ReportingError,
};

#[async_trait]
pub trait MembershipRepository: Send + Sync + 'static {
    /// Inserts an active membership unless one already exists. Must be a
    /// single atomic statement against a uniqueness constraint on active
    /// `(project_id, user_id)` pairs.
    async fn assign(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        role: ProjectRole,
    ) -> Result<AssignOutcome, ReportingError>;

    /// Soft-deletes the active membership. Returns `false` if there was none.
    async fn remove(&self, project_id: &ProjectId, user_id: &UserId)
        -> Result<bool, ReportingError>;

    async fn active_members(&self, project_id: &ProjectId)
        -> Result<Vec<Membership>, ReportingError>;

    async fn is_active_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<bool, ReportingError>;
}
