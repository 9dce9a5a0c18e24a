use async_trait::async_trait;

use crate::domain::{
    models::{
        Actor, Company, CompanyId, NewCompany, NewProject, Project, ProjectId, User, UserId,
        UserProfile,
    },
    ReportingError,
};

#[async_trait]
pub trait DirectoryService: Send + Sync + 'static {
    /// Loads an active user and the projects they administer.
    async fn resolve_actor(&self, user_id: &UserId) -> Result<Actor, ReportingError>;

    // ========================================================================
    // Companies
    // ========================================================================

    async fn list_companies(&self, actor: &Actor) -> Result<Vec<Company>, ReportingError>;

    async fn create_company(
        &self,
        actor: &Actor,
        company: NewCompany,
    ) -> Result<Company, ReportingError>;

    async fn update_company(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        company: NewCompany,
    ) -> Result<Company, ReportingError>;

    async fn set_company_active(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        active: bool,
    ) -> Result<(), ReportingError>;

    // ========================================================================
    // Projects
    // ========================================================================

    /// Projects the actor may log time against.
    async fn available_projects(&self, actor: &Actor) -> Result<Vec<Project>, ReportingError>;

    async fn create_project(
        &self,
        actor: &Actor,
        project: NewProject,
    ) -> Result<Project, ReportingError>;

    async fn update_project(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        project: NewProject,
    ) -> Result<Project, ReportingError>;

    async fn set_project_active(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        active: bool,
    ) -> Result<(), ReportingError>;

    // ========================================================================
    // Users
    // ========================================================================

    async fn list_users(&self, actor: &Actor) -> Result<Vec<User>, ReportingError>;

    /// Only super admins may create another super admin.
    async fn create_user(&self, actor: &Actor, profile: UserProfile)
        -> Result<User, ReportingError>;

    /// Changes account fields, role and hourly rate. Company admins can
    /// neither grant `super_admin` nor edit a super admin.
    async fn update_user(
        &self,
        actor: &Actor,
        user_id: &UserId,
        profile: UserProfile,
    ) -> Result<User, ReportingError>;

    async fn set_user_active(
        &self,
        actor: &Actor,
        user_id: &UserId,
        active: bool,
    ) -> Result<(), ReportingError>;
}
