use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    models::{
        Company, CompanyId, NewCompany, NewProject, Project, ProjectId, ProjectListing, User,
        UserId, UserProfile,
    },
    ReportingError,
};

/// Companies, projects and users.
#[async_trait]
pub trait DirectoryRepository: Send + Sync + 'static {
    // ========================================================================
    // Users
    // ========================================================================

    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, ReportingError>;

    /// Every user, active or not, ordered by name.
    async fn list_users(&self) -> Result<Vec<User>, ReportingError>;

    /// Fails with a validation error when the username or email is taken.
    async fn create_user(&self, profile: &UserProfile) -> Result<User, ReportingError>;

    /// Overwrites the account fields. Returns `None` when the user does not
    /// exist.
    async fn update_user(
        &self,
        user_id: &UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, ReportingError>;

    /// Current hourly rates of the given users. Users without a rate are
    /// left out.
    async fn hourly_rates(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, Decimal>, ReportingError>;

    /// Projects where the user holds an active `project_admin` membership.
    async fn managed_projects(&self, user_id: &UserId) -> Result<Vec<ProjectId>, ReportingError>;

    /// Returns `false` when the user does not exist.
    async fn set_user_active(&self, user_id: &UserId, active: bool)
        -> Result<bool, ReportingError>;

    // ========================================================================
    // Companies
    // ========================================================================

    async fn get_company(&self, company_id: &CompanyId) -> Result<Option<Company>, ReportingError>;

    async fn list_companies(&self) -> Result<Vec<Company>, ReportingError>;

    async fn create_company(&self, company: &NewCompany) -> Result<Company, ReportingError>;

    async fn update_company(
        &self,
        company_id: &CompanyId,
        company: &NewCompany,
    ) -> Result<Option<Company>, ReportingError>;

    async fn set_company_active(
        &self,
        company_id: &CompanyId,
        active: bool,
    ) -> Result<bool, ReportingError>;

    // ========================================================================
    // Projects
    // ========================================================================

    async fn get_project(&self, project_id: &ProjectId) -> Result<Option<Project>, ReportingError>;

    async fn list_projects(&self, listing: ProjectListing) -> Result<Vec<Project>, ReportingError>;

    async fn create_project(&self, project: &NewProject) -> Result<Project, ReportingError>;

    /// Keeps the project's active flag.
    async fn update_project(
        &self,
        project_id: &ProjectId,
        project: &NewProject,
    ) -> Result<Option<Project>, ReportingError>;

    async fn set_project_active(
        &self,
        project_id: &ProjectId,
        active: bool,
    ) -> Result<bool, ReportingError>;
}
