use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{
        Actor, Company, CompanyId, NewCompany, NewProject, Project, ProjectId, ProjectListing,
        Role, User, UserId, UserProfile,
    },
    ports::{inbound::DirectoryService, outbound::DirectoryRepository},
    ReportingError,
};

pub struct DirectoryServiceImpl<D> {
    directory: Arc<D>,
}

impl<D> DirectoryServiceImpl<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

impl<D: DirectoryRepository> DirectoryServiceImpl<D> {
    async fn ensure_active_company(&self, company_id: &CompanyId) -> Result<(), ReportingError> {
        let company = self
            .directory
            .get_company(company_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("company {company_id}")))?;
        if !company.is_active {
            return Err(ReportingError::validation(format!(
                "company {} is not active",
                company.name
            )));
        }

        Ok(())
    }

    /// Loads a user the actor may administer. Super admin accounts are off
    /// limits to everyone but other super admins.
    async fn managed_user(&self, actor: &Actor, user_id: &UserId) -> Result<User, ReportingError> {
        ReportingError::authorize(actor.is_admin())?;

        let user = self
            .directory
            .get_user(user_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("user {user_id}")))?;
        ReportingError::authorize(user.role != Role::SuperAdmin || actor.is_super_admin())?;

        Ok(user)
    }
}

fn ensure_can_grant(actor: &Actor, role: Role) -> Result<(), ReportingError> {
    ReportingError::authorize(actor.is_admin())?;
    ReportingError::authorize(role != Role::SuperAdmin || actor.is_super_admin())
}

#[async_trait]
impl<D: DirectoryRepository> DirectoryService for DirectoryServiceImpl<D> {
    async fn resolve_actor(&self, user_id: &UserId) -> Result<Actor, ReportingError> {
        let user = self
            .directory
            .get_user(user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| ReportingError::not_found(format!("active user {user_id}")))?;
        let managed = self.directory.managed_projects(user_id).await?;

        Ok(Actor::new(user.id, user.role).with_managed_projects(managed))
    }

    async fn list_companies(&self, actor: &Actor) -> Result<Vec<Company>, ReportingError> {
        ReportingError::authorize(actor.is_admin())?;
        self.directory.list_companies().await
    }

    async fn create_company(
        &self,
        actor: &Actor,
        company: NewCompany,
    ) -> Result<Company, ReportingError> {
        ReportingError::authorize(actor.is_super_admin())?;

        let company = self.directory.create_company(&company).await?;
        tracing::info!(company = %company.id, name = %company.name, "created company");

        Ok(company)
    }

    async fn update_company(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        company: NewCompany,
    ) -> Result<Company, ReportingError> {
        ReportingError::authorize(actor.is_super_admin())?;

        let company = self
            .directory
            .update_company(company_id, &company)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("company {company_id}")))?;
        tracing::info!(company = %company.id, name = %company.name, "updated company");

        Ok(company)
    }

    async fn set_company_active(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        active: bool,
    ) -> Result<(), ReportingError> {
        ReportingError::authorize(actor.is_super_admin())?;

        if !self.directory.set_company_active(company_id, active).await? {
            return Err(ReportingError::not_found(format!("company {company_id}")));
        }
        tracing::info!(company = %company_id, active, "changed company status");

        Ok(())
    }

    async fn available_projects(&self, actor: &Actor) -> Result<Vec<Project>, ReportingError> {
        let listing = if actor.is_admin() {
            ProjectListing::AllActive
        } else {
            ProjectListing::AssignedTo(actor.user_id)
        };

        let mut projects = self.directory.list_projects(listing).await?;
        projects.retain(|project| project.is_active);
        projects.sort_by(|a, b| {
            (&a.company_name, &a.name, a.id).cmp(&(&b.company_name, &b.name, b.id))
        });

        Ok(projects)
    }

    async fn create_project(
        &self,
        actor: &Actor,
        project: NewProject,
    ) -> Result<Project, ReportingError> {
        ReportingError::authorize(actor.is_super_admin())?;

        self.ensure_active_company(&project.company_id).await?;

        let project = self.directory.create_project(&project).await?;
        tracing::info!(project = %project.id, name = %project.name, "created project");

        Ok(project)
    }

    async fn update_project(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        project: NewProject,
    ) -> Result<Project, ReportingError> {
        ReportingError::authorize(actor.is_super_admin())?;

        let existing = self
            .directory
            .get_project(project_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("project {project_id}")))?;
        if existing.company_id != project.company_id {
            self.ensure_active_company(&project.company_id).await?;
        }

        let project = self
            .directory
            .update_project(project_id, &project)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("project {project_id}")))?;
        tracing::info!(project = %project.id, name = %project.name, "updated project");

        Ok(project)
    }

    async fn set_project_active(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        active: bool,
    ) -> Result<(), ReportingError> {
        ReportingError::authorize(actor.is_super_admin())?;

        if !self.directory.set_project_active(project_id, active).await? {
            return Err(ReportingError::not_found(format!("project {project_id}")));
        }
        tracing::info!(project = %project_id, active, "changed project status");

        Ok(())
    }

    async fn list_users(&self, actor: &Actor) -> Result<Vec<User>, ReportingError> {
        ReportingError::authorize(actor.is_admin())?;
        self.directory.list_users().await
    }

    async fn create_user(
        &self,
        actor: &Actor,
        profile: UserProfile,
    ) -> Result<User, ReportingError> {
        ensure_can_grant(actor, profile.role)?;

        let user = self.directory.create_user(&profile).await?;
        tracing::info!(user = %user.id, role = %user.role, "created user");

        Ok(user)
    }

    async fn update_user(
        &self,
        actor: &Actor,
        user_id: &UserId,
        profile: UserProfile,
    ) -> Result<User, ReportingError> {
        ensure_can_grant(actor, profile.role)?;
        let existing = self.managed_user(actor, user_id).await?;

        let user = self
            .directory
            .update_user(user_id, &profile)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("user {user_id}")))?;
        if existing.hourly_rate != user.hourly_rate {
            tracing::info!(user = %user.id, "changed hourly rate");
        }

        Ok(user)
    }

    async fn set_user_active(
        &self,
        actor: &Actor,
        user_id: &UserId,
        active: bool,
    ) -> Result<(), ReportingError> {
        self.managed_user(actor, user_id).await?;
        if !active && *user_id == actor.user_id {
            return Err(ReportingError::validation("you cannot deactivate yourself"));
        }

        if !self.directory.set_user_active(user_id, active).await? {
            return Err(ReportingError::not_found(format!("user {user_id}")));
        }
        tracing::info!(user = %user_id, active, "changed user status");

        Ok(())
    }
}
