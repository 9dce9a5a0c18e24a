//! Who may see and change which time entries.
//!
//! Every report and mutation consults these predicates before touching the
//! entry store. The rollup itself never sees an [`Actor`].

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CompanyId, EntryFilter, ProjectId, RollupError, UserId};

/// Global role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    CompanyAdmin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::CompanyAdmin => "company_admin",
            Role::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = RollupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "company_admin" => Ok(Role::CompanyAdmin),
            "user" => Ok(Role::User),
            other => Err(RollupError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a user holds on a single project through their membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    #[default]
    User,
    ProjectAdmin,
}

impl ProjectRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::User => "user",
            ProjectRole::ProjectAdmin => "project_admin",
        }
    }
}

impl FromStr for ProjectRole {
    type Err = RollupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(ProjectRole::User),
            "project_admin" => Ok(ProjectRole::ProjectAdmin),
            other => Err(RollupError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    managed_projects: BTreeSet<ProjectId>,
}

/// Row of the permission table an actor falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    SuperAdmin,
    CompanyAdmin,
    ProjectAdmin,
    Regular,
}

/// What a request wants to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    OwnEntries,
    Project(ProjectId),
    Company(CompanyId),
    All,
}

impl Actor {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            managed_projects: BTreeSet::new(),
        }
    }

    /// Projects where the actor holds an active `project_admin` membership.
    pub fn with_managed_projects(mut self, projects: impl IntoIterator<Item = ProjectId>) -> Self {
        self.managed_projects.extend(projects);
        self
    }

    pub fn kind(&self) -> ActorKind {
        match self.role {
            Role::SuperAdmin => ActorKind::SuperAdmin,
            Role::CompanyAdmin => ActorKind::CompanyAdmin,
            Role::User if self.managed_projects.is_empty() => ActorKind::Regular,
            Role::User => ActorKind::ProjectAdmin,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }

    /// Super admins and company admins.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::SuperAdmin | Role::CompanyAdmin)
    }

    pub fn manages(&self, project_id: ProjectId) -> bool {
        self.managed_projects.contains(&project_id)
    }
}

pub fn can_view(actor: &Actor, scope: Scope) -> bool {
    match (actor.kind(), scope) {
        (_, Scope::OwnEntries) => true,
        (ActorKind::SuperAdmin | ActorKind::CompanyAdmin, _) => true,
        (ActorKind::ProjectAdmin, Scope::Project(project_id)) => actor.manages(project_id),
        (ActorKind::ProjectAdmin, Scope::Company(_) | Scope::All) => false,
        (ActorKind::Regular, Scope::Project(_) | Scope::Company(_) | Scope::All) => false,
    }
}

/// Profile and per-user reports: the user themselves or an admin.
pub fn can_view_user(actor: &Actor, user_id: UserId) -> bool {
    actor.user_id == user_id || actor.is_admin()
}

pub fn can_manage_project(actor: &Actor, project_id: ProjectId) -> bool {
    actor.is_admin() || actor.manages(project_id)
}

/// Editing or deleting an entry: its owner, or whoever manages its project.
pub fn can_modify_entry(actor: &Actor, owner: UserId, project_id: ProjectId) -> bool {
    actor.user_id == owner || can_manage_project(actor, project_id)
}

/// Clamps a requested filter to what the actor may see.
///
/// Admins get the request unchanged. A project admin asking for a project
/// they manage gets that project, for any user. Everyone else is pinned to
/// their own entries; the requested project, company and dates can only
/// narrow that further.
pub fn resolve_filter(actor: &Actor, requested: EntryFilter) -> EntryFilter {
    let scope = match (requested.project_id, requested.company_id) {
        (Some(project_id), _) => Scope::Project(project_id),
        (None, Some(company_id)) => Scope::Company(company_id),
        (None, None) => Scope::All,
    };

    if can_view(actor, scope) {
        return requested;
    }

    EntryFilter {
        user_id: Some(actor.user_id),
        ..requested
    }
}
