//! In-memory implementation of every outbound port, for service tests.

use std::{
    collections::{BTreeMap, HashMap},
    str::FromStr,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use rollup::ReportEntry;
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use super::{
    DirectoryRepository, EntryStore, MembershipRepository, PreferenceRepository,
    TimeEntryRepository,
};
use crate::domain::{
    models::{
        AssignOutcome, Company, CompanyId, ContactDetails, EntryFilter, EntryId, Hours,
        Membership, NewCompany, NewProject, Preference, Project, ProjectId, ProjectListing,
        ProjectRole, ProjectStatus, Role, Theme, TimeEntry, TimeEntryDraft, User, UserId,
        UserProfile,
    },
    ReportingError,
};

#[derive(Default)]
struct State {
    users: BTreeMap<UserId, User>,
    companies: BTreeMap<CompanyId, Company>,
    projects: BTreeMap<ProjectId, Project>,
    entries: BTreeMap<EntryId, TimeEntry>,
    memberships: Vec<Membership>,
    preferences: HashMap<UserId, Theme>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        1000 + self.next_id
    }

    /// Mirrors the unique indexes on `users.username` and `users.email`.
    fn ensure_unique_account(
        &self,
        profile: &UserProfile,
        except: Option<UserId>,
    ) -> Result<(), ReportingError> {
        let taken = self.users.values().any(|user| {
            Some(user.id) != except
                && (user.username == profile.username || user.email == profile.email)
        });
        if taken {
            return Err(ReportingError::validation(
                "username or email is already in use",
            ));
        }

        Ok(())
    }

    fn ensure_unique_company(
        &self,
        name: &str,
        except: Option<CompanyId>,
    ) -> Result<(), ReportingError> {
        if self
            .companies
            .values()
            .any(|company| Some(company.id) != except && company.name == name)
        {
            return Err(ReportingError::validation(format!(
                "a company named {name} already exists"
            )));
        }

        Ok(())
    }
}

/// Shared in-memory backend. Clones see the same data.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<RwLock<State>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, id: i32, name: &str, role: Role, rate: Option<&str>) -> Self {
        let (first_name, last_name) = name.split_once(' ').unwrap_or((name, ""));
        let user = User {
            id: UserId::new(id),
            username: name.to_lowercase().replace(' ', "."),
            email: format!("{}@example.test", name.to_lowercase().replace(' ', ".")),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role,
            hourly_rate: rate.map(|rate| Decimal::from_str(rate).unwrap()),
            is_active: true,
        };
        self.state.write().unwrap().users.insert(user.id, user);
        self
    }

    pub fn with_company(self, id: i32, name: &str) -> Self {
        let company = Company {
            id: CompanyId::new(id),
            name: name.to_string(),
            contact: ContactDetails::default(),
            description: None,
            is_active: true,
        };
        self.state
            .write()
            .unwrap()
            .companies
            .insert(company.id, company);
        self
    }

    pub fn with_project(self, id: i32, company_id: i32, name: &str) -> Self {
        {
            let mut state = self.state.write().unwrap();
            let company_id = CompanyId::new(company_id);
            let company_name = state
                .companies
                .get(&company_id)
                .map(|company| company.name.clone())
                .unwrap_or_default();
            let project = Project {
                id: ProjectId::new(id),
                company_id,
                company_name,
                name: name.to_string(),
                description: None,
                status: ProjectStatus::Active,
                budget: None,
                start_date: time::macros::date!(2024 - 01 - 01),
                end_date: None,
                is_active: true,
            };
            state.projects.insert(project.id, project);
        }
        self
    }

    pub fn with_membership(self, project_id: i32, user_id: i32, role: ProjectRole) -> Self {
        {
            let mut state = self.state.write().unwrap();
            let user_name = state
                .users
                .get(&UserId::new(user_id))
                .map(User::full_name)
                .unwrap_or_default();
            state.memberships.push(Membership {
                project_id: ProjectId::new(project_id),
                user_id: UserId::new(user_id),
                user_name,
                role,
                assigned_at: OffsetDateTime::now_utc(),
                is_active: true,
            });
        }
        self
    }

    pub fn with_entry(self, id: i32, user_id: i32, project_id: i32, date: Date, hours: &str) -> Self {
        let now = OffsetDateTime::now_utc();
        let entry = TimeEntry {
            id: EntryId::new(id),
            user_id: UserId::new(user_id),
            project_id: ProjectId::new(project_id),
            date,
            hours: Hours::from_str(hours).unwrap(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        self.state.write().unwrap().entries.insert(entry.id, entry);
        self
    }

    pub fn deactivate_project(&self, project_id: i32) {
        if let Some(project) = self
            .state
            .write()
            .unwrap()
            .projects
            .get_mut(&ProjectId::new(project_id))
        {
            project.is_active = false;
        }
    }

    pub fn entry_count(&self) -> usize {
        self.state.read().unwrap().entries.len()
    }

    /// Every membership row for the pair, active or not.
    pub fn membership_rows(&self, project_id: i32, user_id: i32) -> Vec<Membership> {
        self.state
            .read()
            .unwrap()
            .memberships
            .iter()
            .filter(|m| m.project_id.as_i32() == project_id && m.user_id.as_i32() == user_id)
            .cloned()
            .collect()
    }

    pub fn preference_rows(&self) -> usize {
        self.state.read().unwrap().preferences.len()
    }
}

#[async_trait]
impl EntryStore for MockBackend {
    async fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<ReportEntry>, ReportingError> {
        let state = self.state.read().unwrap();
        let mut entries = state
            .entries
            .values()
            .filter_map(|entry| {
                let user = state.users.get(&entry.user_id)?;
                let project = state.projects.get(&entry.project_id)?;
                let company = state.companies.get(&project.company_id)?;
                Some(ReportEntry {
                    id: entry.id,
                    user_id: entry.user_id,
                    user_name: user.full_name(),
                    project_id: project.id,
                    project_name: project.name.clone(),
                    company_id: company.id,
                    company_name: company.name.clone(),
                    date: entry.date,
                    hours: entry.hours,
                    description: entry.description.clone(),
                })
            })
            .filter(|entry| filter.matches(entry))
            .collect::<Vec<_>>();
        entries.sort_by_key(|entry| (entry.date, entry.id));

        Ok(entries)
    }
}

#[async_trait]
impl DirectoryRepository for MockBackend {
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, ReportingError> {
        Ok(self.state.read().unwrap().users.get(user_id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, ReportingError> {
        let mut users = self
            .state
            .read()
            .unwrap()
            .users
            .values()
            .cloned()
            .collect::<Vec<_>>();
        users.sort_by(|a, b| {
            (&a.first_name, &a.last_name, a.id).cmp(&(&b.first_name, &b.last_name, b.id))
        });
        Ok(users)
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<User, ReportingError> {
        let mut state = self.state.write().unwrap();
        state.ensure_unique_account(profile, None)?;

        let user = User {
            id: UserId::new(state.next_id()),
            username: profile.username.clone(),
            email: profile.email.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            role: profile.role,
            hourly_rate: profile.hourly_rate,
            is_active: true,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(
        &self,
        user_id: &UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, ReportingError> {
        let mut state = self.state.write().unwrap();
        state.ensure_unique_account(profile, Some(*user_id))?;

        Ok(state.users.get_mut(user_id).map(|user| {
            user.username = profile.username.clone();
            user.email = profile.email.clone();
            user.first_name = profile.first_name.clone();
            user.last_name = profile.last_name.clone();
            user.role = profile.role;
            user.hourly_rate = profile.hourly_rate;
            user.clone()
        }))
    }

    async fn hourly_rates(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, Decimal>, ReportingError> {
        let state = self.state.read().unwrap();
        Ok(user_ids
            .iter()
            .filter_map(|id| {
                let rate = state.users.get(id)?.hourly_rate?;
                Some((*id, rate))
            })
            .collect())
    }

    async fn managed_projects(&self, user_id: &UserId) -> Result<Vec<ProjectId>, ReportingError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .memberships
            .iter()
            .filter(|m| m.is_active && m.user_id == *user_id && m.role == ProjectRole::ProjectAdmin)
            .map(|m| m.project_id)
            .collect())
    }

    async fn set_user_active(&self, user_id: &UserId, active: bool) -> Result<bool, ReportingError> {
        let mut state = self.state.write().unwrap();
        Ok(state
            .users
            .get_mut(user_id)
            .map(|user| user.is_active = active)
            .is_some())
    }

    async fn get_company(&self, company_id: &CompanyId) -> Result<Option<Company>, ReportingError> {
        Ok(self.state.read().unwrap().companies.get(company_id).cloned())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, ReportingError> {
        let mut companies = self
            .state
            .read()
            .unwrap()
            .companies
            .values()
            .cloned()
            .collect::<Vec<_>>();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn create_company(&self, company: &NewCompany) -> Result<Company, ReportingError> {
        let mut state = self.state.write().unwrap();
        state.ensure_unique_company(&company.name, None)?;
        let company = Company {
            id: CompanyId::new(state.next_id()),
            name: company.name.clone(),
            contact: company.contact.clone(),
            description: company.description.clone(),
            is_active: true,
        };
        state.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn update_company(
        &self,
        company_id: &CompanyId,
        company: &NewCompany,
    ) -> Result<Option<Company>, ReportingError> {
        let mut state = self.state.write().unwrap();
        state.ensure_unique_company(&company.name, Some(*company_id))?;

        let Some(stored) = state.companies.get_mut(company_id) else {
            return Ok(None);
        };
        stored.name = company.name.clone();
        stored.contact = company.contact.clone();
        stored.description = company.description.clone();
        let stored = stored.clone();

        for project in state.projects.values_mut() {
            if project.company_id == *company_id {
                project.company_name = stored.name.clone();
            }
        }
        Ok(Some(stored))
    }

    async fn set_company_active(
        &self,
        company_id: &CompanyId,
        active: bool,
    ) -> Result<bool, ReportingError> {
        let mut state = self.state.write().unwrap();
        Ok(state
            .companies
            .get_mut(company_id)
            .map(|company| company.is_active = active)
            .is_some())
    }

    async fn get_project(&self, project_id: &ProjectId) -> Result<Option<Project>, ReportingError> {
        Ok(self.state.read().unwrap().projects.get(project_id).cloned())
    }

    async fn list_projects(&self, listing: ProjectListing) -> Result<Vec<Project>, ReportingError> {
        let state = self.state.read().unwrap();
        let projects = state.projects.values().filter(|project| match listing {
            ProjectListing::AllActive => project.is_active,
            ProjectListing::AssignedTo(user_id) => state.memberships.iter().any(|m| {
                m.is_active && m.user_id == user_id && m.project_id == project.id
            }),
        });
        Ok(projects.cloned().collect())
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, ReportingError> {
        let mut state = self.state.write().unwrap();
        let company_name = state
            .companies
            .get(&project.company_id)
            .map(|company| company.name.clone())
            .ok_or_else(|| ReportingError::not_found("company"))?;
        let project = Project {
            id: ProjectId::new(state.next_id()),
            company_id: project.company_id,
            company_name,
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            budget: project.budget,
            start_date: project.start_date,
            end_date: project.end_date,
            is_active: true,
        };
        state.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        project_id: &ProjectId,
        project: &NewProject,
    ) -> Result<Option<Project>, ReportingError> {
        let mut state = self.state.write().unwrap();
        let company_name = state
            .companies
            .get(&project.company_id)
            .map(|company| company.name.clone())
            .ok_or_else(|| ReportingError::not_found("company"))?;

        Ok(state.projects.get_mut(project_id).map(|stored| {
            stored.company_id = project.company_id;
            stored.company_name = company_name;
            stored.name = project.name.clone();
            stored.description = project.description.clone();
            stored.status = project.status;
            stored.budget = project.budget;
            stored.start_date = project.start_date;
            stored.end_date = project.end_date;
            stored.clone()
        }))
    }

    async fn set_project_active(
        &self,
        project_id: &ProjectId,
        active: bool,
    ) -> Result<bool, ReportingError> {
        let mut state = self.state.write().unwrap();
        Ok(state
            .projects
            .get_mut(project_id)
            .map(|project| project.is_active = active)
            .is_some())
    }
}

#[async_trait]
impl TimeEntryRepository for MockBackend {
    async fn get_entry(&self, entry_id: &EntryId) -> Result<Option<TimeEntry>, ReportingError> {
        Ok(self.state.read().unwrap().entries.get(entry_id).cloned())
    }

    async fn create_entry(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError> {
        let mut state = self.state.write().unwrap();
        let now = OffsetDateTime::now_utc();
        let entry = TimeEntry {
            id: EntryId::new(state.next_id()),
            user_id: *user_id,
            project_id: draft.project_id,
            date: draft.date,
            hours: draft.hours,
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update_entry(
        &self,
        entry_id: &EntryId,
        draft: &TimeEntryDraft,
    ) -> Result<Option<TimeEntry>, ReportingError> {
        let mut state = self.state.write().unwrap();
        Ok(state.entries.get_mut(entry_id).map(|entry| {
            entry.project_id = draft.project_id;
            entry.date = draft.date;
            entry.hours = draft.hours;
            entry.description = draft.description.clone();
            entry.updated_at = OffsetDateTime::now_utc();
            entry.clone()
        }))
    }

    async fn delete_entry(&self, entry_id: &EntryId) -> Result<bool, ReportingError> {
        Ok(self.state.write().unwrap().entries.remove(entry_id).is_some())
    }
}

#[async_trait]
impl MembershipRepository for MockBackend {
    async fn assign(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        role: ProjectRole,
    ) -> Result<AssignOutcome, ReportingError> {
        let mut state = self.state.write().unwrap();
        let exists = state
            .memberships
            .iter()
            .any(|m| m.is_active && m.project_id == *project_id && m.user_id == *user_id);
        if exists {
            return Ok(AssignOutcome::AlreadyAssigned);
        }

        let user_name = state
            .users
            .get(user_id)
            .map(User::full_name)
            .unwrap_or_default();
        state.memberships.push(Membership {
            project_id: *project_id,
            user_id: *user_id,
            user_name,
            role,
            assigned_at: OffsetDateTime::now_utc(),
            is_active: true,
        });
        Ok(AssignOutcome::Assigned)
    }

    async fn remove(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, ReportingError> {
        let mut state = self.state.write().unwrap();
        let membership = state
            .memberships
            .iter_mut()
            .find(|m| m.is_active && m.project_id == *project_id && m.user_id == *user_id);
        Ok(membership.map(|m| m.is_active = false).is_some())
    }

    async fn active_members(&self, project_id: &ProjectId) -> Result<Vec<Membership>, ReportingError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .memberships
            .iter()
            .filter(|m| m.is_active && m.project_id == *project_id)
            .cloned()
            .collect())
    }

    async fn is_active_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<bool, ReportingError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .memberships
            .iter()
            .any(|m| m.is_active && m.project_id == *project_id && m.user_id == *user_id))
    }
}

#[async_trait]
impl PreferenceRepository for MockBackend {
    async fn get_or_create(&self, user_id: &UserId) -> Result<Preference, ReportingError> {
        let mut state = self.state.write().unwrap();
        let theme = state.preferences.entry(*user_id).or_default().clone();
        Ok(Preference {
            user_id: *user_id,
            theme,
        })
    }

    async fn save(&self, user_id: &UserId, theme: &Theme) -> Result<Preference, ReportingError> {
        self.state
            .write()
            .unwrap()
            .preferences
            .insert(*user_id, theme.clone());
        Ok(Preference {
            user_id: *user_id,
            theme: theme.clone(),
        })
    }
}
