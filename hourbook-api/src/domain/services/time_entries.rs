use std::sync::Arc;

use async_trait::async_trait;
use rollup::{can_manage_project, can_modify_entry, resolve_filter, ReportEntry};

use crate::domain::{
    models::{Actor, EntryFilter, EntryId, ProjectId, TimeEntry, TimeEntryDraft},
    ports::{
        inbound::TimeEntryService,
        outbound::{DirectoryRepository, EntryStore, MembershipRepository, TimeEntryRepository},
    },
    ReportingError,
};

pub struct TimeEntryServiceImpl<R, E, D, M> {
    repository: Arc<R>,
    entry_store: Arc<E>,
    directory: Arc<D>,
    memberships: Arc<M>,
}

impl<R, E, D, M> TimeEntryServiceImpl<R, E, D, M> {
    pub fn new(
        repository: Arc<R>,
        entry_store: Arc<E>,
        directory: Arc<D>,
        memberships: Arc<M>,
    ) -> Self {
        Self {
            repository,
            entry_store,
            directory,
            memberships,
        }
    }
}

impl<R, E, D, M> TimeEntryServiceImpl<R, E, D, M>
where
    R: TimeEntryRepository,
    E: EntryStore,
    D: DirectoryRepository,
    M: MembershipRepository,
{
    async fn load_entry(&self, entry_id: &EntryId) -> Result<TimeEntry, ReportingError> {
        self.repository
            .get_entry(entry_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("time entry {entry_id}")))
    }

    /// Time can be logged on an active project the actor is assigned to, or
    /// on any active project they manage.
    async fn ensure_can_log_on(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
    ) -> Result<(), ReportingError> {
        let project = self
            .directory
            .get_project(project_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("project {project_id}")))?;

        if !project.is_active {
            return Err(ReportingError::validation(format!(
                "project {} is not active",
                project.name
            )));
        }

        let allowed = can_manage_project(actor, *project_id)
            || self
                .memberships
                .is_active_member(project_id, &actor.user_id)
                .await?;
        ReportingError::authorize(allowed)
    }
}

#[async_trait]
impl<R, E, D, M> TimeEntryService for TimeEntryServiceImpl<R, E, D, M>
where
    R: TimeEntryRepository,
    E: EntryStore,
    D: DirectoryRepository,
    M: MembershipRepository,
{
    async fn list_entries(
        &self,
        actor: &Actor,
        filter: EntryFilter,
    ) -> Result<Vec<ReportEntry>, ReportingError> {
        let filter = resolve_filter(actor, filter);
        let mut entries = self.entry_store.fetch_entries(&filter).await?;
        entries.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));

        Ok(entries)
    }

    async fn get_entry(
        &self,
        actor: &Actor,
        entry_id: &EntryId,
    ) -> Result<TimeEntry, ReportingError> {
        let entry = self.load_entry(entry_id).await?;
        ReportingError::authorize(can_modify_entry(actor, entry.user_id, entry.project_id))?;

        Ok(entry)
    }

    async fn log_entry(
        &self,
        actor: &Actor,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError> {
        self.ensure_can_log_on(actor, &draft.project_id).await?;

        let entry = self.repository.create_entry(&actor.user_id, &draft).await?;
        tracing::debug!(entry = %entry.id, user = %actor.user_id, "logged time entry");

        Ok(entry)
    }

    async fn update_entry(
        &self,
        actor: &Actor,
        entry_id: &EntryId,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError> {
        let existing = self.load_entry(entry_id).await?;
        ReportingError::authorize(can_modify_entry(actor, existing.user_id, existing.project_id))?;
        if draft.project_id != existing.project_id {
            self.ensure_can_log_on(actor, &draft.project_id).await?;
        }

        self.repository
            .update_entry(entry_id, &draft)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("time entry {entry_id}")))
    }

    async fn delete_entry(&self, actor: &Actor, entry_id: &EntryId) -> Result<(), ReportingError> {
        let existing = self.load_entry(entry_id).await?;
        ReportingError::authorize(can_modify_entry(actor, existing.user_id, existing.project_id))?;

        if !self.repository.delete_entry(entry_id).await? {
            return Err(ReportingError::not_found(format!("time entry {entry_id}")));
        }
        tracing::debug!(entry = %entry_id, user = %actor.user_id, "deleted time entry");

        Ok(())
    }
}
