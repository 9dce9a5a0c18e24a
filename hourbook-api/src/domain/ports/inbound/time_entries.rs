use async_trait::async_trait;
use rollup::ReportEntry;

use crate::domain::{
    models::{Actor, EntryFilter, EntryId, TimeEntry, TimeEntryDraft},
    ReportingError,
};

#[async_trait]
pub trait TimeEntryService: Send + Sync + 'static {
    async fn list_entries(
        &self,
        actor: &Actor,
        filter: EntryFilter,
    ) -> Result<Vec<ReportEntry>, ReportingError>;

    async fn get_entry(&self, actor: &Actor, entry_id: &EntryId)
        -> Result<TimeEntry, ReportingError>;

    /// Logs time for the actor themselves.
    async fn log_entry(
        &self,
        actor: &Actor,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError>;

    async fn update_entry(
        &self,
        actor: &Actor,
        entry_id: &EntryId,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError>;

    async fn delete_entry(&self, actor: &Actor, entry_id: &EntryId) -> Result<(), ReportingError>;
}
