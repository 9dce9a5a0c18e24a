use async_trait::async_trait;

use crate::domain::{
    models::{EntryId, TimeEntry, TimeEntryDraft, UserId},
    ReportingError,
};

#[async_trait]
pub trait TimeEntryRepository: Send + Sync + 'static {
    async fn get_entry(&self, entry_id: &EntryId) -> Result<Option<TimeEntry>, ReportingError>;

    async fn create_entry(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError>;

    /// Returns `None` when the entry no longer exists.
    async fn update_entry(
        &self,
        entry_id: &EntryId,
        draft: &TimeEntryDraft,
    ) -> Result<Option<TimeEntry>, ReportingError>;

    /// Hard delete. Returns `false` when nothing was deleted.
    async fn delete_entry(&self, entry_id: &EntryId) -> Result<bool, ReportingError>;
}
