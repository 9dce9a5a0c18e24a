use async_trait::async_trait;
use rollup::{EntryFilter, ReportEntry};

use crate::domain::ReportingError;

/// Read side for reports: entries joined with user, project and company
/// names.
#[async_trait]
pub trait EntryStore: Send + Sync + 'static {
    /// Entries matching every set field of `filter`, including entries on
    /// deactivated projects and companies.
    async fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<ReportEntry>, ReportingError>;
}
