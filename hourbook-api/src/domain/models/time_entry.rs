use time::{Date, OffsetDateTime};

use super::{company::non_blank, EntryId, Hours, ProjectId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub project_id: ProjectId,
    pub date: Date,
    pub hours: Hours,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields a user supplies when logging or editing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntryDraft {
    pub project_id: ProjectId,
    pub date: Date,
    pub hours: Hours,
    pub description: Option<String>,
}

impl TimeEntryDraft {
    pub fn new(project_id: ProjectId, date: Date, hours: Hours) -> Self {
        Self {
            project_id,
            date,
            hours,
            description: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }
}
