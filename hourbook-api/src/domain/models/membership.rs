use time::OffsetDateTime;

use super::{ProjectId, ProjectRole, UserId};

/// A user's assignment to a project. Removal is a soft delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub user_name: String,
    pub role: ProjectRole,
    pub assigned_at: OffsetDateTime,
    pub is_active: bool,
}

/// Result of assigning a user to a project. A concurrent or repeated
/// assignment is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned,
    AlreadyAssigned,
}
