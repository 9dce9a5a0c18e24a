use time::Date;

use crate::{CompanyId, DateRange, EntryId, Hours, ProjectId, UserId};

/// A time entry joined with the display names of its user, project and
/// company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub id: EntryId,
    pub user_id: UserId,
    pub user_name: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub company_id: CompanyId,
    pub company_name: String,
    pub date: Date,
    pub hours: Hours,
    pub description: Option<String>,
}

/// Narrowing applied when fetching entries. Every `None` means "any".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub user_id: Option<UserId>,
    pub project_id: Option<ProjectId>,
    pub company_id: Option<CompanyId>,
    pub range: DateRange,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn matches(&self, entry: &ReportEntry) -> bool {
        self.user_id.map_or(true, |id| entry.user_id == id)
            && self.project_id.map_or(true, |id| entry.project_id == id)
            && self.company_id.map_or(true, |id| entry.company_id == id)
            && self.range.contains(entry.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::entry;
    use time::macros::date;

    #[test]
    fn empty_filter_matches_everything() {
        let e = entry(1, (1, "Acme"), (1, "Web"), (1, "Ann"), date!(2024 - 03 - 01), "1");
        assert!(EntryFilter::new().matches(&e));
    }

    #[test]
    fn every_set_field_must_match() {
        let e = entry(1, (1, "Acme"), (2, "Web"), (3, "Ann"), date!(2024 - 03 - 01), "1");

        assert!(EntryFilter::new()
            .with_user(UserId::new(3))
            .with_project(ProjectId::new(2))
            .with_company(CompanyId::new(1))
            .matches(&e));
        assert!(!EntryFilter::new().with_user(UserId::new(4)).matches(&e));
        assert!(!EntryFilter::new()
            .with_range(DateRange::single(date!(2024 - 03 - 02)))
            .matches(&e));
    }
}
