use std::str::FromStr;

use rust_decimal::Decimal;
use time::Date;

use crate::{CompanyId, EntryId, Hours, ProjectId, ReportEntry, UserId};

pub(crate) fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Builds a report entry from `(id, name)` pairs.
pub(crate) fn entry(
    id: i32,
    company: (i32, &str),
    project: (i32, &str),
    user: (i32, &str),
    date: Date,
    hours: &str,
) -> ReportEntry {
    ReportEntry {
        id: EntryId::new(id),
        user_id: UserId::new(user.0),
        user_name: user.1.to_string(),
        project_id: ProjectId::new(project.0),
        project_name: project.1.to_string(),
        company_id: CompanyId::new(company.0),
        company_name: company.1.to_string(),
        date,
        hours: Hours::from_str(hours).unwrap(),
        description: None,
    }
}

pub(crate) fn described(mut entry: ReportEntry, description: &str) -> ReportEntry {
    entry.description = Some(description.to_string());
    entry
}
