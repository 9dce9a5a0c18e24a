use rollup::{parse_date, DateRange};
use serde::Deserialize;
use time::Date;

use super::ApiError;
use crate::domain::models::{CompanyId, EntryFilter, ProjectId, UserId};

/// Filters shared by the report and entry listing endpoints. Dates accept
/// `DD.MM.YYYY` or `YYYY-MM-DD`; a blank date leaves that end open.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub user_id: Option<i32>,
    pub project_id: Option<i32>,
    pub company_id: Option<i32>,
}

impl ReportQuery {
    pub fn range(&self) -> Result<DateRange, ApiError> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
            .map_err(|err| ApiError::bad_request(err.to_string()))
    }

    pub fn filter(&self) -> Result<EntryFilter, ApiError> {
        Ok(EntryFilter {
            user_id: self.user_id.map(UserId::new),
            project_id: self.project_id.map(ProjectId::new),
            company_id: self.company_id.map(CompanyId::new),
            range: self.range()?,
        })
    }
}

pub fn parse_date_param(value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|err| ApiError::bad_request(err.to_string()))
}
