pub(crate) mod companies;
pub(crate) mod error;
pub(crate) mod preferences;
pub(crate) mod projects;
mod query;
pub(crate) mod reports;
pub(crate) mod time_entries;
pub(crate) mod users;

pub(crate) use error::ApiError;
pub(crate) use query::{parse_date_param, ReportQuery};
