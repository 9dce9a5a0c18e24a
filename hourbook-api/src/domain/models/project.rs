use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::Date;

use super::{company::non_blank, company::validate_name, CompanyId, ProjectId, UserId};
use crate::domain::ReportingError;

/// Largest budget storable in `NUMERIC(15,2)`.
const MAX_BUDGET: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, 2);

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub company_id: CompanyId,
    pub company_name: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget: Option<Decimal>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub company_id: CompanyId,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget: Option<Decimal>,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

impl NewProject {
    pub fn new(company_id: CompanyId, name: &str, start_date: Date) -> Result<Self, ReportingError> {
        Ok(Self {
            company_id,
            name: validate_name(name)?,
            description: None,
            status: ProjectStatus::default(),
            budget: None,
            start_date,
            end_date: None,
        })
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = non_blank(description);
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_budget(mut self, budget: Option<Decimal>) -> Result<Self, ReportingError> {
        if let Some(budget) = budget {
            if budget.is_sign_negative() || budget > MAX_BUDGET || budget.normalize().scale() > 2 {
                return Err(ReportingError::validation(format!("invalid budget: {budget}")));
            }
        }

        self.budget = budget;
        Ok(self)
    }

    pub fn with_end_date(mut self, end_date: Option<Date>) -> Result<Self, ReportingError> {
        if let Some(end_date) = end_date {
            if end_date < self.start_date {
                return Err(ReportingError::validation(
                    "project end date is before its start date",
                ));
            }
        }

        self.end_date = end_date;
        Ok(self)
    }
}

/// Which projects a caller gets to pick from when logging time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectListing {
    AllActive,
    AssignedTo(UserId),
}
