use serde::Deserialize;

use super::CompanyId;
use crate::domain::ReportingError;

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

impl ContactDetails {
    fn normalized(self) -> Self {
        Self {
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            website: non_blank(self.website),
            address: non_blank(self.address),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub contact: ContactDetails,
    pub description: Option<String>,
    pub is_active: bool,
}

/// A validated company ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub name: String,
    pub contact: ContactDetails,
    pub description: Option<String>,
}

impl NewCompany {
    pub fn new(
        name: &str,
        contact: ContactDetails,
        description: Option<String>,
    ) -> Result<Self, ReportingError> {
        Ok(Self {
            name: validate_name(name)?,
            contact: contact.normalized(),
            description: non_blank(description),
        })
    }
}

pub(super) fn validate_name(name: &str) -> Result<String, ReportingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ReportingError::validation("name is required"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ReportingError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    Ok(name.to_string())
}

pub(super) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
