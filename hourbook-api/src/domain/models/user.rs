use rust_decimal::Decimal;

use super::{company::non_blank, Role, UserId};
use crate::domain::ReportingError;

const MAX_USERNAME_LEN: usize = 64;
const MIN_USERNAME_LEN: usize = 3;
const MAX_PERSON_NAME_LEN: usize = 64;

/// Largest rate storable in `NUMERIC(10,2)`.
const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// Current rate. Reports always use this, so changing it changes past
    /// earnings too.
    pub hourly_rate: Option<Decimal>,
    pub is_active: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Validated account fields, used both to create a user and to overwrite an
/// existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub hourly_rate: Option<Decimal>,
}

impl UserProfile {
    pub fn new(
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, ReportingError> {
        Ok(Self {
            username: validate_username(username)?,
            email: validate_email(email)?,
            first_name: validate_person_name("first name", first_name)?,
            last_name: validate_person_name("last name", last_name)?,
            role: Role::User,
            hourly_rate: None,
        })
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_hourly_rate(mut self, rate: Option<Decimal>) -> Result<Self, ReportingError> {
        if let Some(rate) = rate {
            if rate.is_sign_negative() || rate > MAX_HOURLY_RATE || rate.normalize().scale() > 2 {
                return Err(ReportingError::validation(format!("invalid hourly rate: {rate}")));
            }
        }

        self.hourly_rate = rate;
        Ok(self)
    }
}

fn validate_username(username: &str) -> Result<String, ReportingError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(ReportingError::validation(format!(
            "username must be {MIN_USERNAME_LEN} to {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(ReportingError::validation("username must not contain spaces"));
    }

    Ok(username.to_string())
}

fn validate_person_name(field: &str, value: &str) -> Result<String, ReportingError> {
    let value = non_blank(Some(value.to_string()))
        .ok_or_else(|| ReportingError::validation(format!("{field} is required")))?;
    if value.chars().count() > MAX_PERSON_NAME_LEN {
        return Err(ReportingError::validation(format!(
            "{field} must be at most {MAX_PERSON_NAME_LEN} characters"
        )));
    }

    Ok(value)
}

fn validate_email(email: &str) -> Result<String, ReportingError> {
    let email = email.trim();
    let invalid = || ReportingError::validation(format!("'{email}' is not a valid email"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }

    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile::new(" uma ", "uma@acme.test", "Uma", "One").unwrap()
    }

    #[test]
    fn profile_fields_are_trimmed_and_default_to_regular_user() {
        let profile = profile();
        assert_eq!(profile.username, "uma");
        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.hourly_rate, None);
    }

    #[test]
    fn malformed_accounts_are_rejected() {
        assert!(UserProfile::new("ab", "uma@acme.test", "Uma", "One").is_err());
        assert!(UserProfile::new("uma one", "uma@acme.test", "Uma", "One").is_err());
        assert!(UserProfile::new("uma", "uma.acme.test", "Uma", "One").is_err());
        assert!(UserProfile::new("uma", "uma@acme@test", "Uma", "One").is_err());
        assert!(UserProfile::new("uma", "@acme.test", "Uma", "One").is_err());
        assert!(UserProfile::new("uma", "uma@acme.", "Uma", "One").is_err());
        assert!(UserProfile::new("uma", "uma@acme.test", "  ", "One").is_err());
    }

    #[test]
    fn hourly_rate_must_fit_storage() {
        let rate = |value: &str| Some(Decimal::from_str(value).unwrap());

        assert!(profile().with_hourly_rate(rate("-1")).is_err());
        assert!(profile().with_hourly_rate(rate("12.345")).is_err());
        assert!(profile().with_hourly_rate(rate("100000000")).is_err());
        assert_eq!(
            profile().with_hourly_rate(rate("99999999.99")).unwrap().hourly_rate,
            rate("99999999.99")
        );
    }
}
