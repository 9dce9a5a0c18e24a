use rollup::RollupError;
use thiserror::Error;

/// Errors surfaced by the reporting and bookkeeping services.
#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("you do not have access to this resource")]
    AuthorizationDenied,
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ReportingError {
    /// `Ok` when `allowed`, otherwise [`ReportingError::AuthorizationDenied`].
    pub fn authorize(allowed: bool) -> Result<(), Self> {
        if allowed {
            Ok(())
        } else {
            Err(Self::AuthorizationDenied)
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl ToString) -> Self {
        Self::Storage(msg.to_string())
    }
}

impl From<RollupError> for ReportingError {
    fn from(err: RollupError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_denies_when_not_allowed() {
        assert!(ReportingError::authorize(true).is_ok());
        assert!(matches!(
            ReportingError::authorize(false),
            Err(ReportingError::AuthorizationDenied)
        ));
    }
}
