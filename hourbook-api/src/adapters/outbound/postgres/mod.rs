//! PostgreSQL implementations of the outbound ports.
//!
//! Queries are checked at runtime and decoded through `FromRow` rows, which
//! are converted to domain types here so the domain never sees SQL text
//! columns.

mod directory;
mod entry_store;
mod memberships;
mod preferences;
mod time_entries;

pub use directory::PostgresDirectory;
pub use entry_store::PostgresEntryStore;
pub use memberships::PostgresMembershipRepository;
pub use preferences::PostgresPreferenceRepository;
pub use time_entries::PostgresTimeEntryRepository;

use std::str::FromStr;

use crate::domain::ReportingError;

/// Parses an enum stored as text, treating unknown values as a storage fault.
fn parse_column<T>(column: &str, value: &str) -> Result<T, ReportingError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value)
        .map_err(|err| ReportingError::storage(format!("invalid {column} '{value}': {err}")))
}

/// Storage errors, except unique-index violations which become validation
/// errors carrying `conflict`.
fn unique_or_storage(err: sqlx::Error, conflict: impl Into<String>) -> ReportingError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ReportingError::validation(conflict)
        }
        _ => ReportingError::storage(err),
    }
}
