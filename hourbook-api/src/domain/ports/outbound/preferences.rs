use async_trait::async_trait;

use crate::domain::{
    models::{Preference, Theme, UserId},
    ReportingError,
};

#[async_trait]
pub trait PreferenceRepository: Send + Sync + 'static {
    /// Returns the stored preference, inserting the default theme first if
    /// the user has none. Concurrent first reads must not fail.
    async fn get_or_create(&self, user_id: &UserId) -> Result<Preference, ReportingError>;

    async fn save(&self, user_id: &UserId, theme: &Theme) -> Result<Preference, ReportingError>;
}
