use async_trait::async_trait;

use crate::domain::{
    models::{Actor, Preference, Theme},
    ReportingError,
};

#[async_trait]
pub trait PreferenceService: Send + Sync + 'static {
    async fn get_preferences(&self, actor: &Actor) -> Result<Preference, ReportingError>;

    async fn update_preferences(
        &self,
        actor: &Actor,
        theme: Theme,
    ) -> Result<Preference, ReportingError>;
}
