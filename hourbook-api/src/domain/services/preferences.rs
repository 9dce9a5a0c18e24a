use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{Actor, Preference, Theme},
    ports::{inbound::PreferenceService, outbound::PreferenceRepository},
    ReportingError,
};

pub struct PreferenceServiceImpl<P> {
    repository: Arc<P>,
}

impl<P> PreferenceServiceImpl<P> {
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<P: PreferenceRepository> PreferenceService for PreferenceServiceImpl<P> {
    async fn get_preferences(&self, actor: &Actor) -> Result<Preference, ReportingError> {
        self.repository.get_or_create(&actor.user_id).await
    }

    async fn update_preferences(
        &self,
        actor: &Actor,
        theme: Theme,
    ) -> Result<Preference, ReportingError> {
        let theme = theme.validate()?;
        self.repository.save(&actor.user_id, &theme).await
    }
}
