use std::ops::Deref;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName},
};

use crate::{
    app_state::AppState,
    domain::{models::Actor, models::UserId, ReportingError},
    routes::ApiError,
};

/// How the authenticated user reaches the API. Login happens upstream; the
/// identity proxy forwards the user id in `user_header`.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub user_header: HeaderName,
    /// Used when the header is absent. Only set in local development.
    pub dev_user_id: Option<UserId>,
}

/// Extracts the acting user, with their role and managed projects, for the
/// request. Returns 401 when the header is missing or names an unknown or
/// deactivated user.
#[derive(Debug, Clone)]
pub struct CurrentActor(Actor);

impl Deref for CurrentActor {
    type Target = Actor;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl CurrentActor {
    fn user_id(parts: &Parts, settings: &AuthSettings) -> Result<UserId, ApiError> {
        match parts.headers.get(&settings.user_header) {
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|value| value.trim().parse::<i32>().ok())
                .map(UserId::new)
                .ok_or_else(|| ApiError::unauthorized("Malformed user header")),
            None => settings
                .dev_user_id
                .ok_or_else(|| ApiError::unauthorized("Not authenticated")),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        app_state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = Self::user_id(parts, &app_state.auth)?;

        match app_state.directory_service.resolve_actor(&user_id).await {
            Ok(actor) => Ok(CurrentActor(actor)),
            Err(ReportingError::NotFound(_)) => {
                tracing::debug!(user = %user_id, "rejected unknown or inactive user");
                Err(ApiError::unauthorized("Not authenticated"))
            }
            Err(err) => Err(err.into()),
        }
    }
}
