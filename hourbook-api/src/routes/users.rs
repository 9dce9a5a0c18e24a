use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use super::{companies::ActiveRequest, ApiError};
use crate::{
    adapters::inbound::http::UserResponse,
    app_state::AppState,
    auth::CurrentActor,
    domain::models::{Role, UserId, UserProfile},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:user_id", put(update_user))
        .route("/:user_id/active", put(set_user_active))
}

/// Account fields for both creating and editing a user. A missing role means
/// a regular user and a missing rate clears it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: Option<Role>,
    hourly_rate: Option<Decimal>,
}

impl TryFrom<UserRequest> for UserProfile {
    type Error = ApiError;

    fn try_from(request: UserRequest) -> Result<Self, Self::Error> {
        Ok(UserProfile::new(
            &request.username,
            &request.email,
            &request.first_name,
            &request.last_name,
        )?
        .with_role(request.role.unwrap_or(Role::User))
        .with_hourly_rate(request.hourly_rate)?)
    }
}

#[instrument(name = "GET /users", skip(app_state))]
async fn list_users(
    actor: CurrentActor,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = app_state.directory_service.list_users(&actor).await?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[instrument(name = "POST /users", skip(app_state))]
async fn create_user(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Json(body): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = app_state
        .directory_service
        .create_user(&actor, body.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(name = "PUT /users/:user_id", skip(app_state))]
async fn update_user(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app_state
        .directory_service
        .update_user(&actor, &UserId::new(user_id), body.try_into()?)
        .await?;

    Ok(Json(user.into()))
}

#[instrument(name = "PUT /users/:user_id/active", skip(app_state))]
async fn set_user_active(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<ActiveRequest>,
) -> Result<StatusCode, ApiError> {
    app_state
        .directory_service
        .set_user_active(&actor, &UserId::new(user_id), body.is_active)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    fn request(role: Option<Role>, rate: Option<&str>) -> UserRequest {
        serde_json::from_value(serde_json::json!({
            "username": "uma",
            "email": "uma@acme.test",
            "firstName": "Uma",
            "lastName": "One",
            "role": role,
            "hourlyRate": rate,
        }))
        .unwrap()
    }

    #[test]
    fn role_defaults_to_regular_user() {
        let profile = UserProfile::try_from(request(None, Some("12.50"))).unwrap();

        assert_eq!(profile.role, Role::User);
        assert_eq!(profile.hourly_rate, Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn negative_rates_are_bad_requests() {
        let err = UserProfile::try_from(request(Some(Role::CompanyAdmin), Some("-5"))).unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
