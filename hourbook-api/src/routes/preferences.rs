use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::PreferenceResponse,
    app_state::AppState,
    auth::CurrentActor,
    domain::models::{HexColor, TextColor, Theme, ThemeColor},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_preferences).put(update_preferences))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    primary_color: ThemeColor,
    secondary_color: ThemeColor,
    text_color: TextColor,
    custom_primary_color: String,
    custom_secondary_color: String,
    custom_text_color: String,
}

impl TryFrom<UpdatePreferencesRequest> for Theme {
    type Error = ApiError;

    fn try_from(request: UpdatePreferencesRequest) -> Result<Self, Self::Error> {
        Ok(Theme {
            primary_color: request.primary_color,
            secondary_color: request.secondary_color,
            text_color: request.text_color,
            custom_primary_color: HexColor::parse(&request.custom_primary_color)?,
            custom_secondary_color: HexColor::parse(&request.custom_secondary_color)?,
            custom_text_color: HexColor::parse(&request.custom_text_color)?,
        })
    }
}

#[instrument(name = "GET /preferences", skip(app_state))]
async fn get_preferences(
    actor: CurrentActor,
    State(app_state): State<AppState>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let preference = app_state.preference_service.get_preferences(&actor).await?;

    Ok(Json(preference.into()))
}

#[instrument(name = "PUT /preferences", skip(app_state))]
async fn update_preferences(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Json(body): Json<UpdatePreferencesRequest>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let preference = app_state
        .preference_service
        .update_preferences(&actor, body.try_into()?)
        .await?;

    Ok(Json(preference.into()))
}
