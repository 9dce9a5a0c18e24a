use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rollup::Hours;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use super::{parse_date_param, ApiError, ReportQuery};
use crate::{
    adapters::inbound::http::{ReportEntryResponse, TimeEntryResponse},
    app_state::AppState,
    auth::CurrentActor,
    domain::models::{EntryId, ProjectId, TimeEntryDraft},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(log_entry))
        .route(
            "/:entry_id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRequest {
    project_id: i32,
    /// `DD.MM.YYYY` or `YYYY-MM-DD`.
    date: String,
    hours: Decimal,
    description: Option<String>,
}

impl TryFrom<TimeEntryRequest> for TimeEntryDraft {
    type Error = ApiError;

    fn try_from(request: TimeEntryRequest) -> Result<Self, Self::Error> {
        let hours = Hours::new(request.hours).map_err(|err| ApiError::bad_request(err.to_string()))?;
        let date = parse_date_param(&request.date)?;

        Ok(TimeEntryDraft::new(ProjectId::new(request.project_id), date, hours)
            .with_description(request.description))
    }
}

#[instrument(name = "GET /time-entries", skip(app_state))]
async fn list_entries(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<ReportEntryResponse>>, ApiError> {
    let entries = app_state
        .time_entry_service
        .list_entries(&actor, query.filter()?)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[instrument(name = "GET /time-entries/:entry_id", skip(app_state))]
async fn get_entry(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<Json<TimeEntryResponse>, ApiError> {
    let entry = app_state
        .time_entry_service
        .get_entry(&actor, &EntryId::new(entry_id))
        .await?;

    Ok(Json(entry.into()))
}

#[instrument(name = "POST /time-entries", skip(app_state))]
async fn log_entry(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Json(body): Json<TimeEntryRequest>,
) -> Result<(StatusCode, Json<TimeEntryResponse>), ApiError> {
    let entry = app_state
        .time_entry_service
        .log_entry(&actor, body.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[instrument(name = "PUT /time-entries/:entry_id", skip(app_state))]
async fn update_entry(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
    Json(body): Json<TimeEntryRequest>,
) -> Result<Json<TimeEntryResponse>, ApiError> {
    let entry = app_state
        .time_entry_service
        .update_entry(&actor, &EntryId::new(entry_id), body.try_into()?)
        .await?;

    Ok(Json(entry.into()))
}

#[instrument(name = "DELETE /time-entries/:entry_id", skip(app_state))]
async fn delete_entry(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(entry_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    app_state
        .time_entry_service
        .delete_entry(&actor, &EntryId::new(entry_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
