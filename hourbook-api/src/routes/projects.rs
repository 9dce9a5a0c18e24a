use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use super::{companies::ActiveRequest, parse_date_param, ApiError};
use crate::{
    adapters::inbound::http::{MembershipResponse, ProjectResponse},
    app_state::AppState,
    auth::CurrentActor,
    domain::models::{
        AssignOutcome, CompanyId, NewProject, ProjectId, ProjectRole, ProjectStatus, UserId,
    },
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(available_projects).post(create_project))
        .route("/:project_id", put(update_project))
        .route("/:project_id/active", put(set_project_active))
        .route("/:project_id/members", get(list_members).post(assign_member))
        .route("/:project_id/members/:user_id", delete(remove_member))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    company_id: i32,
    name: String,
    description: Option<String>,
    #[serde(default)]
    status: ProjectStatus,
    budget: Option<Decimal>,
    start_date: String,
    end_date: Option<String>,
}

impl TryFrom<ProjectRequest> for NewProject {
    type Error = ApiError;

    fn try_from(request: ProjectRequest) -> Result<Self, Self::Error> {
        let start_date = parse_date_param(&request.start_date)?;
        let end_date = match request.end_date.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => Some(parse_date_param(value)?),
            _ => None,
        };

        Ok(
            NewProject::new(CompanyId::new(request.company_id), &request.name, start_date)?
                .with_description(request.description)
                .with_status(request.status)
                .with_budget(request.budget)?
                .with_end_date(end_date)?,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignMemberRequest {
    user_id: i32,
    #[serde(default)]
    role: ProjectRole,
}

#[instrument(name = "GET /projects", skip(app_state))]
async fn available_projects(
    actor: CurrentActor,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError> {
    let projects = app_state
        .directory_service
        .available_projects(&actor)
        .await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

#[instrument(name = "POST /projects", skip(app_state))]
async fn create_project(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Json(body): Json<ProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    let project = app_state
        .directory_service
        .create_project(&actor, body.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[instrument(name = "PUT /projects/:project_id", skip(app_state))]
async fn update_project(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(body): Json<ProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    let project = app_state
        .directory_service
        .update_project(&actor, &ProjectId::new(project_id), body.try_into()?)
        .await?;

    Ok(Json(project.into()))
}

#[instrument(name = "PUT /projects/:project_id/active", skip(app_state))]
async fn set_project_active(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(body): Json<ActiveRequest>,
) -> Result<StatusCode, ApiError> {
    app_state
        .directory_service
        .set_project_active(&actor, &ProjectId::new(project_id), body.is_active)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[instrument(name = "GET /projects/:project_id/members", skip(app_state))]
async fn list_members(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(project_id): Path<i32>,
) -> Result<Json<Vec<MembershipResponse>>, ApiError> {
    let members = app_state
        .membership_service
        .members(&actor, &ProjectId::new(project_id))
        .await?;

    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Responds 201 for a new membership and 200 when the user already was a
/// member.
#[instrument(name = "POST /projects/:project_id/members", skip(app_state))]
async fn assign_member(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(project_id): Path<i32>,
    Json(body): Json<AssignMemberRequest>,
) -> Result<StatusCode, ApiError> {
    let outcome = app_state
        .membership_service
        .assign(
            &actor,
            &ProjectId::new(project_id),
            &UserId::new(body.user_id),
            body.role,
        )
        .await?;

    Ok(match outcome {
        AssignOutcome::Assigned => StatusCode::CREATED,
        AssignOutcome::AlreadyAssigned => StatusCode::OK,
    })
}

#[instrument(name = "DELETE /projects/:project_id/members/:user_id", skip(app_state))]
async fn remove_member(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path((project_id, user_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    app_state
        .membership_service
        .remove(&actor, &ProjectId::new(project_id), &UserId::new(user_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
