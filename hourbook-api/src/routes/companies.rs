use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::CompanyResponse,
    app_state::AppState,
    auth::CurrentActor,
    domain::models::{CompanyId, ContactDetails, NewCompany},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route("/:company_id", put(update_company))
        .route("/:company_id/active", put(set_company_active))
}

#[derive(Debug, Deserialize)]
pub struct CompanyRequest {
    name: String,
    #[serde(flatten)]
    contact: ContactDetails,
    description: Option<String>,
}

/// Body of every `PUT /…/active` toggle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRequest {
    pub is_active: bool,
}

#[instrument(name = "GET /companies", skip(app_state))]
async fn list_companies(
    actor: CurrentActor,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<CompanyResponse>>, ApiError> {
    let companies = app_state.directory_service.list_companies(&actor).await?;

    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

#[instrument(name = "POST /companies", skip(app_state))]
async fn create_company(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Json(body): Json<CompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let company = NewCompany::new(&body.name, body.contact, body.description)?;
    let company = app_state
        .directory_service
        .create_company(&actor, company)
        .await?;

    Ok((StatusCode::CREATED, Json(company.into())))
}

#[instrument(name = "PUT /companies/:company_id", skip(app_state))]
async fn update_company(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(company_id): Path<i32>,
    Json(body): Json<CompanyRequest>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = NewCompany::new(&body.name, body.contact, body.description)?;
    let company = app_state
        .directory_service
        .update_company(&actor, &CompanyId::new(company_id), company)
        .await?;

    Ok(Json(company.into()))
}

#[instrument(name = "PUT /companies/:company_id/active", skip(app_state))]
async fn set_company_active(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(company_id): Path<i32>,
    Json(body): Json<ActiveRequest>,
) -> Result<StatusCode, ApiError> {
    app_state
        .directory_service
        .set_company_active(&actor, &CompanyId::new(company_id), body.is_active)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
