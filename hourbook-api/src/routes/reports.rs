use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rollup::{format_date, LeafKey};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use super::{parse_date_param, ApiError, ReportQuery};
use crate::{
    adapters::inbound::http::{
        render_matrix_csv, ChartResponse, CompanyDetailResponse, DailyReportResponse,
        EarningsReportResponse, PersonalReportResponse, ProjectDetailResponse, RollupResponse,
        SummariesResponse, UserDetailResponse,
    },
    app_state::AppState,
    auth::CurrentActor,
    domain::models::{ChartKind, CompanyId, MatrixReport, ProjectId, SummaryKind, UserId},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(personal_report))
        .route("/rollup", get(rollup))
        .route("/earnings", get(earnings))
        .route("/users", get(user_summaries))
        .route("/projects", get(project_summaries))
        .route("/companies", get(company_summaries))
        .route("/daily", get(daily_report))
        .route("/chart", get(chart))
        .route("/export.csv", get(export_csv))
        .route("/projects/:project_id", get(project_detail))
        .route("/companies/:company_id", get(company_detail))
        .route("/companies/:company_id/export.csv", get(export_company_csv))
        .route("/users/:user_id", get(user_detail))
}

/// Read alongside [`ReportQuery`] from the same query string.
#[derive(Debug, Deserialize)]
struct GroupQuery {
    #[serde(default)]
    group: LeafKey,
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    #[serde(default, rename = "type")]
    kind: ChartKind,
}

#[derive(Debug, Deserialize)]
struct DailyQuery {
    date: Option<String>,
}

#[instrument(name = "GET /reports/me", skip(app_state))]
async fn personal_report(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PersonalReportResponse>, ApiError> {
    let report = app_state
        .report_service
        .personal_report(&actor, query.range()?)
        .await?;

    Ok(Json(report.into()))
}

#[instrument(name = "GET /reports/rollup", skip(app_state))]
async fn rollup(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
    Query(grouping): Query<GroupQuery>,
) -> Result<Json<RollupResponse>, ApiError> {
    let rollup = app_state
        .report_service
        .rollup(&actor, query.filter()?, grouping.group)
        .await?;

    Ok(Json(rollup.into()))
}

#[instrument(name = "GET /reports/earnings", skip(app_state))]
async fn earnings(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<EarningsReportResponse>, ApiError> {
    let report = app_state
        .report_service
        .earnings(&actor, query.filter()?)
        .await?;

    Ok(Json(report.into()))
}

async fn summaries(
    actor: &CurrentActor,
    app_state: &AppState,
    query: &ReportQuery,
    kind: SummaryKind,
) -> Result<Json<SummariesResponse>, ApiError> {
    let summaries = app_state
        .report_service
        .summaries(actor, query.filter()?, kind)
        .await?;

    Ok(Json(summaries.into()))
}

#[instrument(name = "GET /reports/users", skip(app_state))]
async fn user_summaries(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SummariesResponse>, ApiError> {
    summaries(&actor, &app_state, &query, SummaryKind::Users).await
}

#[instrument(name = "GET /reports/projects", skip(app_state))]
async fn project_summaries(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SummariesResponse>, ApiError> {
    summaries(&actor, &app_state, &query, SummaryKind::Projects).await
}

#[instrument(name = "GET /reports/companies", skip(app_state))]
async fn company_summaries(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<SummariesResponse>, ApiError> {
    summaries(&actor, &app_state, &query, SummaryKind::Companies).await
}

#[instrument(name = "GET /reports/daily", skip(app_state))]
async fn daily_report(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailyReportResponse>, ApiError> {
    let date = match query.date.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => parse_date_param(value)?,
        _ => OffsetDateTime::now_utc().date(),
    };
    let report = app_state.report_service.daily_report(&actor, date).await?;

    Ok(Json(report.into()))
}

#[instrument(name = "GET /reports/chart", skip(app_state))]
async fn chart(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
    Query(chart): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let data = app_state
        .report_service
        .chart(&actor, query.filter()?, chart.kind)
        .await?;

    Ok(Json(data.into()))
}

#[instrument(name = "GET /reports/projects/:project_id", skip(app_state))]
async fn project_detail(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(project_id): Path<i32>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ProjectDetailResponse>, ApiError> {
    let detail = app_state
        .report_service
        .project_detail(&actor, &ProjectId::new(project_id), query.range()?)
        .await?;

    Ok(Json(detail.into()))
}

#[instrument(name = "GET /reports/companies/:company_id", skip(app_state))]
async fn company_detail(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(company_id): Path<i32>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let detail = app_state
        .report_service
        .company_detail(&actor, &CompanyId::new(company_id), query.range()?)
        .await?;

    Ok(Json(detail.into()))
}

#[instrument(name = "GET /reports/users/:user_id", skip(app_state))]
async fn user_detail(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(user_id): Path<i32>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let detail = app_state
        .report_service
        .user_detail(&actor, &UserId::new(user_id), query.range()?)
        .await?;

    Ok(Json(detail.into()))
}

#[instrument(name = "GET /reports/export.csv", skip(app_state))]
async fn export_csv(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let report = app_state
        .report_service
        .matrix(&actor, query.filter()?)
        .await?;

    csv_response(&app_state, &report)
}

#[instrument(name = "GET /reports/companies/:company_id/export.csv", skip(app_state))]
async fn export_company_csv(
    actor: CurrentActor,
    State(app_state): State<AppState>,
    Path(company_id): Path<i32>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, ApiError> {
    let report = app_state
        .report_service
        .company_matrix(&actor, &CompanyId::new(company_id), query.range()?)
        .await?;

    csv_response(&app_state, &report)
}

fn csv_response(app_state: &AppState, report: &MatrixReport) -> Result<Response, ApiError> {
    let body = render_matrix_csv(report, &app_state.currency_symbol)?;
    let filename = format!(
        "{}_{}.csv",
        slug(&report.title),
        format_date(OffsetDateTime::now_utc().date())
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// Keeps ASCII letters and digits, joining everything else with `_`.
fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
