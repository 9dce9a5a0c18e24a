//! What the report service hands back to the HTTP layer.

use rollup::{
    CompanySummary, DailyTotal, Earnings, HoursMatrix, ProjectSummary, ProjectTotal, ReportEntry,
    Rollup, Stats, UserSummary, UserTotal,
};
use serde::Deserialize;

use super::{Company, Project, User};

/// The caller's own entries grouped by date, plus the flat list.
#[derive(Debug, Clone)]
pub struct PersonalReport {
    pub rollup: Rollup,
    pub entries: Vec<ReportEntry>,
    pub stats: Stats,
}

#[derive(Debug, Clone)]
pub struct EarningsReport {
    pub rollup: Rollup,
    pub earnings: Earnings,
}

#[derive(Debug, Clone)]
pub struct ProjectDetail {
    pub project: Project,
    pub stats: Stats,
    pub by_user: Vec<UserTotal>,
    pub rollup: Rollup,
}

#[derive(Debug, Clone)]
pub struct CompanyDetail {
    pub company: Company,
    pub projects: Vec<ProjectSummary>,
    pub rollup: Rollup,
    pub earnings: Earnings,
}

#[derive(Debug, Clone)]
pub struct UserDetail {
    pub user: User,
    pub stats: Stats,
    pub by_project: Vec<ProjectTotal>,
    pub daily: Vec<DailyTotal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Daily,
    UserTotals,
    ProjectTotals,
    Stats,
}

#[derive(Debug, Clone)]
pub enum ChartData {
    Daily(Vec<DailyTotal>),
    UserTotals(Vec<UserTotal>),
    ProjectTotals(Vec<ProjectTotal>),
    Stats(Stats),
}

#[derive(Debug, Clone)]
pub enum Summaries {
    Users(Vec<UserSummary>),
    Projects(Vec<ProjectSummary>),
    Companies(Vec<CompanySummary>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Users,
    Projects,
    Companies,
}

/// A spreadsheet-style export. Earnings columns are only rendered for admins.
#[derive(Debug, Clone)]
pub struct MatrixReport {
    pub title: String,
    pub matrix: HoursMatrix,
    pub include_earnings: bool,
}
