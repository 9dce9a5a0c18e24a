//! HTTP response types for report and bookkeeping endpoints.
//!
//! Dates are rendered as `DD.MM.YYYY`. Hours and earnings stay exact decimals
//! and serialize as strings; only the daily average is rounded.

use rollup::{
    format_date, round_hours, Bucket, CompanyNode, CompanySummary, DailyReport, DailyTotal,
    Earnings, Leaf, PairEarnings, ProjectNode, ProjectSummary, ProjectTotal, ReportEntry, Rollup,
    Stats, UserEarnings, UserSummary, UserTotal,
};
use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::models::{
    ChartData, Company, CompanyDetail, EarningsReport, Membership, PersonalReport, Preference,
    Project, ProjectDetail, Summaries, TimeEntry, User, UserDetail,
};

// ============================================================================
// Rollup tree
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupResponse {
    pub total: Decimal,
    pub entry_count: usize,
    pub companies: Vec<CompanyNodeResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNodeResponse {
    pub company_id: i32,
    pub company_name: String,
    pub total: Decimal,
    pub entry_count: usize,
    pub projects: Vec<ProjectNodeResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNodeResponse {
    pub project_id: i32,
    pub project_name: String,
    pub total: Decimal,
    pub entry_count: usize,
    pub leaves: Vec<LeafResponse>,
}

/// One cell of the rollup. `label` is the date or the user name; the
/// matching id field is set depending on how the rollup was grouped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafResponse {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
    pub hours: Decimal,
    pub entry_count: usize,
    pub descriptions: Vec<String>,
}

impl LeafResponse {
    fn new(bucket: &Bucket, leaf: &Leaf) -> Self {
        let (date, user_id) = match bucket {
            Bucket::Date(date) => (Some(format_date(*date)), None),
            Bucket::User { id, .. } => (None, Some(id.as_i32())),
        };
        Self {
            label: bucket.label(),
            date,
            user_id,
            hours: leaf.hours(),
            entry_count: leaf.entry_count(),
            descriptions: leaf.descriptions().into_iter().map(str::to_string).collect(),
        }
    }
}

impl From<&ProjectNode> for ProjectNodeResponse {
    fn from(node: &ProjectNode) -> Self {
        Self {
            project_id: node.id().as_i32(),
            project_name: node.name().to_string(),
            total: node.hours(),
            entry_count: node.entry_count(),
            leaves: node
                .leaves()
                .map(|(bucket, leaf)| LeafResponse::new(bucket, leaf))
                .collect(),
        }
    }
}

impl From<&CompanyNode> for CompanyNodeResponse {
    fn from(node: &CompanyNode) -> Self {
        Self {
            company_id: node.id().as_i32(),
            company_name: node.name().to_string(),
            total: node.hours(),
            entry_count: node.entry_count(),
            projects: node.projects().map(ProjectNodeResponse::from).collect(),
        }
    }
}

impl From<&Rollup> for RollupResponse {
    fn from(rollup: &Rollup) -> Self {
        Self {
            total: rollup.total(),
            entry_count: rollup.entry_count(),
            companies: rollup.companies().map(CompanyNodeResponse::from).collect(),
        }
    }
}

impl From<Rollup> for RollupResponse {
    fn from(rollup: Rollup) -> Self {
        Self::from(&rollup)
    }
}

// ============================================================================
// Entries
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntryResponse {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub project_id: i32,
    pub project_name: String,
    pub company_id: i32,
    pub company_name: String,
    /// Date in DD.MM.YYYY format.
    pub date: String,
    pub hours: Decimal,
    pub description: Option<String>,
}

impl From<ReportEntry> for ReportEntryResponse {
    fn from(entry: ReportEntry) -> Self {
        Self {
            id: entry.id.as_i32(),
            user_id: entry.user_id.as_i32(),
            user_name: entry.user_name,
            project_id: entry.project_id.as_i32(),
            project_name: entry.project_name,
            company_id: entry.company_id.as_i32(),
            company_name: entry.company_name,
            date: format_date(entry.date),
            hours: entry.hours.value(),
            description: entry.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryResponse {
    pub id: i32,
    pub user_id: i32,
    pub project_id: i32,
    pub date: String,
    pub hours: Decimal,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<TimeEntry> for TimeEntryResponse {
    fn from(entry: TimeEntry) -> Self {
        Self {
            id: entry.id.as_i32(),
            user_id: entry.user_id.as_i32(),
            project_id: entry.project_id.as_i32(),
            date: format_date(entry.date),
            hours: entry.hours.value(),
            description: entry.description,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

// ============================================================================
// Summaries and stats
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_hours: Decimal,
    pub entries: usize,
    pub active_projects: usize,
    pub active_users: usize,
    pub average_per_day: Decimal,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_hours: stats.total_hours,
            entries: stats.entries,
            active_projects: stats.active_projects,
            active_users: stats.active_users,
            average_per_day: round_hours(stats.average_per_day),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub user_id: i32,
    pub user_name: String,
    pub hours: Decimal,
    pub entries: usize,
    pub projects: usize,
    pub companies: usize,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            user_id: summary.user_id.as_i32(),
            user_name: summary.user_name,
            hours: summary.hours,
            entries: summary.entries,
            projects: summary.projects,
            companies: summary.companies,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryResponse {
    pub project_id: i32,
    pub project_name: String,
    pub company_id: i32,
    pub company_name: String,
    pub hours: Decimal,
    pub entries: usize,
    pub users: usize,
}

impl From<ProjectSummary> for ProjectSummaryResponse {
    fn from(summary: ProjectSummary) -> Self {
        Self {
            project_id: summary.project_id.as_i32(),
            project_name: summary.project_name,
            company_id: summary.company_id.as_i32(),
            company_name: summary.company_name,
            hours: summary.hours,
            entries: summary.entries,
            users: summary.users,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummaryResponse {
    pub company_id: i32,
    pub company_name: String,
    pub hours: Decimal,
    pub entries: usize,
    pub projects: usize,
    pub users: usize,
}

impl From<CompanySummary> for CompanySummaryResponse {
    fn from(summary: CompanySummary) -> Self {
        Self {
            company_id: summary.company_id.as_i32(),
            company_name: summary.company_name,
            hours: summary.hours,
            entries: summary.entries,
            projects: summary.projects,
            users: summary.users,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum SummariesResponse {
    Users(Vec<UserSummaryResponse>),
    Projects(Vec<ProjectSummaryResponse>),
    Companies(Vec<CompanySummaryResponse>),
}

impl From<Summaries> for SummariesResponse {
    fn from(summaries: Summaries) -> Self {
        match summaries {
            Summaries::Users(rows) => Self::Users(rows.into_iter().map(Into::into).collect()),
            Summaries::Projects(rows) => Self::Projects(rows.into_iter().map(Into::into).collect()),
            Summaries::Companies(rows) => {
                Self::Companies(rows.into_iter().map(Into::into).collect())
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalResponse {
    pub date: String,
    pub hours: Decimal,
}

impl From<DailyTotal> for DailyTotalResponse {
    fn from(total: DailyTotal) -> Self {
        Self {
            date: format_date(total.date),
            hours: total.hours,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTotalResponse {
    pub user_id: i32,
    pub user_name: String,
    pub hours: Decimal,
}

impl From<UserTotal> for UserTotalResponse {
    fn from(total: UserTotal) -> Self {
        Self {
            user_id: total.user_id.as_i32(),
            user_name: total.user_name,
            hours: total.hours,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTotalResponse {
    pub project_id: i32,
    pub project_name: String,
    pub company_name: String,
    pub hours: Decimal,
}

impl From<ProjectTotal> for ProjectTotalResponse {
    fn from(total: ProjectTotal) -> Self {
        Self {
            project_id: total.project_id.as_i32(),
            project_name: total.project_name,
            company_name: total.company_name,
            hours: total.hours,
        }
    }
}

/// Chart feed: parallel label and value arrays, ready for a chart library.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl From<ChartData> for ChartResponse {
    fn from(data: ChartData) -> Self {
        let (labels, values) = match data {
            ChartData::Daily(rows) => rows
                .into_iter()
                .map(|row| (format_date(row.date), row.hours))
                .unzip(),
            ChartData::UserTotals(rows) => {
                rows.into_iter().map(|row| (row.user_name, row.hours)).unzip()
            }
            ChartData::ProjectTotals(rows) => rows
                .into_iter()
                .map(|row| (format!("{} ({})", row.project_name, row.company_name), row.hours))
                .unzip(),
            ChartData::Stats(stats) => (
                vec![
                    "Total hours".to_string(),
                    "Active projects".to_string(),
                    "Active users".to_string(),
                    "Average per day".to_string(),
                ],
                vec![
                    stats.total_hours,
                    Decimal::from(stats.active_projects),
                    Decimal::from(stats.active_users),
                    stats.average_per_day,
                ],
            ),
        };
        Self { labels, values }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReportResponse {
    pub date: String,
    pub total_hours: Decimal,
    pub entries: usize,
    pub users: usize,
    pub projects: usize,
    pub by_project: Vec<ProjectTotalResponse>,
    pub by_user: Vec<UserTotalResponse>,
}

impl From<DailyReport> for DailyReportResponse {
    fn from(report: DailyReport) -> Self {
        Self {
            date: format_date(report.date),
            total_hours: report.total_hours,
            entries: report.entries,
            users: report.users,
            projects: report.projects,
            by_project: report.by_project.into_iter().map(Into::into).collect(),
            by_user: report.by_user.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Earnings
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEarningsResponse {
    pub user_id: i32,
    pub user_name: String,
    pub hours: Decimal,
    pub rate: Decimal,
    pub earnings: Decimal,
}

impl From<&UserEarnings> for UserEarningsResponse {
    fn from(user: &UserEarnings) -> Self {
        Self {
            user_id: user.user_id.as_i32(),
            user_name: user.user_name.clone(),
            hours: user.hours,
            rate: user.rate,
            earnings: user.earnings,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairEarningsResponse {
    pub user_id: i32,
    pub user_name: String,
    pub project_id: i32,
    pub project_name: String,
    pub company_id: i32,
    pub hours: Decimal,
    pub rate: Decimal,
    pub earnings: Decimal,
}

impl From<&PairEarnings> for PairEarningsResponse {
    fn from(pair: &PairEarnings) -> Self {
        Self {
            user_id: pair.user_id.as_i32(),
            user_name: pair.user_name.clone(),
            project_id: pair.project_id.as_i32(),
            project_name: pair.project_name.clone(),
            company_id: pair.company_id.as_i32(),
            hours: pair.hours,
            rate: pair.rate,
            earnings: pair.earnings,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsResponse {
    pub total: Decimal,
    pub users: Vec<UserEarningsResponse>,
    pub pairs: Vec<PairEarningsResponse>,
}

impl From<&Earnings> for EarningsResponse {
    fn from(earnings: &Earnings) -> Self {
        Self {
            total: earnings.total(),
            users: earnings.users().into_iter().map(Into::into).collect(),
            pairs: earnings.pairs().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsReportResponse {
    pub rollup: RollupResponse,
    pub earnings: EarningsResponse,
}

impl From<EarningsReport> for EarningsReportResponse {
    fn from(report: EarningsReport) -> Self {
        Self {
            rollup: (&report.rollup).into(),
            earnings: (&report.earnings).into(),
        }
    }
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalReportResponse {
    pub rollup: RollupResponse,
    pub entries: Vec<ReportEntryResponse>,
    pub stats: StatsResponse,
}

impl From<PersonalReport> for PersonalReportResponse {
    fn from(report: PersonalReport) -> Self {
        Self {
            rollup: report.rollup.into(),
            entries: report.entries.into_iter().map(Into::into).collect(),
            stats: report.stats.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailResponse {
    pub project: ProjectResponse,
    pub stats: StatsResponse,
    pub by_user: Vec<UserTotalResponse>,
    pub rollup: RollupResponse,
}

impl From<ProjectDetail> for ProjectDetailResponse {
    fn from(detail: ProjectDetail) -> Self {
        Self {
            project: detail.project.into(),
            stats: detail.stats.into(),
            by_user: detail.by_user.into_iter().map(Into::into).collect(),
            rollup: detail.rollup.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetailResponse {
    pub company: CompanyResponse,
    pub projects: Vec<ProjectSummaryResponse>,
    pub rollup: RollupResponse,
    pub earnings: EarningsResponse,
}

impl From<CompanyDetail> for CompanyDetailResponse {
    fn from(detail: CompanyDetail) -> Self {
        Self {
            company: detail.company.into(),
            projects: detail.projects.into_iter().map(Into::into).collect(),
            rollup: (&detail.rollup).into(),
            earnings: (&detail.earnings).into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub user_id: i32,
    pub user_name: String,
    pub email: String,
    pub stats: StatsResponse,
    pub by_project: Vec<ProjectTotalResponse>,
    pub daily: Vec<DailyTotalResponse>,
}

impl From<UserDetail> for UserDetailResponse {
    fn from(detail: UserDetail) -> Self {
        Self {
            user_id: detail.user.id.as_i32(),
            user_name: detail.user.full_name(),
            email: detail.user.email,
            stats: detail.stats.into(),
            by_project: detail.by_project.into_iter().map(Into::into).collect(),
            daily: detail.daily.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Directory
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id.as_i32(),
            name: company.name,
            email: company.contact.email,
            phone: company.contact.phone,
            website: company.contact.website,
            address: company.contact.address,
            description: company.description,
            is_active: company.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: i32,
    pub company_id: i32,
    pub company_name: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub budget: Option<Decimal>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_active: bool,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.as_i32(),
            company_id: project.company_id.as_i32(),
            company_name: project.company_name,
            name: project.name,
            description: project.description,
            status: project.status.to_string(),
            budget: project.budget,
            start_date: format_date(project.start_date),
            end_date: project.end_date.map(format_date),
            is_active: project.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub hourly_rate: Option<Decimal>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.as_i32(),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.to_string(),
            hourly_rate: user.hourly_rate,
            is_active: user.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub project_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub assigned_at: OffsetDateTime,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            project_id: membership.project_id.as_i32(),
            user_id: membership.user_id.as_i32(),
            user_name: membership.user_name,
            role: membership.role.to_string(),
            assigned_at: membership.assigned_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
    pub custom_primary_color: String,
    pub custom_secondary_color: String,
    pub custom_text_color: String,
}

impl From<Preference> for PreferenceResponse {
    fn from(preference: Preference) -> Self {
        let theme = preference.theme;
        Self {
            primary_color: theme.primary_color.to_string(),
            secondary_color: theme.secondary_color.to_string(),
            text_color: theme.text_color.to_string(),
            custom_primary_color: theme.custom_primary_color.as_str().to_string(),
            custom_secondary_color: theme.custom_secondary_color.as_str().to_string(),
            custom_text_color: theme.custom_text_color.as_str().to_string(),
        }
    }
}
