use async_trait::async_trait;
use rollup::{DailyReport, DateRange, LeafKey, Rollup};
use time::Date;

use crate::domain::{
    models::{
        Actor, ChartData, ChartKind, CompanyDetail, CompanyId, EarningsReport, EntryFilter,
        MatrixReport, PersonalReport, ProjectDetail, ProjectId, Summaries, SummaryKind,
        UserDetail, UserId,
    },
    ReportingError,
};

/// Read-only reports. Every method authorizes `actor` before fetching.
#[async_trait]
pub trait ReportService: Send + Sync + 'static {
    async fn personal_report(
        &self,
        actor: &Actor,
        range: DateRange,
    ) -> Result<PersonalReport, ReportingError>;

    /// Filters a regular user could widen are clamped to their own entries.
    async fn rollup(
        &self,
        actor: &Actor,
        filter: EntryFilter,
        leaf_key: LeafKey,
    ) -> Result<Rollup, ReportingError>;

    async fn earnings(
        &self,
        actor: &Actor,
        filter: EntryFilter,
    ) -> Result<EarningsReport, ReportingError>;

    async fn summaries(
        &self,
        actor: &Actor,
        filter: EntryFilter,
        kind: SummaryKind,
    ) -> Result<Summaries, ReportingError>;

    async fn daily_report(&self, actor: &Actor, date: Date) -> Result<DailyReport, ReportingError>;

    async fn chart(
        &self,
        actor: &Actor,
        filter: EntryFilter,
        kind: ChartKind,
    ) -> Result<ChartData, ReportingError>;

    async fn project_detail(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        range: DateRange,
    ) -> Result<ProjectDetail, ReportingError>;

    async fn company_detail(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        range: DateRange,
    ) -> Result<CompanyDetail, ReportingError>;

    async fn user_detail(
        &self,
        actor: &Actor,
        user_id: &UserId,
        range: DateRange,
    ) -> Result<UserDetail, ReportingError>;

    async fn matrix(&self, actor: &Actor, filter: EntryFilter)
        -> Result<MatrixReport, ReportingError>;

    async fn company_matrix(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        range: DateRange,
    ) -> Result<MatrixReport, ReportingError>;
}
