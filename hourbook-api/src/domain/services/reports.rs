use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use itertools::Itertools;
use rollup::{
    can_view, can_view_user, company_summaries, daily_totals, project_summaries, project_totals,
    resolve_filter, user_summaries, user_totals, DailyReport, DateRange, Earnings, HoursMatrix,
    LeafKey, ReportEntry, Rollup, Scope, Stats,
};
use rust_decimal::Decimal;
use time::Date;

use crate::domain::{
    models::{
        Actor, ChartData, ChartKind, CompanyDetail, CompanyId, EarningsReport, EntryFilter,
        MatrixReport, PersonalReport, ProjectDetail, ProjectId, Summaries, SummaryKind,
        UserDetail, UserId,
    },
    ports::{
        inbound::ReportService,
        outbound::{DirectoryRepository, EntryStore},
    },
    ReportingError,
};

pub struct ReportServiceImpl<E, D> {
    entry_store: Arc<E>,
    directory: Arc<D>,
}

impl<E, D> ReportServiceImpl<E, D> {
    pub fn new(entry_store: Arc<E>, directory: Arc<D>) -> Self {
        Self {
            entry_store,
            directory,
        }
    }
}

impl<E: EntryStore, D: DirectoryRepository> ReportServiceImpl<E, D> {
    /// Fetches what the actor may see of `requested`.
    async fn fetch_visible(
        &self,
        actor: &Actor,
        requested: EntryFilter,
    ) -> Result<Vec<ReportEntry>, ReportingError> {
        let filter = resolve_filter(actor, requested);
        tracing::debug!(actor = %actor.user_id, ?filter, "fetching report entries");

        self.entry_store.fetch_entries(&filter).await
    }

    async fn rates_for(
        &self,
        entries: &[ReportEntry],
    ) -> Result<HashMap<UserId, Decimal>, ReportingError> {
        let user_ids = entries
            .iter()
            .map(|entry| entry.user_id)
            .unique()
            .collect::<Vec<_>>();

        self.directory.hourly_rates(&user_ids).await
    }
}

#[async_trait]
impl<E: EntryStore, D: DirectoryRepository> ReportService for ReportServiceImpl<E, D> {
    async fn personal_report(
        &self,
        actor: &Actor,
        range: DateRange,
    ) -> Result<PersonalReport, ReportingError> {
        let filter = EntryFilter::new()
            .with_user(actor.user_id)
            .with_range(range);
        let mut entries = self.fetch_visible(actor, filter).await?;

        let rollup = Rollup::build(&entries, LeafKey::Date);
        let stats = Stats::compute(&entries, range);
        entries.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));

        Ok(PersonalReport {
            rollup,
            entries,
            stats,
        })
    }

    async fn rollup(
        &self,
        actor: &Actor,
        filter: EntryFilter,
        leaf_key: LeafKey,
    ) -> Result<Rollup, ReportingError> {
        let entries = self.fetch_visible(actor, filter).await?;
        Ok(Rollup::build(&entries, leaf_key))
    }

    async fn earnings(
        &self,
        actor: &Actor,
        filter: EntryFilter,
    ) -> Result<EarningsReport, ReportingError> {
        ReportingError::authorize(actor.is_admin())?;

        let entries = self.fetch_visible(actor, filter).await?;
        let rates = self.rates_for(&entries).await?;

        Ok(EarningsReport {
            rollup: Rollup::build(&entries, LeafKey::User),
            earnings: Earnings::calculate(&entries, &rates),
        })
    }

    async fn summaries(
        &self,
        actor: &Actor,
        filter: EntryFilter,
        kind: SummaryKind,
    ) -> Result<Summaries, ReportingError> {
        let entries = self.fetch_visible(actor, filter).await?;

        Ok(match kind {
            SummaryKind::Users => Summaries::Users(user_summaries(&entries)),
            SummaryKind::Projects => Summaries::Projects(project_summaries(&entries)),
            SummaryKind::Companies => Summaries::Companies(company_summaries(&entries)),
        })
    }

    async fn daily_report(&self, actor: &Actor, date: Date) -> Result<DailyReport, ReportingError> {
        let filter = EntryFilter::new().with_range(DateRange::single(date));
        let entries = self.fetch_visible(actor, filter).await?;

        Ok(DailyReport::compute(&entries, date))
    }

    async fn chart(
        &self,
        actor: &Actor,
        filter: EntryFilter,
        kind: ChartKind,
    ) -> Result<ChartData, ReportingError> {
        let entries = self.fetch_visible(actor, filter).await?;

        Ok(match kind {
            ChartKind::Daily => ChartData::Daily(daily_totals(&entries)),
            ChartKind::UserTotals => ChartData::UserTotals(user_totals(&entries)),
            ChartKind::ProjectTotals => ChartData::ProjectTotals(project_totals(&entries)),
            ChartKind::Stats => ChartData::Stats(Stats::compute(&entries, filter.range)),
        })
    }

    async fn project_detail(
        &self,
        actor: &Actor,
        project_id: &ProjectId,
        range: DateRange,
    ) -> Result<ProjectDetail, ReportingError> {
        ReportingError::authorize(can_view(actor, Scope::Project(*project_id)))?;

        let project = self
            .directory
            .get_project(project_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("project {project_id}")))?;
        let filter = EntryFilter::new()
            .with_project(*project_id)
            .with_range(range);
        let entries = self.fetch_visible(actor, filter).await?;

        Ok(ProjectDetail {
            project,
            stats: Stats::compute(&entries, range),
            by_user: user_totals(&entries),
            rollup: Rollup::build(&entries, LeafKey::Date),
        })
    }

    async fn company_detail(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        range: DateRange,
    ) -> Result<CompanyDetail, ReportingError> {
        ReportingError::authorize(can_view(actor, Scope::Company(*company_id)))?;

        let company = self
            .directory
            .get_company(company_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("company {company_id}")))?;
        let filter = EntryFilter::new()
            .with_company(*company_id)
            .with_range(range);
        let entries = self.fetch_visible(actor, filter).await?;
        let rates = self.rates_for(&entries).await?;

        Ok(CompanyDetail {
            company,
            projects: project_summaries(&entries),
            rollup: Rollup::build(&entries, LeafKey::User),
            earnings: Earnings::calculate(&entries, &rates),
        })
    }

    async fn user_detail(
        &self,
        actor: &Actor,
        user_id: &UserId,
        range: DateRange,
    ) -> Result<UserDetail, ReportingError> {
        ReportingError::authorize(can_view_user(actor, *user_id))?;

        let user = self
            .directory
            .get_user(user_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("user {user_id}")))?;
        let filter = EntryFilter::new().with_user(*user_id).with_range(range);
        let entries = self.fetch_visible(actor, filter).await?;

        Ok(UserDetail {
            user,
            stats: Stats::compute(&entries, range),
            by_project: project_totals(&entries),
            daily: daily_totals(&entries),
        })
    }

    async fn matrix(
        &self,
        actor: &Actor,
        filter: EntryFilter,
    ) -> Result<MatrixReport, ReportingError> {
        let entries = self.fetch_visible(actor, filter).await?;
        let include_earnings = actor.is_admin();
        let rates = if include_earnings {
            self.rates_for(&entries).await?
        } else {
            HashMap::new()
        };

        Ok(MatrixReport {
            title: "time-report".to_string(),
            matrix: HoursMatrix::build(&entries, &rates),
            include_earnings,
        })
    }

    async fn company_matrix(
        &self,
        actor: &Actor,
        company_id: &CompanyId,
        range: DateRange,
    ) -> Result<MatrixReport, ReportingError> {
        ReportingError::authorize(can_view(actor, Scope::Company(*company_id)))?;

        let company = self
            .directory
            .get_company(company_id)
            .await?
            .ok_or_else(|| ReportingError::not_found(format!("company {company_id}")))?;
        let filter = EntryFilter::new()
            .with_company(*company_id)
            .with_range(range);
        let entries = self.fetch_visible(actor, filter).await?;
        let rates = self.rates_for(&entries).await?;

        Ok(MatrixReport {
            title: company.name,
            matrix: HoursMatrix::build(&entries, &rates),
            include_earnings: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rollup::{CompanyId, ProjectRole, Role};
    use time::macros::date;

    use super::*;
    use crate::domain::ports::outbound::mock::MockBackend;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    /// Two companies, three projects, an admin, a project admin and two
    /// regular users.
    fn backend() -> MockBackend {
        let day = date!(2024 - 03 - 05);
        MockBackend::new()
            .with_user(1, "Ada Admin", Role::CompanyAdmin, None)
            .with_user(2, "Uma One", Role::User, Some("10"))
            .with_user(3, "Ulf Two", Role::User, Some("20"))
            .with_user(4, "Pia Lead", Role::User, None)
            .with_company(1, "CompanyA")
            .with_company(2, "CompanyB")
            .with_project(1, 1, "Proj1")
            .with_project(2, 1, "Proj2")
            .with_project(3, 2, "Proj3")
            .with_membership(1, 4, ProjectRole::ProjectAdmin)
            .with_entry(1, 2, 1, day, "3.5")
            .with_entry(2, 2, 1, day, "2.0")
            .with_entry(3, 3, 2, day, "1.0")
            .with_entry(4, 3, 3, date!(2024 - 03 - 06), "4")
    }

    fn service(backend: &MockBackend) -> ReportServiceImpl<MockBackend, MockBackend> {
        ReportServiceImpl::new(Arc::new(backend.clone()), Arc::new(backend.clone()))
    }

    fn admin() -> Actor {
        Actor::new(UserId::new(1), Role::CompanyAdmin)
    }

    fn regular(id: i32) -> Actor {
        Actor::new(UserId::new(id), Role::User)
    }

    fn project_lead() -> Actor {
        Actor::new(UserId::new(4), Role::User).with_managed_projects([ProjectId::new(1)])
    }

    #[tokio::test]
    async fn admin_rollup_matches_worked_example() {
        let backend = backend();
        let rollup = service(&backend)
            .rollup(
                &admin(),
                EntryFilter::new().with_company(CompanyId::new(1)),
                LeafKey::Date,
            )
            .await
            .unwrap();

        let company = rollup.company(CompanyId::new(1)).unwrap();
        assert_eq!(company.project(ProjectId::new(1)).unwrap().hours(), dec("5.5"));
        assert_eq!(company.hours(), dec("6.5"));
        assert_eq!(rollup.total(), dec("6.5"));
    }

    #[tokio::test]
    async fn regular_user_cannot_widen_scope() {
        let backend = backend();
        let rollup = service(&backend)
            .rollup(
                &regular(3),
                EntryFilter::new()
                    .with_company(CompanyId::new(1))
                    .with_user(UserId::new(2)),
                LeafKey::User,
            )
            .await
            .unwrap();

        assert_eq!(rollup.total(), dec("1.0"));
        assert_eq!(rollup.entry_count(), 1);
    }

    #[tokio::test]
    async fn project_admin_sees_whole_managed_project() {
        let backend = backend();
        let rollup = service(&backend)
            .rollup(
                &project_lead(),
                EntryFilter::new().with_project(ProjectId::new(1)),
                LeafKey::User,
            )
            .await
            .unwrap();
        assert_eq!(rollup.total(), dec("5.5"));

        let elsewhere = service(&backend)
            .rollup(
                &project_lead(),
                EntryFilter::new().with_project(ProjectId::new(2)),
                LeafKey::User,
            )
            .await
            .unwrap();
        assert_eq!(elsewhere.entry_count(), 0);
    }

    #[tokio::test]
    async fn earnings_use_current_rates() {
        let backend = backend();
        let report = service(&backend)
            .earnings(&admin(), EntryFilter::new().with_company(CompanyId::new(1)))
            .await
            .unwrap();

        assert_eq!(report.earnings.user_total(UserId::new(2)), dec("55"));
        assert_eq!(report.earnings.user_total(UserId::new(3)), dec("20"));
        assert_eq!(report.earnings.total(), dec("75"));
        assert_eq!(report.rollup.total(), dec("6.5"));
    }

    #[tokio::test]
    async fn earnings_are_admin_only() {
        let backend = backend();
        let result = service(&backend)
            .earnings(&project_lead(), EntryFilter::new().with_project(ProjectId::new(1)))
            .await;

        assert!(matches!(result, Err(ReportingError::AuthorizationDenied)));
    }

    #[tokio::test]
    async fn unset_rate_keeps_hours_but_earns_nothing() {
        let backend = backend().with_entry(5, 4, 1, date!(2024 - 03 - 07), "8");
        let report = service(&backend)
            .earnings(&admin(), EntryFilter::new().with_project(ProjectId::new(1)))
            .await
            .unwrap();

        assert_eq!(report.rollup.total(), dec("13.5"));
        assert_eq!(report.earnings.user_total(UserId::new(4)), Decimal::ZERO);
        assert_eq!(report.earnings.total(), dec("55"));
    }

    #[tokio::test]
    async fn deactivated_projects_still_report() {
        let backend = backend();
        backend.deactivate_project(1);

        let rollup = service(&backend)
            .rollup(&admin(), EntryFilter::new(), LeafKey::Date)
            .await
            .unwrap();
        assert_eq!(rollup.total(), dec("10.5"));
    }

    #[tokio::test]
    async fn project_detail_requires_management_rights() {
        let backend = backend();
        let service = service(&backend);

        let detail = service
            .project_detail(&project_lead(), &ProjectId::new(1), DateRange::unbounded())
            .await
            .unwrap();
        assert_eq!(detail.stats.total_hours, dec("5.5"));
        assert_eq!(detail.by_user[0].user_name, "Uma One");

        let denied = service
            .project_detail(&regular(2), &ProjectId::new(1), DateRange::unbounded())
            .await;
        assert!(matches!(denied, Err(ReportingError::AuthorizationDenied)));

        let missing = service
            .project_detail(&admin(), &ProjectId::new(99), DateRange::unbounded())
            .await;
        assert!(matches!(missing, Err(ReportingError::NotFound(_))));
    }

    #[tokio::test]
    async fn company_detail_includes_earnings() {
        let backend = backend();
        let detail = service(&backend)
            .company_detail(&admin(), &CompanyId::new(2), DateRange::unbounded())
            .await
            .unwrap();

        assert_eq!(detail.company.name, "CompanyB");
        assert_eq!(detail.projects.len(), 1);
        assert_eq!(detail.earnings.total(), dec("80"));
    }

    #[tokio::test]
    async fn user_detail_is_self_or_admin() {
        let backend = backend();
        let service = service(&backend);

        let own = service
            .user_detail(&regular(3), &UserId::new(3), DateRange::unbounded())
            .await
            .unwrap();
        assert_eq!(own.stats.total_hours, dec("5"));
        assert_eq!(own.daily.len(), 2);

        let other = service
            .user_detail(&regular(3), &UserId::new(2), DateRange::unbounded())
            .await;
        assert!(matches!(other, Err(ReportingError::AuthorizationDenied)));
    }

    #[tokio::test]
    async fn personal_report_lists_newest_first() {
        let backend = backend();
        let report = service(&backend)
            .personal_report(&regular(3), DateRange::unbounded())
            .await
            .unwrap();

        assert_eq!(report.entries[0].date, date!(2024 - 03 - 06));
        assert_eq!(report.rollup.total(), dec("5"));
        assert_eq!(report.rollup.companies().count(), 2);
    }

    #[tokio::test]
    async fn daily_report_is_scoped_like_everything_else() {
        let backend = backend();
        let service = service(&backend);

        let all = service
            .daily_report(&admin(), date!(2024 - 03 - 05))
            .await
            .unwrap();
        assert_eq!(all.total_hours, dec("6.5"));

        let own = service
            .daily_report(&regular(2), date!(2024 - 03 - 05))
            .await
            .unwrap();
        assert_eq!(own.total_hours, dec("5.5"));
        assert_eq!(own.users, 1);
    }

    #[tokio::test]
    async fn matrix_hides_earnings_from_non_admins() {
        let backend = backend();
        let report = service(&backend)
            .matrix(&regular(2), EntryFilter::new())
            .await
            .unwrap();

        assert!(!report.include_earnings);
        assert_eq!(report.matrix.total, dec("5.5"));
        assert_eq!(report.matrix.earnings, Decimal::ZERO);
    }

    #[tokio::test]
    async fn company_matrix_is_titled_and_priced() {
        let backend = backend();
        let service = service(&backend);

        let report = service
            .company_matrix(&admin(), &CompanyId::new(1), DateRange::unbounded())
            .await
            .unwrap();
        assert_eq!(report.title, "CompanyA");
        assert!(report.include_earnings);
        assert_eq!(report.matrix.earnings, dec("75"));

        let denied = service
            .company_matrix(&project_lead(), &CompanyId::new(1), DateRange::unbounded())
            .await;
        assert!(matches!(denied, Err(ReportingError::AuthorizationDenied)));
    }

    #[tokio::test]
    async fn summaries_follow_the_requested_kind() {
        let backend = backend();
        let summaries = service(&backend)
            .summaries(&admin(), EntryFilter::new(), SummaryKind::Companies)
            .await
            .unwrap();

        match summaries {
            Summaries::Companies(companies) => {
                assert_eq!(companies.len(), 2);
                assert_eq!(companies[0].hours, dec("6.5"));
            }
            other => panic!("unexpected summaries: {other:?}"),
        }
    }

    #[tokio::test]
    async fn chart_stats_average_over_range() {
        let backend = backend();
        let range = DateRange::parse(Some("05.03.2024"), Some("06.03.2024")).unwrap();
        let chart = service(&backend)
            .chart(&admin(), EntryFilter::new().with_range(range), ChartKind::Stats)
            .await
            .unwrap();

        match chart {
            ChartData::Stats(stats) => {
                assert_eq!(stats.total_hours, dec("10.5"));
                assert_eq!(stats.average_per_day, dec("5.25"));
            }
            other => panic!("unexpected chart: {other:?}"),
        }
    }
}
