use async_trait::async_trait;
use rollup::{EntryFilter, ReportEntry};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::Date;

use crate::domain::{
    models::{CompanyId, EntryId, Hours, ProjectId, UserId},
    ports::outbound::EntryStore,
    ReportingError,
};

pub struct PostgresEntryStore {
    pool: PgPool,
}

impl PostgresEntryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ReportEntryRow {
    id: i32,
    user_id: i32,
    user_name: String,
    project_id: i32,
    project_name: String,
    company_id: i32,
    company_name: String,
    date: Date,
    hours: Decimal,
    description: Option<String>,
}

impl TryFrom<ReportEntryRow> for ReportEntry {
    type Error = ReportingError;

    fn try_from(row: ReportEntryRow) -> Result<Self, Self::Error> {
        Ok(ReportEntry {
            id: EntryId::new(row.id),
            user_id: UserId::new(row.user_id),
            user_name: row.user_name,
            project_id: ProjectId::new(row.project_id),
            project_name: row.project_name,
            company_id: CompanyId::new(row.company_id),
            company_name: row.company_name,
            date: row.date,
            hours: Hours::new(row.hours).map_err(ReportingError::storage)?,
            description: row.description,
        })
    }
}

#[async_trait]
impl EntryStore for PostgresEntryStore {
    async fn fetch_entries(&self, filter: &EntryFilter) -> Result<Vec<ReportEntry>, ReportingError> {
        let rows = sqlx::query_as::<_, ReportEntryRow>(
            r#"
            SELECT
                time_entries.id,
                time_entries.user_id,
                users.first_name || ' ' || users.last_name AS user_name,
                time_entries.project_id,
                projects.name AS project_name,
                projects.company_id,
                companies.name AS company_name,
                time_entries.date,
                time_entries.hours,
                time_entries.description
            FROM time_entries
            INNER JOIN users ON users.id = time_entries.user_id
            INNER JOIN projects ON projects.id = time_entries.project_id
            INNER JOIN companies ON companies.id = projects.company_id
            WHERE ($1::int IS NULL OR time_entries.user_id = $1)
              AND ($2::int IS NULL OR time_entries.project_id = $2)
              AND ($3::int IS NULL OR projects.company_id = $3)
              AND ($4::date IS NULL OR time_entries.date >= $4)
              AND ($5::date IS NULL OR time_entries.date <= $5)
            ORDER BY time_entries.date, time_entries.id
            "#,
        )
        .bind(filter.user_id.map(|id| id.as_i32()))
        .bind(filter.project_id.map(|id| id.as_i32()))
        .bind(filter.company_id.map(|id| id.as_i32()))
        .bind(filter.range.from())
        .bind(filter.range.to())
        .fetch_all(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        rows.into_iter().map(ReportEntry::try_from).collect()
    }
}
