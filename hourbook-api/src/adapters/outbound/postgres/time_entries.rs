use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

use crate::domain::{
    models::{EntryId, Hours, ProjectId, TimeEntry, TimeEntryDraft, UserId},
    ports::outbound::TimeEntryRepository,
    ReportingError,
};

const RETURNING: &str = "id, user_id, project_id, date, hours, description, created_at, updated_at";

pub struct PostgresTimeEntryRepository {
    pool: PgPool,
}

impl PostgresTimeEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct TimeEntryRow {
    id: i32,
    user_id: i32,
    project_id: i32,
    date: Date,
    hours: Decimal,
    description: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<TimeEntryRow> for TimeEntry {
    type Error = ReportingError;

    fn try_from(row: TimeEntryRow) -> Result<Self, Self::Error> {
        Ok(TimeEntry {
            id: EntryId::new(row.id),
            user_id: UserId::new(row.user_id),
            project_id: ProjectId::new(row.project_id),
            date: row.date,
            hours: Hours::new(row.hours).map_err(ReportingError::storage)?,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TimeEntryRepository for PostgresTimeEntryRepository {
    async fn get_entry(&self, entry_id: &EntryId) -> Result<Option<TimeEntry>, ReportingError> {
        let row = sqlx::query_as::<_, TimeEntryRow>(&format!(
            "SELECT {RETURNING} FROM time_entries WHERE id = $1"
        ))
        .bind(entry_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.map(TimeEntry::try_from).transpose()
    }

    async fn create_entry(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, ReportingError> {
        let row = sqlx::query_as::<_, TimeEntryRow>(&format!(
            r#"
            INSERT INTO time_entries (user_id, project_id, date, hours, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RETURNING}
            "#
        ))
        .bind(user_id.as_i32())
        .bind(draft.project_id.as_i32())
        .bind(draft.date)
        .bind(draft.hours.value())
        .bind(draft.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.try_into()
    }

    async fn update_entry(
        &self,
        entry_id: &EntryId,
        draft: &TimeEntryDraft,
    ) -> Result<Option<TimeEntry>, ReportingError> {
        let row = sqlx::query_as::<_, TimeEntryRow>(&format!(
            r#"
            UPDATE time_entries
            SET project_id = $2,
                date = $3,
                hours = $4,
                description = $5,
                updated_at = now()
            WHERE id = $1
            RETURNING {RETURNING}
            "#
        ))
        .bind(entry_id.as_i32())
        .bind(draft.project_id.as_i32())
        .bind(draft.date)
        .bind(draft.hours.value())
        .bind(draft.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.map(TimeEntry::try_from).transpose()
    }

    async fn delete_entry(&self, entry_id: &EntryId) -> Result<bool, ReportingError> {
        let result = sqlx::query("DELETE FROM time_entries WHERE id = $1")
            .bind(entry_id.as_i32())
            .execute(&self.pool)
            .await
            .map_err(ReportingError::storage)?;

        Ok(result.rows_affected() > 0)
    }
}
