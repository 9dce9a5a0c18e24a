use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::parse_column;
use crate::domain::{
    models::{AssignOutcome, Membership, ProjectId, ProjectRole, UserId},
    ports::outbound::MembershipRepository,
    ReportingError,
};

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MembershipRow {
    project_id: i32,
    user_id: i32,
    user_name: String,
    role: String,
    assigned_at: OffsetDateTime,
    is_active: bool,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = ReportingError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            project_id: ProjectId::new(row.project_id),
            user_id: UserId::new(row.user_id),
            user_name: row.user_name,
            role: parse_column("role", &row.role)?,
            assigned_at: row.assigned_at,
            is_active: row.is_active,
        })
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn assign(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
        role: ProjectRole,
    ) -> Result<AssignOutcome, ReportingError> {
        // The partial unique index on active pairs makes this race-free.
        let result = sqlx::query(
            r#"
            INSERT INTO project_memberships (project_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (project_id, user_id) WHERE is_active DO NOTHING
            "#,
        )
        .bind(project_id.as_i32())
        .bind(user_id.as_i32())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        Ok(if result.rows_affected() == 0 {
            AssignOutcome::AlreadyAssigned
        } else {
            AssignOutcome::Assigned
        })
    }

    async fn remove(&self, project_id: &ProjectId, user_id: &UserId) -> Result<bool, ReportingError> {
        let result = sqlx::query(
            r#"
            UPDATE project_memberships
            SET is_active = FALSE
            WHERE project_id = $1 AND user_id = $2 AND is_active
            "#,
        )
        .bind(project_id.as_i32())
        .bind(user_id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn active_members(&self, project_id: &ProjectId) -> Result<Vec<Membership>, ReportingError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT
                project_memberships.project_id,
                project_memberships.user_id,
                users.first_name || ' ' || users.last_name AS user_name,
                project_memberships.role,
                project_memberships.assigned_at,
                project_memberships.is_active
            FROM project_memberships
            INNER JOIN users ON users.id = project_memberships.user_id
            WHERE project_memberships.project_id = $1 AND project_memberships.is_active
            ORDER BY users.first_name, users.last_name
            "#,
        )
        .bind(project_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn is_active_member(
        &self,
        project_id: &ProjectId,
        user_id: &UserId,
    ) -> Result<bool, ReportingError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM project_memberships
                WHERE project_id = $1 AND user_id = $2 AND is_active
            )
            "#,
        )
        .bind(project_id.as_i32())
        .bind(user_id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(ReportingError::storage)
    }
}
