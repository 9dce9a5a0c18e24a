use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::parse_column;
use crate::domain::{
    models::{HexColor, Preference, Theme, UserId},
    ports::outbound::PreferenceRepository,
    ReportingError,
};

const THEME_COLUMNS: &str = "user_id, primary_color, secondary_color, text_color, \
    custom_primary_color, custom_secondary_color, custom_text_color";

pub struct PostgresPreferenceRepository {
    pool: PgPool,
}

impl PostgresPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PreferenceRow {
    user_id: i32,
    primary_color: String,
    secondary_color: String,
    text_color: String,
    custom_primary_color: String,
    custom_secondary_color: String,
    custom_text_color: String,
}

impl TryFrom<PreferenceRow> for Preference {
    type Error = ReportingError;

    fn try_from(row: PreferenceRow) -> Result<Self, Self::Error> {
        Ok(Preference {
            user_id: UserId::new(row.user_id),
            theme: Theme {
                primary_color: parse_column("primary_color", &row.primary_color)?,
                secondary_color: parse_column("secondary_color", &row.secondary_color)?,
                text_color: parse_column("text_color", &row.text_color)?,
                custom_primary_color: HexColor::parse(&row.custom_primary_color)?,
                custom_secondary_color: HexColor::parse(&row.custom_secondary_color)?,
                custom_text_color: HexColor::parse(&row.custom_text_color)?,
            },
        })
    }
}

#[async_trait]
impl PreferenceRepository for PostgresPreferenceRepository {
    async fn get_or_create(&self, user_id: &UserId) -> Result<Preference, ReportingError> {
        // Column defaults hold the stock theme; concurrent first reads both
        // land on the same row.
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_i32())
        .execute(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        let row = sqlx::query_as::<_, PreferenceRow>(&format!(
            "SELECT {THEME_COLUMNS} FROM user_preferences WHERE user_id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_one(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.try_into()
    }

    async fn save(&self, user_id: &UserId, theme: &Theme) -> Result<Preference, ReportingError> {
        let row = sqlx::query_as::<_, PreferenceRow>(&format!(
            r#"
            INSERT INTO user_preferences (
                user_id, primary_color, secondary_color, text_color,
                custom_primary_color, custom_secondary_color, custom_text_color
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE
            SET primary_color = EXCLUDED.primary_color,
                secondary_color = EXCLUDED.secondary_color,
                text_color = EXCLUDED.text_color,
                custom_primary_color = EXCLUDED.custom_primary_color,
                custom_secondary_color = EXCLUDED.custom_secondary_color,
                custom_text_color = EXCLUDED.custom_text_color,
                updated_at = now()
            RETURNING {THEME_COLUMNS}
            "#
        ))
        .bind(user_id.as_i32())
        .bind(theme.primary_color.to_string())
        .bind(theme.secondary_color.to_string())
        .bind(theme.text_color.to_string())
        .bind(theme.custom_primary_color.as_str())
        .bind(theme.custom_secondary_color.as_str())
        .bind(theme.custom_text_color.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.try_into()
    }
}
