use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::Date;

use super::{parse_column, unique_or_storage};
use crate::domain::{
    models::{
        Company, CompanyId, ContactDetails, NewCompany, NewProject, Project, ProjectId,
        ProjectListing, User, UserId, UserProfile,
    },
    ports::outbound::DirectoryRepository,
    ReportingError,
};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, role, hourly_rate, is_active";

const ACCOUNT_CONFLICT: &str = "username or email is already in use";

const COMPANY_COLUMNS: &str =
    "id, name, email, phone, website, address, description, is_active";

const PROJECT_SELECT: &str = r#"
    SELECT
        projects.id,
        projects.company_id,
        companies.name AS company_name,
        projects.name,
        projects.description,
        projects.status,
        projects.budget,
        projects.start_date,
        projects.end_date,
        projects.is_active
    FROM projects
    INNER JOIN companies ON companies.id = projects.company_id
"#;

pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i32,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
    hourly_rate: Option<Decimal>,
    is_active: bool,
}

impl TryFrom<UserRow> for User {
    type Error = ReportingError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::new(row.id),
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role: parse_column("role", &row.role)?,
            hourly_rate: row.hourly_rate,
            is_active: row.is_active,
        })
    }
}

#[derive(FromRow)]
struct CompanyRow {
    id: i32,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    address: Option<String>,
    description: Option<String>,
    is_active: bool,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: CompanyId::new(row.id),
            name: row.name,
            contact: ContactDetails {
                email: row.email,
                phone: row.phone,
                website: row.website,
                address: row.address,
            },
            description: row.description,
            is_active: row.is_active,
        }
    }
}

#[derive(FromRow)]
struct ProjectRow {
    id: i32,
    company_id: i32,
    company_name: String,
    name: String,
    description: Option<String>,
    status: String,
    budget: Option<Decimal>,
    start_date: Date,
    end_date: Option<Date>,
    is_active: bool,
}

impl TryFrom<ProjectRow> for Project {
    type Error = ReportingError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: ProjectId::new(row.id),
            company_id: CompanyId::new(row.company_id),
            company_name: row.company_name,
            name: row.name,
            description: row.description,
            status: parse_column("status", &row.status)?,
            budget: row.budget,
            start_date: row.start_date,
            end_date: row.end_date,
            is_active: row.is_active,
        })
    }
}

#[derive(FromRow)]
struct RateRow {
    id: i32,
    hourly_rate: Decimal,
}

#[async_trait]
impl DirectoryRepository for PostgresDirectory {
    async fn get_user(&self, user_id: &UserId) -> Result<Option<User>, ReportingError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.map(User::try_from).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, ReportingError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY first_name, last_name, id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn create_user(&self, profile: &UserProfile) -> Result<User, ReportingError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, email, first_name, last_name, role, hourly_rate)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT DO NOTHING
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.role.as_str())
        .bind(profile.hourly_rate)
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.ok_or_else(|| ReportingError::validation(ACCOUNT_CONFLICT))?
            .try_into()
    }

    async fn update_user(
        &self,
        user_id: &UserId,
        profile: &UserProfile,
    ) -> Result<Option<User>, ReportingError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                first_name = $4,
                last_name = $5,
                role = $6,
                hourly_rate = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.as_i32())
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.role.as_str())
        .bind(profile.hourly_rate)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| unique_or_storage(err, ACCOUNT_CONFLICT))?;

        row.map(User::try_from).transpose()
    }

    async fn hourly_rates(
        &self,
        user_ids: &[UserId],
    ) -> Result<HashMap<UserId, Decimal>, ReportingError> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids = user_ids.iter().map(UserId::as_i32).collect::<Vec<_>>();
        let rows = sqlx::query_as::<_, RateRow>(
            r#"
            SELECT id, hourly_rate
            FROM users
            WHERE id = ANY($1) AND hourly_rate IS NOT NULL
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        Ok(rows
            .into_iter()
            .map(|row| (UserId::new(row.id), row.hourly_rate))
            .collect())
    }

    async fn managed_projects(&self, user_id: &UserId) -> Result<Vec<ProjectId>, ReportingError> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT project_id
            FROM project_memberships
            WHERE user_id = $1 AND role = 'project_admin' AND is_active
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        Ok(ids.into_iter().map(ProjectId::new).collect())
    }

    async fn set_user_active(&self, user_id: &UserId, active: bool) -> Result<bool, ReportingError> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = $1")
            .bind(user_id.as_i32())
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(ReportingError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_company(&self, company_id: &CompanyId) -> Result<Option<Company>, ReportingError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"
        ))
        .bind(company_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        Ok(row.map(Company::from))
    }

    async fn list_companies(&self) -> Result<Vec<Company>, ReportingError> {
        let rows = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        Ok(rows.into_iter().map(Company::from).collect())
    }

    async fn create_company(&self, company: &NewCompany) -> Result<Company, ReportingError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            r#"
            INSERT INTO companies (name, email, phone, website, address, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name) DO NOTHING
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(&company.name)
        .bind(company.contact.email.as_deref())
        .bind(company.contact.phone.as_deref())
        .bind(company.contact.website.as_deref())
        .bind(company.contact.address.as_deref())
        .bind(company.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.map(Company::from).ok_or_else(|| {
            ReportingError::validation(format!("a company named {} already exists", company.name))
        })
    }

    async fn update_company(
        &self,
        company_id: &CompanyId,
        company: &NewCompany,
    ) -> Result<Option<Company>, ReportingError> {
        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            r#"
            UPDATE companies
            SET name = $2, email = $3, phone = $4, website = $5, address = $6, description = $7
            WHERE id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(company_id.as_i32())
        .bind(&company.name)
        .bind(company.contact.email.as_deref())
        .bind(company.contact.phone.as_deref())
        .bind(company.contact.website.as_deref())
        .bind(company.contact.address.as_deref())
        .bind(company.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| {
            unique_or_storage(err, format!("a company named {} already exists", company.name))
        })?;

        Ok(row.map(Company::from))
    }

    async fn set_company_active(
        &self,
        company_id: &CompanyId,
        active: bool,
    ) -> Result<bool, ReportingError> {
        let result = sqlx::query("UPDATE companies SET is_active = $2 WHERE id = $1")
            .bind(company_id.as_i32())
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(ReportingError::storage)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_project(&self, project_id: &ProjectId) -> Result<Option<Project>, ReportingError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "{PROJECT_SELECT} WHERE projects.id = $1"
        ))
        .bind(project_id.as_i32())
        .fetch_optional(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        row.map(Project::try_from).transpose()
    }

    async fn list_projects(&self, listing: ProjectListing) -> Result<Vec<Project>, ReportingError> {
        let (filter, user_id) = match listing {
            ProjectListing::AllActive => ("", None),
            ProjectListing::AssignedTo(user_id) => (
                r#"
                INNER JOIN project_memberships
                    ON project_memberships.project_id = projects.id
                    AND project_memberships.user_id = $1
                    AND project_memberships.is_active
                "#,
                Some(user_id.as_i32()),
            ),
        };
        let sql = format!(
            "{PROJECT_SELECT} {filter} WHERE projects.is_active ORDER BY companies.name, projects.name"
        );

        let mut query = sqlx::query_as::<_, ProjectRow>(&sql);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(ReportingError::storage)?;

        rows.into_iter().map(Project::try_from).collect()
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, ReportingError> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO projects
                (company_id, name, description, status, budget, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(project.company_id.as_i32())
        .bind(&project.name)
        .bind(project.description.as_deref())
        .bind(project.status.to_string())
        .bind(project.budget)
        .bind(project.start_date)
        .bind(project.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        self.get_project(&ProjectId::new(id))
            .await?
            .ok_or_else(|| ReportingError::storage(format!("project {id} vanished after insert")))
    }

    async fn update_project(
        &self,
        project_id: &ProjectId,
        project: &NewProject,
    ) -> Result<Option<Project>, ReportingError> {
        let updated = sqlx::query(
            r#"
            UPDATE projects
            SET company_id = $2,
                name = $3,
                description = $4,
                status = $5,
                budget = $6,
                start_date = $7,
                end_date = $8
            WHERE id = $1
            "#,
        )
        .bind(project_id.as_i32())
        .bind(project.company_id.as_i32())
        .bind(&project.name)
        .bind(project.description.as_deref())
        .bind(project.status.to_string())
        .bind(project.budget)
        .bind(project.start_date)
        .bind(project.end_date)
        .execute(&self.pool)
        .await
        .map_err(ReportingError::storage)?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_project(project_id).await
    }

    async fn set_project_active(
        &self,
        project_id: &ProjectId,
        active: bool,
    ) -> Result<bool, ReportingError> {
        let result = sqlx::query("UPDATE projects SET is_active = $2 WHERE id = $1")
            .bind(project_id.as_i32())
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(ReportingError::storage)?;

        Ok(result.rows_affected() > 0)
    }
}
