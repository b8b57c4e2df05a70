//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use flexup_application::UserRepository;
use flexup_core::{AppError, AppResult, UserId};
use flexup_domain::{EmailAddress, Status, UserAccount, codec};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: uuid::Uuid,
    email: String,
    is_staff: bool,
    status: String,
    is_email_verified: bool,
    joined_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<UserRow> for UserAccount {
    type Error = AppError;

    fn try_from(row: UserRow) -> AppResult<Self> {
        Ok(UserAccount::from_parts(
            UserId::from_uuid(row.id),
            EmailAddress::new(row.email)?,
            row.is_staff,
            codec::decode::<Status>(&row.status)?,
            row.is_email_verified,
            row.joined_at,
        ))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: UserAccount) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, is_staff, status, is_email_verified, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.is_staff())
        .bind(codec::encode(user.status()))
        .bind(user.is_email_verified())
        .bind(user.joined_at())
        .execute(&self.pool)
        .await
        .map_err(email_conflict_or_internal)?;

        Ok(())
    }

    async fn update(&self, user: UserAccount) -> AppResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET email = $2, is_staff = $3, status = $4, is_email_verified = $5
            WHERE id = $1
            ",
        )
        .bind(user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.is_staff())
        .bind(codec::encode(user.status()))
        .bind(user.is_email_verified())
        .execute(&self.pool)
        .await
        .map_err(|error| query_failed(error, "update user"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "no user with id '{}'",
                user.id()
            )));
        }

        Ok(())
    }

    async fn find(&self, id: UserId) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, is_staff, status, is_email_verified, joined_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| query_failed(error, "find user"))?;

        row.map(UserAccount::try_from).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, email, is_staff, status, is_email_verified, joined_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| query_failed(error, "find user by email"))?;

        row.map(UserAccount::try_from).transpose()
    }
}

fn email_conflict_or_internal(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("a user with this email already exists".to_owned());
    }

    query_failed(error, "insert user")
}

fn query_failed(error: sqlx::Error, operation: &str) -> AppError {
    tracing::error!(%error, operation, "user repository query failed");
    AppError::Internal(format!("failed to {operation}: {error}"))
}
