use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::data::session_repository::SessionRepository;
use crate::domain::error::DomainError;
use crate::domain::session::{Session, SessionUser};

#[derive(Debug, Clone)]
pub(crate) struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    token: String,
    user_id: i64,
    user_name: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn insert_session(&self, session: Session) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, user_name, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&session.token)
        .bind(session.user.user_id)
        .bind(&session.user.user_name)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_session_db_error)?;

        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT token, user_id, user_name, created_at, expires_at
            FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_session_db_error)?;

        Ok(row.map(|r| Session {
            token: r.token,
            user: SessionUser {
                user_id: r.user_id,
                user_name: r.user_name,
            },
            created_at: r.created_at,
            expires_at: r.expires_at,
        }))
    }

    async fn delete_session(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE token = ?1
            "#,
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_session_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at <= ?1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_session_db_error)?;

        Ok(result.rows_affected())
    }
}

fn map_session_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return DomainError::NotFound("user".to_string());
        }
        if db_err.is_unique_violation() {
            return DomainError::AlreadyExists("session".to_string());
        }
    }
    DomainError::Unexpected(err.to_string())
}
