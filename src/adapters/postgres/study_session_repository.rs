//! PostgreSQL implementation of StudySessionRepository.
//!
//! The `study_sessions_no_overlap` exclusion constraint rejects a write
//! that would intersect another session of the same user. Such a
//! rejection surfaces as `ErrorCode::SessionOverlap`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, StudySessionId, Timestamp, UserId};
use crate::domain::study_session::{SessionSpan, StudySession};
use crate::ports::StudySessionRepository;

/// SQLSTATE for `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";
/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL implementation of StudySessionRepository.
#[derive(Clone)]
pub struct PostgresStudySessionRepository {
    pool: PgPool,
}

impl PostgresStudySessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudySessionRepository for PostgresStudySessionRepository {
    async fn query_intersecting(
        &self,
        user_id: &UserId,
        start: &Timestamp,
        end: &Timestamp,
    ) -> Result<Vec<SessionSpan>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, start_at, end_at
            FROM study_sessions
            WHERE user_id = $1
              AND start_at < $3
              AND end_at > $2
            ORDER BY start_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(start.as_datetime())
        .bind(end.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to query intersecting sessions: {}", e)))?;

        rows.into_iter().map(row_to_span).collect()
    }

    async fn find_by_id(&self, id: &StudySessionId) -> Result<Option<StudySession>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, start_at, end_at, duration_minutes, created_at, updated_at
            FROM study_sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch study session: {}", e)))?;

        row.map(row_to_session).transpose()
    }

    async fn save(&self, session: &StudySession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO study_sessions (
                id, user_id, start_at, end_at, duration_minutes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.user_id().as_str())
        .bind(session.start_at().as_datetime())
        .bind(session.end_at().as_datetime())
        .bind(session.duration_minutes())
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, session, "insert"))?;

        Ok(())
    }

    async fn update(&self, session: &StudySession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE study_sessions SET
                start_at = $2,
                end_at = $3,
                duration_minutes = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.start_at().as_datetime())
        .bind(session.end_at().as_datetime())
        .bind(session.duration_minutes())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, session, "update"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(session.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: &StudySessionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM study_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Failed to delete study session: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<StudySession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, start_at, end_at, duration_minutes, created_at, updated_at
            FROM study_sessions
            WHERE user_id = $1
            ORDER BY start_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch study sessions by user: {}", e)))?;

        rows.into_iter().map(row_to_session).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_error(msg: &str) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, msg.to_string())
}

fn not_found(id: &StudySessionId) -> DomainError {
    DomainError::new(
        ErrorCode::StudySessionNotFound,
        format!("Study session not found: {}", id),
    )
    .with_detail("session_id", id.to_string())
}

/// Maps a failed INSERT/UPDATE, recognising constraint violations.
fn write_error(err: sqlx::Error, session: &StudySession, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(mapped) = constraint_violation(db_err.code().as_deref(), session.user_id()) {
            return mapped;
        }
    }
    db_error(&format!("Failed to {} study session: {}", action, err))
}

/// Domain error for a SQLSTATE raised by one of the table's constraints.
fn constraint_violation(code: Option<&str>, user_id: &UserId) -> Option<DomainError> {
    match code {
        Some(EXCLUSION_VIOLATION) => Some(DomainError::new(
            ErrorCode::SessionOverlap,
            "A study session already exists during this time period",
        )),
        Some(FOREIGN_KEY_VIOLATION) => Some(
            DomainError::new(
                ErrorCode::UserNotFound,
                format!("User with ID {} does not exist", user_id),
            )
            .with_detail("user_id", user_id.as_str()),
        ),
        _ => None,
    }
}

fn get<'r, T>(row: &'r sqlx::postgres::PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| db_error(&format!("Failed to get {}: {}", column, e)))
}

fn row_to_span(row: sqlx::postgres::PgRow) -> Result<SessionSpan, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let start_at: chrono::DateTime<chrono::Utc> = get(&row, "start_at")?;
    let end_at: chrono::DateTime<chrono::Utc> = get(&row, "end_at")?;

    Ok(SessionSpan::new(
        StudySessionId::from_uuid(id),
        Timestamp::from_datetime(start_at),
        Timestamp::from_datetime(end_at),
    ))
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<StudySession, DomainError> {
    let id: uuid::Uuid = get(&row, "id")?;
    let user_id: String = get(&row, "user_id")?;
    let start_at: chrono::DateTime<chrono::Utc> = get(&row, "start_at")?;
    let end_at: chrono::DateTime<chrono::Utc> = get(&row, "end_at")?;
    let duration_minutes: i64 = get(&row, "duration_minutes")?;
    let created_at: chrono::DateTime<chrono::Utc> = get(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = get(&row, "updated_at")?;

    let user_id = UserId::new(user_id)
        .map_err(|e| db_error(&format!("Invalid user_id in study_sessions: {}", e)))?;

    Ok(StudySession::reconstitute(
        StudySessionId::from_uuid(id),
        user_id,
        Timestamp::from_datetime(start_at),
        Timestamp::from_datetime(end_at),
        duration_minutes,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
