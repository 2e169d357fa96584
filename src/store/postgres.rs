//! PostgreSQL stores over a caller-supplied `PgPool`.
//!
//! Each operation is one statement; the pool hands out a connection for the
//! statement and takes it back when the query future completes.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{todo_not_found, CredentialStore, StoreError, StoreResult, TaskStore};
use crate::models::{Task, TaskInput, User};

// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_error)
                if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                StoreError::Conflict(db_error.message().to_string())
            }
            _ => {
                log::error!("Database error: {}", error);
                StoreError::Backend(error.to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_by_owner(&self, owner_email: &str) -> StoreResult<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, user_email, title, progress, date FROM todos WHERE user_email = $1",
        )
        .bind(owner_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn insert(&self, task: &Task) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO todos (id, user_email, title, progress, date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, user_email, title, progress, date",
        )
        .bind(task.id)
        .bind(&task.user_email)
        .bind(&task.title)
        .bind(task.progress)
        .bind(task.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: Uuid, changes: &TaskInput) -> StoreResult<Task> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE todos
             SET user_email = $1, title = $2, progress = $3, date = $4
             WHERE id = $5
             RETURNING id, user_email, title, progress, date",
        )
        .bind(&changes.user_email)
        .bind(&changes.title)
        .bind(changes.progress)
        .bind(changes.date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        task.ok_or_else(|| todo_not_found(id))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(todo_not_found(id));
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        sqlx::query("INSERT INTO users (email, hashed_password) VALUES ($1, $2)")
            .bind(&user.email)
            .bind(&user.hashed_password)
            .execute(&self.pool)
            .await
            .map_err(|error| match StoreError::from(error) {
                StoreError::Conflict(_) => {
                    StoreError::Conflict(format!("User {} already exists", user.email))
                }
                other => other,
            })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
