//! Storage ports for todos and credentials.
//!
//! Services depend on these traits only. `postgres` backs them with an
//! explicitly passed `PgPool`; `memory` keeps everything in process and is what
//! the test suites run against.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::models::{Task, TaskInput, User};

pub use memory::{InMemoryCredentialStore, InMemoryTaskStore};
pub use postgres::{PgCredentialStore, PgTaskStore};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by store implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record matched.
    NotFound(String),
    /// A record with the same key already exists.
    Conflict(String),
    /// The backend failed (connection, query, lock poisoning).
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "not found: {}", msg),
            StoreError::Conflict(msg) => write!(f, "conflict: {}", msg),
            StoreError::Backend(msg) => write!(f, "storage failure: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Todo persistence contract. Each method is a single statement against the backend.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every todo owned by `owner_email`, in storage order.
    async fn list_by_owner(&self, owner_email: &str) -> StoreResult<Vec<Task>>;

    /// Stores a new todo and returns it as persisted.
    async fn insert(&self, task: &Task) -> StoreResult<Task>;

    /// Replaces every mutable field of the todo `id`.
    ///
    /// Returns [`StoreError::NotFound`] when no todo has that id; nothing is created.
    async fn update(&self, id: Uuid, changes: &TaskInput) -> StoreResult<Task>;

    /// Removes the todo `id`.
    ///
    /// Returns [`StoreError::NotFound`] when no todo has that id.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

/// Credential persistence contract.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stores a new user.
    ///
    /// Returns [`StoreError::Conflict`] when the email is already registered.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Looks a user up by email. `None` when nobody registered it.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

pub(crate) fn todo_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound(format!("Todo {} not found", id))
}
