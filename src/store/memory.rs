//! In-memory stores. Thread-safe, process-local, lost on restart.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::{todo_not_found, CredentialStore, StoreError, StoreResult, TaskStore};
use crate::models::{Task, TaskInput, User};

fn poisoned(err: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(format!("lock poisoned: {}", err))
}

/// Todos kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of todos across all owners.
    pub fn len(&self) -> usize {
        self.tasks.read().map(|tasks| tasks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_by_owner(&self, owner_email: &str) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().map_err(poisoned)?;
        Ok(tasks
            .iter()
            .filter(|task| task.user_email == owner_email)
            .cloned()
            .collect())
    }

    async fn insert(&self, task: &Task) -> StoreResult<Task> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(StoreError::Conflict(format!("Todo {} already exists", task.id)));
        }
        tasks.push(task.clone());
        Ok(task.clone())
    }

    async fn update(&self, id: Uuid, changes: &TaskInput) -> StoreResult<Task> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| todo_not_found(id))?;
        *slot = Task::with_id(id, changes.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut tasks = self.tasks.write().map_err(poisoned)?;
        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| todo_not_found(id))?;
        tasks.remove(index);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "User {} already exists",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|user| user.email == email).cloned())
    }
}
