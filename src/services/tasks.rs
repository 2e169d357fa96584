use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskInput};
use crate::store::{StoreError, TaskStore};

/// CRUD over a [`TaskStore`], scoped by owner email.
///
/// `update` and `delete` address a todo by id alone; the stored owner is not
/// compared with anything.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list_by_user(&self, email: &str) -> Result<Vec<Task>, AppError> {
        Ok(self.store.list_by_owner(email).await?)
    }

    pub async fn create(&self, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;

        let task = self.store.insert(&Task::new(input)).await?;
        log::info!("Created todo {} for {}", task.id, task.user_email);
        Ok(task)
    }

    pub async fn update(&self, id: Uuid, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;

        let task = self.store.update(id, &input).await.map_err(not_found)?;
        log::info!("Updated todo {}", task.id);
        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.store.delete(id).await.map_err(not_found)?;
        log::info!("Deleted todo {}", id);
        Ok(())
    }
}

fn not_found(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(_) => AppError::NotFound("Todo not found".into()),
        other => other.into(),
    }
}
