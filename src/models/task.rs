use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or updating a todo.
///
/// An update replaces every field, so both operations take the same payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Email of the user the todo belongs to.
    #[validate(email)]
    pub user_email: String,

    /// The title of the todo.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Completion indicator, in percent.
    #[validate(range(min = 0, max = 100))]
    pub progress: i32,

    /// Calendar date used to order the list. Optional.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A todo as stored in the `todos` table and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier (UUID v4), generated by the server and never changed.
    pub id: Uuid,
    /// Owner's email. Not enforced as a foreign key.
    pub user_email: String,
    pub title: String,
    pub progress: i32,
    pub date: Option<NaiveDate>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` with a freshly generated id.
    pub fn new(input: TaskInput) -> Self {
        Self::with_id(Uuid::new_v4(), input)
    }

    /// Builds the task that results from applying `input` to the todo `id`.
    pub fn with_id(id: Uuid, input: TaskInput) -> Self {
        Self {
            id,
            user_email: input.user_email,
            title: input.title,
            progress: input.progress,
            date: input.date,
        }
    }
}
