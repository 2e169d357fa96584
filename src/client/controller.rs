use chrono::NaiveDate;
use uuid::Uuid;

use super::{ApiClient, ClientError, FileSessionStore, Session, SessionStore};
use crate::auth::AuthRequest;
use crate::config::ClientConfig;
use crate::models::{Task, TaskInput};

/// Display order for a task list: ascending by date.
///
/// The sort is stable. Undated tasks come after every dated one and keep
/// their relative order from `tasks`.
pub fn display_order(tasks: &[Task]) -> Vec<&Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    ordered.sort_by_key(|task| (task.date.is_none(), task.date));
    ordered
}

/// Owns the signed-in user's task list.
///
/// The list is only ever replaced wholesale by [`refresh`](Self::refresh);
/// mutations go to the server and are followed by a full re-fetch.
pub struct TaskListController<S: SessionStore> {
    api: ApiClient,
    sessions: S,
    session: Option<Session>,
    tasks: Vec<Task>,
}

impl<S: SessionStore> TaskListController<S> {
    pub fn new(api: ApiClient, sessions: S) -> Self {
        Self {
            api,
            sessions,
            session: None,
            tasks: Vec::new(),
        }
    }

    /// Restores any persisted session and, if there is one, fetches its tasks.
    pub async fn start(&mut self) -> Result<(), ClientError> {
        let session = self.sessions.load().await?;
        self.activate(session);
        if self.session.is_some() {
            self.refresh().await;
        }
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Tasks as last fetched, in server order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks as last fetched, in [`display_order`].
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        display_order(&self.tasks)
    }

    /// Re-fetches the full list for the session's email.
    ///
    /// Never fails: without a session, or on any fetch or decode error, the
    /// list becomes empty and the cause is logged.
    pub async fn refresh(&mut self) {
        let Some(session) = &self.session else {
            self.tasks.clear();
            return;
        };

        self.tasks = match self.api.fetch_todos(&session.email).await {
            Ok(tasks) => tasks,
            Err(err) => {
                log::error!("Error fetching tasks for {}: {}", session.email, err);
                Vec::new()
            }
        };
    }

    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self.api.signup(&credentials(email, password)).await?;
        self.begin(response.into()).await
    }

    pub async fn log_in(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let response = self.api.login(&credentials(email, password)).await?;
        self.begin(response.into()).await
    }

    /// Forgets the persisted session and the in-memory list.
    pub async fn sign_out(&mut self) -> Result<(), ClientError> {
        self.sessions.clear().await?;
        self.activate(None);
        self.tasks.clear();
        Ok(())
    }

    pub async fn create_task(
        &mut self,
        title: &str,
        progress: i32,
        date: Option<NaiveDate>,
    ) -> Result<Task, ClientError> {
        let input = self.input(title, progress, date)?;
        let created = self.api.create_todo(&input).await?;
        self.refresh().await;
        Ok(created)
    }

    pub async fn update_task(
        &mut self,
        id: Uuid,
        title: &str,
        progress: i32,
        date: Option<NaiveDate>,
    ) -> Result<Task, ClientError> {
        let input = self.input(title, progress, date)?;
        let updated = self.api.update_todo(id, &input).await?;
        self.refresh().await;
        Ok(updated)
    }

    pub async fn delete_task(&mut self, id: Uuid) -> Result<(), ClientError> {
        if self.session.is_none() {
            return Err(ClientError::NotSignedIn);
        }
        self.api.delete_todo(id).await?;
        self.refresh().await;
        Ok(())
    }

    async fn begin(&mut self, session: Session) -> Result<(), ClientError> {
        self.sessions.save(&session).await?;
        log::info!("Signed in as {}", session.email);
        self.activate(Some(session));
        self.refresh().await;
        Ok(())
    }

    fn activate(&mut self, session: Option<Session>) {
        self.api
            .set_token(session.as_ref().map(|session| session.token.clone()));
        self.session = session;
    }

    fn input(
        &self,
        title: &str,
        progress: i32,
        date: Option<NaiveDate>,
    ) -> Result<TaskInput, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NotSignedIn)?;
        Ok(TaskInput {
            user_email: session.email.clone(),
            title: title.to_string(),
            progress,
            date,
        })
    }
}

impl TaskListController<FileSessionStore> {
    /// A controller talking to `config.server_url` that keeps its session in
    /// `config.session_file`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(
            ApiClient::new(&config.server_url)?,
            FileSessionStore::new(&config.session_file),
        ))
    }
}

fn credentials(email: &str, password: &str) -> AuthRequest {
    AuthRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}
