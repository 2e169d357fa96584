use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ClientError;
use crate::auth::AuthResponse;

/// What the client remembers between runs: who is signed in, and their token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub token: String,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Self {
            email: response.email,
            token: response.token,
        }
    }
}

/// Client-side persistence for the current [`Session`].
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `Ok(None)` when no session has been saved.
    async fn load(&self) -> Result<Option<Session>, ClientError>;
    async fn save(&self, session: &Session) -> Result<(), ClientError>;
    async fn clear(&self) -> Result<(), ClientError>;
}

/// Stores the session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        let bytes = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Keeps the session in process only.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        let guard = self
            .session
            .lock()
            .map_err(|err| ClientError::Session(err.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|err| ClientError::Session(err.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .session
            .lock()
            .map_err(|err| ClientError::Session(err.to_string()))?;
        *guard = None;
        Ok(())
    }
}
