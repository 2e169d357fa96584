//! Client side: a typed HTTP client, session persistence, and the controller
//! that owns the signed-in user's task list.

pub mod api;
pub mod controller;
pub mod session;

use std::fmt;

pub use api::ApiClient;
pub use controller::{display_order, TaskListController};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};

/// Errors surfaced by the client.
#[derive(Debug)]
pub enum ClientError {
    /// Transport failure or an undecodable body.
    Http(reqwest::Error),
    /// The server answered with a non-success status.
    Api { status: u16, message: String },
    /// The configured server URL cannot carry a path.
    InvalidUrl(String),
    /// The operation needs a session and none is stored.
    NotSignedIn,
    /// Reading or writing the persisted session failed.
    Session(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Http(err) => write!(f, "HTTP error: {}", err),
            ClientError::Api { status, message } => {
                write!(f, "Server responded {}: {}", status, message)
            }
            ClientError::InvalidUrl(url) => write!(f, "Invalid server URL: {}", url),
            ClientError::NotSignedIn => write!(f, "Not signed in"),
            ClientError::Session(msg) => write!(f, "Session storage error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> ClientError {
        ClientError::Http(error)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> ClientError {
        ClientError::Session(error.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> ClientError {
        ClientError::Session(error.to_string())
    }
}
