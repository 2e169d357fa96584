//! Application services and the bundle handed to the HTTP layer.

pub mod auth;
pub mod tasks;

use std::sync::Arc;

use actix_web::web;

use crate::auth::TokenSigner;
use crate::store::{CredentialStore, TaskStore};

pub use auth::AuthService;
pub use tasks::TaskService;

/// Everything the routes need, built once and cloned into each worker.
#[derive(Clone)]
pub struct Services {
    pub auth: web::Data<AuthService>,
    pub tasks: web::Data<TaskService>,
}

impl Services {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tasks: Arc<dyn TaskStore>,
        signer: Arc<TokenSigner>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(credentials, signer, bcrypt_cost)),
            tasks: web::Data::new(TaskService::new(tasks)),
        }
    }

    pub fn signer(&self) -> Arc<TokenSigner> {
        self.auth.signer()
    }
}
