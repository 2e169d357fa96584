use std::sync::Arc;

use validator::Validate;

use crate::auth::{hash_password, verify_password, AuthRequest, AuthResponse, Claims, TokenSigner};
use crate::error::AppError;
use crate::models::User;
use crate::store::{CredentialStore, StoreError};

/// Signup, login and token verification over a [`CredentialStore`].
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    signer: Arc<TokenSigner>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        signer: Arc<TokenSigner>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            credentials,
            signer,
            bcrypt_cost,
        }
    }

    pub fn signer(&self) -> Arc<TokenSigner> {
        self.signer.clone()
    }

    /// Registers `request.email` and returns a fresh token for it.
    ///
    /// Fails with `Conflict` when the email is already registered.
    pub async fn signup(&self, request: &AuthRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let hashed_password = hash_password(&request.password, self.bcrypt_cost)?;
        self.credentials
            .insert(&User::new(request.email.as_str(), hashed_password))
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => AppError::Conflict("User already exists".into()),
                other => other.into(),
            })?;

        log::info!("Registered user {}", request.email);
        self.respond(&request.email)
    }

    /// Checks `request.password` against the stored hash and returns a fresh token.
    ///
    /// Fails with `NotFound` for an unknown email and `Unauthorized` for a wrong password.
    pub async fn login(&self, request: &AuthRequest) -> Result<AuthResponse, AppError> {
        request.validate()?;

        let user = self
            .credentials
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User does not exist!".into()))?;

        if !verify_password(&request.password, &user.hashed_password)? {
            log::info!("Failed login for {}", request.email);
            return Err(AppError::Unauthorized("Login failed".into()));
        }

        log::info!("User {} logged in", user.email);
        self.respond(&user.email)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.signer.verify(token)
    }

    fn respond(&self, email: &str) -> Result<AuthResponse, AppError> {
        Ok(AuthResponse {
            email: email.to_string(),
            token: self.signer.issue(email)?,
        })
    }
}
