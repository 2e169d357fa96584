use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The email asserted by the request's bearer token.
///
/// Only available on routes wrapped by `AuthMiddleware`, which verifies the
/// token and inserts its `Claims` into the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedEmail(pub String);

impl AuthenticatedEmail {
    /// Fails with `Unauthorized` unless `email` is the one the token was issued for.
    pub fn ensure_matches(&self, email: &str) -> Result<(), AppError> {
        if self.0 == email {
            Ok(())
        } else {
            Err(AppError::Unauthorized(
                "Token does not belong to the requested user".into(),
            ))
        }
    }
}

impl FromRequest for AuthenticatedEmail {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedEmail(claims.email.clone()))),
            None => {
                let err = AppError::Unauthorized(
                    "No token claims found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
