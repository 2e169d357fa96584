use crate::{auth::AuthRequest, error::AppError, services::AuthService};
use actix_web::{post, web, HttpResponse, Responder};

/// Register a new user
///
/// Creates the account and returns `{email, token}` with `201 Created`.
/// A second signup for the same email yields `409 Conflict`.
#[post("/signup")]
pub async fn signup(
    auth: web::Data<AuthService>,
    signup_data: web::Json<AuthRequest>,
) -> Result<impl Responder, AppError> {
    let response = auth.signup(&signup_data).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Login user
///
/// Returns `{email, token}`; `404` for an unknown email, `401` for a wrong password.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<AuthRequest>,
) -> Result<impl Responder, AppError> {
    let response = auth.login(&login_data).await?;
    Ok(HttpResponse::Ok().json(response))
}
