pub mod auth;
pub mod health;
pub mod todos;

use actix_cors::Cors;
use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::services::Services;

/// Registers every route, the shared services, and request error handling.
///
/// `/todos` is wrapped in [`AuthMiddleware`]; signup, login and the health
/// endpoints are public. Malformed JSON is a 400, an unparseable todo id a 404.
pub fn config(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(services.auth.clone())
        .app_data(services.tasks.clone())
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            AppError::BadRequest(err.to_string()).into()
        }))
        .service(health::index)
        .service(health::health)
        .service(auth::signup)
        .service(auth::login)
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware::new(services.signer()))
                // An id that is not a UUID names no todo.
                .app_data(web::PathConfig::default().error_handler(|err, req| {
                    log::debug!("Unparseable todo id in {}: {}", req.path(), err);
                    AppError::NotFound("Todo not found".into()).into()
                }))
                .service(todos::get_todos)
                .service(todos::create_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}

/// The CORS policy served to browser clients: any origin, method and header.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
