use crate::{
    auth::AuthenticatedEmail, error::AppError, models::TaskInput, services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;

/// Lists every todo owned by `user_email`.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, in storage order.
/// - `401 Unauthorized`: missing/invalid token, or a token issued for another email.
/// - `500 Internal Server Error`: storage failure.
#[get("/{user_email}")]
pub async fn get_todos(
    tasks: web::Data<TaskService>,
    user_email: web::Path<String>,
    caller: AuthenticatedEmail,
) -> Result<impl Responder, AppError> {
    let user_email = user_email.into_inner();
    caller.ensure_matches(&user_email)?;

    let todos = tasks.list_by_user(&user_email).await?;
    Ok(HttpResponse::Ok().json(todos))
}

/// Creates a todo. The server generates its id.
///
/// ## Request Body:
/// `{user_email, title, progress, date}`; `user_email` must match the token.
///
/// ## Responses:
/// - `201 Created`: the new `Task`.
/// - `401 Unauthorized`: missing/invalid token or mismatched `user_email`.
/// - `422 Unprocessable Entity`: validation failed.
#[post("")]
pub async fn create_todo(
    tasks: web::Data<TaskService>,
    todo: web::Json<TaskInput>,
    caller: AuthenticatedEmail,
) -> Result<impl Responder, AppError> {
    let todo = todo.into_inner();
    caller.ensure_matches(&todo.user_email)?;

    let created = tasks.create(todo).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Replaces every mutable field of the todo `id`.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: no todo has that id.
#[put("/{id}")]
pub async fn update_todo(
    tasks: web::Data<TaskService>,
    id: web::Path<Uuid>,
    todo: web::Json<TaskInput>,
    caller: AuthenticatedEmail,
) -> Result<impl Responder, AppError> {
    let todo = todo.into_inner();
    caller.ensure_matches(&todo.user_email)?;

    let updated = tasks.update(id.into_inner(), todo).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes the todo `id`.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Todo deleted successfully"}`.
/// - `404 Not Found`: no todo has that id.
#[delete("/{id}")]
pub async fn delete_todo(
    tasks: web::Data<TaskService>,
    id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    tasks.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Todo deleted successfully" })))
}
