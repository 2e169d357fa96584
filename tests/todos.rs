mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use ticklist::auth::AuthResponse;
use ticklist::models::Task;
use ticklist::routes;
use uuid::Uuid;

async fn sign_up(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    email: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/signup")
        .set_json(json!({ "email": email, "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "Failed to sign up {}", email);
    let auth: AuthResponse = test::read_body_json(resp).await;
    auth.token
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

#[actix_rt::test]
async fn test_todo_crud_flow() {
    let services = common::services();
    let app = test::init_service(
        App::new().configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let email = "crud_user@example.com";
    let token = sign_up(&app, email).await;

    // 1. Create
    let req = test::TestRequest::post()
        .uri("/todos")
        .append_header(bearer(&token))
        .set_json(json!({
            "user_email": email,
            "title": "Book ferry tickets",
            "progress": 0,
            "date": "2024-03-02"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.title, "Book ferry tickets");
    assert_eq!(created.user_email, email);
    assert_eq!(created.date.map(|d| d.to_string()).as_deref(), Some("2024-03-02"));

    // 2. List
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", email))
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Vec<Task> = test::read_body_json(resp).await;
    assert_eq!(listed, vec![created.clone()]);

    // 3. Update replaces every field
    let req = test::TestRequest::put()
        .uri(&format!("/todos/{}", created.id))
        .append_header(bearer(&token))
        .set_json(json!({
            "user_email": email,
            "title": "Ferry tickets booked",
            "progress": 100,
            "date": null
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Ferry tickets booked");
    assert_eq!(updated.progress, 100);
    assert!(updated.date.is_none());

    // 4. Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/todos/{}", created.id))
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Todo deleted successfully" }));

    // 5. Deleting again is a 404
    let req = test::TestRequest::delete()
        .uri(&format!("/todos/{}", created.id))
        .append_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Todo not found" }));

    // 6. And the list is empty
    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", email))
        .append_header(bearer(&token))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}

#[actix_rt::test]
async fn test_update_unknown_todo_creates_nothing() {
    let services = common::services();
    let app = test::init_service(
        App::new().configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let email = "ghost_hunter@example.com";
    let token = sign_up(&app, email).await;

    let req = test::TestRequest::put()
        .uri(&format!("/todos/{}", Uuid::new_v4()))
        .append_header(bearer(&token))
        .set_json(json!({ "user_email": email, "title": "Ghost", "progress": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", email))
        .append_header(bearer(&token))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}

#[actix_rt::test]
async fn test_list_reflects_creates_and_deletes() {
    let services = common::services();
    let app = test::init_service(
        App::new().configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let email = "counter@example.com";
    let token = sign_up(&app, email).await;

    let mut ids = Vec::new();
    for n in 0..6 {
        let req = test::TestRequest::post()
            .uri("/todos")
            .append_header(bearer(&token))
            .set_json(json!({ "user_email": email, "title": format!("todo {}", n), "progress": n * 10 }))
            .to_request();
        let created: Task = test::call_and_read_body_json(&app, req).await;
        assert!(!ids.contains(&created.id));
        ids.push(created.id);
    }

    for id in [ids[1], ids[4]] {
        let req = test::TestRequest::delete()
            .uri(&format!("/todos/{}", id))
            .append_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", email))
        .append_header(bearer(&token))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    let listed_ids: Vec<Uuid> = listed.iter().map(|task| task.id).collect();
    assert_eq!(listed_ids, vec![ids[0], ids[2], ids[3], ids[5]]);
    assert_eq!(listed[1].title, "todo 2");
    assert_eq!(listed[1].progress, 20);
}

#[actix_rt::test]
async fn test_token_must_match_requested_email() {
    let services = common::services();
    let app = test::init_service(
        App::new().configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let _owner_token = sign_up(&app, "owner@example.com").await;
    let other_token = sign_up(&app, "other@example.com").await;

    // Listing someone else's todos
    let req = test::TestRequest::get()
        .uri("/todos/owner@example.com")
        .append_header(bearer(&other_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Creating a todo on someone else's behalf
    let req = test::TestRequest::post()
        .uri("/todos")
        .append_header(bearer(&other_token))
        .set_json(json!({ "user_email": "owner@example.com", "title": "Sneaky", "progress": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_invalid_todo_payloads() {
    let services = common::services();
    let app = test::init_service(
        App::new().configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let email = "validator@example.com";
    let token = sign_up(&app, email).await;

    let test_cases = vec![
        (
            json!({ "user_email": email, "progress": 0 }),
            StatusCode::BAD_REQUEST,
            "missing title",
        ),
        (
            json!({ "user_email": email, "title": "x", "progress": 0, "date": "next tuesday" }),
            StatusCode::BAD_REQUEST,
            "unparseable date",
        ),
        (
            json!({ "user_email": email, "title": "", "progress": 0 }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty title",
        ),
        (
            json!({ "user_email": email, "title": "x", "progress": 101 }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "progress above 100",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/todos")
            .append_header(bearer(&token))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected_status, "{}", description);
    }
}

#[actix_rt::test]
async fn test_unparseable_todo_id_is_not_found() {
    let services = common::services();
    let app = test::init_service(
        App::new().configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let email = "opaque_ids@example.com";
    let token = sign_up(&app, email).await;

    let requests = vec![
        (
            test::TestRequest::put()
                .uri("/todos/not-a-uuid")
                .append_header(bearer(&token))
                .set_json(json!({ "user_email": email, "title": "Ghost", "progress": 5 })),
            "update",
        ),
        (
            test::TestRequest::delete()
                .uri("/todos/not-a-uuid")
                .append_header(bearer(&token)),
            "delete",
        ),
    ];

    for (req, description) in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", description);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Todo not found" }), "{}", description);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/todos/{}", email))
        .append_header(bearer(&token))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}

#[actix_rt::test]
async fn test_rejected_token_keeps_cors_headers() {
    let services = common::services();
    let app = test::init_service(
        App::new()
            .wrap(routes::cors())
            .configure(|cfg| routes::config(cfg, &services)),
    )
    .await;

    let requests = vec![
        (
            test::TestRequest::get().uri("/todos/someone@example.com"),
            "Missing token",
            "missing token",
        ),
        (
            test::TestRequest::delete()
                .uri(&format!("/todos/{}", Uuid::new_v4()))
                .append_header(bearer("garbage")),
            "Invalid token",
            "garbage token",
        ),
    ];

    for (req, expected_message, description) in requests {
        let req = req
            .insert_header((header::ORIGIN, "http://localhost:3000"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", description);
        assert!(
            resp.headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "{}: no CORS header on the rejection",
            description
        );
        let body: serde_json::Value = test::read_body_json(resp).await;
        let message = body["error"].as_str().unwrap_or_default();
        assert!(
            message.starts_with(expected_message),
            "{}: unexpected body {:?}",
            description,
            body
        );
    }
}
