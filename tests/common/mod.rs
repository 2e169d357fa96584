#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use chrono::Duration;

use ticklist::auth::TokenSigner;
use ticklist::routes;
use ticklist::services::Services;
use ticklist::store::{InMemoryCredentialStore, InMemoryTaskStore};

pub const TEST_SECRET: &str = "integration-test-secret";

// bcrypt's minimum work factor keeps the suites fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn signer() -> Arc<TokenSigner> {
    Arc::new(TokenSigner::new(TEST_SECRET, Duration::hours(1)))
}

/// Services over fresh in-memory stores.
pub fn services() -> Services {
    Services::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemoryTaskStore::new()),
        signer(),
        TEST_BCRYPT_COST,
    )
}

/// Starts a real server on an ephemeral port and returns its base URL.
pub fn spawn_server(services: Services) -> (String, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().expect("listener has an address").port();

    let server = HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, &services))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen on bound port")
    .run();

    let handle = server.handle();
    actix_rt::spawn(server);

    (format!("http://127.0.0.1:{}", port), handle)
}
