use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use chrono::Duration;
use env_logger::Env;
use sqlx::postgres::PgPoolOptions;

use ticklist::auth::TokenSigner;
use ticklist::config::Config;
use ticklist::routes;
use ticklist::services::Services;
use ticklist::store::{PgCredentialStore, PgTaskStore};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("Failed to connect to database: {}", e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| {
            log::error!("Failed to run migrations: {}", e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;

    let signer = Arc::new(TokenSigner::new(
        &config.jwt_secret,
        Duration::minutes(config.token_ttl_minutes),
    ));
    let services = Services::new(
        Arc::new(PgCredentialStore::new(pool.clone())),
        Arc::new(PgTaskStore::new(pool)),
        signer,
        config.bcrypt_cost,
    );

    log::info!("Starting ticklist server at {}", config.server_url());
    HttpServer::new(move || {
        let services = services.clone();
        App::new()
            .wrap(routes::cors())
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, &services))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
