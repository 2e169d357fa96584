#![doc = "The `ticklist` library crate."]
#![doc = ""]
#![doc = "A personal task list: each user signs up with an email and password and keeps"]
#![doc = "a list of dated todos. The crate holds the server side (stores, services,"]
#![doc = "routes, token auth) and the client side (`client`), which owns a signed-in"]
#![doc = "user's list and keeps it in sync by re-fetching after every change."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use crate::error::AppError;
pub use crate::services::Services;
