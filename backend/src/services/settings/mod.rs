//! # Settings Service Module
//!
//! Read access to the service's configuration settings under `/settings`.
//! The endpoint is unauthenticated.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/settings";

/// # Registered Routes:
///
/// *   **`GET /{key}`**: `get::process`, returns the setting stored under `key`
///     as `{ "key": ..., "value": ... }`, or `404` with `settings.error.notFound`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{key}", get().to(get::process))
}
