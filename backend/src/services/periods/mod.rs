//! # Period Lookup Module
//!
//! Processing periods for report parameter pickers, proxied from the reference data
//! service under `/api/reports/periods` with the caller's token.

mod search;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/reports/periods";

/// # Registered Routes:
///
/// *   **`GET /`**: `search::process`. Either `processingScheduleId` with an optional
///     `startDate`, or `programId` and `facilityId`, must be given.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(search::process))
}
