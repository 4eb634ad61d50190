//! # Template Service Module
//!
//! This module aggregates all API endpoints related to report templates. It acts as a
//! router, directing incoming HTTP requests under the `/api/reports/templates` path to
//! the appropriate handler logic defined in its sub-modules.
//!
//! ## Sub-modules:
//! - `save`: Accepts a multipart upload, validates the definition and stores it.
//! - `get`: Lists stored templates and returns the metadata of a single one.
//! - `delete`: Removes a stored template.
//! - `render`: Renders a stored template in the requested output format.

mod delete;
mod get;
mod render;
mod save;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/reports/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /`**:
///     - **Handler**: `save::process`
///     - **Description**: Multipart upload with a `name`, an optional `description`
///       and a `file` part holding the JSON report definition. Requires the
///       `REPORT_TEMPLATES_EDIT` right. Uploading under an existing name replaces
///       that template.
///
/// *   **`GET /`**:
///     - **Handler**: `get::list`
///     - **Description**: Metadata of every stored template, ordered by name.
///
/// *   **`GET /{template_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Metadata of one template, `404` when unknown.
///
/// *   **`DELETE /{template_id}`**:
///     - **Handler**: `delete::process`
///     - **Description**: Removes the template. Requires `REPORT_TEMPLATES_EDIT`.
///
/// *   **`GET /{template_id}/{format}`**:
///     - **Handler**: `render::process`
///     - **Description**: Renders the template as `pdf`, `html` or `csv`. Query string
///       parameters are passed to the report as its parameters.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(save::process))
        .route("", get().to(get::list))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}", delete().to(delete::process))
        .route("/{template_id}/{format}", get().to(render::process))
}
