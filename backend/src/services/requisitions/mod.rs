//! # Requisition Report Module
//!
//! Requisition summaries under `/api/reports/requisitions`. The requisition is fetched
//! from the requisition service with the caller's token, its status history is mapped
//! onto a [`view::RequisitionReportView`] and the view is returned as JSON or printed.

pub mod builder;
mod get;
mod print;
pub mod view;

use actix_web::web::{get, scope};
use actix_web::Scope;
use common::model::requisition::RequisitionDto;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::i18n::keys::ERROR_REQUISITION_NOT_FOUND;
use crate::i18n::Message;
use crate::security::Caller;
use crate::state::RemoteServices;

const API_PATH: &str = "/api/reports/requisitions";

/// # Registered Routes:
///
/// *   **`GET /{requisition_id}`**: `get::process`, the report view as JSON.
/// *   **`GET /{requisition_id}/print`**: `print::process`, the report view as an inline PDF.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{requisition_id}", get().to(get::process))
        .route("/{requisition_id}/print", get().to(print::process))
}

async fn find_requisition(
    remote: &RemoteServices,
    requisition_id: Uuid,
    caller: &Caller,
) -> Result<RequisitionDto, ServiceError> {
    remote
        .requisitions
        .find_one(requisition_id, caller)
        .await?
        .ok_or_else(|| {
            ServiceError::NotFound(Message::with_args(
                ERROR_REQUISITION_NOT_FOUND,
                [requisition_id],
            ))
        })
}
