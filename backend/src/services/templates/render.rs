//! # Report Rendering Endpoint
//!
//! Backend logic for `GET /api/reports/templates/{template_id}/{format}`.
//!
//! ## Workflow
//!
//! 1.  **Caller**: the bearer token is resolved so the report footer can name the
//!     requesting user.
//! 2.  **View**: the stored template is turned into a report view bound to the read-only
//!     data source and to the request's base URL.
//! 3.  **Rendering**: the view runs on the blocking pool with the query string as its
//!     parameters. The bytes are served inline as `{name}.{extension}`.

use std::collections::HashMap;

use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use uuid::Uuid;

use super::get::get_template;
use crate::db::Database;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_RENDER;
use crate::i18n::Message;
use crate::reporting::{OutputFormat, ReportsViewService, RequestContext};
use crate::security::BearerToken;
use crate::state::RemoteServices;

pub async fn process(
    path: web::Path<(Uuid, String)>,
    params: web::Query<HashMap<String, String>>,
    req: HttpRequest,
    token: BearerToken,
    db: web::Data<Database>,
    remote: web::Data<RemoteServices>,
    views: web::Data<ReportsViewService>,
) -> Result<HttpResponse, ServiceError> {
    let (template_id, format) = path.into_inner();
    let format: OutputFormat = format.parse()?;
    let caller = remote.caller(token).await?;
    let template = get_template(&db, template_id)?;

    let context = RequestContext::for_request(&req, &caller.username);
    let view = views.get_report_view(&template, context)?;

    let params = params.into_inner();
    let bytes = web::block(move || view.render(format, &params))
        .await
        .map_err(|e| ServiceError::Reporting(Message::with_args(ERROR_RENDER, [e])))??;

    info!(
        "report '{}' rendered as {} for {}",
        template.meta.name,
        format.extension(),
        caller.username
    );
    Ok(HttpResponse::Ok()
        .content_type(format.content_type())
        .insert_header((
            CONTENT_DISPOSITION,
            format!(
                "inline; filename=\"{}.{}\"",
                template.meta.name,
                format.extension()
            ),
        ))
        .body(bytes))
}
