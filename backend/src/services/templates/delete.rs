use actix_web::{web, HttpResponse};
use log::info;
use uuid::Uuid;

use crate::db::templates;
use crate::db::Database;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_TEMPLATE_NOT_FOUND;
use crate::i18n::Message;
use crate::security::{BearerToken, REPORT_TEMPLATES_EDIT};
use crate::state::RemoteServices;

/// `DELETE /api/reports/templates/{template_id}`: `204` once removed.
pub async fn process(
    template_id: web::Path<Uuid>,
    token: BearerToken,
    db: web::Data<Database>,
    remote: web::Data<RemoteServices>,
) -> Result<HttpResponse, ServiceError> {
    let caller = remote.caller(token).await?;
    remote.permissions.check(&caller, REPORT_TEMPLATES_EDIT).await?;

    let template_id = template_id.into_inner();
    let conn = db.connect()?;
    if !templates::delete(&conn, template_id)? {
        return Err(ServiceError::NotFound(Message::with_args(
            ERROR_TEMPLATE_NOT_FOUND,
            [template_id],
        )));
    }
    info!("template {} deleted by {}", template_id, caller.username);
    Ok(HttpResponse::NoContent().finish())
}
