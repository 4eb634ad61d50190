use actix_web::{web, HttpResponse};
use uuid::Uuid;

use super::builder::RequisitionReportViewBuilder;
use super::find_requisition;
use crate::error::ServiceError;
use crate::i18n::MessageService;
use crate::security::BearerToken;
use crate::state::RemoteServices;

pub async fn process(
    requisition_id: web::Path<Uuid>,
    token: BearerToken,
    remote: web::Data<RemoteServices>,
    messages: web::Data<MessageService>,
) -> Result<HttpResponse, ServiceError> {
    let caller = remote.caller(token).await?;
    let requisition = find_requisition(&remote, *requisition_id, &caller).await?;
    let view = RequisitionReportViewBuilder::new(remote.users.as_ref(), &messages)
        .build(&requisition, &caller)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}
