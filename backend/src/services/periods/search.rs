use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::i18n::keys::ERROR_TEMPLATE_PARAMETER_INVALID;
use crate::i18n::Message;
use crate::security::BearerToken;
use crate::state::RemoteServices;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSearchParams {
    pub processing_schedule_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub program_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
}

pub async fn process(
    params: web::Query<PeriodSearchParams>,
    token: BearerToken,
    remote: web::Data<RemoteServices>,
) -> Result<HttpResponse, ServiceError> {
    let params = params.into_inner();
    let caller = remote.caller(token).await?;

    let periods = match params {
        PeriodSearchParams {
            processing_schedule_id: Some(schedule_id),
            start_date,
            ..
        } => remote.periods.search(schedule_id, start_date, &caller).await?,
        PeriodSearchParams {
            program_id: Some(program_id),
            facility_id: Some(facility_id),
            ..
        } => {
            remote
                .periods
                .search_by_program_and_facility(program_id, facility_id, &caller)
                .await?
        }
        PeriodSearchParams {
            program_id: Some(_),
            ..
        } => return Err(missing("facilityId")),
        _ => return Err(missing("processingScheduleId")),
    };
    Ok(HttpResponse::Ok().json(periods))
}

fn missing(name: &str) -> ServiceError {
    ServiceError::Validation(Message::with_args(ERROR_TEMPLATE_PARAMETER_INVALID, [name]))
}
