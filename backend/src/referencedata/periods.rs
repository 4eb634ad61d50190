use chrono::NaiveDate;
use common::model::period::ProcessingPeriodDto;
use uuid::Uuid;

use super::{ReferenceDataService, RequestParameters};
use crate::error::ServiceError;
use crate::security::Caller;

#[derive(Debug, Clone)]
pub struct PeriodReferenceDataService {
    service: ReferenceDataService<ProcessingPeriodDto>,
}

fn schedule_and_date_parameters(
    schedule_id: Uuid,
    start_date: Option<NaiveDate>,
) -> RequestParameters {
    RequestParameters::init()
        .set("processingScheduleId", schedule_id)
        .set_optional("startDate", start_date.map(|date| date.format("%Y-%m-%d")))
}

fn program_and_facility_parameters(program_id: Uuid, facility_id: Uuid) -> RequestParameters {
    RequestParameters::init()
        .set("programId", program_id)
        .set("facilityId", facility_id)
}

impl PeriodReferenceDataService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        PeriodReferenceDataService {
            service: ReferenceDataService::new(http, base_url, "/api/processingPeriods/"),
        }
    }

    /// Periods of a schedule, only those starting after `start_date` when given.
    pub async fn search(
        &self,
        schedule_id: Uuid,
        start_date: Option<NaiveDate>,
        caller: &Caller,
    ) -> Result<Vec<ProcessingPeriodDto>, ServiceError> {
        self.service
            .find_all(
                "searchByScheduleAndDate",
                &schedule_and_date_parameters(schedule_id, start_date),
                &caller.token,
            )
            .await
    }

    pub async fn search_by_program_and_facility(
        &self,
        program_id: Uuid,
        facility_id: Uuid,
        caller: &Caller,
    ) -> Result<Vec<ProcessingPeriodDto>, ServiceError> {
        self.service
            .find_all(
                "search",
                &program_and_facility_parameters(program_id, facility_id),
                &caller.token,
            )
            .await
    }
}
