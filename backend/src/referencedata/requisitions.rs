use async_trait::async_trait;
use common::model::requisition::RequisitionDto;
use uuid::Uuid;

use super::ReferenceDataService;
use crate::error::ServiceError;
use crate::security::Caller;

#[async_trait]
pub trait RequisitionLookup: Send + Sync {
    async fn find_one(
        &self,
        id: Uuid,
        caller: &Caller,
    ) -> Result<Option<RequisitionDto>, ServiceError>;
}

/// Access to the requisition service, which owns requisitions and their history.
#[derive(Debug, Clone)]
pub struct RequisitionService {
    service: ReferenceDataService<RequisitionDto>,
}

impl RequisitionService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        RequisitionService {
            service: ReferenceDataService::new(http, base_url, "/api/requisitions/"),
        }
    }
}

#[async_trait]
impl RequisitionLookup for RequisitionService {
    async fn find_one(
        &self,
        id: Uuid,
        caller: &Caller,
    ) -> Result<Option<RequisitionDto>, ServiceError> {
        self.service.find_one(id, &caller.token).await
    }
}
