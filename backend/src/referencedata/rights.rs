use async_trait::async_trait;
use common::model::user::RightDto;

use super::{ReferenceDataService, RequestParameters};
use crate::error::ServiceError;
use crate::security::Caller;

#[async_trait]
pub trait RightLookup: Send + Sync {
    async fn find_right(
        &self,
        name: &str,
        caller: &Caller,
    ) -> Result<Option<RightDto>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct RightReferenceDataService {
    service: ReferenceDataService<RightDto>,
}

impl RightReferenceDataService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        RightReferenceDataService {
            service: ReferenceDataService::new(http, base_url, "/api/rights/"),
        }
    }
}

#[async_trait]
impl RightLookup for RightReferenceDataService {
    async fn find_right(
        &self,
        name: &str,
        caller: &Caller,
    ) -> Result<Option<RightDto>, ServiceError> {
        let rights = self
            .service
            .find_all("search", &RequestParameters::init().set("name", name), &caller.token)
            .await?;
        Ok(rights.into_iter().next())
    }
}
