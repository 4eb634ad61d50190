use async_trait::async_trait;
use common::model::user::{ResultDto, UserDto};
use uuid::Uuid;

use super::{ReferenceDataService, RequestParameters};
use crate::error::ServiceError;
use crate::security::Caller;

/// User lookups the report builders and the authentication helper depend on.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_one(&self, id: Uuid, caller: &Caller) -> Result<Option<UserDto>, ServiceError>;

    async fn find_user(
        &self,
        username: &str,
        caller: &Caller,
    ) -> Result<Option<UserDto>, ServiceError>;

    async fn has_right(
        &self,
        user_id: Uuid,
        right_id: Uuid,
        caller: &Caller,
    ) -> Result<bool, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct UserReferenceDataService {
    service: ReferenceDataService<UserDto>,
}

impl UserReferenceDataService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        UserReferenceDataService {
            service: ReferenceDataService::new(http, base_url, "/api/users/"),
        }
    }
}

fn username_parameters(username: &str) -> RequestParameters {
    RequestParameters::init().set("username", username)
}

fn has_right_parameters(right_id: Uuid) -> RequestParameters {
    RequestParameters::init().set("rightId", right_id)
}

#[async_trait]
impl UserLookup for UserReferenceDataService {
    async fn find_one(&self, id: Uuid, caller: &Caller) -> Result<Option<UserDto>, ServiceError> {
        self.service.find_one(id, &caller.token).await
    }

    async fn find_user(
        &self,
        username: &str,
        caller: &Caller,
    ) -> Result<Option<UserDto>, ServiceError> {
        let users = self
            .service
            .find_all("search", &username_parameters(username), &caller.token)
            .await?;
        Ok(users.into_iter().next())
    }

    async fn has_right(
        &self,
        user_id: Uuid,
        right_id: Uuid,
        caller: &Caller,
    ) -> Result<bool, ServiceError> {
        let result = self
            .service
            .get::<ResultDto<bool>>(
                &format!("{}/hasRight", user_id),
                &has_right_parameters(right_id),
                &caller.token,
            )
            .await?;
        Ok(result.map(|r| r.result).unwrap_or(false))
    }
}
