use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{ReferenceDataService, RequestParameters};
use crate::error::ServiceError;

/// What the auth service knows about a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenInfo {
    pub user_name: String,
    #[serde(default)]
    pub active: Option<bool>,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// `None` when the token is unknown or expired.
    async fn check_token(&self, token: &str) -> Result<Option<TokenInfo>, ServiceError>;
}

/// Statuses the auth service answers for a token it does not accept.
const REJECTED_TOKEN: [StatusCode; 3] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::NOT_FOUND,
];

#[derive(Debug, Clone)]
pub struct AuthService {
    service: ReferenceDataService<TokenInfo>,
}

impl AuthService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        AuthService {
            service: ReferenceDataService::new(http, base_url, "/api/oauth/"),
        }
    }
}

#[async_trait]
impl TokenVerifier for AuthService {
    async fn check_token(&self, token: &str) -> Result<Option<TokenInfo>, ServiceError> {
        let info = self
            .service
            .get_or_absent::<TokenInfo>(
                "check_token",
                &RequestParameters::init().set("token", token),
                token,
                &REJECTED_TOKEN,
            )
            .await?;
        Ok(info.filter(|i| i.active != Some(false)))
    }
}
