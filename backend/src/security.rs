//! # Caller identity and permissions
//!
//! There is no process-wide "current user". A handler extracts the
//! [`BearerToken`] from the request, resolves it into a [`Caller`] through the
//! auth service, and passes that `Caller` to everything that needs to know who
//! is asking or has to forward the token to a sibling service.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use common::model::user::{RightDto, UserDto};
use log::debug;

use crate::error::ServiceError;
use crate::i18n::keys::{
    ERROR_PERMISSION, ERROR_RIGHT_NOT_FOUND, ERROR_TOKEN_INVALID, ERROR_TOKEN_MISSING,
    ERROR_USER_NOT_FOUND,
};
use crate::i18n::Message;
use crate::referencedata::auth::TokenVerifier;
use crate::referencedata::rights::RightLookup;
use crate::referencedata::users::UserLookup;

/// Right required to upload or delete report templates.
pub const REPORT_TEMPLATES_EDIT: &str = "REPORT_TEMPLATES_EDIT";

/// Raw token taken from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| BearerToken(token.to_string()))
            .ok_or_else(|| ServiceError::Authentication(Message::new(ERROR_TOKEN_MISSING)));
        ready(token)
    }
}

/// The authenticated party a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub username: String,
    pub token: String,
}

pub async fn resolve_caller(
    verifier: &dyn TokenVerifier,
    token: BearerToken,
) -> Result<Caller, ServiceError> {
    match verifier.check_token(&token.0).await? {
        Some(info) => {
            debug!("request made by {}", info.user_name);
            Ok(Caller {
                username: info.user_name,
                token: token.0,
            })
        }
        None => Err(ServiceError::Authentication(Message::new(ERROR_TOKEN_INVALID))),
    }
}

#[derive(Clone)]
pub struct AuthenticationHelper {
    users: Arc<dyn UserLookup>,
    rights: Arc<dyn RightLookup>,
}

impl AuthenticationHelper {
    pub fn new(users: Arc<dyn UserLookup>, rights: Arc<dyn RightLookup>) -> Self {
        AuthenticationHelper { users, rights }
    }

    /// Full user record of the caller.
    pub async fn current_user(&self, caller: &Caller) -> Result<UserDto, ServiceError> {
        self.users
            .find_user(&caller.username, caller)
            .await?
            .ok_or_else(|| {
                ServiceError::Authentication(Message::with_args(
                    ERROR_USER_NOT_FOUND,
                    [&caller.username],
                ))
            })
    }

    pub async fn right(&self, name: &str, caller: &Caller) -> Result<RightDto, ServiceError> {
        self.rights.find_right(name, caller).await?.ok_or_else(|| {
            ServiceError::Authentication(Message::with_args(ERROR_RIGHT_NOT_FOUND, [name]))
        })
    }
}

#[derive(Clone)]
pub struct PermissionService {
    helper: AuthenticationHelper,
    users: Arc<dyn UserLookup>,
}

impl PermissionService {
    pub fn new(helper: AuthenticationHelper, users: Arc<dyn UserLookup>) -> Self {
        PermissionService { helper, users }
    }

    /// Fails with a permission error unless the caller holds `right_name`.
    /// Returns the caller's user record on success.
    pub async fn check(&self, caller: &Caller, right_name: &str) -> Result<UserDto, ServiceError> {
        let user = self.helper.current_user(caller).await?;
        let right = self.helper.right(right_name, caller).await?;
        let granted = match user.id {
            Some(user_id) => self.users.has_right(user_id, right.id, caller).await?,
            None => false,
        };
        if granted {
            Ok(user)
        } else {
            Err(ServiceError::Permission(Message::with_args(
                ERROR_PERMISSION,
                [caller.username.as_str(), right_name],
            )))
        }
    }
}
