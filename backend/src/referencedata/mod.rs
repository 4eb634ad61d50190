//! # Reference-data accessors
//!
//! Thin typed wrappers over GET calls to the sibling services. Each call is a
//! single request carrying the caller's bearer token: no retries, no paging,
//! no caching.
//!
//! [`ReferenceDataService`] holds the generic plumbing for one resource URL;
//! the submodules add the typed queries each service supports.

pub mod auth;
pub mod periods;
pub mod requisitions;
pub mod rights;
pub mod users;

use std::marker::PhantomData;

use log::debug;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::i18n::keys::ERROR_REFERENCEDATA_REQUEST;
use crate::i18n::Message;

/// Query parameters of an outbound request, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters {
    params: Vec<(String, String)>,
}

impl RequestParameters {
    pub fn init() -> Self {
        RequestParameters::default()
    }

    pub fn set(mut self, name: &str, value: impl ToString) -> Self {
        self.params.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds the parameter only when a value is present.
    pub fn set_optional<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.params
    }
}

/// GET access to one resource of a reference-data style service.
#[derive(Debug, Clone)]
pub struct ReferenceDataService<T> {
    http: reqwest::Client,
    base_url: String,
    resource_url: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ReferenceDataService<T> {
    pub fn new(http: reqwest::Client, base_url: &str, resource_url: &'static str) -> Self {
        ReferenceDataService {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            resource_url,
            _marker: PhantomData,
        }
    }

    pub fn url(&self, resource: &str) -> String {
        format!("{}{}{}", self.base_url, self.resource_url, resource)
    }

    pub(crate) fn request(
        &self,
        resource: &str,
        parameters: &RequestParameters,
        token: &str,
    ) -> RequestBuilder {
        self.http
            .get(self.url(resource))
            .query(parameters.as_slice())
            .bearer_auth(token)
    }

    /// `None` when the service answers 404.
    pub async fn find_one(&self, id: Uuid, token: &str) -> Result<Option<T>, ServiceError> {
        self.find_one_by(&id.to_string(), &RequestParameters::init(), token)
            .await
    }

    pub async fn find_one_by(
        &self,
        resource: &str,
        parameters: &RequestParameters,
        token: &str,
    ) -> Result<Option<T>, ServiceError> {
        self.get(resource, parameters, token).await
    }

    /// A 404 is treated as an empty result.
    pub async fn find_all(
        &self,
        resource: &str,
        parameters: &RequestParameters,
        token: &str,
    ) -> Result<Vec<T>, ServiceError> {
        Ok(self
            .get::<Vec<T>>(resource, parameters, token)
            .await?
            .unwrap_or_default())
    }

    /// For endpoints whose body is not a `T`, such as `hasRight`.
    pub async fn get<R: DeserializeOwned>(
        &self,
        resource: &str,
        parameters: &RequestParameters,
        token: &str,
    ) -> Result<Option<R>, ServiceError> {
        self.get_or_absent(resource, parameters, token, &[StatusCode::NOT_FOUND])
            .await
    }

    /// `None` for any of the `absent` statuses; other failures are remote errors.
    pub async fn get_or_absent<R: DeserializeOwned>(
        &self,
        resource: &str,
        parameters: &RequestParameters,
        token: &str,
        absent: &[StatusCode],
    ) -> Result<Option<R>, ServiceError> {
        let url = self.url(resource);
        debug!("GET {} {:?}", url, parameters.as_slice());

        let response = self
            .request(resource, parameters, token)
            .send()
            .await
            .map_err(|e| remote_error(&url, e))?;

        match response.status() {
            status if absent.contains(&status) => Ok(None),
            status if !status.is_success() => Err(remote_error(&url, status)),
            _ => response
                .json::<R>()
                .await
                .map(Some)
                .map_err(|e| remote_error(&url, e)),
        }
    }
}

pub(crate) fn remote_error(url: &str, cause: impl ToString) -> ServiceError {
    ServiceError::Remote(Message::with_args(
        ERROR_REFERENCEDATA_REQUEST,
        [url.to_string(), cause.to_string()],
    ))
}
