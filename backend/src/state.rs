//! Shared handles injected into handlers as `web::Data`.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::referencedata::auth::{AuthService, TokenVerifier};
use crate::referencedata::periods::PeriodReferenceDataService;
use crate::referencedata::requisitions::{RequisitionLookup, RequisitionService};
use crate::referencedata::rights::{RightLookup, RightReferenceDataService};
use crate::referencedata::users::{UserLookup, UserReferenceDataService};
use crate::security::{resolve_caller, AuthenticationHelper, BearerToken, Caller, PermissionService};

/// Clients of the sibling services plus the helpers built on top of them.
#[derive(Clone)]
pub struct RemoteServices {
    pub tokens: Arc<dyn TokenVerifier>,
    pub users: Arc<dyn UserLookup>,
    pub requisitions: Arc<dyn RequisitionLookup>,
    pub periods: PeriodReferenceDataService,
    pub permissions: PermissionService,
}

impl RemoteServices {
    pub fn new(
        tokens: Arc<dyn TokenVerifier>,
        users: Arc<dyn UserLookup>,
        rights: Arc<dyn RightLookup>,
        requisitions: Arc<dyn RequisitionLookup>,
        periods: PeriodReferenceDataService,
    ) -> Self {
        let helper = AuthenticationHelper::new(users.clone(), rights);
        RemoteServices {
            tokens,
            permissions: PermissionService::new(helper, users.clone()),
            users,
            requisitions,
            periods,
        }
    }

    /// One shared HTTP client for every sibling service.
    pub fn from_config(config: &AppConfig) -> Self {
        let http = reqwest::Client::new();
        RemoteServices::new(
            Arc::new(AuthService::new(http.clone(), &config.auth_url)),
            Arc::new(UserReferenceDataService::new(http.clone(), &config.referencedata_url)),
            Arc::new(RightReferenceDataService::new(http.clone(), &config.referencedata_url)),
            Arc::new(RequisitionService::new(http.clone(), &config.requisition_url)),
            PeriodReferenceDataService::new(http, &config.referencedata_url),
        )
    }

    pub async fn caller(&self, token: BearerToken) -> Result<Caller, ServiceError> {
        resolve_caller(self.tokens.as_ref(), token).await
    }
}
