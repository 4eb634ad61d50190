use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record as served by the reference-data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<Uuid>,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl UserDto {
    /// "First Last", falling back to the username when no name is recorded.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RightType {
    GeneralAdmin,
    SupervisionPrograms,
    OrderFulfillment,
    Reports,
    /// Any type this service does not distinguish.
    #[serde(other)]
    Other,
}

/// A named permission record as served by the reference-data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub right_type: Option<RightType>,
}

/// Envelope used by boolean reference-data endpoints such as `hasRight`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResultDto<T> {
    pub result: T,
}
