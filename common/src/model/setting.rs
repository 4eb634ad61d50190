use serde::{Deserialize, Serialize};

/// A key/value pair stored in the `configuration_settings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSetting {
    pub key: String,
    pub value: String,
}
