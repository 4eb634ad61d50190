//! Stored report definition format.
//!
//! A template payload is a JSON document tagged with a format name and a
//! version. The tag is read first, on its own, so that a definition written
//! by a newer release is reported as unsupported instead of as malformed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFINITION_FORMAT: &str = "lmis-report";
pub const DEFINITION_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),

    #[error("{format} version {version}")]
    Unresolvable { format: String, version: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Identifier,
    Integer,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: ParameterType,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub field: String,
    pub label: Option<String>,
}

impl ColumnDefinition {
    pub fn heading(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub format: String,
    pub version: u32,
    pub title: String,
    /// SQL run against the report data source. Parameters bind as `:name`.
    pub query: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    /// Empty means every column of the query result.
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Deserialize)]
struct DefinitionTag {
    format: String,
    version: u32,
}

impl ReportDefinition {
    pub fn decode(bytes: &[u8]) -> Result<Self, DefinitionError> {
        let tag: DefinitionTag = serde_json::from_slice(bytes)?;
        if tag.format != DEFINITION_FORMAT || tag.version == 0 || tag.version > DEFINITION_VERSION {
            return Err(DefinitionError::Unresolvable {
                format: tag.format,
                version: tag.version,
            });
        }

        let definition: ReportDefinition = serde_json::from_slice(bytes)?;
        definition.validate()?;
        Ok(definition)
    }

    pub fn load(path: &Path) -> Result<Self, DefinitionError> {
        ReportDefinition::decode(&fs::read(path)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>, DefinitionError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    fn validate(&self) -> Result<(), DefinitionError> {
        if self.query.trim().is_empty() {
            return Err(DefinitionError::Invalid("query must not be empty".to_string()));
        }
        for (i, parameter) in self.parameters.iter().enumerate() {
            if parameter.name.is_empty()
                || !parameter.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return Err(DefinitionError::Invalid(format!(
                    "parameter name '{}' must be alphanumeric",
                    parameter.name
                )));
            }
            if self.parameters[..i].iter().any(|p| p.name == parameter.name) {
                return Err(DefinitionError::Invalid(format!(
                    "parameter '{}' is declared twice",
                    parameter.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    pub const STOCK_DEFINITION: &str = r#"{
        "format": "lmis-report",
        "version": 1,
        "title": "Stock on hand",
        "query": "SELECT code, name, soh FROM stock WHERE (:facilityId IS NULL OR facility_id = :facilityId) ORDER BY code",
        "parameters": [
            { "name": "facilityId", "type": "identifier", "required": false },
            { "name": "minimum", "type": "integer" }
        ],
        "columns": [
            { "field": "code", "label": "Code" },
            { "field": "soh", "label": "Stock on hand" }
        ]
    }"#;
}
