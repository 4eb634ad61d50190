use std::collections::HashMap;

use rusqlite::types::{ToSql, ToSqlOutput};
use uuid::Uuid;

use super::definition::ParameterType;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_TEMPLATE_PARAMETER_INVALID;
use crate::i18n::Message;

/// A request parameter coerced to the type its report declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Identifier(Uuid),
    Integer(i32),
    Text(String),
}

impl ToSql for ParamValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            ParamValue::Identifier(id) => Ok(ToSqlOutput::from(id.to_string())),
            ParamValue::Integer(n) => n.to_sql(),
            ParamValue::Text(s) => s.to_sql(),
        }
    }
}

/// Length of the `8-4-4-4-12` form, the only one accepted for identifiers.
const HYPHENATED_LEN: usize = 36;

fn parse_hyphenated(raw: &str) -> Option<Uuid> {
    if raw.len() != HYPHENATED_LEN {
        return None;
    }
    Uuid::parse_str(raw).ok()
}

/// Looks up `key` in the raw request parameters and coerces it.
///
/// Returns `Ok(None)` only when the parameter is optional and absent. A
/// missing required parameter and a value that does not parse fail alike,
/// with a validation error naming the parameter.
pub fn process_parameter(
    params: &HashMap<String, String>,
    key: &str,
    required: bool,
    parameter_type: ParameterType,
) -> Result<Option<ParamValue>, ServiceError> {
    let invalid =
        || ServiceError::Validation(Message::with_args(ERROR_TEMPLATE_PARAMETER_INVALID, [key]));

    let raw = match params.get(key) {
        Some(raw) => raw,
        None if required => return Err(invalid()),
        None => return Ok(None),
    };

    let value = match parameter_type {
        ParameterType::Identifier => {
            ParamValue::Identifier(parse_hyphenated(raw).ok_or_else(invalid)?)
        }
        ParameterType::Integer => ParamValue::Integer(raw.parse().map_err(|_| invalid())?),
        ParameterType::String => ParamValue::Text(raw.clone()),
    };
    Ok(Some(value))
}
