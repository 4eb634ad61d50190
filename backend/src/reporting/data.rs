use std::collections::HashMap;

use log::debug;
use rusqlite::types::{ToSql, ValueRef};

use super::definition::ReportDefinition;
use super::params::{process_parameter, ParamValue};
use crate::db::DataSource;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_DATASOURCE;
use crate::i18n::Message;

/// Query result laid out for rendering: headings and rows of display strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportData {
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn datasource_error(cause: impl ToString) -> ServiceError {
    ServiceError::Reporting(Message::with_args(ERROR_DATASOURCE, [cause.to_string()]))
}

fn display_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Coerces the declared parameters, runs the definition's query and selects
/// the declared columns.
///
/// Parameters are validated before the data source is touched. A declared
/// parameter the query does not reference is validated but not bound.
pub fn fetch(
    data_source: &DataSource,
    definition: &ReportDefinition,
    raw_params: &HashMap<String, String>,
) -> Result<ReportData, ServiceError> {
    let values: Vec<(String, Option<ParamValue>)> = definition
        .parameters
        .iter()
        .map(|p| {
            process_parameter(raw_params, &p.name, p.required, p.parameter_type)
                .map(|value| (format!(":{}", p.name), value))
        })
        .collect::<Result<_, _>>()?;

    debug!("querying {}", data_source.path().display());
    let conn = data_source.connect().map_err(datasource_error)?;
    let mut stmt = conn.prepare(&definition.query).map_err(datasource_error)?;

    let mut bindings: Vec<(&str, &dyn ToSql)> = Vec::new();
    for (name, value) in &values {
        if stmt.parameter_index(name).map_err(datasource_error)?.is_some() {
            bindings.push((name.as_str(), value as &dyn ToSql));
        }
    }

    let column_names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let (headings, indices): (Vec<String>, Vec<usize>) = if definition.columns.is_empty() {
        (column_names.clone(), (0..column_names.len()).collect())
    } else {
        definition
            .columns
            .iter()
            .map(|column| {
                column_names
                    .iter()
                    .position(|name| name == &column.field)
                    .map(|index| (column.heading().to_string(), index))
                    .ok_or_else(|| datasource_error(format!("unknown column '{}'", column.field)))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip()
    };

    let mut rows = stmt.query(bindings.as_slice()).map_err(datasource_error)?;
    let mut data = ReportData {
        headings,
        rows: Vec::new(),
    };
    while let Some(row) = rows.next().map_err(datasource_error)? {
        let mut cells = Vec::with_capacity(indices.len());
        for &index in &indices {
            cells.push(display_value(row.get_ref(index).map_err(datasource_error)?));
        }
        data.rows.push(cells);
    }
    Ok(data)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::DataSource;
    use rusqlite::Connection;
    use tempfile::TempDir;

    pub const FACILITY_A: &str = "e6799d64-d10d-4011-b8c2-0e4d4a3f65ce";
    pub const FACILITY_B: &str = "13037147-1769-4735-90a7-b9b310d128b8";

    pub fn stock_data_source() -> (TempDir, DataSource) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("replication.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(&format!(
            "CREATE TABLE stock (code TEXT, name TEXT, soh INTEGER, facility_id TEXT);
             INSERT INTO stock VALUES ('C200', 'Depo-Estrogen', 8, '{a}');
             INSERT INTO stock VALUES ('C100', 'Acetylsalicylic Acid', 120, '{a}');
             INSERT INTO stock VALUES ('C300', 'Levora', NULL, '{b}');",
            a = FACILITY_A,
            b = FACILITY_B
        ))
        .unwrap();
        (dir, DataSource::new(path))
    }
}
