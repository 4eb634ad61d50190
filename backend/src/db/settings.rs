use common::model::setting::ConfigurationSetting;
use rusqlite::{params, Connection, OptionalExtension};

pub fn find_by_key(conn: &Connection, key: &str) -> rusqlite::Result<Option<ConfigurationSetting>> {
    conn.query_row(
        "SELECT key, value FROM configuration_settings WHERE key = ?1",
        params![key],
        |row| {
            Ok(ConfigurationSetting {
                key: row.get(0)?,
                value: row.get(1)?,
            })
        },
    )
    .optional()
}

/// Settings are provisioned outside the service; only tests write them.
#[cfg(test)]
pub fn save(conn: &Connection, setting: &ConfigurationSetting) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO configuration_settings (key, value) VALUES (?1, ?2)",
        params![&setting.key, &setting.value],
    )?;
    Ok(())
}
