use chrono::{DateTime, Utc};
use common::model::template::ReportTemplate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

/// A template row including its definition payload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTemplate {
    pub meta: ReportTemplate,
    pub data: Vec<u8>,
}

const META_COLUMNS: &str = "id, name, description, checksum, created_by, created_date";

fn meta_from_row(row: &Row<'_>) -> rusqlite::Result<ReportTemplate> {
    Ok(ReportTemplate {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        checksum: row.get(3)?,
        created_by: row.get(4)?,
        created_date: row.get::<_, DateTime<Utc>>(5)?,
    })
}

/// Inserts the template, or replaces the one stored under the same name.
///
/// A replaced template keeps its original id.
pub fn save(conn: &Connection, template: &StoredTemplate) -> rusqlite::Result<()> {
    let meta = &template.meta;
    conn.execute(
        "INSERT INTO templates (id, name, description, data, checksum, created_by, created_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(name) DO UPDATE SET
             description = excluded.description,
             data = excluded.data,
             checksum = excluded.checksum,
             created_by = excluded.created_by,
             created_date = excluded.created_date",
        params![
            meta.id,
            &meta.name,
            &meta.description,
            &template.data,
            &meta.checksum,
            meta.created_by,
            meta.created_date,
        ],
    )?;
    Ok(())
}

pub fn find_one(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<StoredTemplate>> {
    conn.query_row(
        &format!("SELECT {}, data FROM templates WHERE id = ?1", META_COLUMNS),
        params![id],
        |row| {
            Ok(StoredTemplate {
                meta: meta_from_row(row)?,
                data: row.get(6)?,
            })
        },
    )
    .optional()
}

pub fn find_by_name(conn: &Connection, name: &str) -> rusqlite::Result<Option<StoredTemplate>> {
    conn.query_row(
        &format!("SELECT {}, data FROM templates WHERE name = ?1", META_COLUMNS),
        params![name],
        |row| {
            Ok(StoredTemplate {
                meta: meta_from_row(row)?,
                data: row.get(6)?,
            })
        },
    )
    .optional()
}

/// Metadata of every template, ordered by name. Payloads are not loaded.
pub fn find_all(conn: &Connection) -> rusqlite::Result<Vec<ReportTemplate>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM templates ORDER BY name",
        META_COLUMNS
    ))?;
    let rows = stmt.query_map([], meta_from_row)?;
    rows.collect()
}

/// Returns whether a row was removed.
pub fn delete(conn: &Connection, id: Uuid) -> rusqlite::Result<bool> {
    let removed = conn.execute("DELETE FROM templates WHERE id = ?1", params![id])?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;

    const NAME: &str = "TemplateRepositoryTest";

    fn template(name: &str, data: &[u8]) -> StoredTemplate {
        StoredTemplate {
            meta: ReportTemplate {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: Some("test template".to_string()),
                checksum: format!("{:x}", md5::compute(data)),
                created_by: Some(Uuid::new_v4()),
                created_date: Utc::now(),
            },
            data: data.to_vec(),
        }
    }

    #[test]
    fn finds_template_by_name() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        let stored = template(NAME, b"{}");
        save(&conn, &stored).unwrap();

        let found = find_by_name(&conn, NAME).unwrap().unwrap();
        assert_eq!(found.meta.name, NAME);
        assert_eq!(found.meta.id, stored.meta.id);
        assert_eq!(found.data, b"{}");
    }

    #[test]
    fn saving_same_name_replaces_payload_but_keeps_id() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        let first = template(NAME, b"first");
        save(&conn, &first).unwrap();
        let second = template(NAME, b"second");
        save(&conn, &second).unwrap();

        let all = find_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        let found = find_one(&conn, first.meta.id).unwrap().unwrap();
        assert_eq!(found.data, b"second");
        assert_eq!(found.meta.checksum, second.meta.checksum);
    }

    #[test]
    fn find_all_is_ordered_by_name() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        save(&conn, &template("stock-on-hand", b"a")).unwrap();
        save(&conn, &template("aggregate-consumption", b"b")).unwrap();

        let names: Vec<_> = find_all(&conn)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["aggregate-consumption", "stock-on-hand"]);
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let (_dir, db) = temp_database();
        let conn = db.connect().unwrap();
        let stored = template(NAME, b"x");
        save(&conn, &stored).unwrap();

        assert!(delete(&conn, stored.meta.id).unwrap());
        assert!(!delete(&conn, stored.meta.id).unwrap());
        assert!(find_one(&conn, stored.meta.id).unwrap().is_none());
    }
}
