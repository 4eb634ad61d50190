//! # Template Upload
//!
//! Backend logic for `POST /api/reports/templates`.
//!
//! ## Workflow
//!
//! 1.  **Authorization**: the bearer token is resolved into a caller, who must hold
//!     `REPORT_TEMPLATES_EDIT`. Nothing is read from the body before that.
//!
//! 2.  **Multipart parsing**: `name` and `description` are read as text. The `file`
//!     part must carry a filename ending in `.json`; its bytes are collected up to the
//!     configured limit while an md5 digest is computed over them.
//!
//! 3.  **Validation**: the name must match `^[\w\- ]+$` and the payload must decode as a
//!     report definition of a supported format and version.
//!
//! 4.  **Persistence**: the template is stored under its name, replacing any template
//!     with the same name, and its metadata is returned.

use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::template::ReportTemplate;
use futures_util::StreamExt;
use log::info;
use md5::Context;
use regex::Regex;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::templates::{self, StoredTemplate};
use crate::db::Database;
use crate::error::ServiceError;
use crate::i18n::keys::{
    ERROR_DATABASE, ERROR_TEMPLATE_DEFINITION_INVALID, ERROR_TEMPLATE_FILE_EXTENSION,
    ERROR_TEMPLATE_FILE_MISSING, ERROR_TEMPLATE_FILE_TOO_LARGE, ERROR_TEMPLATE_NAME_INVALID,
};
use crate::i18n::Message;
use crate::reporting::definition::ReportDefinition;
use crate::security::{BearerToken, REPORT_TEMPLATES_EDIT};
use crate::state::RemoteServices;

const NAME_PATTERN: &str = r"^[\w\- ]+$";

/// Parts collected from the multipart body.
#[derive(Debug, Default)]
pub struct TemplateUpload {
    pub name: String,
    pub description: Option<String>,
    pub data: Vec<u8>,
    pub checksum: String,
}

pub async fn process(
    payload: Multipart,
    token: BearerToken,
    db: web::Data<Database>,
    remote: web::Data<RemoteServices>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, ServiceError> {
    let caller = remote.caller(token).await?;
    let user = remote.permissions.check(&caller, REPORT_TEMPLATES_EDIT).await?;

    let upload = read_upload(payload, config.max_template_bytes).await?;
    let template = save_template(&db, upload, user.id)?;
    info!(
        "template '{}' ({}) saved by {}",
        template.name, template.id, caller.username
    );
    Ok(HttpResponse::Ok().json(template))
}

fn invalid_definition(cause: impl ToString) -> ServiceError {
    ServiceError::Validation(Message::with_args(
        ERROR_TEMPLATE_DEFINITION_INVALID,
        [cause.to_string()],
    ))
}

async fn read_text(field: &mut Field) -> Result<String, ServiceError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        bytes.extend_from_slice(&chunk.map_err(invalid_definition)?);
    }
    Ok(String::from_utf8_lossy(&bytes).trim().to_string())
}

pub async fn read_upload(
    mut payload: Multipart,
    limit: usize,
) -> Result<TemplateUpload, ServiceError> {
    let mut upload = TemplateUpload::default();
    let mut file_seen = false;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(invalid_definition)?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match part_name.as_deref() {
            Some("name") => upload.name = read_text(&mut field).await?,
            Some("description") => {
                let description = read_text(&mut field).await?;
                upload.description = (!description.is_empty()).then_some(description);
            }
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                if !filename.to_ascii_lowercase().ends_with(".json") {
                    return Err(ServiceError::Validation(Message::with_args(
                        ERROR_TEMPLATE_FILE_EXTENSION,
                        [filename],
                    )));
                }

                let mut md5_hasher = Context::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(invalid_definition)?;
                    if upload.data.len() + chunk.len() > limit {
                        return Err(ServiceError::Validation(Message::with_args(
                            ERROR_TEMPLATE_FILE_TOO_LARGE,
                            [limit],
                        )));
                    }
                    md5_hasher.consume(&chunk);
                    upload.data.extend_from_slice(&chunk);
                }
                upload.checksum = format!("{:x}", md5_hasher.finalize());
                file_seen = true;
            }
            // Unknown parts are drained and ignored.
            _ => {
                read_text(&mut field).await?;
            }
        }
    }

    if !file_seen || upload.data.is_empty() {
        return Err(ServiceError::Validation(Message::new(ERROR_TEMPLATE_FILE_MISSING)));
    }
    Ok(upload)
}

pub fn validate_name(name: &str) -> Result<(), ServiceError> {
    let name_re = Regex::new(NAME_PATTERN).map_err(|e| {
        ServiceError::Validation(Message::with_args(ERROR_TEMPLATE_NAME_INVALID, [e]))
    })?;
    if name_re.is_match(name) {
        Ok(())
    } else {
        Err(ServiceError::Validation(Message::with_args(
            ERROR_TEMPLATE_NAME_INVALID,
            [name],
        )))
    }
}

/// Validates and stores the upload, returning the stored metadata.
pub fn save_template(
    db: &Database,
    upload: TemplateUpload,
    created_by: Option<Uuid>,
) -> Result<ReportTemplate, ServiceError> {
    validate_name(&upload.name)?;
    ReportDefinition::decode(&upload.data).map_err(invalid_definition)?;

    let template = StoredTemplate {
        meta: ReportTemplate {
            id: Uuid::new_v4(),
            name: upload.name,
            description: upload.description,
            checksum: upload.checksum,
            created_by,
            created_date: Utc::now(),
        },
        data: upload.data,
    };

    let conn = db.connect()?;
    templates::save(&conn, &template)?;
    templates::find_by_name(&conn, &template.meta.name)?
        .map(|stored| stored.meta)
        .ok_or_else(|| {
            ServiceError::Reporting(Message::with_args(ERROR_DATABASE, [&template.meta.name]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use crate::reporting::definition::test_support::STOCK_DEFINITION;
    use crate::services::templates::test_support::{config, editor_services};
    use crate::state::test_support::TOKEN;
    use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use actix_web::{http::StatusCode, test as actix_test, App};

    const BOUNDARY: &str = "----lmis-reports-boundary";

    fn multipart_body(name: &str, filename: &str, content: &str) -> String {
        format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{name}\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\nStock on hand\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/json\r\n\r\n{content}\r\n\
             --{b}--\r\n",
            b = BOUNDARY,
            name = name,
            filename = filename,
            content = content
        )
    }

    fn upload(name: &str) -> TemplateUpload {
        TemplateUpload {
            name: name.to_string(),
            description: None,
            data: STOCK_DEFINITION.as_bytes().to_vec(),
            checksum: format!("{:x}", md5::compute(STOCK_DEFINITION)),
        }
    }

    #[test]
    fn names_are_validated() {
        assert!(validate_name("Stock on hand - 2017_Q1").is_ok());
        let err = validate_name("stock/../../etc").unwrap_err();
        assert_eq!(
            err.message(),
            Message::with_args(ERROR_TEMPLATE_NAME_INVALID, ["stock/../../etc"])
        );
        assert!(validate_name("").is_err());
    }

    #[test]
    fn reupload_replaces_template_under_same_name() {
        let (_dir, db) = temp_database();
        let first = save_template(&db, upload("stock"), None).unwrap();
        let creator = Uuid::new_v4();
        let second = save_template(&db, upload("stock"), Some(creator)).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.created_by, Some(creator));
        assert_eq!(templates::find_all(&db.connect().unwrap()).unwrap().len(), 1);
    }

    #[test]
    fn incompatible_definition_is_rejected() {
        let (_dir, db) = temp_database();
        let mut bad = upload("stock");
        bad.data = br#"{"format":"jasper","version":1}"#.to_vec();

        let err = save_template(&db, bad, None).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.message().key, ERROR_TEMPLATE_DEFINITION_INVALID);
        assert!(templates::find_all(&db.connect().unwrap()).unwrap().is_empty());
    }

    #[actix_web::test]
    async fn upload_stores_template_with_checksum_and_creator() {
        let (_dir, db) = temp_database();
        let (remote, user_id) = editor_services("administrator");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(db.clone()))
                .app_data(web::Data::new(remote))
                .app_data(web::Data::new(config(1024 * 1024)))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/reports/templates")
            .insert_header((AUTHORIZATION, format!("Bearer {}", TOKEN)))
            .insert_header((CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY)))
            .set_payload(multipart_body("Stock on hand", "stock.json", STOCK_DEFINITION))
            .to_request();
        let saved: ReportTemplate = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(saved.name, "Stock on hand");
        assert_eq!(saved.description.as_deref(), Some("Stock on hand"));
        assert_eq!(saved.created_by, Some(user_id));
        assert_eq!(saved.checksum, format!("{:x}", md5::compute(STOCK_DEFINITION)));

        let stored = templates::find_one(&db.connect().unwrap(), saved.id).unwrap().unwrap();
        assert_eq!(stored.data, STOCK_DEFINITION.as_bytes());
    }

    #[actix_web::test]
    async fn upload_rejects_wrong_extension_and_oversized_files() {
        let (_dir, db) = temp_database();
        let (remote, _) = editor_services("administrator");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(remote))
                .app_data(web::Data::new(config(64)))
                .service(super::super::configure_routes()),
        )
        .await;

        for (filename, key) in [
            ("stock.jrxml", ERROR_TEMPLATE_FILE_EXTENSION),
            ("stock.json", ERROR_TEMPLATE_FILE_TOO_LARGE),
        ] {
            let req = actix_test::TestRequest::post()
                .uri("/api/reports/templates")
                .insert_header((AUTHORIZATION, format!("Bearer {}", TOKEN)))
                .insert_header((
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                ))
                .set_payload(multipart_body("stock", filename, STOCK_DEFINITION))
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = actix_test::read_body_json(resp).await;
            assert_eq!(body["messageKey"], key);
        }
    }

    #[actix_web::test]
    async fn upload_requires_edit_right() {
        let (_dir, db) = temp_database();
        let (remote, _) = editor_services("clerk");
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(remote))
                .app_data(web::Data::new(config(1024)))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/reports/templates")
            .insert_header((AUTHORIZATION, format!("Bearer {}", TOKEN)))
            .insert_header((CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY)))
            .set_payload(multipart_body("stock", "stock.json", STOCK_DEFINITION))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
