use actix_web::{web, HttpResponse};
use common::model::setting::ConfigurationSetting;

use crate::db::{settings, Database};
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_SETTING_NOT_FOUND;
use crate::i18n::Message;

pub async fn process(
    key: web::Path<String>,
    db: web::Data<Database>,
) -> Result<HttpResponse, ServiceError> {
    let setting = get_by_key(&db, &key)?;
    Ok(HttpResponse::Ok().json(setting))
}

pub fn get_by_key(db: &Database, key: &str) -> Result<ConfigurationSetting, ServiceError> {
    let conn = db.connect()?;
    settings::find_by_key(&conn, key)?
        .ok_or_else(|| ServiceError::NotFound(Message::with_args(ERROR_SETTING_NOT_FOUND, [key])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn seeded() -> (tempfile::TempDir, Database) {
        let (dir, db) = temp_database();
        let conn = db.connect().unwrap();
        settings::save(
            &conn,
            &ConfigurationSetting {
                key: "reports.requisition.logo".to_string(),
                value: "malawi.png".to_string(),
            },
        )
        .unwrap();
        (dir, db)
    }

    #[actix_web::test]
    async fn returns_stored_setting() {
        let (_dir, db) = seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/settings/reports.requisition.logo")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "key": "reports.requisition.logo", "value": "malawi.png" })
        );
    }

    #[actix_web::test]
    async fn unknown_key_is_not_found() {
        let (_dir, db) = seeded();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/settings/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["messageKey"], ERROR_SETTING_NOT_FOUND);
    }
}
