//! # Template Retrieval Service
//!
//! Backend logic for `GET /api/reports/templates` and `GET /api/reports/templates/{template_id}`.
//! Only metadata is returned; the definition payload stays in the database.

use actix_web::{web, HttpResponse};
use common::model::template::ReportTemplate;
use uuid::Uuid;

use crate::db::templates::{self, StoredTemplate};
use crate::db::Database;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_TEMPLATE_NOT_FOUND;
use crate::i18n::Message;

pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ServiceError> {
    let conn = db.connect()?;
    let all: Vec<ReportTemplate> = templates::find_all(&conn)?;
    Ok(HttpResponse::Ok().json(all))
}

pub async fn process(
    template_id: web::Path<Uuid>,
    db: web::Data<Database>,
) -> Result<HttpResponse, ServiceError> {
    let template = get_template(&db, *template_id)?;
    Ok(HttpResponse::Ok().json(template.meta))
}

/// Loads a template with its payload, `404` when the id is unknown.
pub fn get_template(db: &Database, template_id: Uuid) -> Result<StoredTemplate, ServiceError> {
    let conn = db.connect()?;
    templates::find_one(&conn, template_id)?.ok_or_else(|| {
        ServiceError::NotFound(Message::with_args(ERROR_TEMPLATE_NOT_FOUND, [template_id]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use crate::services::templates::test_support::store_stock_template;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn lists_templates_ordered_by_name() {
        let (_dir, db) = temp_database();
        store_stock_template(&db, "stock");
        store_stock_template(&db, "adjustments");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/reports/templates").to_request();
        let body: Vec<ReportTemplate> = test::call_and_read_body_json(&app, req).await;
        let names: Vec<&str> = body.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["adjustments", "stock"]);
    }

    #[actix_web::test]
    async fn returns_metadata_or_not_found() {
        let (_dir, db) = temp_database();
        let stored = store_stock_template(&db, "stock");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .service(super::super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports/templates/{}", stored.id))
            .to_request();
        let body: ReportTemplate = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.id, stored.id);
        assert_eq!(body.checksum, stored.checksum);

        let req = test::TestRequest::get()
            .uri(&format!("/api/reports/templates/{}", Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
