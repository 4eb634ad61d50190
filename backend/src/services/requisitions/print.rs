//! # Requisition Print Service
//!
//! Backend logic for `GET /api/reports/requisitions/{requisition_id}/print`: the
//! requisition summary as a PDF document, served inline.

use std::path::Path;

use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, FixedOffset};
use common::model::requisition::{ObjectReference, RequisitionLineItemDto, RequisitionStatus};
use common::model::user::UserDto;
use log::info;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::builder::RequisitionReportViewBuilder;
use super::find_requisition;
use super::view::RequisitionReportView;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_RENDER;
use crate::i18n::{Message, MessageService};
use crate::reporting::{pdf, ReportsViewService, RequestContext};
use crate::security::BearerToken;
use crate::state::RemoteServices;

const LINE_ITEM_HEADINGS: [&str; 9] = [
    "Product code",
    "Product",
    "Beginning balance",
    "Received",
    "Consumed",
    "Stock on hand",
    "Requested",
    "Approved",
    "Total cost",
];

pub async fn process(
    requisition_id: web::Path<Uuid>,
    req: HttpRequest,
    token: BearerToken,
    remote: web::Data<RemoteServices>,
    messages: web::Data<MessageService>,
    views: web::Data<ReportsViewService>,
) -> Result<HttpResponse, ServiceError> {
    let caller = remote.caller(token).await?;
    let requisition = find_requisition(&remote, *requisition_id, &caller).await?;
    let actors = RequisitionReportViewBuilder::new(remote.users.as_ref(), &messages)
        .status_actors(&requisition, &caller)
        .await?;

    let requisition_id = requisition.id;
    let context = RequestContext::for_request(&req, &caller.username);
    let fonts_dir = views.fonts_dir().to_path_buf();
    let bytes = web::block(move || {
        let view = RequisitionReportView::new(&requisition, actors);
        render_requisition(&fonts_dir, &view, &context)
    })
    .await
    .map_err(|e| ServiceError::Reporting(Message::with_args(ERROR_RENDER, [e])))??;
    info!("requisition {} printed for {}", requisition_id, caller.username);

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            CONTENT_DISPOSITION,
            format!("inline; filename=\"requisition_{}.pdf\"", requisition_id),
        ))
        .body(bytes))
}

fn reference_label(reference: Option<&ObjectReference>) -> String {
    reference.map(ObjectReference::label).unwrap_or_default()
}

/// Wire name of the status, e.g. `IN_APPROVAL`.
fn status_label(status: RequisitionStatus) -> String {
    serde_json::to_value(status)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn actor_label(user: Option<&UserDto>, date: Option<DateTime<FixedOffset>>) -> String {
    match (user, date) {
        (Some(user), Some(date)) => {
            format!("{} on {}", user.display_name(), date.format("%Y-%m-%d %H:%M"))
        }
        (None, Some(date)) => date.format("%Y-%m-%d %H:%M").to_string(),
        (Some(user), None) => user.display_name(),
        (None, None) => "-".to_string(),
    }
}

fn quantity(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn cost(value: Option<Decimal>) -> String {
    value.map(|v| v.round_dp(2).to_string()).unwrap_or_default()
}

fn line_item_row(item: &RequisitionLineItemDto) -> Vec<String> {
    vec![
        item.orderable.product_code.clone(),
        item.orderable.full_product_name.clone(),
        quantity(item.beginning_balance),
        quantity(item.total_received_quantity),
        quantity(item.total_consumed_quantity),
        quantity(item.stock_on_hand),
        quantity(item.requested_quantity),
        quantity(item.approved_quantity),
        cost(item.total_cost),
    ]
}

/// Table cells of the given line items, in display order.
pub fn line_item_rows(items: &[&RequisitionLineItemDto]) -> Vec<Vec<String>> {
    items.iter().map(|item| line_item_row(item)).collect()
}

pub fn render_requisition(
    fonts_dir: &Path,
    view: &RequisitionReportView<'_>,
    context: &RequestContext,
) -> Result<Vec<u8>, ServiceError> {
    let requisition = view.requisition;
    let mut doc = pdf::configure_document(fonts_dir, "Requisition")?;

    pdf::push_field(&mut doc, "Facility", &reference_label(requisition.facility.as_ref()));
    pdf::push_field(&mut doc, "Program", &reference_label(requisition.program.as_ref()));
    pdf::push_field(&mut doc, "Period", &reference_label(requisition.processing_period.as_ref()));
    pdf::push_field(&mut doc, "Status", &status_label(requisition.status));
    pdf::push_field(&mut doc, "Emergency", if requisition.emergency { "Yes" } else { "No" });
    let actors = [
        ("Initiated", view.initiated_by.as_ref(), view.initiated_date),
        ("Submitted", view.submitted_by.as_ref(), view.submitted_date),
        ("Authorized", view.authorized_by.as_ref(), view.authorized_date),
    ];
    for (label, user, date) in actors {
        pdf::push_field(&mut doc, label, &actor_label(user, date));
    }

    let headings: Vec<String> = LINE_ITEM_HEADINGS.iter().map(|h| h.to_string()).collect();
    pdf::push_section(&mut doc, "Full supply products");
    pdf::push_table(&mut doc, &headings, &line_item_rows(&view.full_supply))?;
    pdf::push_section(&mut doc, "Non-full supply products");
    pdf::push_table(&mut doc, &headings, &line_item_rows(&view.non_full_supply))?;

    pdf::push_section(&mut doc, "Totals");
    pdf::push_field(&mut doc, "Full supply", &cost(Some(view.full_supply_total_cost)));
    pdf::push_field(&mut doc, "Non-full supply", &cost(Some(view.non_full_supply_total_cost)));
    pdf::push_field(&mut doc, "Total cost", &cost(Some(view.total_cost)));

    pdf::push_footer(&mut doc, context);
    pdf::render(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DataSource;
    use crate::reporting::pdf::test_support::fonts_dir;
    use crate::security::test_support::{user, StaticRights, StaticUsers};
    use crate::services::requisitions::builder::test_support::{requisition, status_change};
    use crate::services::requisitions::view::StatusActors;
    use crate::state::test_support::{remote_services, StaticRequisitions, TOKEN};
    use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use actix_web::{http::StatusCode, App};

    #[test]
    fn line_items_are_laid_out_in_heading_order() {
        let requisition = requisition(Vec::new());
        let rows = line_item_rows(&requisition.non_skipped_full_supply_line_items());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), LINE_ITEM_HEADINGS.len());
        assert_eq!(
            rows[0],
            vec!["C100", "Product C100", "10", "5", "3", "12", "20", "", "50.00"]
        );
    }

    #[test]
    fn status_uses_wire_name() {
        assert_eq!(status_label(RequisitionStatus::InApproval), "IN_APPROVAL");
    }

    #[test]
    fn actor_labels_cover_partial_information() {
        let date = DateTime::parse_from_rfc3339("2017-01-05T10:15:00+02:00").unwrap();
        let clerk = user(Uuid::new_v4(), "clerk");

        assert_eq!(actor_label(Some(&clerk), Some(date)), "CLERK Tester on 2017-01-05 10:15");
        assert_eq!(actor_label(None, Some(date)), "2017-01-05 10:15");
        assert_eq!(actor_label(None, None), "-");
    }

    fn context() -> RequestContext {
        RequestContext {
            base_url: "http://localhost:8080".to_string(),
            requested_by: None,
            requested_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn printing_without_fonts_is_a_rendering_error() {
        let requisition = requisition(Vec::new());
        let view = RequisitionReportView::new(&requisition, StatusActors::default());
        let fonts = tempfile::tempdir().unwrap();

        let err = render_requisition(fonts.path(), &view, &context()).unwrap_err();
        assert!(matches!(err, ServiceError::Reporting(_)));
    }

    #[test]
    fn requisition_renders_to_pdf() {
        let Some(fonts_dir) = fonts_dir() else {
            eprintln!("no LiberationSans or Arial fonts found, skipping");
            return;
        };
        let requisition = requisition(vec![status_change(
            RequisitionStatus::Initiated,
            None,
            "2017-01-05T10:15:00+02:00",
        )]);
        let view = RequisitionReportView::new(&requisition, StatusActors::default());

        let bytes = render_requisition(&fonts_dir, &view, &context()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    fn print_app_data(
        requisitions: StaticRequisitions,
    ) -> (web::Data<RemoteServices>, web::Data<MessageService>) {
        let remote = remote_services(
            "administrator",
            StaticUsers::default(),
            StaticRights::default(),
            requisitions,
        );
        (web::Data::new(remote), web::Data::new(MessageService::english()))
    }

    fn print_request(requisition_id: Uuid) -> actix_web::test::TestRequest {
        actix_web::test::TestRequest::get()
            .uri(&format!("/api/reports/requisitions/{}/print", requisition_id))
            .insert_header((AUTHORIZATION, format!("Bearer {}", TOKEN)))
    }

    #[actix_web::test]
    async fn print_without_fonts_fails_to_render() {
        let requisition = requisition(Vec::new());
        let requisition_id = requisition.id;
        let (remote, messages) = print_app_data(StaticRequisitions(vec![requisition]));
        let fonts = tempfile::tempdir().unwrap();
        let app = actix_web::test::init_service(
            App::new()
                .app_data(remote)
                .app_data(messages)
                .app_data(web::Data::new(ReportsViewService::new(
                    DataSource::new(fonts.path().join("unused.db")),
                    fonts.path(),
                )))
                .service(super::super::configure_routes()),
        )
        .await;

        let resp =
            actix_web::test::call_service(&app, print_request(requisition_id).to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        assert_eq!(body["messageKey"], ERROR_RENDER);
    }

    #[actix_web::test]
    async fn print_of_unknown_requisition_is_not_found() {
        let (remote, messages) = print_app_data(StaticRequisitions::default());
        let app = actix_web::test::init_service(
            App::new()
                .app_data(remote)
                .app_data(messages)
                .app_data(web::Data::new(ReportsViewService::new(
                    DataSource::new("unused.db"),
                    "./fonts",
                )))
                .service(super::super::configure_routes()),
        )
        .await;

        let resp =
            actix_web::test::call_service(&app, print_request(Uuid::new_v4()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn print_serves_inline_pdf() {
        let Some(fonts_dir) = fonts_dir() else {
            eprintln!("no LiberationSans or Arial fonts found, skipping");
            return;
        };
        let requisition = requisition(Vec::new());
        let requisition_id = requisition.id;
        let (remote, messages) = print_app_data(StaticRequisitions(vec![requisition]));
        let app = actix_web::test::init_service(
            App::new()
                .app_data(remote)
                .app_data(messages)
                .app_data(web::Data::new(ReportsViewService::new(
                    DataSource::new("unused.db"),
                    fonts_dir,
                )))
                .service(super::super::configure_routes()),
        )
        .await;

        let resp =
            actix_web::test::call_service(&app, print_request(requisition_id).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap(), "application/pdf");
        assert_eq!(
            resp.headers().get(CONTENT_DISPOSITION).unwrap(),
            format!("inline; filename=\"requisition_{}.pdf\"", requisition_id).as_str()
        );
        let body = actix_web::test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF"));
    }
}
