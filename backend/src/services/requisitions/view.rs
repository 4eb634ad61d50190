use chrono::{DateTime, FixedOffset};
use common::model::requisition::{RequisitionDto, RequisitionLineItemDto};
use common::model::user::UserDto;
use rust_decimal::Decimal;
use serde::Serialize;

/// Printable view over a requisition.
///
/// The requisition and its line items are borrowed, never copied. Each
/// `*_by`/`*_date` pair is only filled when the status history holds a
/// matching transition.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionReportView<'a> {
    pub requisition: &'a RequisitionDto,
    pub full_supply: Vec<&'a RequisitionLineItemDto>,
    pub non_full_supply: Vec<&'a RequisitionLineItemDto>,
    pub total_cost: Decimal,
    pub full_supply_total_cost: Decimal,
    pub non_full_supply_total_cost: Decimal,
    pub initiated_by: Option<UserDto>,
    pub initiated_date: Option<DateTime<FixedOffset>>,
    pub submitted_by: Option<UserDto>,
    pub submitted_date: Option<DateTime<FixedOffset>>,
    pub authorized_by: Option<UserDto>,
    pub authorized_date: Option<DateTime<FixedOffset>>,
}

/// Who moved the requisition through each status, and when.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusActors {
    pub initiated_by: Option<UserDto>,
    pub initiated_date: Option<DateTime<FixedOffset>>,
    pub submitted_by: Option<UserDto>,
    pub submitted_date: Option<DateTime<FixedOffset>>,
    pub authorized_by: Option<UserDto>,
    pub authorized_date: Option<DateTime<FixedOffset>>,
}

impl<'a> RequisitionReportView<'a> {
    pub fn new(requisition: &'a RequisitionDto, actors: StatusActors) -> Self {
        RequisitionReportView {
            requisition,
            full_supply: requisition.non_skipped_full_supply_line_items(),
            non_full_supply: requisition.non_skipped_non_full_supply_line_items(),
            total_cost: requisition.total_cost,
            full_supply_total_cost: requisition.full_supply_total_cost,
            non_full_supply_total_cost: requisition.non_full_supply_total_cost,
            initiated_by: actors.initiated_by,
            initiated_date: actors.initiated_date,
            submitted_by: actors.submitted_by,
            submitted_date: actors.submitted_date,
            authorized_by: actors.authorized_by,
            authorized_date: actors.authorized_date,
        }
    }
}
