//! Requisition records as served by the requisition service.
//!
//! Only the fields needed to print a requisition summary are modelled; unknown
//! fields in the payload are ignored on deserialization.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequisitionStatus {
    Initiated,
    Rejected,
    Submitted,
    Authorized,
    InApproval,
    Approved,
    Released,
    ReleasedWithoutOrder,
    Skipped,
}

/// A single transition recorded in a requisition's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeDto {
    pub status: RequisitionStatus,
    /// Absent when the transition was performed by the system itself.
    pub author_id: Option<Uuid>,
    pub created_date: DateTime<FixedOffset>,
}

/// Minimal reference to a facility, program or period embedded in a requisition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub id: Uuid,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl ObjectReference {
    pub fn label(&self) -> String {
        match (&self.code, &self.name) {
            (Some(code), Some(name)) => format!("{} - {}", code, name),
            (None, Some(name)) => name.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => self.id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderableDto {
    pub id: Uuid,
    pub product_code: String,
    pub full_product_name: String,
    pub dispensable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionLineItemDto {
    pub id: Uuid,
    pub orderable: OrderableDto,
    #[serde(default)]
    pub full_supply: bool,
    #[serde(default)]
    pub skipped: bool,
    pub beginning_balance: Option<i32>,
    pub total_received_quantity: Option<i32>,
    pub total_consumed_quantity: Option<i32>,
    pub stock_on_hand: Option<i32>,
    pub requested_quantity: Option<i32>,
    pub approved_quantity: Option<i32>,
    pub price_per_pack: Option<Decimal>,
    pub total_cost: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequisitionDto {
    pub id: Uuid,
    pub status: RequisitionStatus,
    #[serde(default)]
    pub emergency: bool,
    pub facility: Option<ObjectReference>,
    pub program: Option<ObjectReference>,
    pub processing_period: Option<ObjectReference>,
    #[serde(default)]
    pub status_history: Vec<StatusChangeDto>,
    #[serde(default)]
    pub requisition_line_items: Vec<RequisitionLineItemDto>,
    #[serde(default)]
    pub total_cost: Decimal,
    #[serde(default)]
    pub full_supply_total_cost: Decimal,
    #[serde(default)]
    pub non_full_supply_total_cost: Decimal,
}

impl RequisitionDto {
    pub fn non_skipped_full_supply_line_items(&self) -> Vec<&RequisitionLineItemDto> {
        self.requisition_line_items
            .iter()
            .filter(|item| item.full_supply && !item.skipped)
            .collect()
    }

    pub fn non_skipped_non_full_supply_line_items(&self) -> Vec<&RequisitionLineItemDto> {
        self.requisition_line_items
            .iter()
            .filter(|item| !item.full_supply && !item.skipped)
            .collect()
    }
}
