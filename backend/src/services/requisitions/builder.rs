//! Maps a requisition's status history onto a [`RequisitionReportView`].
//!
//! For each of INITIATED, SUBMITTED and AUTHORIZED the first matching entry in
//! the history wins. Its timestamp is copied as-is and its author id is looked up
//! through the user service on behalf of the caller. An INITIATED entry without
//! an author was created by the system and gets a synthetic user labelled with the
//! localized "system" message; SUBMITTED and AUTHORIZED keep their actor unset.

use chrono::{DateTime, FixedOffset};
use common::model::requisition::{RequisitionDto, RequisitionStatus, StatusChangeDto};
use common::model::user::UserDto;

use super::view::{RequisitionReportView, StatusActors};
use crate::error::ServiceError;
use crate::i18n::keys::STATUS_CHANGE_USER_SYSTEM;
use crate::i18n::{Message, MessageService};
use crate::referencedata::users::UserLookup;
use crate::security::Caller;

type StatusActor = (Option<UserDto>, Option<DateTime<FixedOffset>>);

pub struct RequisitionReportViewBuilder<'s> {
    users: &'s dyn UserLookup,
    messages: &'s MessageService,
}

impl<'s> RequisitionReportViewBuilder<'s> {
    pub fn new(users: &'s dyn UserLookup, messages: &'s MessageService) -> Self {
        RequisitionReportViewBuilder { users, messages }
    }

    pub async fn build<'a>(
        &self,
        requisition: &'a RequisitionDto,
        caller: &Caller,
    ) -> Result<RequisitionReportView<'a>, ServiceError> {
        let actors = self.status_actors(requisition, caller).await?;
        Ok(RequisitionReportView::new(requisition, actors))
    }

    /// The owned half of the view, resolved before the requisition is borrowed.
    pub async fn status_actors(
        &self,
        requisition: &RequisitionDto,
        caller: &Caller,
    ) -> Result<StatusActors, ServiceError> {
        let history = &requisition.status_history;
        let (initiated_by, initiated_date) =
            self.status_actor(history, RequisitionStatus::Initiated, caller).await?;
        let (submitted_by, submitted_date) =
            self.status_actor(history, RequisitionStatus::Submitted, caller).await?;
        let (authorized_by, authorized_date) =
            self.status_actor(history, RequisitionStatus::Authorized, caller).await?;

        Ok(StatusActors {
            initiated_by,
            initiated_date,
            submitted_by,
            submitted_date,
            authorized_by,
            authorized_date,
        })
    }

    async fn status_actor(
        &self,
        history: &[StatusChangeDto],
        status: RequisitionStatus,
        caller: &Caller,
    ) -> Result<StatusActor, ServiceError> {
        let Some(change) = history.iter().find(|change| change.status == status) else {
            return Ok((None, None));
        };

        let actor = match change.author_id {
            Some(author_id) => self.users.find_one(author_id, caller).await?,
            None if status == RequisitionStatus::Initiated => Some(self.system_user()),
            None => None,
        };
        Ok((actor, Some(change.created_date)))
    }

    fn system_user(&self) -> UserDto {
        let label = self
            .messages
            .localize(&Message::new(STATUS_CHANGE_USER_SYSTEM))
            .message;
        UserDto {
            id: None,
            username: label.clone(),
            first_name: Some(label),
            last_name: None,
            email: None,
            active: true,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::DateTime;
    use common::model::requisition::{
        ObjectReference, OrderableDto, RequisitionDto, RequisitionLineItemDto, RequisitionStatus,
        StatusChangeDto,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    pub fn status_change(
        status: RequisitionStatus,
        author_id: Option<Uuid>,
        at: &str,
    ) -> StatusChangeDto {
        StatusChangeDto {
            status,
            author_id,
            created_date: DateTime::parse_from_rfc3339(at).unwrap(),
        }
    }

    pub fn line_item(code: &str, full_supply: bool, skipped: bool) -> RequisitionLineItemDto {
        RequisitionLineItemDto {
            id: Uuid::new_v4(),
            orderable: OrderableDto {
                id: Uuid::new_v4(),
                product_code: code.to_string(),
                full_product_name: format!("Product {}", code),
                dispensable: None,
            },
            full_supply,
            skipped,
            beginning_balance: Some(10),
            total_received_quantity: Some(5),
            total_consumed_quantity: Some(3),
            stock_on_hand: Some(12),
            requested_quantity: Some(20),
            approved_quantity: None,
            price_per_pack: Some(Decimal::from_str("2.50").unwrap()),
            total_cost: Some(Decimal::from_str("50.00").unwrap()),
        }
    }

    pub fn requisition(status_history: Vec<StatusChangeDto>) -> RequisitionDto {
        RequisitionDto {
            id: Uuid::new_v4(),
            status: RequisitionStatus::Authorized,
            emergency: false,
            facility: Some(ObjectReference {
                id: Uuid::new_v4(),
                code: Some("HC01".to_string()),
                name: Some("Comfort Health Clinic".to_string()),
            }),
            program: Some(ObjectReference {
                id: Uuid::new_v4(),
                code: Some("PRG001".to_string()),
                name: Some("Family Planning".to_string()),
            }),
            processing_period: Some(ObjectReference {
                id: Uuid::new_v4(),
                code: None,
                name: Some("Jan2017".to_string()),
            }),
            status_history,
            requisition_line_items: vec![
                line_item("C100", true, false),
                line_item("C200", true, true),
                line_item("C300", false, false),
            ],
            total_cost: Decimal::from_str("150.00").unwrap(),
            full_supply_total_cost: Decimal::from_str("100.00").unwrap(),
            non_full_supply_total_cost: Decimal::from_str("50.00").unwrap(),
        }
    }
}
