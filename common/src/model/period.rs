use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingScheduleDto {
    pub id: Uuid,
    pub code: Option<String>,
    pub name: Option<String>,
}

/// A processing period as served by the reference-data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingPeriodDto {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub processing_schedule: Option<ProcessingScheduleDto>,
    pub description: Option<String>,
}
