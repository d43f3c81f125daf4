use serde::{Deserialize, Serialize};

use super::non_empty;
use crate::schema::{Resource, Schema, TimestampField};

/// A pay cycle (weekly, fortnightly, …) employees are paid on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayrollCalendar {
    #[serde(rename = "PayrollCalendarID", skip_serializing_if = "Option::is_none")]
    pub payroll_calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// e.g. `WEEKLY`, `FORTNIGHTLY`, `MONTHLY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

impl Schema for PayrollCalendar {
    const ELEMENT: &'static str = "PayrollCalendar";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[
        TimestampField {
            name: "StartDate",
            date_only: true,
            slot: |r| &mut r.start_date,
        },
        TimestampField {
            name: "PaymentDate",
            date_only: true,
            slot: |r| &mut r.payment_date,
        },
        TimestampField {
            name: "UpdatedDateUTC",
            date_only: false,
            slot: |r| &mut r.updated_date_utc,
        },
    ];

    fn id(&self) -> Option<&str> {
        non_empty(&self.payroll_calendar_id)
    }
}

impl Resource for PayrollCalendar {
    const COLLECTION: &'static str = "PayrollCalendars";
}
