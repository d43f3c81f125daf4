use serde::{Deserialize, Serialize};

use super::non_empty;
use crate::schema::{Resource, Schema, TimestampField};

/// An employee on the payroll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(rename = "EmployeeID", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// e.g. `ACTIVE` or `TERMINATED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "OrdinaryEarningsRateID", skip_serializing_if = "Option::is_none")]
    pub ordinary_earnings_rate_id: Option<String>,
    #[serde(rename = "PayrollCalendarID", skip_serializing_if = "Option::is_none")]
    pub payroll_calendar_id: Option<String>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

impl Schema for Employee {
    const ELEMENT: &'static str = "Employee";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[
        TimestampField {
            name: "DateOfBirth",
            date_only: true,
            slot: |r| &mut r.date_of_birth,
        },
        TimestampField {
            name: "StartDate",
            date_only: true,
            slot: |r| &mut r.start_date,
        },
        TimestampField {
            name: "UpdatedDateUTC",
            date_only: false,
            slot: |r| &mut r.updated_date_utc,
        },
    ];

    fn id(&self) -> Option<&str> {
        non_empty(&self.employee_id)
    }
}

impl Resource for Employee {
    const COLLECTION: &'static str = "Employees";

    // UpdatedDateUTC is managed by the server and never written.
    fn xml_view(&self) -> impl Serialize + '_ {
        Employee {
            updated_date_utc: None,
            ..self.clone()
        }
    }
}
