use serde::{Deserialize, Serialize};

use super::{non_empty, null_as_empty};
use crate::error::PayrollError;
use crate::normalize::normalize_records;
use crate::schema::{Resource, Schema, TimestampField};
use crate::xml::TimesheetXml;

/// Hours an employee worked over a period, broken down by earnings rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Timesheet {
    #[serde(rename = "TimesheetID", skip_serializing_if = "Option::is_none")]
    pub timesheet_id: Option<String>,
    #[serde(rename = "EmployeeID", skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// `DRAFT`, `PROCESSED` or `APPROVED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Total hours across all lines, computed upstream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub timesheet_lines: Vec<TimesheetLine>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

/// Units worked against one earnings rate, one entry per day of the period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimesheetLine {
    #[serde(rename = "EarningsRateID", skip_serializing_if = "Option::is_none")]
    pub earnings_rate_id: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub number_of_units: Vec<f64>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

impl Schema for Timesheet {
    const ELEMENT: &'static str = "Timesheet";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[
        TimestampField {
            name: "StartDate",
            date_only: true,
            slot: |r| &mut r.start_date,
        },
        TimestampField {
            name: "EndDate",
            date_only: true,
            slot: |r| &mut r.end_date,
        },
        TimestampField {
            name: "UpdatedDateUTC",
            date_only: false,
            slot: |r| &mut r.updated_date_utc,
        },
    ];

    fn id(&self) -> Option<&str> {
        non_empty(&self.timesheet_id)
    }

    fn normalize_nested(&mut self) -> Result<(), PayrollError> {
        normalize_records(&mut self.timesheet_lines).map_err(|e| e.nested_in("TimesheetLines"))
    }
}

impl Resource for Timesheet {
    const COLLECTION: &'static str = "Timesheets";

    fn xml_view(&self) -> impl Serialize + '_ {
        TimesheetXml::from(self)
    }
}

impl Schema for TimesheetLine {
    const ELEMENT: &'static str = "TimesheetLine";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[TimestampField {
        name: "UpdatedDateUTC",
        date_only: false,
        slot: |r| &mut r.updated_date_utc,
    }];
}

impl Timesheet {
    /// Sum of every line's units. Useful to cross-check `hours` before a
    /// timesheet is submitted.
    pub fn total_units(&self) -> f64 {
        self.timesheet_lines
            .iter()
            .flat_map(|line| line.number_of_units.iter())
            .sum()
    }
}
