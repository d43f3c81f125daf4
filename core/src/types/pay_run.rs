use serde::{Deserialize, Serialize};

use super::non_empty;
use crate::schema::{Resource, Schema, TimestampField};

/// One processed (or draft) payroll period for a calendar.
///
/// Monetary totals are carried exactly as the upstream computed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayRun {
    #[serde(rename = "PayRunID", skip_serializing_if = "Option::is_none")]
    pub pay_run_id: Option<String>,
    #[serde(rename = "PayrollCalendarID", skip_serializing_if = "Option::is_none")]
    pub payroll_calendar_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_run_period_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_run_period_end_date: Option<String>,
    /// `DRAFT` or `POSTED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_run_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wages: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(rename = "Super", skip_serializing_if = "Option::is_none")]
    pub super_: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reimbursement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_pay: Option<f64>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

impl Schema for PayRun {
    const ELEMENT: &'static str = "PayRun";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[
        TimestampField {
            name: "PayRunPeriodStartDate",
            date_only: true,
            slot: |r| &mut r.pay_run_period_start_date,
        },
        TimestampField {
            name: "PayRunPeriodEndDate",
            date_only: true,
            slot: |r| &mut r.pay_run_period_end_date,
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
        non_empty(&self.pay_run_id)
    }
}

impl Resource for PayRun {
    const COLLECTION: &'static str = "PayRuns";
}
