//! The composite pay-items resource: earnings rates, deduction types,
//! reimbursement types and leave types, all served through one endpoint.

use serde::{Deserialize, Serialize};

use super::{non_empty, null_as_empty};
use crate::envelope::Body;
use crate::error::PayrollError;
use crate::normalize::normalize_records;
use crate::schema::{Schema, TimestampField};
use crate::xml::{render, PayItemsXml};

pub const PAY_ITEMS: &str = "PayItems";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EarningsRate {
    #[serde(rename = "EarningsRateID", skip_serializing_if = "Option::is_none")]
    pub earnings_rate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// e.g. `ORDINARYTIMEEARNINGS`, `OVERTIMEEARNINGS`, `ALLOWANCE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings_type: Option<String>,
    /// `RATEPERUNIT`, `MULTIPLE` or `FIXEDAMOUNT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exempt_from_tax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_exempt_from_super: Option<bool>,
    #[serde(rename = "IsReportableAsW1", skip_serializing_if = "Option::is_none")]
    pub is_reportable_as_w1: Option<bool>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeductionType {
    #[serde(rename = "DeductionTypeID", skip_serializing_if = "Option::is_none")]
    pub deduction_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduction_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduces_tax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduces_super: Option<bool>,
    #[serde(rename = "IsExemptFromW1", skip_serializing_if = "Option::is_none")]
    pub is_exempt_from_w1: Option<bool>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReimbursementType {
    #[serde(rename = "ReimbursementTypeID", skip_serializing_if = "Option::is_none")]
    pub reimbursement_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeaveType {
    #[serde(rename = "LeaveTypeID", skip_serializing_if = "Option::is_none")]
    pub leave_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_of_units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal_entitlement: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_loading_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_paid_leave: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_payslip: Option<bool>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    pub updated_date_utc: Option<String>,
}

/// Body of a `PayItems` envelope: four typed sub-collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PayItems {
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub earnings_rates: Vec<EarningsRate>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub deduction_types: Vec<DeductionType>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub reimbursement_types: Vec<ReimbursementType>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub leave_types: Vec<LeaveType>,
}

const UPDATED_DATE_UTC: &str = "UpdatedDateUTC";

impl Schema for EarningsRate {
    const ELEMENT: &'static str = "EarningsRate";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[TimestampField {
        name: UPDATED_DATE_UTC,
        date_only: false,
        slot: |r| &mut r.updated_date_utc,
    }];

    fn id(&self) -> Option<&str> {
        non_empty(&self.earnings_rate_id)
    }
}

impl Schema for DeductionType {
    const ELEMENT: &'static str = "DeductionType";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[TimestampField {
        name: UPDATED_DATE_UTC,
        date_only: false,
        slot: |r| &mut r.updated_date_utc,
    }];

    fn id(&self) -> Option<&str> {
        non_empty(&self.deduction_type_id)
    }
}

impl Schema for ReimbursementType {
    const ELEMENT: &'static str = "ReimbursementType";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[TimestampField {
        name: UPDATED_DATE_UTC,
        date_only: false,
        slot: |r| &mut r.updated_date_utc,
    }];

    fn id(&self) -> Option<&str> {
        non_empty(&self.reimbursement_type_id)
    }
}

impl Schema for LeaveType {
    const ELEMENT: &'static str = "LeaveType";

    const TIMESTAMPS: &'static [TimestampField<Self>] = &[TimestampField {
        name: UPDATED_DATE_UTC,
        date_only: false,
        slot: |r| &mut r.updated_date_utc,
    }];

    fn id(&self) -> Option<&str> {
        non_empty(&self.leave_type_id)
    }
}

fn qualify(collection: &'static str) -> impl Fn(PayrollError) -> PayrollError {
    move |e| match e {
        PayrollError::MalformedTimestamp {
            field,
            index,
            source,
        } => PayrollError::MalformedTimestamp {
            field: format!("{collection}.{field}"),
            index,
            source,
        },
        other => other,
    }
}

impl Body for PayItems {
    const KEY: &'static str = PAY_ITEMS;

    fn normalize(&mut self) -> Result<(), PayrollError> {
        normalize_records(&mut self.earnings_rates).map_err(qualify("EarningsRates"))?;
        normalize_records(&mut self.deduction_types).map_err(qualify("DeductionTypes"))?;
        normalize_records(&mut self.reimbursement_types).map_err(qualify("ReimbursementTypes"))?;
        normalize_records(&mut self.leave_types).map_err(qualify("LeaveTypes"))
    }

    fn record_ids(&self) -> Vec<Option<&str>> {
        self.earnings_rates
            .iter()
            .map(Schema::id)
            .chain(self.deduction_types.iter().map(Schema::id))
            .chain(self.reimbursement_types.iter().map(Schema::id))
            .chain(self.leave_types.iter().map(Schema::id))
            .collect()
    }

    fn write_xml(&self) -> Result<String, PayrollError> {
        render(Self::KEY, &PayItemsXml::from(self))
    }
}
