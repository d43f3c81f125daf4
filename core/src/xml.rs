//! Outbound XML rendering.
//!
//! The upstream accepts writes as XML while answering in JSON. Record
//! structs derive one `Serialize` that matches their JSON shape; records
//! whose XML differs get a borrowed view here. Nested collections gain
//! their XML wrapping only in these views, e.g. lines become
//! `<TimesheetLines><TimesheetLine>…</TimesheetLine></TimesheetLines>`.

use quick_xml::se::Serializer as XmlSerializer;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::error::PayrollError;
use crate::schema::Schema;
use crate::types::{
    DeductionType, EarningsRate, LeaveType, PayItems, ReimbursementType, Timesheet, TimesheetLine,
};

const PREFIX: &str = "  ";
const INDENT: usize = 3;

/// A collection rendered as repeated `element` children.
pub(crate) struct Elements<T> {
    element: &'static str,
    items: Vec<T>,
}

impl<T> Elements<T> {
    pub(crate) fn new(element: &'static str, items: Vec<T>) -> Self {
        Self { element, items }
    }

    /// `None` for an empty collection, so the wrapper element is left out.
    fn non_empty(element: &'static str, items: Vec<T>) -> Option<Self> {
        (!items.is_empty()).then(|| Self::new(element, items))
    }
}

impl<T: Serialize> Serialize for Elements<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct(self.element, 1)?;
        s.serialize_field(self.element, &self.items)?;
        s.end()
    }
}

fn records<R: Schema>(items: &[R]) -> Option<Elements<&R>> {
    Elements::non_empty(R::ELEMENT, items.iter().collect())
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TimesheetXml<'a> {
    #[serde(rename = "TimesheetID", skip_serializing_if = "Option::is_none")]
    timesheet_id: Option<&'a str>,
    #[serde(rename = "EmployeeID", skip_serializing_if = "Option::is_none")]
    employee_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timesheet_lines: Option<Elements<TimesheetLineXml<'a>>>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    updated_date_utc: Option<&'a str>,
}

impl<'a> From<&'a Timesheet> for TimesheetXml<'a> {
    fn from(sheet: &'a Timesheet) -> Self {
        Self {
            timesheet_id: sheet.timesheet_id.as_deref(),
            employee_id: sheet.employee_id.as_deref(),
            start_date: sheet.start_date.as_deref(),
            end_date: sheet.end_date.as_deref(),
            status: sheet.status.as_deref(),
            hours: sheet.hours,
            timesheet_lines: Elements::non_empty(
                TimesheetLine::ELEMENT,
                sheet.timesheet_lines.iter().map(TimesheetLineXml::from).collect(),
            ),
            updated_date_utc: sheet.updated_date_utc.as_deref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TimesheetLineXml<'a> {
    #[serde(rename = "EarningsRateID", skip_serializing_if = "Option::is_none")]
    earnings_rate_id: Option<&'a str>,
    /// One `NumberOfUnit` child per day.
    #[serde(skip_serializing_if = "Option::is_none")]
    number_of_units: Option<Elements<f64>>,
    #[serde(rename = "UpdatedDateUTC", skip_serializing_if = "Option::is_none")]
    updated_date_utc: Option<&'a str>,
}

impl<'a> From<&'a TimesheetLine> for TimesheetLineXml<'a> {
    fn from(line: &'a TimesheetLine) -> Self {
        Self {
            earnings_rate_id: line.earnings_rate_id.as_deref(),
            number_of_units: Elements::non_empty("NumberOfUnit", line.number_of_units.clone()),
            updated_date_utc: line.updated_date_utc.as_deref(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PayItemsXml<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    earnings_rates: Option<Elements<&'a EarningsRate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deduction_types: Option<Elements<&'a DeductionType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reimbursement_types: Option<Elements<&'a ReimbursementType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    leave_types: Option<Elements<&'a LeaveType>>,
}

impl<'a> From<&'a PayItems> for PayItemsXml<'a> {
    fn from(items: &'a PayItems) -> Self {
        Self {
            earnings_rates: records(&items.earnings_rates),
            deduction_types: records(&items.deduction_types),
            reimbursement_types: records(&items.reimbursement_types),
            leave_types: records(&items.leave_types),
        }
    }
}

/// Render `value` under a `root` element.
///
/// Every element line starts with a two-space prefix followed by three
/// spaces per nesting level.
pub(crate) fn render<T: Serialize + ?Sized>(root: &str, value: &T) -> Result<String, PayrollError> {
    let mut raw = String::new();
    let mut serializer = XmlSerializer::with_root(&mut raw, Some(root))
        .map_err(|e| PayrollError::Encode(e.to_string()))?;
    serializer.indent(' ', INDENT);
    value
        .serialize(serializer)
        .map_err(|e| PayrollError::Encode(e.to_string()))?;
    Ok(prefix_lines(&raw))
}

// Text content never starts a line with '<' because it is escaped, so only
// element lines pick up the prefix.
fn prefix_lines(raw: &str) -> String {
    raw.split('\n')
        .map(|line| {
            if line.trim_start().starts_with('<') {
                format!("{PREFIX}{line}")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
