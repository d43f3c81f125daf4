//! Payroll resource records.
//!
//! Field names match the upstream schema. Every scalar is optional: an
//! absent JSON key reads as `None` and a `None` field is left out of the
//! outbound XML, so a missing value never turns into a zero.

mod employee;
mod pay_items;
mod pay_run;
mod payroll_calendar;
mod timesheet;

pub use employee::Employee;
pub use pay_items::{DeductionType, EarningsRate, LeaveType, PayItems, ReimbursementType, PAY_ITEMS};
pub use pay_run::PayRun;
pub use payroll_calendar::PayrollCalendar;
pub use timesheet::{Timesheet, TimesheetLine};

use serde::{Deserialize, Deserializer};

use crate::envelope::Envelope;

pub type Employees = Envelope<Vec<Employee>>;
pub type PayItemsEnvelope = Envelope<PayItems>;
pub type PayRuns = Envelope<Vec<PayRun>>;
pub type PayrollCalendars = Envelope<Vec<PayrollCalendar>>;
pub type Timesheets = Envelope<Vec<Timesheet>>;

/// Treat an empty identity the same as a missing one.
pub(crate) fn non_empty(id: &Option<String>) -> Option<&str> {
    id.as_deref().filter(|s| !s.is_empty())
}

/// `deserialize_with` for nested collections: `null` reads as empty.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
