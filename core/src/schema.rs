//! Field-level descriptors for payroll resources.
//!
//! # Design
//! Each record type lists its timestamp fields as a static table of
//! `(wire name, date-only, accessor)` entries. The normalizer walks those
//! tables generically, so adding a resource means writing its struct and
//! table rather than another conversion loop. Records that own nested
//! collections override `Schema::normalize_nested`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PayrollError;
use crate::types::{
    DeductionType, EarningsRate, Employee, LeaveType, PayRun, PayrollCalendar, ReimbursementType,
    Timesheet,
};

/// One timestamp-bearing field of a record.
pub struct TimestampField<R> {
    /// Field name as it appears on the wire.
    pub name: &'static str,
    /// Calendar-date field rather than a point in time.
    pub date_only: bool,
    pub slot: fn(&mut R) -> &mut Option<String>,
}

impl<R> std::fmt::Debug for TimestampField<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampField")
            .field("name", &self.name)
            .field("date_only", &self.date_only)
            .finish()
    }
}

/// Shape of a record: its element name and which fields hold timestamps.
pub trait Schema: Sized + 'static {
    /// Element name of a single record in outbound XML, e.g. `PayRun`.
    const ELEMENT: &'static str;

    const TIMESTAMPS: &'static [TimestampField<Self>];

    /// Identity assigned by the upstream service, if any.
    fn id(&self) -> Option<&str> {
        None
    }

    /// Normalize collections nested below this record.
    fn normalize_nested(&mut self) -> Result<(), PayrollError> {
        Ok(())
    }
}

/// A record type with its own endpoint, e.g. `PayRuns`.
pub trait Resource: Schema + Serialize + DeserializeOwned {
    /// Collection name: the endpoint path segment and the envelope key.
    const COLLECTION: &'static str;

    /// The shape written to outbound XML. Defaults to the record's own
    /// `Serialize` output, which is also its JSON shape.
    fn xml_view(&self) -> impl Serialize + '_ {
        self
    }
}

/// The resource kinds the payroll API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Employee,
    EarningsRate,
    DeductionType,
    ReimbursementType,
    LeaveType,
    PayrollCalendar,
    PayRun,
    Timesheet,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Employee,
        ResourceKind::EarningsRate,
        ResourceKind::DeductionType,
        ResourceKind::ReimbursementType,
        ResourceKind::LeaveType,
        ResourceKind::PayrollCalendar,
        ResourceKind::PayRun,
        ResourceKind::Timesheet,
    ];

    /// Endpoint segment the kind is read and written through. The four pay
    /// item kinds share `PayItems`.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Employee => Employee::COLLECTION,
            ResourceKind::EarningsRate
            | ResourceKind::DeductionType
            | ResourceKind::ReimbursementType
            | ResourceKind::LeaveType => crate::types::PAY_ITEMS,
            ResourceKind::PayrollCalendar => PayrollCalendar::COLLECTION,
            ResourceKind::PayRun => PayRun::COLLECTION,
            ResourceKind::Timesheet => Timesheet::COLLECTION,
        }
    }

    pub fn element(self) -> &'static str {
        match self {
            ResourceKind::Employee => Employee::ELEMENT,
            ResourceKind::EarningsRate => EarningsRate::ELEMENT,
            ResourceKind::DeductionType => DeductionType::ELEMENT,
            ResourceKind::ReimbursementType => ReimbursementType::ELEMENT,
            ResourceKind::LeaveType => LeaveType::ELEMENT,
            ResourceKind::PayrollCalendar => PayrollCalendar::ELEMENT,
            ResourceKind::PayRun => PayRun::ELEMENT,
            ResourceKind::Timesheet => Timesheet::ELEMENT,
        }
    }

    /// `(wire name, date-only)` for every top-level timestamp field.
    pub fn timestamp_fields(self) -> Vec<(&'static str, bool)> {
        match self {
            ResourceKind::Employee => describe(Employee::TIMESTAMPS),
            ResourceKind::EarningsRate => describe(EarningsRate::TIMESTAMPS),
            ResourceKind::DeductionType => describe(DeductionType::TIMESTAMPS),
            ResourceKind::ReimbursementType => describe(ReimbursementType::TIMESTAMPS),
            ResourceKind::LeaveType => describe(LeaveType::TIMESTAMPS),
            ResourceKind::PayrollCalendar => describe(PayrollCalendar::TIMESTAMPS),
            ResourceKind::PayRun => describe(PayRun::TIMESTAMPS),
            ResourceKind::Timesheet => describe(Timesheet::TIMESTAMPS),
        }
    }
}

fn describe<R>(fields: &[TimestampField<R>]) -> Vec<(&'static str, bool)> {
    fields.iter().map(|f| (f.name, f.date_only)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_item_kinds_share_an_endpoint() {
        for kind in [
            ResourceKind::EarningsRate,
            ResourceKind::DeductionType,
            ResourceKind::ReimbursementType,
            ResourceKind::LeaveType,
        ] {
            assert_eq!(kind.endpoint(), "PayItems");
        }
        assert_eq!(ResourceKind::PayRun.endpoint(), "PayRuns");
        assert_eq!(ResourceKind::Employee.endpoint(), "Employees");
    }

    #[test]
    fn every_kind_tracks_updated_date() {
        for kind in ResourceKind::ALL {
            let fields = kind.timestamp_fields();
            assert!(
                fields.contains(&("UpdatedDateUTC", false)),
                "{kind:?} is missing UpdatedDateUTC"
            );
        }
    }

    #[test]
    fn pay_run_period_fields_are_date_only() {
        let fields = ResourceKind::PayRun.timestamp_fields();
        assert_eq!(
            fields,
            vec![
                ("PayRunPeriodStartDate", true),
                ("PayRunPeriodEndDate", true),
                ("PaymentDate", true),
                ("UpdatedDateUTC", false),
            ]
        );
    }

    #[test]
    fn element_names_are_singular() {
        assert_eq!(ResourceKind::PayrollCalendar.element(), "PayrollCalendar");
        assert_eq!(ResourceKind::LeaveType.element(), "LeaveType");
    }
}
