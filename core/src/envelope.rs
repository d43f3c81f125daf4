//! Response and request envelopes.
//!
//! # Design
//! Every payroll endpoint answers with the same wrapper: some metadata
//! (`Id`, `Status`, `ProviderName`, `DateTimeUTC`) next to one key that
//! holds the payload, e.g. `"PayRuns": [...]` or `"PayItems": {...}`.
//! `Envelope<B>` models the wrapper once; the payload type `B` says which
//! key to read, how to normalize itself and how to render as XML.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::PayrollError;
use crate::normalize::{normalize_records, normalize_slot};
use crate::schema::{Resource, Schema};
use crate::xml::{render, Elements};

/// A payload carried inside an envelope.
pub trait Body: DeserializeOwned + Default {
    /// Envelope key, endpoint segment and XML root element.
    const KEY: &'static str;

    /// Rewrite every timestamp in the payload, stopping at the first failure.
    fn normalize(&mut self) -> Result<(), PayrollError>;

    /// Identity of every record in the payload, in traversal order.
    fn record_ids(&self) -> Vec<Option<&str>>;

    /// Render the payload as the outbound XML document.
    fn write_xml(&self) -> Result<String, PayrollError>;
}

impl<R: Resource> Body for Vec<R> {
    const KEY: &'static str = R::COLLECTION;

    fn normalize(&mut self) -> Result<(), PayrollError> {
        normalize_records(self)
    }

    fn record_ids(&self) -> Vec<Option<&str>> {
        self.iter().map(Schema::id).collect()
    }

    fn write_xml(&self) -> Result<String, PayrollError> {
        let views = self.iter().map(|record| record.xml_view()).collect();
        render(Self::KEY, &Elements::new(R::ELEMENT, views))
    }
}

const DATE_TIME_UTC: &str = "DateTimeUTC";

/// A named collection plus response metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope<B> {
    pub id: Option<String>,
    pub status: Option<String>,
    pub provider_name: Option<String>,
    pub date_time_utc: Option<String>,
    pub body: B,
}

impl<B> Envelope<B> {
    /// An outbound envelope with no metadata.
    pub fn new(body: B) -> Self {
        Self {
            id: None,
            status: None,
            provider_name: None,
            date_time_utc: None,
            body,
        }
    }
}

impl<R> Envelope<Vec<R>> {
    pub fn single(record: R) -> Self {
        Self::new(vec![record])
    }

    pub fn records(&self) -> &[R] {
        &self.body
    }

    pub fn into_records(self) -> Vec<R> {
        self.body
    }
}

impl<B: Body> Envelope<B> {
    /// Rewrite the envelope's own timestamp, then every record's.
    pub fn normalize(&mut self) -> Result<(), PayrollError> {
        normalize_slot(DATE_TIME_UTC, false, &mut self.date_time_utc)?;
        self.body.normalize()
    }

    pub fn record_count(&self) -> usize {
        self.body.record_ids().len()
    }

    /// Outbound XML document. Metadata is response-only and not written.
    pub fn to_xml(&self) -> Result<String, PayrollError> {
        self.body.write_xml()
    }
}

/// Parse a JSON response and normalize its timestamps.
pub fn decode<B: Body>(bytes: &[u8]) -> Result<Envelope<B>, PayrollError> {
    let mut envelope: Envelope<B> = serde_json::from_slice(bytes)?;
    envelope.normalize()?;
    Ok(envelope)
}

impl<'de, B: Body> Deserialize<'de> for Envelope<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EnvelopeVisitor(PhantomData))
    }
}

struct EnvelopeVisitor<B>(PhantomData<B>);

impl<'de, B: Body> Visitor<'de> for EnvelopeVisitor<B> {
    type Value = Envelope<B>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an envelope holding {}", B::KEY)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut envelope = Envelope::new(B::default());
        let mut seen_body = false;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "Id" => envelope.id = map.next_value()?,
                "Status" => envelope.status = map.next_value()?,
                "ProviderName" => envelope.provider_name = map.next_value()?,
                DATE_TIME_UTC => envelope.date_time_utc = map.next_value()?,
                k if k == B::KEY => {
                    if seen_body {
                        return Err(de::Error::duplicate_field(B::KEY));
                    }
                    // `null` reads as an empty payload.
                    envelope.body = map.next_value::<Option<B>>()?.unwrap_or_default();
                    seen_body = true;
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        EarningsRate, Employee, LeaveType, PayItems, PayItemsEnvelope, PayRun, PayRuns,
        Timesheet, TimesheetLine, Timesheets,
    };

    #[test]
    fn decodes_metadata_and_records() {
        let body = br#"{
            "Id": "8a7b6f2e-1c1d-4e6f-9b0a-3c2d1e0f9a8b",
            "Status": "OK",
            "ProviderName": "Payroll App",
            "DateTimeUTC": "/Date(1365551125000)/",
            "PayRuns": [
                {"PayRunID": "e3bdb2f7-2b20-45e6-ac8d-ec67d17de9f4",
                 "PayRunPeriodStartDate": "/Date(1325376000000+0000)/",
                 "Wages": 25742.29}
            ]
        }"#;
        let envelope: PayRuns = decode(body).unwrap();
        assert_eq!(envelope.status.as_deref(), Some("OK"));
        assert_eq!(envelope.date_time_utc.as_deref(), Some("2013-04-09T23:45:25Z"));
        assert_eq!(envelope.records().len(), 1);
        let run = &envelope.records()[0];
        assert_eq!(
            run.pay_run_period_start_date.as_deref(),
            Some("2012-01-01T00:00:00Z")
        );
        assert_eq!(run.wages, Some(25742.29));
        assert!(run.tax.is_none());
    }

    #[test]
    fn missing_or_null_collection_is_empty() {
        let envelope: PayRuns = decode(br#"{"Status":"OK"}"#).unwrap();
        assert!(envelope.records().is_empty());
        let envelope: PayRuns = decode(br#"{"Status":"OK","PayRuns":null}"#).unwrap();
        assert!(envelope.records().is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let envelope: PayRuns =
            decode(br#"{"Employees":[{"EmployeeID":"x"}],"Extra":{"a":[1,2]}}"#).unwrap();
        assert!(envelope.records().is_empty());
    }

    #[test]
    fn schema_mismatch_is_decode_error() {
        let err = decode::<Vec<PayRun>>(br#"{"PayRuns":{"PayRunID":"x"}}"#).unwrap_err();
        assert!(matches!(err, PayrollError::Decode(_)));
        let err = decode::<Vec<PayRun>>(b"not json").unwrap_err();
        assert!(matches!(err, PayrollError::Decode(_)));
    }

    #[test]
    fn envelope_timestamp_failure_has_no_index() {
        let err = decode::<Vec<PayRun>>(br#"{"DateTimeUTC":"tomorrow","PayRuns":[]}"#)
            .unwrap_err();
        match err {
            PayrollError::MalformedTimestamp { field, index, .. } => {
                assert_eq!(field, "DateTimeUTC");
                assert_eq!(index, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decodes_composite_pay_items() {
        let body = br#"{
            "Status": "OK",
            "PayItems": {
                "EarningsRates": [
                    {"EarningsRateID": "eca71b79-edab-4c3f-967f-a405453bac08",
                     "Name": "Ordinary Hours",
                     "IsExemptFromTax": false,
                     "UpdatedDateUTC": "/Date(1365551125000+0000)/"}
                ],
                "LeaveTypes": [
                    {"LeaveTypeID": "ff4d16da-ae5b-4b14-a0d8-6a2a3a8a2a0f",
                     "UpdatedDateUTC": "/Date(1365551125000+1000)/"}
                ]
            }
        }"#;
        let envelope: PayItemsEnvelope = decode(body).unwrap();
        let rate = &envelope.body.earnings_rates[0];
        assert_eq!(rate.updated_date_utc.as_deref(), Some("2013-04-09T23:45:25Z"));
        assert_eq!(rate.is_exempt_from_tax, Some(false));
        assert!(rate.is_exempt_from_super.is_none());
        assert!(envelope.body.deduction_types.is_empty());
        assert_eq!(
            envelope.body.leave_types[0].updated_date_utc.as_deref(),
            Some("2013-04-09T23:45:25Z")
        );
        assert_eq!(envelope.record_count(), 2);
    }

    #[test]
    fn xml_lists_records_under_collection_root() {
        let envelope = Envelope::new(vec![
            PayRun {
                pay_run_id: Some("e3bdb2f7-2b20-45e6-ac8d-ec67d17de9f4".to_string()),
                pay_run_status: Some("POSTED".to_string()),
                ..PayRun::default()
            },
            PayRun {
                payroll_calendar_id: Some("bfac31bd-ea62-4fc8-a5e7-7965d9504b15".to_string()),
                ..PayRun::default()
            },
        ]);
        let xml = envelope.to_xml().unwrap();
        assert!(xml.starts_with("  <PayRuns>"), "{xml}");
        assert!(xml.trim_end().ends_with("</PayRuns>"), "{xml}");
        assert_eq!(xml.matches("<PayRun>").count(), 2, "{xml}");
        assert!(xml.contains("<PayRunID>e3bdb2f7-2b20-45e6-ac8d-ec67d17de9f4</PayRunID>"));
        assert!(xml.contains("<PayRunStatus>POSTED</PayRunStatus>"));
        assert!(xml.contains("<PayrollCalendarID>bfac31bd-ea62-4fc8-a5e7-7965d9504b15</PayrollCalendarID>"));
        assert!(!xml.contains("Wages"), "absent fields must be omitted: {xml}");
    }

    #[test]
    fn xml_nests_timesheet_lines() {
        let envelope: Timesheets = Envelope::single(Timesheet {
            employee_id: Some("b34e89ff-770d-4099-b7e5-f968767118bc".to_string()),
            start_date: Some("2018-03-25T00:00:00Z".to_string()),
            timesheet_lines: vec![TimesheetLine {
                earnings_rate_id: Some("0daff504-2d42-4243-bdac-24f2bae0ce7c".to_string()),
                number_of_units: vec![8.0, 8.0, 0.0],
                updated_date_utc: None,
            }],
            ..Timesheet::default()
        });
        let xml = envelope.to_xml().unwrap();
        assert!(xml.contains("<Timesheet>"), "{xml}");
        assert!(xml.contains("<TimesheetLines>"), "{xml}");
        assert!(xml.contains("<TimesheetLine>"), "{xml}");
        assert!(xml.contains("<NumberOfUnits>"), "{xml}");
        assert_eq!(xml.matches("<NumberOfUnit>").count(), 3, "{xml}");
        assert!(xml.contains("<StartDate>2018-03-25T00:00:00Z</StartDate>"));
        assert!(!xml.contains("<Hours>"));
    }

    #[test]
    fn xml_wraps_pay_item_sub_collections() {
        let envelope = Envelope::new(PayItems {
            earnings_rates: vec![EarningsRate {
                name: Some("Ordinary Hours".to_string()),
                is_exempt_from_tax: Some(false),
                ..EarningsRate::default()
            }],
            leave_types: vec![LeaveType {
                name: Some("Annual Leave".to_string()),
                ..LeaveType::default()
            }],
            ..PayItems::default()
        });
        let xml = envelope.to_xml().unwrap();
        assert!(xml.starts_with("  <PayItems>"), "{xml}");
        assert!(xml.contains("<EarningsRates>"), "{xml}");
        assert!(xml.contains("<EarningsRate>"), "{xml}");
        assert!(xml.contains("<IsExemptFromTax>false</IsExemptFromTax>"), "{xml}");
        assert!(xml.contains("<LeaveTypes>"), "{xml}");
        assert!(!xml.contains("DeductionTypes"), "{xml}");
    }

    #[test]
    fn xml_escapes_text() {
        let envelope = Envelope::single(Employee {
            first_name: Some("Ben & <Jerry>".to_string()),
            ..Employee::default()
        });
        let xml = envelope.to_xml().unwrap();
        assert!(xml.contains("Ben &amp; &lt;Jerry"), "{xml}");
    }
}
