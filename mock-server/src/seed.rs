//! Fixture records served by a fresh [`MockState`](crate::MockState).
//!
//! Timestamps carry the legacy `/Date(ms+0000)/` encoding the upstream
//! service emits.

use std::collections::BTreeMap;

use serde_json::{json, Value};

pub const EMPLOYEE_ID: &str = "b34e89ff-770d-4099-b7e5-f968767118bc";
pub const EARNINGS_RATE_ID: &str = "eca71b79-edab-4c3f-967f-a405453bac08";
pub const PAYROLL_CALENDAR_ID: &str = "bfac31bd-ea62-4fc8-a5e7-7965d9504b15";
pub const POSTED_PAY_RUN_ID: &str = "e3bdb2f7-2b20-45e6-ac8d-ec67d17de9f4";
pub const DRAFT_PAY_RUN_ID: &str = "8d3a2f2d-8c0f-4a4e-9a4b-5d6f0e7a1c93";
pub const TIMESHEET_ID: &str = "5e493b2e-c3ed-4172-95b2-593438101f76";

pub fn collections() -> BTreeMap<String, Value> {
    let mut data = BTreeMap::new();
    data.insert("Employees".to_string(), employees());
    data.insert("PayItems".to_string(), pay_items());
    data.insert("PayrollCalendars".to_string(), payroll_calendars());
    data.insert("PayRuns".to_string(), pay_runs());
    data.insert("Timesheets".to_string(), timesheets());
    data
}

fn employees() -> Value {
    json!([
        {
            "EmployeeID": EMPLOYEE_ID,
            "Status": "ACTIVE",
            "FirstName": "Karen",
            "LastName": "Jones",
            "Email": "karen.jones@example.com",
            "DateOfBirth": "/Date(321494400000+0000)/",
            "Gender": "F",
            "StartDate": "/Date(1325376000000+0000)/",
            "OrdinaryEarningsRateID": EARNINGS_RATE_ID,
            "PayrollCalendarID": PAYROLL_CALENDAR_ID,
            "UpdatedDateUTC": "/Date(1365551125000+0000)/"
        }
    ])
}

fn pay_items() -> Value {
    json!({
        "EarningsRates": [
            {
                "EarningsRateID": EARNINGS_RATE_ID,
                "Name": "Ordinary Hours",
                "EarningsType": "ORDINARYTIMEEARNINGS",
                "RateType": "RATEPERUNIT",
                "AccountCode": "477",
                "TypeOfUnits": "Hours",
                "IsExemptFromTax": false,
                "IsExemptFromSuper": false,
                "UpdatedDateUTC": "/Date(1365551125000+0000)/"
            }
        ],
        "DeductionTypes": [
            {
                "DeductionTypeID": "727af5e8-b347-4ae7-85fc-9b82266d0aec",
                "Name": "Union Fees",
                "AccountCode": "850",
                "ReducesTax": false,
                "ReducesSuper": false,
                "UpdatedDateUTC": "/Date(1326067200000+0000)/"
            }
        ],
        "ReimbursementTypes": [
            {
                "ReimbursementTypeID": "aa8cfa40-d872-4be0-8a94-bb7f00962f74",
                "Name": "Travel Costs",
                "AccountCode": "493",
                "UpdatedDateUTC": "/Date(1326067200000+0000)/"
            }
        ],
        "LeaveTypes": [
            {
                "LeaveTypeID": "fbcc9dab-6238-43d9-a3ec-9d4ac1ec3c3c",
                "Name": "Annual Leave",
                "TypeOfUnits": "Hours",
                "NormalEntitlement": 152.0,
                "IsPaidLeave": true,
                "ShowOnPayslip": true,
                "UpdatedDateUTC": "/Date(1326067200000+0000)/"
            }
        ]
    })
}

fn payroll_calendars() -> Value {
    json!([
        {
            "PayrollCalendarID": PAYROLL_CALENDAR_ID,
            "Name": "Weekly",
            "CalendarType": "WEEKLY",
            "StartDate": "/Date(1325376000000+0000)/",
            "PaymentDate": "/Date(1325980800000+0000)/",
            "UpdatedDateUTC": "/Date(1326067200000+0000)/"
        }
    ])
}

fn pay_runs() -> Value {
    json!([
        {
            "PayRunID": POSTED_PAY_RUN_ID,
            "PayrollCalendarID": PAYROLL_CALENDAR_ID,
            "PayRunPeriodStartDate": "/Date(1325376000000+0000)/",
            "PayRunPeriodEndDate": "/Date(1325894400000+0000)/",
            "PayRunStatus": "POSTED",
            "PaymentDate": "/Date(1326067200000+0000)/",
            "Wages": 1200.0,
            "Deductions": 0.0,
            "Tax": 240.0,
            "Super": 108.0,
            "Reimbursement": 0.0,
            "NetPay": 960.0,
            "UpdatedDateUTC": "/Date(1326067200000+0000)/"
        },
        {
            "PayRunID": DRAFT_PAY_RUN_ID,
            "PayrollCalendarID": PAYROLL_CALENDAR_ID,
            "PayRunPeriodStartDate": "/Date(1521331200000+0000)/",
            "PayRunPeriodEndDate": "/Date(1521849600000+0000)/",
            "PayRunStatus": "DRAFT",
            "PaymentDate": "/Date(1521936000000+0000)/",
            "UpdatedDateUTC": "/Date(1521936000000+0000)/"
        }
    ])
}

fn timesheets() -> Value {
    json!([
        {
            "TimesheetID": TIMESHEET_ID,
            "EmployeeID": EMPLOYEE_ID,
            "StartDate": "/Date(1521331200000+0000)/",
            "EndDate": "/Date(1521849600000+0000)/",
            "Status": "DRAFT",
            "Hours": 16.0,
            "TimesheetLines": [
                {
                    "EarningsRateID": EARNINGS_RATE_ID,
                    "NumberOfUnits": [8.0, 8.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                    "UpdatedDateUTC": "/Date(1521936000000+0000)/"
                }
            ],
            "UpdatedDateUTC": "/Date(1521936000000+0000)/"
        }
    ])
}
