//! Gateway operations against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation over real HTTP through a ureq-backed `Provider`. The server's
//! request journal is checked to confirm what actually went over the wire.

use std::net::SocketAddr;

use chrono::{TimeZone, Utc};
use mock_server::{seed, MockState};
use pretty_assertions::assert_eq;
use xero_payroll::{
    Employees, EarningsRate, Envelope, Headers, PayItemsEnvelope, PayRun, PayRuns,
    PayrollCalendars, PayrollClient, PayrollConfig, PayrollError, Provider, QueryParams,
    Timesheet, TimesheetLine, Timesheets, TransportError, DAY_ZERO,
};

struct Session {
    token: Option<String>,
}

impl Session {
    fn authorized() -> Self {
        Self {
            token: Some("integration-token".to_string()),
        }
    }
}

/// Executes provider calls with ureq. Non-2xx statuses surface as errors.
struct UreqProvider {
    agent: ureq::Agent,
    base_url: String,
}

impl UreqProvider {
    fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(true)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.to_string(),
        }
    }
}

fn read_body(
    result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> Result<Vec<u8>, TransportError> {
    let mut response = result.map_err(TransportError::new)?;
    response.body_mut().read_to_vec().map_err(TransportError::new)
}

macro_rules! with_headers {
    ($request:expr, $session:expr, $headers:expr) => {{
        let mut request = $request;
        if let Some(token) = &$session.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        for (name, value) in $headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request
    }};
}

impl Provider for UreqProvider {
    type Session = Session;

    fn create(
        &self,
        session: &Session,
        resource_name: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        let url = xero_payroll::join_url(&self.base_url, resource_name);
        let request = with_headers!(self.agent.post(&url), session, headers);
        read_body(request.send(body))
    }

    fn update(
        &self,
        session: &Session,
        url: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        let request = with_headers!(self.agent.put(url), session, headers);
        read_body(request.send(body))
    }

    fn find(
        &self,
        session: &Session,
        url: &str,
        headers: &Headers,
        query: &QueryParams,
    ) -> Result<Vec<u8>, TransportError> {
        let mut request = with_headers!(self.agent.get(url), session, headers);
        for (key, value) in query {
            request = request.query(key, value);
        }
        read_body(request.call())
    }
}

fn start_server(state: MockState) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, state).await
        })
        .unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> PayrollClient<UreqProvider> {
    let base = format!("http://{addr}{}", mock_server::BASE_PATH);
    PayrollClient::with_config(UreqProvider::new(&base), PayrollConfig::new(&base))
}

#[test]
fn reads_normalize_every_resource() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));
    let session = Session::authorized();
    let all = QueryParams::new();

    let runs: PayRuns = client.find_all(&session, &all).unwrap();
    assert_eq!(runs.status.as_deref(), Some("OK"));
    assert!(runs.date_time_utc.as_deref().unwrap().ends_with('Z'));
    assert_eq!(runs.records().len(), 2);
    assert_eq!(
        runs.records()[0].payment_date.as_deref(),
        Some("2012-01-09T00:00:00Z")
    );
    assert_eq!(runs.records()[0].super_, Some(108.0));

    let employees: Employees = client.find_all(&session, &all).unwrap();
    assert_eq!(
        employees.records()[0].date_of_birth.as_deref(),
        Some("1980-03-10T00:00:00Z")
    );

    let calendars: PayrollCalendars = client.find_all(&session, &all).unwrap();
    assert_eq!(
        calendars.records()[0].payment_date.as_deref(),
        Some("2012-01-08T00:00:00Z")
    );

    let sheets: Timesheets = client.find_all(&session, &all).unwrap();
    let line = &sheets.records()[0].timesheet_lines[0];
    assert_eq!(line.updated_date_utc.as_deref(), Some("2018-03-25T00:00:00Z"));
    assert_eq!(sheets.records()[0].total_units(), 16.0);

    let journal = state.blocking_requests();
    assert_eq!(journal.len(), 4);
    for request in &journal {
        assert_eq!(request.method, "GET");
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("if-modified-since"), None);
    }
}

#[test]
fn find_pay_item_by_identity() {
    let client = client_for(start_server(MockState::default()));

    let items: PayItemsEnvelope = client
        .find(&Session::authorized(), seed::EARNINGS_RATE_ID)
        .unwrap();
    let rates = &items.body.earnings_rates;
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].updated_date_utc.as_deref(), Some("2013-04-09T23:45:25Z"));
    assert!(items.body.leave_types.is_empty());
}

#[test]
fn find_modified_since_sends_header_and_filters() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));

    let since = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
    let runs: PayRuns = client
        .find_modified_since(&Session::authorized(), &since, &QueryParams::new())
        .unwrap();
    assert_eq!(runs.records().len(), 1);
    assert_eq!(runs.records()[0].pay_run_id.as_deref(), Some(seed::DRAFT_PAY_RUN_ID));

    let everything: PayRuns = client
        .find_modified_since(&Session::authorized(), &DAY_ZERO, &QueryParams::new())
        .unwrap();
    assert_eq!(everything.records().len(), 2);

    let journal = state.blocking_requests();
    assert_eq!(journal[0].header("if-modified-since"), Some("2018-01-01T00:00:00Z"));
    assert_eq!(journal[1].header("if-modified-since"), None);
}

#[test]
fn query_parameters_are_forwarded() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));

    let mut query = QueryParams::new();
    query.insert("where".to_string(), "Status==\"ACTIVE\"".to_string());
    query.insert("page".to_string(), "1".to_string());
    let _: Employees = client.find_all(&Session::authorized(), &query).unwrap();

    let journal = state.blocking_requests();
    assert_eq!(journal[0].query, query);
}

#[test]
fn create_sends_xml_and_decodes_json_reply() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));

    let sheet = Timesheet {
        employee_id: Some(seed::EMPLOYEE_ID.to_string()),
        start_date: Some("2018-03-18T00:00:00Z".to_string()),
        timesheet_lines: vec![TimesheetLine {
            earnings_rate_id: Some(seed::EARNINGS_RATE_ID.to_string()),
            number_of_units: vec![8.0, 4.0],
            ..TimesheetLine::default()
        }],
        ..Timesheet::default()
    };
    let created = client
        .create(&Session::authorized(), &Envelope::single(sheet))
        .unwrap();
    assert_eq!(
        created.records()[0].timesheet_id.as_deref(),
        Some(seed::TIMESHEET_ID)
    );

    let journal = state.blocking_requests();
    assert_eq!(journal.len(), 1);
    let request = &journal[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/payroll.xro/1.0/Timesheets");
    assert_eq!(request.header("content-type"), Some("application/xml"));
    assert_eq!(request.header("accept"), Some("application/json"));
    assert!(request.body.starts_with("  <Timesheets>"), "{}", request.body);
    assert!(request.body.contains("<TimesheetLines>"));
    assert!(request.body.contains("<NumberOfUnit>"));
    assert!(request.body.contains(seed::EMPLOYEE_ID));
}

#[test]
fn update_puts_to_record_url() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));

    let run = PayRun {
        pay_run_id: Some(seed::POSTED_PAY_RUN_ID.to_string()),
        pay_run_status: Some("POSTED".to_string()),
        ..PayRun::default()
    };
    let updated = client
        .update(&Session::authorized(), &Envelope::single(run))
        .unwrap();
    assert_eq!(updated.record_count(), 1);

    let journal = state.blocking_requests();
    assert_eq!(journal[0].method, "PUT");
    assert_eq!(
        journal[0].path,
        format!("/payroll.xro/1.0/PayRuns/{}", seed::POSTED_PAY_RUN_ID)
    );
}

#[test]
fn update_pay_item_addresses_pay_items_endpoint() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));

    let mut items = PayItemsEnvelope::default();
    items.body.earnings_rates.push(EarningsRate {
        earnings_rate_id: Some(seed::EARNINGS_RATE_ID.to_string()),
        name: Some("Ordinary Hours".to_string()),
        ..EarningsRate::default()
    });
    let updated = client.update(&Session::authorized(), &items).unwrap();
    assert_eq!(updated.body.earnings_rates.len(), 1);

    let journal = state.blocking_requests();
    assert_eq!(
        journal[0].path,
        format!("/payroll.xro/1.0/PayItems/{}", seed::EARNINGS_RATE_ID)
    );
    assert!(journal[0].body.contains("<EarningsRates>"));
}

#[test]
fn update_with_two_records_never_reaches_server() {
    let state = MockState::default();
    let client = client_for(start_server(state.clone()));

    let runs = Envelope::new(vec![
        PayRun {
            pay_run_id: Some(seed::POSTED_PAY_RUN_ID.to_string()),
            ..PayRun::default()
        },
        PayRun {
            pay_run_id: Some(seed::DRAFT_PAY_RUN_ID.to_string()),
            ..PayRun::default()
        },
    ]);
    let err = client.update(&Session::authorized(), &runs).unwrap_err();
    assert!(matches!(err, PayrollError::InvalidArgument(_)), "{err}");
    assert!(state.blocking_requests().is_empty());
}

#[test]
fn missing_token_is_a_transport_error() {
    let client = client_for(start_server(MockState::default()));

    let err = client
        .find_all::<Vec<PayRun>>(&Session { token: None }, &QueryParams::new())
        .unwrap_err();
    assert!(matches!(err, PayrollError::Transport(_)), "{err}");
}

#[test]
fn unknown_identity_is_a_transport_error() {
    let client = client_for(start_server(MockState::default()));

    let err = client
        .find::<Vec<PayRun>>(
            &Session::authorized(),
            "00000000-0000-0000-0000-000000000000",
        )
        .unwrap_err();
    assert!(matches!(err, PayrollError::Transport(_)), "{err}");
}
