//! In-memory stand-in for the Xero payroll endpoints.
//!
//! Reads answer with seeded JSON records wrapped in the upstream envelope.
//! Writes are accepted as opaque XML, journaled, and answered with the
//! stored records of the addressed resource. Every request needs an
//! `Authorization` header.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub mod seed;

pub const BASE_PATH: &str = "/payroll.xro/1.0";
pub const PROVIDER_NAME: &str = "xero-payroll mock";

const PAY_ITEMS: &str = "PayItems";

/// A request as the server saw it.
#[derive(Clone, Debug, Serialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Default)]
struct Store {
    collections: BTreeMap<String, Value>,
    journal: Vec<RecordedRequest>,
}

/// Shared server state. Clones share the same store.
#[derive(Clone, Debug)]
pub struct MockState {
    store: Arc<RwLock<Store>>,
}

impl Default for MockState {
    fn default() -> Self {
        Self::with_collections(seed::collections())
    }
}

impl MockState {
    pub fn with_collections(collections: BTreeMap<String, Value>) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                collections,
                journal: Vec::new(),
            })),
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.store.read().await.journal.clone()
    }

    /// Journal snapshot for callers outside any async runtime.
    pub fn blocking_requests(&self) -> Vec<RecordedRequest> {
        self.store.blocking_read().journal.clone()
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route(
            &format!("{BASE_PATH}/{{resource}}"),
            get(list).post(write_collection).put(write_collection),
        )
        .route(
            &format!("{BASE_PATH}/{{resource}}/{{id}}"),
            get(find).post(write_record).put(write_record),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn list(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(resource): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    if let Err(rejected) = admit(&state, &method, &uri, &headers, query, String::new()).await {
        return rejected;
    }
    let since = modified_since(&headers);
    let store = state.store.read().await;
    let Some(records) = store.collections.get(&resource) else {
        return not_found(&resource);
    };
    let body = match since {
        Some(since) => filter_modified(records, since),
        None => records.clone(),
    };
    tracing::info!(%resource, "listed records");
    envelope(&resource, body)
}

async fn find(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    if let Err(rejected) = admit(&state, &method, &uri, &headers, query, String::new()).await {
        return rejected;
    }
    let store = state.store.read().await;
    match store
        .collections
        .get(&resource)
        .and_then(|records| select(&resource, records, &id))
    {
        Some(body) => {
            tracing::info!(%resource, %id, "found record");
            envelope(&resource, body)
        }
        None => not_found(&format!("{resource}/{id}")),
    }
}

async fn write_collection(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path(resource): Path<String>,
    body: String,
) -> Response {
    if let Err(rejected) = admit(&state, &method, &uri, &headers, BTreeMap::new(), body).await {
        return rejected;
    }
    if !is_xml(&headers) {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "writes take application/xml").into_response();
    }
    let store = state.store.read().await;
    match store.collections.get(&resource) {
        Some(records) => {
            tracing::info!(%resource, "accepted write");
            envelope(&resource, records.clone())
        }
        None => not_found(&resource),
    }
}

async fn write_record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
    body: String,
) -> Response {
    if let Err(rejected) = admit(&state, &method, &uri, &headers, BTreeMap::new(), body).await {
        return rejected;
    }
    if !is_xml(&headers) {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "writes take application/xml").into_response();
    }
    let store = state.store.read().await;
    match store
        .collections
        .get(&resource)
        .and_then(|records| select(&resource, records, &id))
    {
        Some(body) => {
            tracing::info!(%resource, %id, "accepted write");
            envelope(&resource, body)
        }
        None => not_found(&format!("{resource}/{id}")),
    }
}

/// Journal the request, then reject it unless it carries credentials.
async fn admit(
    state: &MockState,
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    query: BTreeMap<String, String>,
    body: String,
) -> Result<(), Response> {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        query,
        body,
    };
    state.store.write().await.journal.push(recorded);

    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    if authorized {
        Ok(())
    } else {
        tracing::info!(path = uri.path(), "rejected unauthenticated request");
        Err((StatusCode::UNAUTHORIZED, "missing bearer token").into_response())
    }
}

fn is_xml(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/xml") || v.starts_with("text/xml"))
}

fn envelope(resource: &str, body: Value) -> Response {
    let mut map = Map::new();
    map.insert("Id".to_string(), json!(Uuid::new_v4()));
    map.insert("Status".to_string(), json!("OK"));
    map.insert("ProviderName".to_string(), json!(PROVIDER_NAME));
    map.insert("DateTimeUTC".to_string(), json!(legacy(Utc::now())));
    map.insert(resource.to_string(), body);
    (StatusCode::OK, Json(Value::Object(map))).into_response()
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
}

fn legacy(at: DateTime<Utc>) -> String {
    format!("/Date({}+0000)/", at.timestamp_millis())
}

fn modified_since(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let raw = headers.get(header::IF_MODIFIED_SINCE)?.to_str().ok()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Milliseconds encoded in a `/Date(ms[±HHMM])/` value.
fn legacy_millis(raw: &str) -> Option<i64> {
    let inner = raw.strip_prefix("/Date(")?.strip_suffix(")/")?;
    let end = inner
        .char_indices()
        .skip(1)
        .find(|(_, c)| *c == '+' || *c == '-')
        .map_or(inner.len(), |(i, _)| i);
    inner[..end].parse().ok()
}

fn identity_field(collection: &str) -> Option<&'static str> {
    match collection {
        "Employees" => Some("EmployeeID"),
        "PayRuns" => Some("PayRunID"),
        "PayrollCalendars" => Some("PayrollCalendarID"),
        "Timesheets" => Some("TimesheetID"),
        "EarningsRates" => Some("EarningsRateID"),
        "DeductionTypes" => Some("DeductionTypeID"),
        "ReimbursementTypes" => Some("ReimbursementTypeID"),
        "LeaveTypes" => Some("LeaveTypeID"),
        _ => None,
    }
}

// Records without a readable UpdatedDateUTC are always returned.
fn filter_modified(records: &Value, since: DateTime<Utc>) -> Value {
    let cutoff = since.timestamp_millis();
    let keep = |record: &&Value| {
        record
            .get("UpdatedDateUTC")
            .and_then(Value::as_str)
            .and_then(legacy_millis)
            .is_none_or(|ms| ms >= cutoff)
    };
    match records {
        Value::Array(items) => Value::Array(items.iter().filter(keep).cloned().collect()),
        Value::Object(groups) => Value::Object(
            groups
                .iter()
                .map(|(name, items)| (name.clone(), filter_modified(items, since)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// The body a single-record lookup answers with, or `None` if no record
/// has identity `id`.
fn select(collection: &str, records: &Value, id: &str) -> Option<Value> {
    if collection == PAY_ITEMS {
        let groups = records.as_object()?;
        return groups.iter().find_map(|(name, items)| {
            let hit = select(name, items, id)?;
            let mut body = Map::new();
            body.insert(name.clone(), hit);
            Some(Value::Object(body))
        });
    }
    let field = identity_field(collection)?;
    let hit = records
        .as_array()?
        .iter()
        .find(|record| record.get(field).and_then(Value::as_str) == Some(id))?;
    Some(Value::Array(vec![hit.clone()]))
}
