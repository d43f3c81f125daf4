//! Generic CRUD gateway over the payroll endpoints.
//!
//! # Design
//! `PayrollClient` holds a provider and an immutable config, nothing else.
//! Each operation is generic over the envelope body, so one implementation
//! serves every resource kind:
//!
//! ```ignore
//! let runs: PayRuns = client.find_all(&session, &QueryParams::new())?;
//! let sheet: Timesheets = client.find(&session, "5e493b2e-c3ed-4172-95b2-593438101f76")?;
//! ```
//!
//! Reads send `Accept: application/json`. Writes additionally send
//! `Content-Type: application/xml`: the upstream accepts XML but answers
//! in JSON. Every response goes through the same decode-and-normalize path.

use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::envelope::{decode, Body, Envelope};
use crate::error::PayrollError;
use crate::provider::{Headers, Provider, QueryParams};
use crate::timestamp::{if_modified_since, DAY_ZERO};

const ACCEPT: &str = "Accept";
const CONTENT_TYPE: &str = "Content-Type";
const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
const JSON: &str = "application/json";
const XML: &str = "application/xml";

#[derive(Debug, Clone)]
pub struct PayrollClient<P> {
    provider: P,
    config: PayrollConfig,
}

impl<P: Provider> PayrollClient<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, PayrollConfig::default())
    }

    pub fn with_config(provider: P, config: PayrollConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Create every record in `envelope`.
    pub fn create<B: Body>(
        &self,
        session: &P::Session,
        envelope: &Envelope<B>,
    ) -> Result<Envelope<B>, PayrollError> {
        let body = envelope.to_xml()?;
        debug!(resource = B::KEY, records = envelope.record_count(), "creating payroll records");
        let bytes = self
            .provider
            .create(session, B::KEY, &write_headers(), body.as_bytes())?;
        parse_response(B::KEY, &bytes)
    }

    /// Update the single record in `envelope`, addressed by its identity.
    ///
    /// Fails before any network call unless the envelope holds exactly one
    /// record with a UUID identity.
    pub fn update<B: Body>(
        &self,
        session: &P::Session,
        envelope: &Envelope<B>,
    ) -> Result<Envelope<B>, PayrollError> {
        let id = sole_identity(envelope)?;
        let url = self.config.endpoint(&format!("{}/{id}", B::KEY));
        let body = envelope.to_xml()?;
        debug!(resource = B::KEY, %url, "updating payroll record");
        let bytes = self
            .provider
            .update(session, &url, &write_headers(), body.as_bytes())?;
        parse_response(B::KEY, &bytes)
    }

    /// Fetch one record by identity.
    pub fn find<B: Body>(&self, session: &P::Session, id: &str) -> Result<Envelope<B>, PayrollError> {
        let path = format!("{}/{id}", B::KEY);
        debug!(resource = B::KEY, %path, "finding payroll record");
        let bytes = self.provider.find_with_endpoint(
            session,
            &self.config.base_url,
            &path,
            &read_headers(),
            &QueryParams::new(),
        )?;
        parse_response(B::KEY, &bytes)
    }

    /// Fetch every record, filtered only by `query`.
    pub fn find_all<B: Body>(
        &self,
        session: &P::Session,
        query: &QueryParams,
    ) -> Result<Envelope<B>, PayrollError> {
        self.find_modified_since(session, &DAY_ZERO, query)
    }

    /// Fetch records changed since `since`. `DAY_ZERO` means no lower bound.
    pub fn find_modified_since<B: Body>(
        &self,
        session: &P::Session,
        since: &DateTime<Utc>,
        query: &QueryParams,
    ) -> Result<Envelope<B>, PayrollError> {
        let mut headers = read_headers();
        if let Some(value) = if_modified_since(since) {
            headers.push((IF_MODIFIED_SINCE.to_string(), value));
        }
        debug!(resource = B::KEY, params = query.len(), "finding payroll records");
        let bytes = self.provider.find_with_endpoint(
            session,
            &self.config.base_url,
            B::KEY,
            &headers,
            query,
        )?;
        parse_response(B::KEY, &bytes)
    }
}

fn read_headers() -> Headers {
    vec![(ACCEPT.to_string(), JSON.to_string())]
}

fn write_headers() -> Headers {
    vec![
        (ACCEPT.to_string(), JSON.to_string()),
        (CONTENT_TYPE.to_string(), XML.to_string()),
    ]
}

fn sole_identity<B: Body>(envelope: &Envelope<B>) -> Result<String, PayrollError> {
    let ids = envelope.body.record_ids();
    let [id] = ids.as_slice() else {
        return Err(PayrollError::InvalidArgument(format!(
            "update takes exactly one {} record, got {}",
            B::KEY,
            ids.len()
        )));
    };
    let id = (*id).ok_or_else(|| {
        PayrollError::InvalidArgument(format!("{} record has no identity to update", B::KEY))
    })?;
    Uuid::parse_str(id)
        .map_err(|_| PayrollError::InvalidArgument(format!("{id:?} is not a valid identity")))?;
    Ok(id.to_string())
}

fn parse_response<B: Body>(resource: &str, bytes: &[u8]) -> Result<Envelope<B>, PayrollError> {
    trace!(resource, body = %String::from_utf8_lossy(bytes), "payroll response");
    decode(bytes).inspect_err(|e| warn!(resource, error = %e, "rejecting payroll response"))
}
