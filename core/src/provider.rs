//! The transport seam.
//!
//! # Design
//! The client never opens a socket. A `Provider` owns the HTTP stack and
//! the OAuth session and exchanges raw bytes with the upstream; the
//! gateway only builds headers, bodies and URLs and interprets the bytes
//! that come back. Status codes are the provider's business: a provider
//! that sees a 4xx/5xx returns `Err(TransportError)`.

use std::collections::BTreeMap;

use crate::error::TransportError;

/// Request headers in send order.
pub type Headers = Vec<(String, String)>;

/// Query-string parameters, forwarded verbatim.
pub type QueryParams = BTreeMap<String, String>;

/// Executes requests against the upstream payroll service.
///
/// Implementations must be safe to share if the client is shared; the
/// client itself holds no per-call state.
pub trait Provider {
    /// Authenticated session handle passed through on every call.
    type Session;

    /// POST a new resource. `resource_name` is the collection, e.g. `PayRuns`.
    fn create(
        &self,
        session: &Self::Session,
        resource_name: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError>;

    /// PUT to an absolute resource URL.
    fn update(
        &self,
        session: &Self::Session,
        url: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError>;

    /// GET an absolute URL.
    fn find(
        &self,
        session: &Self::Session,
        url: &str,
        headers: &Headers,
        query: &QueryParams,
    ) -> Result<Vec<u8>, TransportError>;

    /// GET `path` relative to `base_url`.
    fn find_with_endpoint(
        &self,
        session: &Self::Session,
        base_url: &str,
        path: &str,
        headers: &Headers,
        query: &QueryParams,
    ) -> Result<Vec<u8>, TransportError> {
        self.find(session, &join_url(base_url, path), headers, query)
    }
}

impl<P: Provider + ?Sized> Provider for &P {
    type Session = P::Session;

    fn create(
        &self,
        session: &Self::Session,
        resource_name: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        (**self).create(session, resource_name, headers, body)
    }

    fn update(
        &self,
        session: &Self::Session,
        url: &str,
        headers: &Headers,
        body: &[u8],
    ) -> Result<Vec<u8>, TransportError> {
        (**self).update(session, url, headers, body)
    }

    fn find(
        &self,
        session: &Self::Session,
        url: &str,
        headers: &Headers,
        query: &QueryParams,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).find(session, url, headers, query)
    }

    fn find_with_endpoint(
        &self,
        session: &Self::Session,
        base_url: &str,
        path: &str,
        headers: &Headers,
        query: &QueryParams,
    ) -> Result<Vec<u8>, TransportError> {
        (**self).find_with_endpoint(session, base_url, path, headers, query)
    }
}

/// Join a base URL and a path with exactly one `/` between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
