//! Typed client core for the Xero payroll API.
//!
//! # Overview
//! The crate never opens a socket. Callers supply a [`Provider`] that
//! executes authenticated HTTP calls; this crate builds the addresses and
//! headers, renders outbound XML, and decodes the JSON answers into typed
//! envelopes with every timestamp rewritten to RFC3339 UTC.
//!
//! # Design
//! - [`PayrollClient`] is one generic gateway. The body type selects the
//!   endpoint, envelope key and XML root, so there is no per-resource client.
//! - Record types declare their timestamp fields in a static table
//!   ([`Schema::TIMESTAMPS`]) that a single normalizer walks.
//! - Wire names stay PascalCase on the Rust types via serde renames.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod provider;
pub mod schema;
pub mod timestamp;
pub mod types;
mod xml;

pub use client::PayrollClient;
pub use config::PayrollConfig;
pub use envelope::{decode, Body, Envelope};
pub use error::{MalformedTimestamp, PayrollError, TransportError};
pub use provider::{join_url, Headers, Provider, QueryParams};
pub use schema::{Resource, ResourceKind, Schema, TimestampField};
pub use timestamp::{from_interchange, if_modified_since, to_interchange, DAY_ZERO};
pub use types::*;
