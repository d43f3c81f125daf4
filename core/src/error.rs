//! Error types for the payroll client.
//!
//! # Design
//! Every gateway operation returns `PayrollError`. Timestamp failures carry
//! the wire field name and the index of the top-level record they were
//! found in, so a caller can point at the offending record without
//! re-parsing the response. Provider failures are wrapped in
//! `TransportError` and forwarded untouched; this layer never looks at
//! HTTP status codes.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// A legacy or interchange timestamp that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed timestamp {raw:?}: {reason}")]
pub struct MalformedTimestamp {
    pub raw: String,
    pub reason: &'static str,
}

impl MalformedTimestamp {
    pub(crate) fn new(raw: &str, reason: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            reason,
        }
    }
}

/// Opaque failure reported by a `Provider` (network, auth, HTTP status).
pub struct TransportError(Box<dyn StdError + Send + Sync>);

impl TransportError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self(err.into())
    }

    /// Recover the error the provider originally produced.
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.0
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransportError").field(&self.0).finish()
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.0)
    }
}

/// Errors returned by `PayrollClient` operations and envelope decoding.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// A timestamp field did not match the legacy encoding.
    #[error("{}: {source}", location(.field, .index))]
    MalformedTimestamp {
        field: String,
        /// Top-level record index; `None` for the envelope's own fields.
        index: Option<usize>,
        #[source]
        source: MalformedTimestamp,
    },

    /// The response body did not match the expected envelope schema.
    #[error("decoding response failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The outbound envelope could not be rendered as XML.
    #[error("encoding request failed: {0}")]
    Encode(String),

    /// The caller passed an envelope the operation cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The provider failed to complete the round trip.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

fn location(field: &str, index: &Option<usize>) -> String {
    match index {
        Some(i) => format!("record {i} field {field}"),
        None => format!("field {field}"),
    }
}

impl PayrollError {
    pub(crate) fn timestamp(field: &str, source: MalformedTimestamp) -> Self {
        PayrollError::MalformedTimestamp {
            field: field.to_string(),
            index: None,
            source,
        }
    }

    /// Tag a timestamp failure with the record it came from, unless an
    /// outer index is already set.
    pub(crate) fn at_index(self, record: usize) -> Self {
        match self {
            PayrollError::MalformedTimestamp {
                field,
                index: None,
                source,
            } => PayrollError::MalformedTimestamp {
                field,
                index: Some(record),
                source,
            },
            other => other,
        }
    }

    /// Qualify a failure raised inside a nested collection, e.g.
    /// `UpdatedDateUTC` at line 2 becomes `TimesheetLines[2].UpdatedDateUTC`.
    pub(crate) fn nested_in(self, collection: &str) -> Self {
        match self {
            PayrollError::MalformedTimestamp {
                field,
                index: Some(inner),
                source,
            } => PayrollError::MalformedTimestamp {
                field: format!("{collection}[{inner}].{field}"),
                index: None,
                source,
            },
            other => other,
        }
    }
}
