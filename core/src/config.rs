//! Client configuration.

use std::env;

use serde::{Deserialize, Deserializer};

use crate::provider::join_url;

/// Base URL of the upstream payroll API.
pub const DEFAULT_BASE_URL: &str = "https://api.xero.com/payroll.xro/1.0";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "XERO_PAYROLL_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    #[serde(deserialize_with = "trimmed_url")]
    pub base_url: String,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PayrollConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read `XERO_PAYROLL_URL`, falling back to the public endpoint.
    pub fn from_env() -> Self {
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// Absolute URL of `path` below the base.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn trimmed_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let url = String::deserialize(deserializer)?;
    Ok(url.trim_end_matches('/').to_string())
}
