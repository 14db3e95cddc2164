use std::path::PathBuf;

use crate::utils::error::ExportError;

pub const DEFAULT_DIGITS: u32 = 6;

/// One usable token from the export. `name` and `secret` are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub name: String,
    pub issuer: Option<String>,
    pub secret: String,
    pub digits: u32,
}

impl TokenRecord {
    pub fn new(name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issuer: None,
            secret: secret.into(),
            digits: DEFAULT_DIGITS,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        self.issuer = if issuer.is_empty() { None } else { Some(issuer) };
        self
    }

    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }
}

/// A rendered URI plus the raw token name it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriRecord {
    pub uri: String,
    pub display_name: String,
}

#[derive(Debug)]
pub struct RecordFailure {
    pub display_name: String,
    pub error: ExportError,
}

/// Outcome of the load phase. Failures are per record and never abort the batch.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<RecordFailure>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug)]
pub struct ExportReport {
    pub uris: Vec<UriRecord>,
    pub load: LoadReport,
}
