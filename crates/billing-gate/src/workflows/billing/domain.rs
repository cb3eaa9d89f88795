use serde::{Deserialize, Serialize};

/// Identifies one object in bucket-addressed storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLocation {
    pub bucket: String,
    pub key: String,
}

impl FileLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// One parsed row of a billing file, positionally interpreted.
///
/// Records live only for the duration of a single parse-and-check loop. The
/// amount is parsed eagerly, so a malformed number aborts the invocation
/// before any rule is consulted for that row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: String,
    pub product_line: String,
    pub date: String,
    pub currency: String,
    pub amount: f64,
}

/// Field-level rules a record can break, listed in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleViolation {
    UnrecognisedProductLine,
    UnrecognisedCurrency,
    BadDateFormat,
}

impl RuleViolation {
    pub const fn label(self) -> &'static str {
        match self {
            RuleViolation::UnrecognisedProductLine => "unrecognised_product_line",
            RuleViolation::UnrecognisedCurrency => "unrecognised_currency",
            RuleViolation::BadDateFormat => "bad_date_format",
        }
    }
}

/// Aggregate judgement for an entire file, fixed by the first failing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileVerdict {
    Valid,
    Invalid {
        record_id: String,
        violation: RuleViolation,
        detail: String,
    },
}

impl FileVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, FileVerdict::Valid)
    }
}

/// Modeled result of one pipeline invocation. Anything outside these four
/// shapes leaves the orchestrator as an error instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InvocationOutcome {
    Processed { verdict: FileVerdict },
    EmptyFile,
    InvalidMessage,
    FetchFailed,
}

impl InvocationOutcome {
    /// Literal body text callers receive alongside the status code.
    pub fn body(&self) -> &'static str {
        match self {
            InvocationOutcome::Processed { .. } => "File processed.",
            InvocationOutcome::EmptyFile => "Empty CSV file.",
            InvocationOutcome::InvalidMessage => "Invalid message format.",
            InvocationOutcome::FetchFailed => "File read or decode failed.",
        }
    }
}
