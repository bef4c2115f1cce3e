//! Unified application error types.
//! Every module (validator, store, core, cli) returns AppError so callers can
//! tell a rejected scan from a storage failure or a cancelled operation.

use std::fmt;
use std::io;
use thiserror::Error;

/// Payload field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Payload,
    EmployeeId,
    Action,
    Timestamp,
    Location,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Payload => "payload",
            Field::EmployeeId => "employee_id",
            Field::Action => "action",
            Field::Timestamp => "timestamp",
            Field::Location => "location",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw scan was rejected. Nothing has been persisted.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Why an operation stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Requested,
    TimedOut,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Requested => f.write_str("cancellation requested"),
            CancelReason::TimedOut => f.write_str("deadline exceeded"),
        }
    }
}

/// Failures raised by an event store or employee directory.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("operation cancelled: {0}")]
    Cancelled(CancelReason),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Ingestion
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Operation cancelled: {0}")]
    Cancelled(CancelReason),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Queries
    // ---------------------------
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Employee already registered: {0}")]
    DuplicateEmployee(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid reporting window: {0}")]
    InvalidWindow(String),

    // ---------------------------
    // Config / IO / export
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// Storage failures may succeed on a later attempt; rejected payloads never do.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Store(StoreError::Db(_) | StoreError::Unavailable(_)) | AppError::Cancelled(_)
        )
    }

    /// Process exit code used by the binary.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 2,
            AppError::Store(_) | AppError::Migration(_) => 3,
            AppError::Cancelled(_) => 4,
            _ => 1,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Cancelled(reason) => AppError::Cancelled(reason),
            other => AppError::Store(other),
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Store(StoreError::Db(e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
