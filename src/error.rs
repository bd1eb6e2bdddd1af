//! Error types for loan mutation, the reasoning service, and persistence
//!
//! Analysis errors (`ServiceError`, `ReplyError`, `AdvisorError`) never leave
//! the advisor; persistence errors always reach the caller.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected mutation of a loan field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("payment day {0} is outside 1-28")]
    InvalidPaymentDay(u32),

    #[error("balance {0} is negative")]
    NegativeBalance(Decimal),

    #[error("interest rate {0} is negative")]
    NegativeRate(Decimal),

    #[error("monthly payment {0} is negative")]
    NegativePayment(Decimal),

    #[error("amount {0} exceeds the largest supported amount")]
    AmountTooLarge(Decimal),

    #[error("interest rate {0} exceeds the largest supported rate")]
    RateTooHigh(Decimal),

    #[error("loan name is empty")]
    EmptyName,

    #[error("goal priority {0} is outside 1-5")]
    InvalidPriority(u8),
}

/// Failure of a call to the external reasoning service
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request to reasoning service failed: {0}")]
    Transport(String),

    #[error("reasoning service timed out after {0} s")]
    Timeout(u64),

    #[error("reasoning service returned status {0}")]
    Status(u16),

    #[error("reasoning service unavailable: {0}")]
    Unavailable(String),

    #[error("reasoning service returned an empty reply")]
    EmptyReply,
}

/// A reply that could not be turned into an analysis
#[derive(Error, Debug)]
pub enum ReplyError {
    #[error("no JSON object found in reply")]
    NoJsonObject,

    #[error("reply does not match the expected schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: Decimal },
}

/// Any failure of the AI-backed path; always absorbed by the fallback
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("failed to build prompt: {0}")]
    Prompt(#[source] serde_json::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Reply(#[from] ReplyError),
}

/// Loading or saving loan records failed
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse loans in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize loans: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to import {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
