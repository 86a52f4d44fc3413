//! Error types for loading external data.
//!
//! The scoring engine itself never fails; these errors come from reading
//! question banks, answer files, and threshold overrides.

use std::path::PathBuf;

use thiserror::Error;

/// Structural failures while loading a question bank or answer file.
#[derive(Debug, Error)]
pub enum BankError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid TOML for the expected shape.
    #[error("failed to parse TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The file was read but is not valid JSON for the expected shape.
    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file extension does not name a supported format.
    #[error("unsupported answer file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// A `QUESTION=CODE` pair was malformed.
    #[error("invalid answer pair {0:?}: expected QUESTION=CODE")]
    InvalidPair(String),

    /// The bank holds no questions.
    #[error("question bank {0:?} has no questions")]
    Empty(String),
}

/// Confidence thresholds that are out of order or out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("threshold {name} = {value} exceeds 100")]
    OutOfRange { name: &'static str, value: u32 },

    #[error("thresholds must satisfy inconclusive <= moderate <= strong (got {inconclusive} / {moderate} / {strong})")]
    Unordered {
        inconclusive: u32,
        moderate: u32,
        strong: u32,
    },
}

impl BankError {
    /// Returns `true` if the underlying file was missing or unreadable.
    pub fn is_io(&self) -> bool {
        matches!(self, BankError::Read { .. })
    }
}
