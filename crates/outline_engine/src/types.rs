use std::fmt;

use serde::Deserialize;

pub type TaskId = u64;

/// One heading entry exactly as the service reports it. The `level` tag is
/// kept as the raw wire string here; the core parses it into its closed
/// enum at the app boundary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutlineItem {
    pub level: String,
    pub text: String,
    pub page: u32,
}

/// Parsed extraction response plus the exact body bytes it was parsed from.
/// `raw_json` is what exports write out, so nothing ever drifts from the
/// service's own serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedOutline {
    pub title: String,
    pub outline: Vec<OutlineItem>,
    pub raw_json: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthReport {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A single file's extraction resolved, one way or the other.
    ExtractionFinished {
        task_id: TaskId,
        file_name: String,
        outcome: Result<ExtractedOutline, ExtractError>,
    },
    /// A health probe resolved.
    Health(Result<HealthReport, ExtractError>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ExtractError {
    pub kind: FailureKind,
    pub message: String,
}

impl ExtractError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service answered with a non-success status.
    Service { status: u16 },
    /// The service could not be reached at all (network/DNS/refused).
    Connectivity,
    /// Anything else, including malformed responses.
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Service { status } => write!(f, "service error (http {status})"),
            FailureKind::Connectivity => write!(f, "connection error"),
            FailureKind::Unknown => write!(f, "unknown error"),
        }
    }
}
