//! Shared error type across Green Campus crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// A breakdown referenced a field the counts record does not have.
    MissingField,
    /// Risk score range is empty or inverted.
    DegenerateRange,
    /// No severity band covers the gauge fraction.
    UnmatchedSeverity,
    /// Counts violate their sum invariant.
    InconsistentCounts,
    /// Event date not in `DD-MM-YYYY` form.
    InvalidDate,
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Metrics source failed.
    FetchFailed,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MissingField => "MISSING_FIELD",
            ClientCode::DegenerateRange => "DEGENERATE_RANGE",
            ClientCode::UnmatchedSeverity => "UNMATCHED_SEVERITY",
            ClientCode::InconsistentCounts => "INCONSISTENT_COUNTS",
            ClientCode::InvalidDate => "INVALID_DATE",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::FetchFailed => "FETCH_FAILED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GreenCampusError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GreenCampusError {
    #[error("missing field: {field}")]
    MissingField { field: String },
    #[error("degenerate risk range: min={min} max={max}")]
    DegenerateRange { min: i64, max: i64 },
    #[error("no severity band matches fraction {fraction}")]
    UnmatchedSeverity { fraction: f64 },
    #[error("inconsistent counts: {0}")]
    InconsistentCounts(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GreenCampusError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GreenCampusError::MissingField { .. } => ClientCode::MissingField,
            GreenCampusError::DegenerateRange { .. } => ClientCode::DegenerateRange,
            GreenCampusError::UnmatchedSeverity { .. } => ClientCode::UnmatchedSeverity,
            GreenCampusError::InconsistentCounts(_) => ClientCode::InconsistentCounts,
            GreenCampusError::InvalidDate(_) => ClientCode::InvalidDate,
            GreenCampusError::BadRequest(_) => ClientCode::BadRequest,
            GreenCampusError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GreenCampusError::Fetch(_) => ClientCode::FetchFailed,
            GreenCampusError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Whether the error comes from projecting a snapshot (a config or data
    /// mistake) rather than from the request or the metrics source.
    pub fn is_projection_error(&self) -> bool {
        matches!(
            self,
            GreenCampusError::MissingField { .. }
                | GreenCampusError::DegenerateRange { .. }
                | GreenCampusError::UnmatchedSeverity { .. }
                | GreenCampusError::InvalidDate(_)
        )
    }
}
