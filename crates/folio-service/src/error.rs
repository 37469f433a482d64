//! # API Error Type
//!
//! Unified error type for the public quoting operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Folio Quote                            │
//! │                                                                         │
//! │  calculate_price(request)                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Unknown product? ──────── NOT_FOUND ─────────────────┐                │
//! │         │                                             │                │
//! │         ▼                                             ▼                │
//! │  Gate violations? ──────── VALIDATION_ERROR ────── ApiError ──► wire   │
//! │         │                  (full violation list)      ▲                │
//! │         ▼                                             │                │
//! │  Catalog corruption? ───── CATALOG_FAULT ─────────────┤                │
//! │         │                  (alarm logged, generic     │                │
//! │         ▼                   message on the wire)      │                │
//! │  Success ──► PriceBreakdown                           │                │
//! │                                                       │                │
//! │  The transport layer maps codes to statuses           │                │
//! │  (422-class for user errors, 500-class for faults).   │                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal fault detail goes to the log, never onto the wire.

use serde::Serialize;
use ts_rs::TS;

use folio_core::error::{IncompatibleSelection, PricingError, ValidationError};

/// API error returned from the quoting operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "selection failed validation",
///   "violations": [
///     { "field": "quantity", "code": "QUANTITY_STEP_MISMATCH",
///       "message": "quantity 120 is not 100 plus a multiple of 50" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Per-field violations; present for VALIDATION_ERROR only
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id (404)
    NotFound,

    /// A partial selection contradicts an ancestor choice (422)
    IncompatibleSelection,

    /// A complete selection violates business rules (422)
    ValidationError,

    /// Catalog corruption detected mid-calculation (500, alarm)
    CatalogFault,

    /// Caller contract bug or unexpected failure (500)
    Internal,
}

/// One field-level violation inside a VALIDATION_ERROR.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl From<&ValidationError> for Violation {
    fn from(err: &ValidationError) -> Self {
        Violation {
            field: err.field().to_string(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error carrying the full violation list.
    pub fn validation(violations: &[ValidationError]) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "selection failed validation".to_string(),
            violations: violations.iter().map(Violation::from).collect(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts resolver errors: the offending field and excluding parent are
/// user-facing by design (the caller re-prompts).
impl From<IncompatibleSelection> for ApiError {
    fn from(err: IncompatibleSelection) -> Self {
        ApiError::new(ErrorCode::IncompatibleSelection, err.to_string())
    }
}

/// Converts calculator errors. Catalog faults are logged with full detail
/// and reported generically; precondition violations mean this shell
/// skipped the gate - a bug here, not in the client.
impl From<PricingError> for ApiError {
    fn from(err: PricingError) -> Self {
        if err.is_catalog_fault() {
            tracing::error!(error = %err, "catalog corruption detected during pricing");
            ApiError::new(ErrorCode::CatalogFault, "catalog configuration fault")
        } else {
            tracing::error!(error = %err, "price calculation invoked on unvalidated selection");
            ApiError::internal("internal quoting error")
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
