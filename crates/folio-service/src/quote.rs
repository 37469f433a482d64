//! # Quote Record
//!
//! The handoff value between the quoting engine and the Order Service.
//!
//! Uses the snapshot pattern: the accepted selection and its breakdown are
//! frozen verbatim at acceptance time. The order side persists this record
//! as-is and **never recomputes** - if the catalog changes a minute later,
//! the customer keeps the price they were quoted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use folio_core::types::{PriceBreakdown, Selection};

/// An accepted quote, ready for the Order Service to persist.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Product line the quote was made against.
    pub product_id: String,

    /// The accepted selection, frozen.
    pub selection: Selection,

    /// The breakdown returned by the calculator, frozen.
    pub breakdown: PriceBreakdown,

    /// When the quote was accepted.
    #[ts(as = "String")]
    pub accepted_at: DateTime<Utc>,
}

impl Quote {
    /// Freezes an accepted selection and its breakdown into a quote.
    pub fn accept(
        product_id: impl Into<String>,
        selection: Selection,
        breakdown: PriceBreakdown,
    ) -> Self {
        Quote {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            selection,
            breakdown,
            accepted_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
