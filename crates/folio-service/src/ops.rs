//! # Quoting Operations
//!
//! The two public operations the surrounding transport exposes.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quoting a Print Job                                │
//! │                                                                         │
//! │  Presentation Layer              This Module            folio-core      │
//! │  ──────────────────              ───────────            ──────────      │
//! │                                                                         │
//! │  user narrows choices ─────────► resolve_options ─────► resolver        │
//! │       ▲      │ (repeat per level)      │                                │
//! │       └──────┘                         ▼                                │
//! │                                  allowed values per level               │
//! │                                                                         │
//! │  selection complete ───────────► calculate_price ─────► gate            │
//! │                                        │                  │             │
//! │                                        │   violations? ◄──┘             │
//! │                                        ▼                                │
//! │                                  calculator ──► PriceBreakdown          │
//! │                                                                         │
//! │  The order side persists the breakdown verbatim (see quote.rs);         │
//! │  it never recomputes.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both operations are synchronous and CPU-only: each call works on its
//! own immutable catalog snapshot and its own selection value, so
//! concurrent requests need no coordination here.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use folio_core::resolver::{self, AllowedOptions};
use folio_core::types::{PriceBreakdown, Selection};
use folio_core::{pricing, validation};

use crate::error::ApiError;
use crate::store::CatalogStore;

// =============================================================================
// Request / Response DTOs
// =============================================================================

/// Input of the resolve-options operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub product_id: String,
    pub selection: Selection,
}

/// Output of the resolve-options operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub product_id: String,
    pub options: AllowedOptions,
}

/// Input of the calculate-price operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub product_id: String,
    pub selection: Selection,
}

// =============================================================================
// Operations
// =============================================================================

/// Resolves the option values still legal for a partial selection.
///
/// Called repeatedly as the user narrows their choices; each answer feeds
/// the next level's picker.
pub fn resolve_options(
    store: &CatalogStore,
    request: &ResolveRequest,
) -> Result<ResolveResponse, ApiError> {
    debug!(product_id = %request.product_id, "resolve_options");

    let catalog = store
        .snapshot(&request.product_id)
        .ok_or_else(|| ApiError::not_found("Product", &request.product_id))?;

    let options = resolver::resolve(&catalog, &request.selection)?;

    Ok(ResolveResponse {
        product_id: request.product_id.clone(),
        options,
    })
}

/// Validates a complete selection and prices it.
///
/// The gate runs unconditionally - whatever option lists the client was
/// once shown are not trusted. On any violation the full list is returned
/// and no price is computed.
pub fn calculate_price(
    store: &CatalogStore,
    request: &CalculateRequest,
) -> Result<PriceBreakdown, ApiError> {
    debug!(
        product_id = %request.product_id,
        quantity = request.selection.quantity,
        "calculate_price"
    );

    let catalog = store
        .snapshot(&request.product_id)
        .ok_or_else(|| ApiError::not_found("Product", &request.product_id))?;

    validation::validate(&catalog, &request.selection)
        .map_err(|violations| ApiError::validation(&violations))?;

    let breakdown = pricing::calculate(&catalog, &request.selection)?;
    Ok(breakdown)
}

// =============================================================================
// Unit Tests
// =============================================================================
