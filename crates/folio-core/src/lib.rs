//! # folio-core: Pure Quoting Engine for Folio Quote
//!
//! This crate is the **heart** of Folio Quote. It quotes and validates
//! custom print-job orders against a per-product compatibility matrix and
//! computes a deterministic, auditable price - all as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Folio Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Layer (out of scope)               │   │
//! │  │    cascading option pickers ──► quote display ──► order         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    folio-service                                │   │
//! │  │    catalog snapshots, resolve_options, calculate_price          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌───────┐ │   │
//! │  │   │ catalog  │ │ resolver │ │validation│ │ pricing │ │ money │ │   │
//! │  │   │  matrix  │ │ cascade  │ │   gate   │ │+discount│ │ minor │ │   │
//! │  │   │ + rates  │ │ filters  │ │  checks  │ │  tiers  │ │ units │ │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └─────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCKS • NO SHARED STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The compatibility matrix and rate tables (pure data)
//! - [`resolver`] - Cascading constraint resolution over partial selections
//! - [`validation`] - The gate: all business-rule checks, collected
//! - [`discount`] - Quantity tier lookup
//! - [`pricing`] - The calculator: itemized breakdowns, overrides
//! - [`money`] - Integer minor-unit money (no floating point!)
//! - [`types`] - Selection and breakdown DTOs
//! - [`error`] - Engine error taxonomy
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same catalog + selection = byte-identical result
//! 2. **No I/O**: catalogs arrive fully materialized, immutable
//! 3. **Integer Money**: minor units end to end, one rounding point
//! 4. **Errors as Data**: tagged results cross the boundary, never panics
//! 5. **One Source of Truth**: the gate re-derives the resolver's cascade,
//!    so accepted selections are exactly the resolver-legal ones
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::resolver;
//! use folio_core::types::Selection;
//! # fn catalog() -> folio_core::catalog::ProductCatalog {
//! #     folio_core::catalog::ProductCatalog {
//! #         product_id: "a5-book".into(),
//! #         book_size: "A5".into(),
//! #         paper_types: vec![],
//! #         binding_types: vec![],
//! #         add_ons: vec![],
//! #         quantity: folio_core::catalog::QuantityConstraint { minimum: 1, maximum: 0, step: 1 },
//! #         page_rates: vec![],
//! #         discount_tiers: vec![],
//! #     }
//! # }
//!
//! let catalog = catalog();
//! let selection = Selection {
//!     book_size: "A5".to_string(),
//!     ..Selection::default()
//! };
//!
//! // An empty selection resolves to the catalog-wide top levels
//! let allowed = resolver::resolve(&catalog, &selection).unwrap();
//! assert!(allowed.paper_weights.is_empty()); // locked until a paper is chosen
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod resolver;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Money` instead of
// `use folio_core::money::Money`

pub use catalog::ProductCatalog;
pub use error::{IncompatibleSelection, PricingError, ValidationError};
pub use money::{DiscountRate, Money};
pub use resolver::{resolve, AllowedOptions};
pub use types::{PriceBreakdown, PrintMode, Selection};
pub use validation::validate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum total page count the gate accepts for one job.
///
/// ## Business Reason
/// Catches fat-fingered page counts (e.g. 200000 instead of 200) before
/// they turn into absurd quotes. Catalog quantity constraints bound the
/// unit count; this bounds the per-unit size.
pub const MAX_TOTAL_PAGES: u32 = 20_000;
