//! # folio-service: Orchestration Shell for Folio Quote
//!
//! Thin collaborator layer around the pure quoting engine.
//!
//! ## Module Organization
//! ```text
//! folio_service/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── store.rs        ◄─── Catalog snapshots, atomic swap on reload
//! ├── loader.rs       ◄─── Catalog document parsing + integrity check
//! ├── ops.rs          ◄─── resolve_options / calculate_price
//! ├── quote.rs        ◄─── Accepted-quote record for the order side
//! └── error.rs        ◄─── ApiError for the transport layer
//! ```
//!
//! ## What Lives Where
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Transport (HTTP/IPC)            out of scope - maps ApiError codes     │
//! │  ────────────────────            to statuses and carries the JSON       │
//! │                                                                         │
//! │  folio-service (THIS CRATE)      snapshots, the two operations,         │
//! │  ──────────────────────────      document parsing, quote freezing       │
//! │                                                                         │
//! │  folio-core                      resolver, gate, calculator, money -    │
//! │  ──────────                      pure functions, no I/O                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod ops;
pub mod quote;
pub mod store;

#[cfg(test)]
pub(crate) mod testdoc;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ApiError, ErrorCode, Violation};
pub use loader::{load_catalog_file, load_catalog_str, CatalogLoadError};
pub use ops::{calculate_price, resolve_options, CalculateRequest, ResolveRequest, ResolveResponse};
pub use quote::Quote;
pub use store::CatalogStore;

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes structured logging for the embedding application.
///
/// Default: INFO everywhere, DEBUG for the folio crates; override with
/// `RUST_LOG`. Call once at startup - the subscriber is process-global.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio_core=debug,folio_service=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
