//! # Error Types
//!
//! Engine error types for folio-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── IncompatibleSelection - a value contradicts an ancestor choice    │
//! │  ├── ValidationError       - business-rule violation (collected)      │
//! │  ├── PricingError          - caller bug or catalog corruption         │
//! │  └── CatalogIntegrityError - malformed catalog (load-time only)       │
//! │                                                                         │
//! │  folio-service errors (separate crate)                                 │
//! │  └── ApiError              - what the transport layer sees             │
//! │                                                                         │
//! │  Recoverable (re-prompt the user):  IncompatibleSelection,             │
//! │                                     ValidationError                    │
//! │  Defects (alarm, never user-facing): PricingError,                     │
//! │                                      CatalogIntegrityError             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, excluding parent)
//! 3. Errors are data returned to the caller, never panics across the
//!    crate boundary
//! 4. Each validation variant carries a stable machine code for the wire

use thiserror::Error;

use crate::types::PrintMode;

// =============================================================================
// Incompatible Selection
// =============================================================================

/// A supplied selection value contradicts the allowed set of its ancestor.
///
/// Produced by the Compatibility Resolver when an already-chosen value is
/// inconsistent with a choice made higher up the cascade. The resolver
/// never silently drops or repairs the field; it names the offender and
/// the parent value that excludes it so the caller can re-prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} '{value}' is not allowed under {parent}")]
pub struct IncompatibleSelection {
    /// Wire-level name of the offending field (e.g. "paperWeight").
    pub field: &'static str,

    /// The value that was supplied.
    pub value: String,

    /// The ancestor value whose allowed set excludes `value`.
    pub parent: String,
}

impl IncompatibleSelection {
    pub fn new(field: &'static str, value: impl Into<String>, parent: impl Into<String>) -> Self {
        IncompatibleSelection {
            field,
            value: value.into(),
            parent: parent.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A business-rule violation on a selection the caller believed complete.
///
/// The Validation Gate collects every violation before returning, so one
/// round trip surfaces the full repair list. Each variant maps to a stable
/// machine code via [`ValidationError::code`] and names the field it
/// concerns via [`ValidationError::field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// The selection was built against a different book size.
    #[error("book size '{supplied}' does not match catalog book size '{expected}'")]
    BookSizeMismatch { supplied: String, expected: String },

    /// Neither black-and-white nor colour pages were requested.
    #[error("page count must be greater than zero")]
    NoPages,

    /// Total page count exceeds the engine's sanity bound.
    #[error("total page count {total} exceeds maximum of {max}")]
    PagesAboveMaximum { total: u32, max: u32 },

    /// A single-mode job carries pages of the other mode.
    #[error("{field} must be 0 when print mode is {mode}")]
    PagesNotAllowedForMode { field: &'static str, mode: PrintMode },

    /// A mixed job needs pages of both modes.
    #[error("mixed print mode requires both b/w and colour pages")]
    MixedRequiresBothPages,

    /// Quantity is below the catalog minimum.
    #[error("quantity {quantity} is below the minimum of {minimum}")]
    QuantityBelowMinimum { quantity: u32, minimum: u32 },

    /// Quantity exceeds the catalog maximum.
    #[error("quantity {quantity} exceeds the maximum of {maximum}")]
    QuantityAboveMaximum { quantity: u32, maximum: u32 },

    /// Quantity is not reachable from the minimum in whole steps.
    #[error("quantity {quantity} is not {minimum} plus a multiple of {step}")]
    QuantityStepMismatch { quantity: u32, minimum: u32, step: u32 },

    /// The same add-on was selected more than once.
    #[error("add-on '{name}' is selected more than once")]
    DuplicateAddOn { name: String },

    /// A page-based add-on would bill zero steps.
    ///
    /// Billing floors to whole steps, so a selection whose relevant page
    /// count cannot cover a single step is inconsistent rather than free.
    #[error("add-on '{add_on}' needs at least {step} relevant pages, selection has {relevant}")]
    AddOnPagesBelowStep {
        add_on: String,
        step: u32,
        relevant: u32,
    },

    /// A field value failed the re-derived compatibility cascade.
    #[error("{0}")]
    Incompatible(#[from] IncompatibleSelection),
}

impl ValidationError {
    /// Stable machine-readable code for the wire contract.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "REQUIRED",
            ValidationError::BookSizeMismatch { .. } => "BOOK_SIZE_MISMATCH",
            ValidationError::NoPages => "PAGES_REQUIRED",
            ValidationError::PagesAboveMaximum { .. } => "PAGES_ABOVE_MAXIMUM",
            ValidationError::PagesNotAllowedForMode { .. } => "PAGES_NOT_ALLOWED_FOR_MODE",
            ValidationError::MixedRequiresBothPages => "MIXED_REQUIRES_BOTH_PAGES",
            ValidationError::QuantityBelowMinimum { .. } => "QUANTITY_BELOW_MINIMUM",
            ValidationError::QuantityAboveMaximum { .. } => "QUANTITY_ABOVE_MAXIMUM",
            ValidationError::QuantityStepMismatch { .. } => "QUANTITY_STEP_MISMATCH",
            ValidationError::DuplicateAddOn { .. } => "DUPLICATE_ADDON",
            ValidationError::AddOnPagesBelowStep { .. } => "ADDON_PAGES_BELOW_STEP",
            ValidationError::Incompatible(_) => "INCOMPATIBLE_SELECTION",
        }
    }

    /// Wire-level name of the field the violation concerns.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::BookSizeMismatch { .. } => "bookSize",
            ValidationError::NoPages | ValidationError::PagesAboveMaximum { .. } => "pageCount",
            ValidationError::PagesNotAllowedForMode { field, .. } => field,
            ValidationError::MixedRequiresBothPages => "pageCount",
            ValidationError::QuantityBelowMinimum { .. }
            | ValidationError::QuantityAboveMaximum { .. }
            | ValidationError::QuantityStepMismatch { .. } => "quantity",
            ValidationError::DuplicateAddOn { .. }
            | ValidationError::AddOnPagesBelowStep { .. } => "addOns",
            ValidationError::Incompatible(inner) => inner.field,
        }
    }
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Failures inside the Price Calculator.
///
/// `PreconditionViolated` is a caller bug: the calculator was invoked on a
/// selection that never passed the Validation Gate. The two remaining
/// variants indicate catalog corruption discovered after validation - the
/// cross-consistency invariant between resolver and rate tables has been
/// broken and the fault should trip an alarm, not be defaulted away.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// The calculator was called on an unvalidated selection.
    #[error("selection has not passed validation: {reason}")]
    PreconditionViolated { reason: String },

    /// A validated selection has no matching page rate.
    #[error("catalog corruption: no page rate for ({paper_type}, {grams}gsm, {print_mode})")]
    MissingPageRate {
        paper_type: String,
        grams: u32,
        print_mode: PrintMode,
    },

    /// A page-based add-on reached billing without a page step.
    #[error("catalog corruption: page-based add-on '{add_on}' has no page step")]
    MissingPageStep { add_on: String },
}

impl PricingError {
    /// Whether this failure indicates catalog corruption (alarm-worthy)
    /// rather than a caller contract bug.
    pub fn is_catalog_fault(&self) -> bool {
        matches!(
            self,
            PricingError::MissingPageRate { .. } | PricingError::MissingPageStep { .. }
        )
    }
}

// =============================================================================
// Catalog Integrity Error
// =============================================================================

/// A structural defect in a catalog, detected once at load time.
///
/// The engine assumes every catalog it receives has passed
/// `ProductCatalog::check_integrity`; these variants are what the
/// administrative loader reports back to catalog maintainers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIntegrityError {
    #[error("catalog has no paper types")]
    NoPaperTypes,

    #[error("paper type '{name}' appears more than once")]
    DuplicatePaperType { name: String },

    #[error("paper type '{name}' has no weights")]
    NoPaperWeights { name: String },

    #[error("paper type '{name}' lists weight {grams}gsm more than once")]
    DuplicatePaperWeight { name: String, grams: u32 },

    #[error("paper '{name}' {grams}gsm has no print modes")]
    NoPrintModes { name: String, grams: u32 },

    #[error("paper '{name}' {grams}gsm lists mixed as a base mode; mixed is derived")]
    MixedListedAsBase { name: String, grams: u32 },

    #[error("catalog has no binding types")]
    NoBindingTypes,

    #[error("binding type '{name}' appears more than once")]
    DuplicateBindingType { name: String },

    #[error("binding '{name}' has no cover weights")]
    NoCoverWeights { name: String },

    #[error("binding '{name}' lists cover weight {grams}gsm more than once")]
    DuplicateCoverWeight { name: String, grams: u32 },

    #[error("add-on '{name}' appears more than once")]
    DuplicateAddOn { name: String },

    #[error("page-based add-on '{name}' must declare a positive page step")]
    MissingPageStep { name: String },

    #[error("flat add-on '{name}' must not declare a page step")]
    UnexpectedPageStep { name: String },

    #[error("add-on '{name}' references unknown binding '{binding}'")]
    UnknownEligibleBinding { name: String, binding: String },

    #[error("quantity minimum must be at least 1")]
    QuantityMinimumZero,

    #[error("quantity step must be at least 1")]
    QuantityStepZero,

    #[error("quantity maximum {maximum} is below minimum {minimum}")]
    QuantityMaximumBelowMinimum { minimum: u32, maximum: u32 },

    #[error("no page rate for ({paper_type}, {grams}gsm, {print_mode})")]
    MissingPageRate {
        paper_type: String,
        grams: u32,
        print_mode: PrintMode,
    },

    #[error("duplicate page rate for ({paper_type}, {grams}gsm, {print_mode})")]
    DuplicatePageRate {
        paper_type: String,
        grams: u32,
        print_mode: PrintMode,
    },

    #[error("catalog has no discount tiers")]
    NoDiscountTiers,

    #[error("first discount tier starts at {tier_min}, above the quantity minimum {minimum}")]
    FirstTierAboveMinimum { tier_min: u32, minimum: u32 },

    #[error("discount tier {index} is empty or inverted ({min_quantity}..{max_quantity})")]
    InvertedTier {
        index: usize,
        min_quantity: u32,
        max_quantity: u32,
    },

    #[error("discount tiers {index} and {next} are not contiguous")]
    TierGapOrOverlap { index: usize, next: usize },

    #[error("only the last discount tier may be unbounded (tier {index})")]
    UnboundedInnerTier { index: usize },

    #[error("the last discount tier must be unbounded")]
    BoundedLastTier,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a resolver call.
pub type ResolveResult<T> = Result<T, IncompatibleSelection>;

/// Result of a calculator call.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incompatible_selection_message() {
        let err = IncompatibleSelection::new("paperWeight", "120", "Bond");
        assert_eq!(err.to_string(), "paperWeight '120' is not allowed under Bond");
    }

    #[test]
    fn test_validation_error_codes_are_stable() {
        let err = ValidationError::QuantityStepMismatch {
            quantity: 120,
            minimum: 100,
            step: 50,
        };
        assert_eq!(err.code(), "QUANTITY_STEP_MISMATCH");
        assert_eq!(err.field(), "quantity");
        assert_eq!(
            err.to_string(),
            "quantity 120 is not 100 plus a multiple of 50"
        );
    }

    #[test]
    fn test_incompatible_converts_to_validation_error() {
        let inner = IncompatibleSelection::new("coverWeight", "300", "Saddle stitch");
        let err: ValidationError = inner.into();
        assert_eq!(err.code(), "INCOMPATIBLE_SELECTION");
        assert_eq!(err.field(), "coverWeight");
    }

    #[test]
    fn test_pricing_error_fault_classification() {
        let caller_bug = PricingError::PreconditionViolated {
            reason: "selection is incomplete".to_string(),
        };
        assert!(!caller_bug.is_catalog_fault());

        let fault = PricingError::MissingPageRate {
            paper_type: "Bond".to_string(),
            grams: 80,
            print_mode: PrintMode::Mixed,
        };
        assert!(fault.is_catalog_fault());
    }
}
