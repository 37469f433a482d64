//! # Domain Types
//!
//! Selection and breakdown types shared across the engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Selection    │   │ PriceBreakdown  │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bookSize       │   │  unitPrice      │   │  label          │       │
//! │  │  paperType?     │   │  discountAmount │   │  amount         │       │
//! │  │  printMode?     │   │  totalPrice     │   └─────────────────┘       │
//! │  │  quantity, ...  │   │  lineItems      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   PrintMode     │   │   PageScope     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Bw             │   │  AllPages       │                             │
//! │  │  Color          │   │  BwOnly         │                             │
//! │  │  Mixed (derived)│   │  ColorOnly      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Selections are stateless DTOs built incrementally by the caller; they
//! have no identity beyond their field values. Breakdowns are produced
//! fresh on every calculation and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{DiscountRate, Money};

// =============================================================================
// Print Mode
// =============================================================================

/// How the pages of a job are printed.
///
/// `Mixed` is a derived concept: it is offered whenever a paper weight
/// supports both `Bw` and `Color`, and is never a catalog literal. Keeping
/// it out of the catalog avoids duplicated compatibility data that could
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PrintMode {
    /// Black-and-white only.
    Bw,
    /// Colour only.
    Color,
    /// Both b/w and colour pages in one job.
    Mixed,
}

impl PrintMode {
    /// Whether this is one of the two base modes a catalog may list.
    #[inline]
    pub const fn is_base(&self) -> bool {
        matches!(self, PrintMode::Bw | PrintMode::Color)
    }
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrintMode::Bw => "bw",
            PrintMode::Color => "color",
            PrintMode::Mixed => "mixed",
        };
        write!(f, "{}", name)
    }
}

// =============================================================================
// Page Scope
// =============================================================================

/// Which pages a page-based add-on bills against.
///
/// Mixed jobs carry both b/w and colour pages; whether a page-based add-on
/// counts all of them or only one mode's pages is catalog-author intent,
/// so it is configured per add-on rather than guessed globally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PageScope {
    /// Bill against b/w + colour pages.
    #[default]
    AllPages,
    /// Bill against b/w pages only.
    BwOnly,
    /// Bill against colour pages only.
    ColorOnly,
}

impl PageScope {
    /// The page count this scope selects from a job.
    #[inline]
    pub const fn relevant_pages(&self, bw: u32, color: u32) -> u32 {
        match self {
            PageScope::AllPages => bw + color,
            PageScope::BwOnly => bw,
            PageScope::ColorOnly => color,
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The caller's in-progress or complete set of chosen option values for
/// one order line.
///
/// ## Lifecycle
/// Built incrementally by the presentation layer as the user narrows their
/// choices; the Compatibility Resolver accepts it at any stage, the
/// Validation Gate and Price Calculator only once it is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Book size of the product line this selection targets.
    pub book_size: String,

    /// Chosen paper type name.
    pub paper_type: Option<String>,

    /// Chosen paper weight in gsm.
    pub paper_weight: Option<u32>,

    /// Chosen print mode.
    pub print_mode: Option<PrintMode>,

    /// Number of black-and-white pages.
    pub page_count_bw: u32,

    /// Number of colour pages.
    pub page_count_color: u32,

    /// Chosen binding type name.
    pub binding_type: Option<String>,

    /// Chosen cover stock weight in gsm.
    pub cover_weight: Option<u32>,

    /// Selected add-on names (set semantics; duplicates are rejected).
    pub add_ons: Vec<String>,

    /// Ordered quantity.
    pub quantity: u32,

    /// Manually supplied unit price that supersedes the computed price.
    ///
    /// Only obtainable via a privileged caller; the engine treats the
    /// value as authoritative when present. Authorization is the Order
    /// Service's responsibility.
    pub override_unit_price: Option<Money>,
}

impl Selection {
    /// Whether every required field is present and counts are positive.
    ///
    /// This is the completeness predicate from the engine contract: the
    /// Validation Gate and Price Calculator only operate on complete
    /// selections (the gate reports exactly what is missing).
    pub fn is_complete(&self) -> bool {
        !self.book_size.is_empty()
            && self.paper_type.is_some()
            && self.paper_weight.is_some()
            && self.print_mode.is_some()
            && self.binding_type.is_some()
            && self.cover_weight.is_some()
            && self.page_count_bw + self.page_count_color > 0
            && self.quantity > 0
    }

    /// Total page count across both modes.
    #[inline]
    pub fn total_pages(&self) -> u32 {
        self.page_count_bw + self.page_count_color
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// One labeled amount inside a breakdown.
///
/// Page, binding, cover, and add-on lines are per-unit amounts; the
/// discount and override-delta lines apply to the order total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Human-readable label ("Pages", "Add-on: Gloss lamination", ...).
    pub label: String,

    /// Amount in minor units; negative for discounts.
    pub amount: Money,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        LineItem {
            label: label.into(),
            amount,
        }
    }
}

/// The itemized result of pricing one complete, valid selection.
///
/// Produced fresh on every calculation call; never mutated. The Order
/// Service persists it verbatim and never recomputes, so recomputing the
/// same selection against the same catalog must yield a byte-identical
/// breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Per-unit price. Under an override this is the override value.
    pub unit_price: Money,

    /// Unit price × quantity, before any discount.
    pub total_before_discount: Money,

    /// The applied discount tier's rate; zero when superseded by override.
    pub discount_rate: DiscountRate,

    /// Discount applied to the subtotal; zero when superseded by override.
    pub discount_amount: Money,

    /// Final order total.
    pub total_price: Money,

    /// Ordered line items for itemized display and audit.
    pub line_items: Vec<LineItem>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_selection() -> Selection {
        Selection {
            book_size: "A5".to_string(),
            paper_type: Some("Bond".to_string()),
            paper_weight: Some(80),
            print_mode: Some(PrintMode::Bw),
            page_count_bw: 200,
            page_count_color: 0,
            binding_type: Some("Perfect bound".to_string()),
            cover_weight: Some(250),
            add_ons: vec![],
            quantity: 100,
            override_unit_price: None,
        }
    }

    #[test]
    fn test_selection_completeness() {
        assert!(complete_selection().is_complete());

        let mut missing_paper = complete_selection();
        missing_paper.paper_type = None;
        assert!(!missing_paper.is_complete());

        let mut no_pages = complete_selection();
        no_pages.page_count_bw = 0;
        assert!(!no_pages.is_complete());

        let mut no_quantity = complete_selection();
        no_quantity.quantity = 0;
        assert!(!no_quantity.is_complete());
    }

    #[test]
    fn test_page_scope_relevant_pages() {
        assert_eq!(PageScope::AllPages.relevant_pages(120, 80), 200);
        assert_eq!(PageScope::BwOnly.relevant_pages(120, 80), 120);
        assert_eq!(PageScope::ColorOnly.relevant_pages(120, 80), 80);
    }

    #[test]
    fn test_print_mode_base_classification() {
        assert!(PrintMode::Bw.is_base());
        assert!(PrintMode::Color.is_base());
        assert!(!PrintMode::Mixed.is_base());
    }

    #[test]
    fn test_print_mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&PrintMode::Bw).unwrap(), "\"bw\"");
        assert_eq!(serde_json::to_string(&PrintMode::Mixed).unwrap(), "\"mixed\"");
    }
}
