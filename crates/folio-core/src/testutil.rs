//! Shared test fixtures for the engine test suites.
//!
//! One well-formed catalog, used everywhere, so every suite exercises the
//! same compatibility matrix:
//!
//! - Paper: Bond 60gsm (bw), Bond 80gsm (bw + colour → mixed derived),
//!   Coated 100gsm (colour)
//! - Bindings: Perfect bound (covers 250/300gsm), Spiral (cover 200gsm)
//! - Add-ons: Shrink wrap (flat), Gloss lamination (page-based, step 16),
//!   Colour proofing (page-based, step 8, colour pages only),
//!   Hole punching (flat, Spiral only)
//! - Quantity: 100..=5000 step 50
//! - Tiers: 100–499 → 0%, 500–999 → 5%, 1000+ → 10%

use crate::catalog::{
    AddOn, AddOnKind, BindingType, CoverWeight, DiscountTier, PageRate, PaperType, PaperWeight,
    ProductCatalog, QuantityConstraint,
};
use crate::money::{DiscountRate, Money};
use crate::types::{PageScope, PrintMode, Selection};

/// Builds the fixture catalog described in the module docs.
pub(crate) fn fixture_catalog() -> ProductCatalog {
    ProductCatalog {
        product_id: "a5-book".to_string(),
        book_size: "A5".to_string(),
        paper_types: vec![
            PaperType {
                name: "Bond".to_string(),
                weights: vec![
                    PaperWeight {
                        grams: 60,
                        print_modes: vec![PrintMode::Bw],
                    },
                    PaperWeight {
                        grams: 80,
                        print_modes: vec![PrintMode::Bw, PrintMode::Color],
                    },
                ],
            },
            PaperType {
                name: "Coated".to_string(),
                weights: vec![PaperWeight {
                    grams: 100,
                    print_modes: vec![PrintMode::Color],
                }],
            },
        ],
        binding_types: vec![
            BindingType {
                name: "Perfect bound".to_string(),
                unit_price: Money::from_minor(1500),
                cover_weights: vec![
                    CoverWeight {
                        grams: 250,
                        unit_price: Money::from_minor(900),
                    },
                    CoverWeight {
                        grams: 300,
                        unit_price: Money::from_minor(1200),
                    },
                ],
            },
            BindingType {
                name: "Spiral".to_string(),
                unit_price: Money::from_minor(800),
                cover_weights: vec![CoverWeight {
                    grams: 200,
                    unit_price: Money::from_minor(500),
                }],
            },
        ],
        add_ons: vec![
            AddOn {
                name: "Shrink wrap".to_string(),
                unit_price: Money::from_minor(400),
                kind: AddOnKind::Flat,
                page_step: None,
                page_scope: PageScope::AllPages,
                eligible_bindings: vec![],
            },
            AddOn {
                name: "Gloss lamination".to_string(),
                unit_price: Money::from_minor(5000),
                kind: AddOnKind::PageBased,
                page_step: Some(16),
                page_scope: PageScope::AllPages,
                eligible_bindings: vec![],
            },
            AddOn {
                name: "Colour proofing".to_string(),
                unit_price: Money::from_minor(2000),
                kind: AddOnKind::PageBased,
                page_step: Some(8),
                page_scope: PageScope::ColorOnly,
                eligible_bindings: vec![],
            },
            AddOn {
                name: "Hole punching".to_string(),
                unit_price: Money::from_minor(300),
                kind: AddOnKind::Flat,
                page_step: None,
                page_scope: PageScope::AllPages,
                eligible_bindings: vec!["Spiral".to_string()],
            },
        ],
        quantity: QuantityConstraint {
            minimum: 100,
            maximum: 5000,
            step: 50,
        },
        page_rates: vec![
            page_rate("Bond", 60, PrintMode::Bw, 10, 0),
            page_rate("Bond", 80, PrintMode::Bw, 12, 0),
            page_rate("Bond", 80, PrintMode::Color, 0, 40),
            page_rate("Bond", 80, PrintMode::Mixed, 12, 45),
            page_rate("Coated", 100, PrintMode::Color, 0, 55),
        ],
        discount_tiers: vec![
            DiscountTier {
                min_quantity: 100,
                max_quantity: Some(499),
                rate: DiscountRate::zero(),
            },
            DiscountTier {
                min_quantity: 500,
                max_quantity: Some(999),
                rate: DiscountRate::from_bps(500),
            },
            DiscountTier {
                min_quantity: 1000,
                max_quantity: None,
                rate: DiscountRate::from_bps(1000),
            },
        ],
    }
}

fn page_rate(paper: &str, grams: u32, mode: PrintMode, bw: i64, color: i64) -> PageRate {
    PageRate {
        paper_type: paper.to_string(),
        grams,
        print_mode: mode,
        per_page_bw: Money::from_minor(bw),
        per_page_color: Money::from_minor(color),
    }
}

/// A complete selection the fixture catalog accepts: Bond 80gsm mixed,
/// 120 b/w + 80 colour pages, Perfect bound with a 250gsm cover, 150 units.
pub(crate) fn valid_selection() -> Selection {
    Selection {
        book_size: "A5".to_string(),
        paper_type: Some("Bond".to_string()),
        paper_weight: Some(80),
        print_mode: Some(PrintMode::Mixed),
        page_count_bw: 120,
        page_count_color: 80,
        binding_type: Some("Perfect bound".to_string()),
        cover_weight: Some(250),
        add_ons: vec![],
        quantity: 150,
        override_unit_price: None,
    }
}
