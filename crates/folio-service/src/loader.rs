//! # Catalog Loader
//!
//! Parses external catalog documents into the strongly-typed
//! [`ProductCatalog`] - exactly once, at load time.
//!
//! ## Why a Separate Document Shape?
//! The administrative side authors catalogs as loose JSON (print modes as
//! strings, rates as raw numbers). The engine never sees any of that: this
//! module converts the document into typed values and runs the full
//! integrity check before a catalog can be published. Downstream of here,
//! raw untyped configuration does not exist.
//!
//! Authoring rule enforced on conversion: `mixed` is a derived print mode
//! and may appear in the page-rate table (mixed jobs can be priced
//! differently) but never as a paper stock's base mode.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use folio_core::catalog::{
    AddOn, AddOnKind, BindingType, CoverWeight, DiscountTier, PageRate, PaperType, PaperWeight,
    ProductCatalog, QuantityConstraint,
};
use folio_core::error::CatalogIntegrityError;
use folio_core::money::{DiscountRate, Money};
use folio_core::types::{PageScope, PrintMode};

// =============================================================================
// Load Errors
// =============================================================================

/// Failures while turning a catalog document into a publishable catalog.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("paper '{paper_type}' {grams}gsm: unknown print mode '{value}'")]
    UnknownPrintMode {
        paper_type: String,
        grams: u32,
        value: String,
    },

    #[error("paper '{paper_type}' {grams}gsm lists mixed; mixed is derived, never authored")]
    MixedListedAsBase { paper_type: String, grams: u32 },

    #[error("page rate for '{paper_type}' {grams}gsm: unknown print mode '{value}'")]
    UnknownRatePrintMode {
        paper_type: String,
        grams: u32,
        value: String,
    },

    #[error("catalog has {} integrity defect(s)", .0.len())]
    Integrity(Vec<CatalogIntegrityError>),
}

// =============================================================================
// Document Shape
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    product_id: String,
    book_size: String,
    paper_types: Vec<PaperTypeDoc>,
    binding_types: Vec<BindingTypeDoc>,
    #[serde(default)]
    add_ons: Vec<AddOnDoc>,
    quantity: QuantityDoc,
    page_rates: Vec<PageRateDoc>,
    discount_tiers: Vec<TierDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperTypeDoc {
    name: String,
    weights: Vec<PaperWeightDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaperWeightDoc {
    grams: u32,
    print_modes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BindingTypeDoc {
    name: String,
    unit_price: i64,
    cover_weights: Vec<CoverWeightDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoverWeightDoc {
    grams: u32,
    unit_price: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddOnDoc {
    name: String,
    unit_price: i64,
    kind: AddOnKind,
    #[serde(default)]
    page_step: Option<u32>,
    #[serde(default)]
    page_scope: PageScope,
    #[serde(default)]
    eligible_bindings: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuantityDoc {
    minimum: u32,
    /// 0 = unbounded
    #[serde(default)]
    maximum: u32,
    step: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageRateDoc {
    paper_type: String,
    grams: u32,
    print_mode: String,
    #[serde(default)]
    per_page_bw: i64,
    #[serde(default)]
    per_page_color: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TierDoc {
    min_quantity: u32,
    #[serde(default)]
    max_quantity: Option<u32>,
    rate_bps: u32,
}

// =============================================================================
// Loading
// =============================================================================

/// Parses, converts, and integrity-checks a catalog document.
pub fn load_catalog_str(json: &str) -> Result<ProductCatalog, CatalogLoadError> {
    let document: CatalogDocument = serde_json::from_str(json)?;
    let catalog = convert(document)?;

    catalog
        .check_integrity()
        .map_err(CatalogLoadError::Integrity)?;

    info!(
        product_id = %catalog.product_id,
        paper_types = catalog.paper_types.len(),
        binding_types = catalog.binding_types.len(),
        add_ons = catalog.add_ons.len(),
        "catalog document loaded"
    );
    Ok(catalog)
}

/// File wrapper for the administrative collaborator.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<ProductCatalog, CatalogLoadError> {
    let json = fs::read_to_string(path)?;
    load_catalog_str(&json)
}

fn convert(document: CatalogDocument) -> Result<ProductCatalog, CatalogLoadError> {
    let mut paper_types = Vec::with_capacity(document.paper_types.len());
    for paper in document.paper_types {
        let mut weights = Vec::with_capacity(paper.weights.len());
        for weight in paper.weights {
            let mut print_modes = Vec::with_capacity(weight.print_modes.len());
            for value in weight.print_modes {
                match parse_print_mode(&value) {
                    Some(PrintMode::Mixed) => {
                        return Err(CatalogLoadError::MixedListedAsBase {
                            paper_type: paper.name,
                            grams: weight.grams,
                        });
                    }
                    Some(mode) => print_modes.push(mode),
                    None => {
                        return Err(CatalogLoadError::UnknownPrintMode {
                            paper_type: paper.name,
                            grams: weight.grams,
                            value,
                        });
                    }
                }
            }
            weights.push(PaperWeight {
                grams: weight.grams,
                print_modes,
            });
        }
        paper_types.push(PaperType {
            name: paper.name,
            weights,
        });
    }

    let binding_types = document
        .binding_types
        .into_iter()
        .map(|binding| BindingType {
            name: binding.name,
            unit_price: Money::from_minor(binding.unit_price),
            cover_weights: binding
                .cover_weights
                .into_iter()
                .map(|cover| CoverWeight {
                    grams: cover.grams,
                    unit_price: Money::from_minor(cover.unit_price),
                })
                .collect(),
        })
        .collect();

    let add_ons = document
        .add_ons
        .into_iter()
        .map(|add_on| AddOn {
            name: add_on.name,
            unit_price: Money::from_minor(add_on.unit_price),
            kind: add_on.kind,
            page_step: add_on.page_step,
            page_scope: add_on.page_scope,
            eligible_bindings: add_on.eligible_bindings,
        })
        .collect();

    let mut page_rates = Vec::with_capacity(document.page_rates.len());
    for rate in document.page_rates {
        let Some(mode) = parse_print_mode(&rate.print_mode) else {
            return Err(CatalogLoadError::UnknownRatePrintMode {
                paper_type: rate.paper_type,
                grams: rate.grams,
                value: rate.print_mode,
            });
        };
        page_rates.push(PageRate {
            paper_type: rate.paper_type,
            grams: rate.grams,
            print_mode: mode,
            per_page_bw: Money::from_minor(rate.per_page_bw),
            per_page_color: Money::from_minor(rate.per_page_color),
        });
    }

    let discount_tiers = document
        .discount_tiers
        .into_iter()
        .map(|tier| DiscountTier {
            min_quantity: tier.min_quantity,
            max_quantity: tier.max_quantity,
            rate: DiscountRate::from_bps(tier.rate_bps),
        })
        .collect();

    Ok(ProductCatalog {
        product_id: document.product_id,
        book_size: document.book_size,
        paper_types,
        binding_types,
        add_ons,
        quantity: QuantityConstraint {
            minimum: document.quantity.minimum,
            maximum: document.quantity.maximum,
            step: document.quantity.step,
        },
        page_rates,
        discount_tiers,
    })
}

fn parse_print_mode(value: &str) -> Option<PrintMode> {
    match value {
        "bw" => Some(PrintMode::Bw),
        "color" => Some(PrintMode::Color),
        "mixed" => Some(PrintMode::Mixed),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
