//! # Catalog Model
//!
//! In-memory representation of one product line's compatibility matrix and
//! price rates. Pure data: accessors only, no behavior.
//!
//! ## Lifecycle
//! A catalog is parsed and integrity-checked once by the administrative
//! loader, then published as an immutable snapshot. It is never mutated by
//! the engine; a refresh publishes a *new* snapshot and swaps a reference,
//! so in-flight resolutions keep the catalog they started with.
//!
//! ## Rate Placement
//! Binding and cover rates are embedded in their structural entries, so a
//! resolvable binding/cover choice always has a price by construction. Page
//! rates stay a separate table keyed by (paper type, weight, print mode):
//! a validated selection with no matching entry is the detectable
//! catalog-corruption fault the calculator alarms on.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CatalogIntegrityError;
use crate::money::{DiscountRate, Money};
use crate::types::{PageScope, PrintMode};

// =============================================================================
// Paper Cascade
// =============================================================================

/// One paper weight option under a paper type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaperWeight {
    /// Weight in grams per square metre.
    pub grams: u32,

    /// Base print modes this stock supports (`Bw`/`Color` only; `Mixed`
    /// is derived, never listed).
    pub print_modes: Vec<PrintMode>,
}

impl PaperWeight {
    /// Whether the stock supports a given mode. `Mixed` requires both
    /// base modes to be present - the union, not a literal tag.
    pub fn supports(&self, mode: PrintMode) -> bool {
        match mode {
            PrintMode::Mixed => {
                self.print_modes.contains(&PrintMode::Bw)
                    && self.print_modes.contains(&PrintMode::Color)
            }
            base => self.print_modes.contains(&base),
        }
    }

    /// The modes to offer for this stock, in catalog order, with `Mixed`
    /// appended when both base modes are present.
    pub fn offered_print_modes(&self) -> Vec<PrintMode> {
        let mut modes: Vec<PrintMode> = self
            .print_modes
            .iter()
            .copied()
            .filter(PrintMode::is_base)
            .collect();
        if self.supports(PrintMode::Mixed) {
            modes.push(PrintMode::Mixed);
        }
        modes
    }
}

/// A paper type and its weight options, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaperType {
    pub name: String,
    pub weights: Vec<PaperWeight>,
}

impl PaperType {
    pub fn weight(&self, grams: u32) -> Option<&PaperWeight> {
        self.weights.iter().find(|w| w.grams == grams)
    }
}

// =============================================================================
// Binding Cascade
// =============================================================================

/// One cover stock option under a binding, with its rate embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CoverWeight {
    /// Cover stock weight in gsm.
    pub grams: u32,

    /// Per-unit cover cost.
    pub unit_price: Money,
}

/// A binding type, its per-unit rate, and its legal cover stocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BindingType {
    pub name: String,

    /// Per-unit binding cost.
    pub unit_price: Money,

    pub cover_weights: Vec<CoverWeight>,
}

impl BindingType {
    pub fn cover_weight(&self, grams: u32) -> Option<&CoverWeight> {
        self.cover_weights.iter().find(|c| c.grams == grams)
    }
}

// =============================================================================
// Add-Ons
// =============================================================================

/// How an add-on is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AddOnKind {
    /// `unit_price` once per unit.
    Flat,
    /// `unit_price` per whole `page_step` of relevant pages (floored).
    PageBased,
}

/// An optional extra service or material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub name: String,

    /// Flat per-unit price, or price per billed page step.
    pub unit_price: Money,

    pub kind: AddOnKind,

    /// Page step for `PageBased` add-ons; `None` for `Flat`.
    pub page_step: Option<u32>,

    /// Which pages a `PageBased` add-on bills against on mixed jobs.
    pub page_scope: PageScope,

    /// Binding names this add-on is restricted to; empty = all bindings.
    pub eligible_bindings: Vec<String>,
}

impl AddOn {
    /// Whether this add-on may be combined with the given binding.
    pub fn eligible_for(&self, binding: &str) -> bool {
        self.eligible_bindings.is_empty() || self.eligible_bindings.iter().any(|b| b == binding)
    }

    /// The page count this add-on bills against.
    #[inline]
    pub fn relevant_pages(&self, bw: u32, color: u32) -> u32 {
        self.page_scope.relevant_pages(bw, color)
    }
}

// =============================================================================
// Quantity Constraint
// =============================================================================

/// Legal order quantities: `minimum`, then whole `step`s up to `maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuantityConstraint {
    pub minimum: u32,

    /// Upper bound; 0 means unbounded.
    pub maximum: u32,

    pub step: u32,
}

impl QuantityConstraint {
    #[inline]
    pub const fn is_unbounded(&self) -> bool {
        self.maximum == 0
    }
}

// =============================================================================
// Rate Tables
// =============================================================================

/// Per-page rates for one (paper type, weight, print mode) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageRate {
    pub paper_type: String,
    pub grams: u32,
    pub print_mode: PrintMode,

    /// Rate per b/w page. Unused for `Color` jobs but kept for mixed.
    pub per_page_bw: Money,

    /// Rate per colour page. Unused for `Bw` jobs but kept for mixed.
    pub per_page_color: Money,
}

/// A contiguous quantity range mapped to a discount rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    pub min_quantity: u32,

    /// Inclusive upper bound; `None` = unbounded (last tier only).
    pub max_quantity: Option<u32>,

    pub rate: DiscountRate,
}

impl DiscountTier {
    /// Whether the tier's `[min_quantity, max_quantity]` range contains `quantity`.
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Immutable configuration describing one product line's legal option
/// combinations and pricing rates.
///
/// One catalog exists per product (the book size scopes which catalog is
/// loaded); everything the resolver, gate, and calculator need is carried
/// here, fully materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalog {
    /// Stable identifier the service layer keys snapshots by.
    pub product_id: String,

    /// Book size this product line is quoted for.
    pub book_size: String,

    /// Paper cascade, in display order.
    pub paper_types: Vec<PaperType>,

    /// Binding cascade, in display order.
    pub binding_types: Vec<BindingType>,

    /// Add-on services, in display order.
    pub add_ons: Vec<AddOn>,

    /// Legal order quantities.
    pub quantity: QuantityConstraint,

    /// Per-page rate table keyed by (paper type, weight, print mode).
    pub page_rates: Vec<PageRate>,

    /// Quantity discount tiers: contiguous, non-overlapping, last unbounded.
    pub discount_tiers: Vec<DiscountTier>,
}

impl ProductCatalog {
    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn paper_type(&self, name: &str) -> Option<&PaperType> {
        self.paper_types.iter().find(|p| p.name == name)
    }

    pub fn binding_type(&self, name: &str) -> Option<&BindingType> {
        self.binding_types.iter().find(|b| b.name == name)
    }

    pub fn add_on(&self, name: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.name == name)
    }

    pub fn page_rate(&self, paper_type: &str, grams: u32, mode: PrintMode) -> Option<&PageRate> {
        self.page_rates
            .iter()
            .find(|r| r.paper_type == paper_type && r.grams == grams && r.print_mode == mode)
    }

    // -------------------------------------------------------------------------
    // Integrity
    // -------------------------------------------------------------------------

    /// Verifies the structural invariants the engine relies on.
    ///
    /// Run once at catalog-load time by the administrative loader; the
    /// engine itself assumes catalogs are well-formed. All defects are
    /// collected so maintainers get the full repair list in one pass.
    pub fn check_integrity(&self) -> Result<(), Vec<CatalogIntegrityError>> {
        let mut errors = Vec::new();

        self.check_paper_cascade(&mut errors);
        self.check_binding_cascade(&mut errors);
        self.check_add_ons(&mut errors);
        self.check_quantity(&mut errors);
        self.check_page_rates(&mut errors);
        self.check_discount_tiers(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_paper_cascade(&self, errors: &mut Vec<CatalogIntegrityError>) {
        if self.paper_types.is_empty() {
            errors.push(CatalogIntegrityError::NoPaperTypes);
        }
        for (i, paper) in self.paper_types.iter().enumerate() {
            if self.paper_types[..i].iter().any(|p| p.name == paper.name) {
                errors.push(CatalogIntegrityError::DuplicatePaperType {
                    name: paper.name.clone(),
                });
            }
            if paper.weights.is_empty() {
                errors.push(CatalogIntegrityError::NoPaperWeights {
                    name: paper.name.clone(),
                });
            }
            for (j, weight) in paper.weights.iter().enumerate() {
                if paper.weights[..j].iter().any(|w| w.grams == weight.grams) {
                    errors.push(CatalogIntegrityError::DuplicatePaperWeight {
                        name: paper.name.clone(),
                        grams: weight.grams,
                    });
                }
                if weight.print_modes.is_empty() {
                    errors.push(CatalogIntegrityError::NoPrintModes {
                        name: paper.name.clone(),
                        grams: weight.grams,
                    });
                }
                if weight.print_modes.contains(&PrintMode::Mixed) {
                    errors.push(CatalogIntegrityError::MixedListedAsBase {
                        name: paper.name.clone(),
                        grams: weight.grams,
                    });
                }
            }
        }
    }

    fn check_binding_cascade(&self, errors: &mut Vec<CatalogIntegrityError>) {
        if self.binding_types.is_empty() {
            errors.push(CatalogIntegrityError::NoBindingTypes);
        }
        for (i, binding) in self.binding_types.iter().enumerate() {
            if self.binding_types[..i].iter().any(|b| b.name == binding.name) {
                errors.push(CatalogIntegrityError::DuplicateBindingType {
                    name: binding.name.clone(),
                });
            }
            if binding.cover_weights.is_empty() {
                errors.push(CatalogIntegrityError::NoCoverWeights {
                    name: binding.name.clone(),
                });
            }
            for (j, cover) in binding.cover_weights.iter().enumerate() {
                if binding.cover_weights[..j].iter().any(|c| c.grams == cover.grams) {
                    errors.push(CatalogIntegrityError::DuplicateCoverWeight {
                        name: binding.name.clone(),
                        grams: cover.grams,
                    });
                }
            }
        }
    }

    fn check_add_ons(&self, errors: &mut Vec<CatalogIntegrityError>) {
        for (i, add_on) in self.add_ons.iter().enumerate() {
            if self.add_ons[..i].iter().any(|a| a.name == add_on.name) {
                errors.push(CatalogIntegrityError::DuplicateAddOn {
                    name: add_on.name.clone(),
                });
            }
            match add_on.kind {
                AddOnKind::PageBased => {
                    if add_on.page_step.map_or(true, |step| step == 0) {
                        errors.push(CatalogIntegrityError::MissingPageStep {
                            name: add_on.name.clone(),
                        });
                    }
                }
                AddOnKind::Flat => {
                    if add_on.page_step.is_some() {
                        errors.push(CatalogIntegrityError::UnexpectedPageStep {
                            name: add_on.name.clone(),
                        });
                    }
                }
            }
            for binding in &add_on.eligible_bindings {
                if self.binding_type(binding).is_none() {
                    errors.push(CatalogIntegrityError::UnknownEligibleBinding {
                        name: add_on.name.clone(),
                        binding: binding.clone(),
                    });
                }
            }
        }
    }

    fn check_quantity(&self, errors: &mut Vec<CatalogIntegrityError>) {
        if self.quantity.minimum == 0 {
            errors.push(CatalogIntegrityError::QuantityMinimumZero);
        }
        if self.quantity.step == 0 {
            errors.push(CatalogIntegrityError::QuantityStepZero);
        }
        if !self.quantity.is_unbounded() && self.quantity.maximum < self.quantity.minimum {
            errors.push(CatalogIntegrityError::QuantityMaximumBelowMinimum {
                minimum: self.quantity.minimum,
                maximum: self.quantity.maximum,
            });
        }
    }

    /// Every reachable (paper, weight, offered mode) triple must have
    /// exactly one rate entry - the calculator treats a miss as corruption.
    fn check_page_rates(&self, errors: &mut Vec<CatalogIntegrityError>) {
        for paper in &self.paper_types {
            for weight in &paper.weights {
                for mode in weight.offered_print_modes() {
                    let matching = self
                        .page_rates
                        .iter()
                        .filter(|r| {
                            r.paper_type == paper.name
                                && r.grams == weight.grams
                                && r.print_mode == mode
                        })
                        .count();
                    if matching == 0 {
                        errors.push(CatalogIntegrityError::MissingPageRate {
                            paper_type: paper.name.clone(),
                            grams: weight.grams,
                            print_mode: mode,
                        });
                    } else if matching > 1 {
                        errors.push(CatalogIntegrityError::DuplicatePageRate {
                            paper_type: paper.name.clone(),
                            grams: weight.grams,
                            print_mode: mode,
                        });
                    }
                }
            }
        }
    }

    fn check_discount_tiers(&self, errors: &mut Vec<CatalogIntegrityError>) {
        let tiers = &self.discount_tiers;
        if tiers.is_empty() {
            errors.push(CatalogIntegrityError::NoDiscountTiers);
            return;
        }

        if tiers[0].min_quantity > self.quantity.minimum {
            errors.push(CatalogIntegrityError::FirstTierAboveMinimum {
                tier_min: tiers[0].min_quantity,
                minimum: self.quantity.minimum,
            });
        }

        for (i, tier) in tiers.iter().enumerate() {
            let last = i == tiers.len() - 1;
            match tier.max_quantity {
                Some(max) => {
                    if max < tier.min_quantity {
                        errors.push(CatalogIntegrityError::InvertedTier {
                            index: i,
                            min_quantity: tier.min_quantity,
                            max_quantity: max,
                        });
                    }
                    if last {
                        errors.push(CatalogIntegrityError::BoundedLastTier);
                    } else if tiers[i + 1].min_quantity != max + 1 {
                        errors.push(CatalogIntegrityError::TierGapOrOverlap {
                            index: i,
                            next: i + 1,
                        });
                    }
                }
                None => {
                    if !last {
                        errors.push(CatalogIntegrityError::UnboundedInnerTier { index: i });
                    }
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
