//! # Price Calculator
//!
//! Turns a complete, validated selection into an itemized price.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Pricing a Selection                                 │
//! │                                                                         │
//! │  page cost      = bw × perPageBw + colour × perPageColor                │
//! │  binding cost   = binding rate                                          │
//! │  cover cost     = cover rate                                            │
//! │  add-on cost    = Σ flat | unit × (relevant pages ÷ step, floored)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unit price     = page + binding + cover + add-ons                      │
//! │  subtotal       = unit price × quantity                                 │
//! │  discount       = subtotal × tier rate   ◄── single round-half-up       │
//! │  total          = subtotal − discount                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  override?      = unit := override, total := override × quantity,       │
//! │                   discount zeroed + relabeled (kept for audit)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is integer minor units; the discount application is the
//! only rounding point. The calculator is a pure function: the same
//! catalog and selection always produce a byte-identical breakdown.

use tracing::{error, warn};

use crate::catalog::{AddOnKind, ProductCatalog};
use crate::discount::{tier_for, TierMatch};
use crate::error::{PricingError, PricingResult};
use crate::money::{DiscountRate, Money};
use crate::resolver;
use crate::types::{LineItem, PriceBreakdown, Selection};

/// Calculates the price of a complete selection.
///
/// ## Contract
/// Callable only on a selection that has already passed the Validation
/// Gate. An incomplete or structurally unknown selection fails fast with
/// [`PricingError::PreconditionViolated`] - a caller bug, never shown to
/// end users. A selection that validated but has no matching page rate is
/// catalog corruption and raises [`PricingError::MissingPageRate`].
pub fn calculate(catalog: &ProductCatalog, selection: &Selection) -> PricingResult<PriceBreakdown> {
    if !selection.is_complete() {
        return Err(PricingError::PreconditionViolated {
            reason: "selection is incomplete".to_string(),
        });
    }

    // Complete by the check above; re-derive the structural entries. A
    // miss here means the gate was skipped, not that the catalog is bad -
    // structural rates are embedded, only the page-rate table can be torn.
    let (paper_name, grams, mode, binding_name, cover_grams) = match (
        selection.paper_type.as_deref(),
        selection.paper_weight,
        selection.print_mode,
        selection.binding_type.as_deref(),
        selection.cover_weight,
    ) {
        (Some(paper), Some(grams), Some(mode), Some(binding), Some(cover)) => {
            (paper, grams, mode, binding, cover)
        }
        _ => {
            return Err(PricingError::PreconditionViolated {
                reason: "selection is incomplete".to_string(),
            })
        }
    };

    let paper = resolver::check_paper_type(catalog, paper_name).map_err(precondition)?;
    let weight = resolver::check_paper_weight(paper, grams).map_err(precondition)?;
    resolver::check_print_mode(paper, weight, mode).map_err(precondition)?;
    let binding = resolver::check_binding_type(catalog, binding_name).map_err(precondition)?;
    let cover = resolver::check_cover_weight(binding, cover_grams).map_err(precondition)?;

    let mut line_items = Vec::new();

    // 1. Page cost
    let rate = catalog
        .page_rate(paper_name, grams, mode)
        .ok_or_else(|| {
            let fault = PricingError::MissingPageRate {
                paper_type: paper_name.to_string(),
                grams,
                print_mode: mode,
            };
            error!(
                product_id = %catalog.product_id,
                paper_type = %paper_name,
                grams,
                print_mode = %mode,
                "page rate missing for a validated selection"
            );
            fault
        })?;
    let page_cost =
        rate.per_page_bw * selection.page_count_bw + rate.per_page_color * selection.page_count_color;
    line_items.push(LineItem::new("Pages", page_cost));

    // 2. Binding cost
    line_items.push(LineItem::new(
        format!("Binding: {}", binding.name),
        binding.unit_price,
    ));

    // 3. Cover cost
    line_items.push(LineItem::new(
        format!("Cover: {}gsm", cover.grams),
        cover.unit_price,
    ));

    // 4. Add-on cost
    let mut add_ons_total = Money::zero();
    for name in &selection.add_ons {
        let add_on =
            resolver::check_add_on(catalog, Some(binding_name), name).map_err(precondition)?;
        let cost = match add_on.kind {
            AddOnKind::Flat => add_on.unit_price,
            AddOnKind::PageBased => {
                let step = add_on.page_step.ok_or_else(|| {
                    error!(
                        product_id = %catalog.product_id,
                        add_on = %add_on.name,
                        "page-based add-on reached billing without a page step"
                    );
                    PricingError::MissingPageStep {
                        add_on: add_on.name.clone(),
                    }
                })?;
                let relevant =
                    add_on.relevant_pages(selection.page_count_bw, selection.page_count_color);
                // Whole steps only; the gate guarantees at least one
                add_on.unit_price * (relevant / step)
            }
        };
        add_ons_total += cost;
        line_items.push(LineItem::new(format!("Add-on: {}", add_on.name), cost));
    }

    // 5-6. Unit price and subtotal
    let unit_price = page_cost + binding.unit_price + cover.unit_price + add_ons_total;
    let subtotal = unit_price * selection.quantity as i64;

    // 7. Tier discount
    let tier = tier_for(&catalog.discount_tiers, selection.quantity);
    if let TierMatch::NoTierMatched = tier {
        warn!(
            product_id = %catalog.product_id,
            quantity = selection.quantity,
            "no discount tier matched; defaulting to zero discount"
        );
    }
    let discount_rate = tier.rate();
    let discount_amount = subtotal.percent_of(discount_rate);

    // 8. Total
    let total_price = subtotal - discount_amount;

    // 9. Override
    if let Some(override_unit) = selection.override_unit_price {
        let override_total = override_unit * selection.quantity as i64;
        line_items.push(LineItem::new(
            "Quantity discount (superseded by override)",
            Money::zero(),
        ));
        line_items.push(LineItem::new("Manual override delta", override_total - total_price));

        return Ok(PriceBreakdown {
            unit_price: override_unit,
            total_before_discount: override_total,
            discount_rate: DiscountRate::zero(),
            discount_amount: Money::zero(),
            total_price: override_total,
            line_items,
        });
    }

    line_items.push(LineItem::new(
        format!("Quantity discount ({}%)", discount_rate.percent()),
        -discount_amount,
    ));

    Ok(PriceBreakdown {
        unit_price,
        total_before_discount: subtotal,
        discount_rate,
        discount_amount,
        total_price,
        line_items,
    })
}

fn precondition(err: crate::error::IncompatibleSelection) -> PricingError {
    PricingError::PreconditionViolated {
        reason: err.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


// ---------------------------------------------------------------------------
// Property tests: pricing invariants
// ---------------------------------------------------------------------------
