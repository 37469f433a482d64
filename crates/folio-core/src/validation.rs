//! # Validation Gate
//!
//! Cross-cutting business-rule checks applied to a selection the caller
//! believes is complete, before any price is calculated.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (option pickers)                                │
//! │  ├── Renders only values the resolver reported as allowed              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (the gate)                                       │
//! │  ├── Completeness, page counts, quantity bounds/step, add-on steps     │
//! │  └── Re-derives the resolver cascade for every submitted value -       │
//! │      what the client was once shown is never trusted                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Price Calculator                                             │
//! │  └── Fails fast if invoked without passing this gate                   │
//! │                                                                         │
//! │  All violations are collected - the caller gets the full repair        │
//! │  list in one round trip, never just the first failure.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::catalog::{AddOnKind, ProductCatalog};
use crate::error::ValidationError;
use crate::resolver;
use crate::types::{PrintMode, Selection};
use crate::MAX_TOTAL_PAGES;

/// Validates a complete selection against the catalog.
///
/// ## Returns
/// `Ok(())` when the selection is legal, or every violation found - the
/// caller must not proceed to calculation on any violation.
pub fn validate(catalog: &ProductCatalog, selection: &Selection) -> Result<(), Vec<ValidationError>> {
    let mut violations = Vec::new();

    check_book_size(catalog, selection, &mut violations);
    check_required_fields(selection, &mut violations);
    check_page_counts(selection, &mut violations);
    check_quantity(catalog, selection, &mut violations);
    check_cascade(catalog, selection, &mut violations);
    check_add_on_page_steps(catalog, selection, &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

// =============================================================================
// Individual Checks
// =============================================================================

fn check_book_size(
    catalog: &ProductCatalog,
    selection: &Selection,
    violations: &mut Vec<ValidationError>,
) {
    if selection.book_size.is_empty() {
        violations.push(ValidationError::MissingField { field: "bookSize" });
    } else if selection.book_size != catalog.book_size {
        violations.push(ValidationError::BookSizeMismatch {
            supplied: selection.book_size.clone(),
            expected: catalog.book_size.clone(),
        });
    }
}

fn check_required_fields(selection: &Selection, violations: &mut Vec<ValidationError>) {
    if selection.paper_type.is_none() {
        violations.push(ValidationError::MissingField { field: "paperType" });
    }
    if selection.paper_weight.is_none() {
        violations.push(ValidationError::MissingField { field: "paperWeight" });
    }
    if selection.print_mode.is_none() {
        violations.push(ValidationError::MissingField { field: "printMode" });
    }
    if selection.binding_type.is_none() {
        violations.push(ValidationError::MissingField { field: "bindingType" });
    }
    if selection.cover_weight.is_none() {
        violations.push(ValidationError::MissingField { field: "coverWeight" });
    }
}

fn check_page_counts(selection: &Selection, violations: &mut Vec<ValidationError>) {
    let total = selection.total_pages();

    if total == 0 {
        violations.push(ValidationError::NoPages);
    } else if total > MAX_TOTAL_PAGES {
        violations.push(ValidationError::PagesAboveMaximum {
            total,
            max: MAX_TOTAL_PAGES,
        });
    }

    match selection.print_mode {
        Some(PrintMode::Bw) if selection.page_count_color > 0 => {
            violations.push(ValidationError::PagesNotAllowedForMode {
                field: "pageCountColor",
                mode: PrintMode::Bw,
            });
        }
        Some(PrintMode::Color) if selection.page_count_bw > 0 => {
            violations.push(ValidationError::PagesNotAllowedForMode {
                field: "pageCountBw",
                mode: PrintMode::Color,
            });
        }
        Some(PrintMode::Mixed)
            if selection.page_count_bw == 0 || selection.page_count_color == 0 =>
        {
            violations.push(ValidationError::MixedRequiresBothPages);
        }
        _ => {}
    }
}

fn check_quantity(
    catalog: &ProductCatalog,
    selection: &Selection,
    violations: &mut Vec<ValidationError>,
) {
    let constraint = &catalog.quantity;
    let quantity = selection.quantity;

    if quantity < constraint.minimum {
        violations.push(ValidationError::QuantityBelowMinimum {
            quantity,
            minimum: constraint.minimum,
        });
    } else if (quantity - constraint.minimum) % constraint.step != 0 {
        violations.push(ValidationError::QuantityStepMismatch {
            quantity,
            minimum: constraint.minimum,
            step: constraint.step,
        });
    }

    if !constraint.is_unbounded() && quantity > constraint.maximum {
        violations.push(ValidationError::QuantityAboveMaximum {
            quantity,
            maximum: constraint.maximum,
        });
    }
}

/// Re-derives the resolver's cascade for every submitted value.
///
/// The presentation layer pre-filters its dropdowns, but what it submits
/// is validated from scratch here - this closes the gap between what was
/// once displayed and what arrives after tampering or a stale catalog.
fn check_cascade(
    catalog: &ProductCatalog,
    selection: &Selection,
    violations: &mut Vec<ValidationError>,
) {
    // Paper chain: each link can only be judged under a valid parent.
    if let Some(name) = &selection.paper_type {
        match resolver::check_paper_type(catalog, name) {
            Err(err) => violations.push(err.into()),
            Ok(paper) => {
                if let Some(grams) = selection.paper_weight {
                    match resolver::check_paper_weight(paper, grams) {
                        Err(err) => violations.push(err.into()),
                        Ok(weight) => {
                            if let Some(mode) = selection.print_mode {
                                if let Err(err) = resolver::check_print_mode(paper, weight, mode) {
                                    violations.push(err.into());
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    // Binding chain, independent of the paper chain.
    if let Some(name) = &selection.binding_type {
        match resolver::check_binding_type(catalog, name) {
            Err(err) => violations.push(err.into()),
            Ok(binding) => {
                if let Some(grams) = selection.cover_weight {
                    if let Err(err) = resolver::check_cover_weight(binding, grams) {
                        violations.push(err.into());
                    }
                }
            }
        }
    }

    // Add-ons: set semantics, then existence + binding eligibility.
    for (i, name) in selection.add_ons.iter().enumerate() {
        if selection.add_ons[..i].contains(name) {
            violations.push(ValidationError::DuplicateAddOn { name: name.clone() });
            continue;
        }
        if let Err(err) =
            resolver::check_add_on(catalog, selection.binding_type.as_deref(), name)
        {
            violations.push(err.into());
        }
    }
}

/// Billing floors page-based add-ons to whole steps, so a selection whose
/// relevant page count cannot cover one step is inconsistent, not free.
fn check_add_on_page_steps(
    catalog: &ProductCatalog,
    selection: &Selection,
    violations: &mut Vec<ValidationError>,
) {
    for name in &selection.add_ons {
        let Some(add_on) = catalog.add_on(name) else {
            continue; // already reported by the cascade check
        };
        if add_on.kind != AddOnKind::PageBased {
            continue;
        }
        let Some(step) = add_on.page_step else {
            continue; // catalog integrity defect; the calculator alarms on it
        };

        let relevant = add_on.relevant_pages(selection.page_count_bw, selection.page_count_color);
        if relevant < step {
            violations.push(ValidationError::AddOnPagesBelowStep {
                add_on: add_on.name.clone(),
                step,
                relevant,
            });
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


// ---------------------------------------------------------------------------
// Property tests: resolver/gate equivalence
// ---------------------------------------------------------------------------

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::validate;
    use crate::catalog::AddOnKind;
    use crate::resolver::resolve;
    use crate::testutil::fixture_catalog;
    use crate::types::{PrintMode, Selection};

    type Idx = prop::sample::Index;

    /// Builds a complete selection by walking the resolver's own allowed
    /// sets level by level, so every cascade field is resolver-legal by
    /// construction. Page counts and quantity honor the orthogonal gate
    /// rules (mode consistency, tier steps, add-on step coverage).
    #[allow(clippy::too_many_arguments)]
    fn resolver_built_selection(
        paper: Idx,
        weight: Idx,
        mode: Idx,
        binding: Idx,
        cover: Idx,
        add_on_mask: &[bool],
        quantity_steps: u32,
        bw: u32,
        color: u32,
    ) -> Selection {
        let catalog = fixture_catalog();
        let mut selection = Selection {
            book_size: "A5".to_string(),
            quantity: 100 + 50 * quantity_steps,
            ..Selection::default()
        };

        let allowed = resolve(&catalog, &selection).unwrap();
        selection.paper_type = Some(allowed.paper_types[paper.index(allowed.paper_types.len())].clone());

        let allowed = resolve(&catalog, &selection).unwrap();
        selection.paper_weight = Some(allowed.paper_weights[weight.index(allowed.paper_weights.len())]);

        let allowed = resolve(&catalog, &selection).unwrap();
        let chosen_mode = allowed.print_modes[mode.index(allowed.print_modes.len())];
        selection.print_mode = Some(chosen_mode);
        let (bw, color) = match chosen_mode {
            PrintMode::Bw => (bw, 0),
            PrintMode::Color => (0, color),
            PrintMode::Mixed => (bw, color),
        };
        selection.page_count_bw = bw;
        selection.page_count_color = color;

        let allowed = resolve(&catalog, &selection).unwrap();
        selection.binding_type =
            Some(allowed.binding_types[binding.index(allowed.binding_types.len())].clone());

        let allowed = resolve(&catalog, &selection).unwrap();
        selection.cover_weight = Some(allowed.cover_weights[cover.index(allowed.cover_weights.len())]);

        let allowed = resolve(&catalog, &selection).unwrap();
        for (i, add_on) in allowed.add_ons.iter().enumerate() {
            if !add_on_mask.get(i).copied().unwrap_or(false) {
                continue;
            }
            // Skip page-based add-ons the page counts can't cover - that
            // constraint is orthogonal to the cascade under test here.
            if add_on.kind == AddOnKind::PageBased {
                let relevant = add_on.page_scope.relevant_pages(bw, color);
                if relevant < add_on.page_step.unwrap_or(u32::MAX) {
                    continue;
                }
            }
            selection.add_ons.push(add_on.name.clone());
        }

        selection
    }

    proptest! {
        /// The gate must accept every selection assembled purely from the
        /// resolver's allowed sets.
        #[test]
        fn prop_gate_accepts_resolver_built_selections(
            paper in any::<Idx>(),
            weight in any::<Idx>(),
            mode in any::<Idx>(),
            binding in any::<Idx>(),
            cover in any::<Idx>(),
            add_on_mask in prop::collection::vec(any::<bool>(), 0..8),
            quantity_steps in 0..99u32,
            bw in 16..400u32,
            color in 16..400u32,
        ) {
            let catalog = fixture_catalog();
            let selection = resolver_built_selection(
                paper, weight, mode, binding, cover, &add_on_mask, quantity_steps, bw, color,
            );

            let outcome = validate(&catalog, &selection);
            prop_assert!(outcome.is_ok(), "gate rejected a resolver-built selection: {:?}", outcome);
        }

        /// Swapping any one cascade field to an excluded value must flip
        /// the gate to rejection.
        #[test]
        fn prop_gate_rejects_one_excluded_field(
            paper in any::<Idx>(),
            weight in any::<Idx>(),
            mode in any::<Idx>(),
            binding in any::<Idx>(),
            cover in any::<Idx>(),
            quantity_steps in 0..99u32,
            bw in 16..400u32,
            color in 16..400u32,
            tamper in 0..6usize,
        ) {
            let catalog = fixture_catalog();
            let mut selection = resolver_built_selection(
                paper, weight, mode, binding, cover, &[], quantity_steps, bw, color,
            );

            match tamper {
                0 => selection.paper_type = Some("Vellum".to_string()),
                1 => selection.paper_weight = Some(999),
                2 => {
                    // Pick a mode the chosen weight excludes; fall back to
                    // an excluded weight when the stock supports them all.
                    let allowed = resolve(&catalog, &selection).unwrap();
                    let excluded = [PrintMode::Bw, PrintMode::Color, PrintMode::Mixed]
                        .into_iter()
                        .find(|m| !allowed.print_modes.contains(m));
                    match excluded {
                        Some(m) => selection.print_mode = Some(m),
                        None => selection.paper_weight = Some(999),
                    }
                }
                3 => selection.binding_type = Some("Wire-O".to_string()),
                4 => selection.cover_weight = Some(999),
                _ => selection.add_ons = vec!["Foil stamping".to_string()],
            }

            prop_assert!(validate(&catalog, &selection).is_err());
        }
    }
}
