//! # Compatibility Resolver
//!
//! Cascading constraint resolution over a partial selection.
//!
//! ## The Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Option Dependency Graph                              │
//! │                                                                         │
//! │   book size (scopes the catalog itself)                                 │
//! │        │                                                                │
//! │        ├──► paper type ──► paper weight ──► print mode                  │
//! │        │                                    (mixed = bw ∧ color)        │
//! │        │                                                                │
//! │        └──► binding type ──► cover weight                               │
//! │                  │                                                      │
//! │                  └──► add-on eligibility                                │
//! │                                                                         │
//! │   Each level is gated strictly by its parent - never by siblings        │
//! │   or descendants.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver is a pure function over an immutable catalog and a
//! selection value. It never mutates the selection: an add-on that is no
//! longer eligible is simply omitted from the allowed set, and the caller
//! is responsible for force-deselecting it. A supplied value that
//! contradicts its ancestor fails the whole call with
//! [`IncompatibleSelection`] - nothing is silently dropped or repaired.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{
    AddOn, AddOnKind, BindingType, CoverWeight, PaperType, PaperWeight, ProductCatalog,
};
use crate::error::{IncompatibleSelection, ResolveResult};
use crate::money::Money;
use crate::types::{PageScope, PrintMode, Selection};

// =============================================================================
// Allowed Options
// =============================================================================

/// An add-on the current selection may still take, with enough pricing
/// context for the client to render its cost inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AllowedAddOn {
    pub name: String,
    pub unit_price: Money,
    pub kind: AddOnKind,
    pub page_step: Option<u32>,
    pub page_scope: PageScope,
}

impl From<&AddOn> for AllowedAddOn {
    fn from(add_on: &AddOn) -> Self {
        AllowedAddOn {
            name: add_on.name.clone(),
            unit_price: add_on.unit_price,
            kind: add_on.kind,
            page_step: add_on.page_step,
            page_scope: add_on.page_scope,
        }
    }
}

/// Per cascade level, the values still selectable without contradicting
/// already-chosen ancestor values.
///
/// A level whose parent has not been chosen yet is locked and reported
/// empty - the client renders it disabled until the parent is picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AllowedOptions {
    /// Catalog-wide list, independent of other choices.
    pub paper_types: Vec<String>,

    /// Weights of the chosen paper type; empty until one is chosen.
    pub paper_weights: Vec<u32>,

    /// Modes of the chosen weight, `Mixed` appended when both base modes
    /// are present; empty until a weight is chosen.
    pub print_modes: Vec<PrintMode>,

    /// Catalog-wide list, independent of the paper cascade.
    pub binding_types: Vec<String>,

    /// Cover weights of the chosen binding; empty until one is chosen.
    pub cover_weights: Vec<u32>,

    /// Add-ons eligible under the chosen binding. Until a binding is
    /// chosen, only add-ons legal under every binding are offered.
    pub add_ons: Vec<AllowedAddOn>,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the values still legal at each cascade level.
///
/// ## Errors
/// Fails with [`IncompatibleSelection`] when a supplied value is absent
/// from the filtered set of its parent (or from the catalog itself),
/// naming the offending field and the excluding parent value.
pub fn resolve(catalog: &ProductCatalog, selection: &Selection) -> ResolveResult<AllowedOptions> {
    let paper_types = catalog.paper_types.iter().map(|p| p.name.clone()).collect();

    let mut paper_weights = Vec::new();
    let mut print_modes = Vec::new();
    if let Some(name) = &selection.paper_type {
        let paper = check_paper_type(catalog, name)?;
        paper_weights = paper.weights.iter().map(|w| w.grams).collect();

        if let Some(grams) = selection.paper_weight {
            let weight = check_paper_weight(paper, grams)?;
            print_modes = weight.offered_print_modes();

            if let Some(mode) = selection.print_mode {
                check_print_mode(paper, weight, mode)?;
            }
        }
    }

    let binding_types = catalog.binding_types.iter().map(|b| b.name.clone()).collect();

    let mut cover_weights = Vec::new();
    if let Some(name) = &selection.binding_type {
        let binding = check_binding_type(catalog, name)?;
        cover_weights = binding.cover_weights.iter().map(|c| c.grams).collect();

        if let Some(grams) = selection.cover_weight {
            check_cover_weight(binding, grams)?;
        }
    }

    for name in &selection.add_ons {
        check_add_on(catalog, selection.binding_type.as_deref(), name)?;
    }

    let add_ons = catalog
        .add_ons
        .iter()
        .filter(|a| match selection.binding_type.as_deref() {
            Some(binding) => a.eligible_for(binding),
            // No binding chosen yet: offer only add-ons legal everywhere
            None => a.eligible_bindings.is_empty(),
        })
        .map(AllowedAddOn::from)
        .collect();

    Ok(AllowedOptions {
        paper_types,
        paper_weights,
        print_modes,
        binding_types,
        cover_weights,
        add_ons,
    })
}

// =============================================================================
// Per-Field Checks
// =============================================================================
// The Validation Gate re-derives the cascade through these same checks, so
// the set of selections the gate accepts can never drift from the set the
// resolver marks legal.

pub(crate) fn check_paper_type<'a>(
    catalog: &'a ProductCatalog,
    name: &str,
) -> ResolveResult<&'a PaperType> {
    catalog.paper_type(name).ok_or_else(|| {
        IncompatibleSelection::new("paperType", name, format!("catalog '{}'", catalog.product_id))
    })
}

pub(crate) fn check_paper_weight<'a>(
    paper: &'a PaperType,
    grams: u32,
) -> ResolveResult<&'a PaperWeight> {
    paper.weight(grams).ok_or_else(|| {
        IncompatibleSelection::new("paperWeight", grams.to_string(), paper.name.clone())
    })
}

pub(crate) fn check_print_mode(
    paper: &PaperType,
    weight: &PaperWeight,
    mode: PrintMode,
) -> ResolveResult<()> {
    if weight.supports(mode) {
        Ok(())
    } else {
        Err(IncompatibleSelection::new(
            "printMode",
            mode.to_string(),
            format!("{} {}gsm", paper.name, weight.grams),
        ))
    }
}

pub(crate) fn check_binding_type<'a>(
    catalog: &'a ProductCatalog,
    name: &str,
) -> ResolveResult<&'a BindingType> {
    catalog.binding_type(name).ok_or_else(|| {
        IncompatibleSelection::new(
            "bindingType",
            name,
            format!("catalog '{}'", catalog.product_id),
        )
    })
}

pub(crate) fn check_cover_weight<'a>(
    binding: &'a BindingType,
    grams: u32,
) -> ResolveResult<&'a CoverWeight> {
    binding.cover_weight(grams).ok_or_else(|| {
        IncompatibleSelection::new("coverWeight", grams.to_string(), binding.name.clone())
    })
}

/// Checks one selected add-on against the catalog and, when a binding has
/// been chosen, against that binding's eligibility. A restricted add-on
/// under an unchosen binding is left to the completeness checks - there is
/// no ancestor value to contradict yet.
pub(crate) fn check_add_on<'a>(
    catalog: &'a ProductCatalog,
    binding: Option<&str>,
    name: &str,
) -> ResolveResult<&'a AddOn> {
    let add_on = catalog.add_on(name).ok_or_else(|| {
        IncompatibleSelection::new("addOns", name, format!("catalog '{}'", catalog.product_id))
    })?;

    if let Some(binding) = binding {
        if !add_on.eligible_for(binding) {
            return Err(IncompatibleSelection::new("addOns", name, binding));
        }
    }

    Ok(add_on)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fixture_catalog;

    fn empty_selection() -> Selection {
        Selection {
            book_size: "A5".to_string(),
            ..Selection::default()
        }
    }

    #[test]
    fn test_empty_selection_offers_top_levels_only() {
        let catalog = fixture_catalog();
        let allowed = resolve(&catalog, &empty_selection()).unwrap();

        assert_eq!(allowed.paper_types, vec!["Bond", "Coated"]);
        assert_eq!(allowed.binding_types, vec!["Perfect bound", "Spiral"]);
        // Child levels locked until their parents are chosen
        assert!(allowed.paper_weights.is_empty());
        assert!(allowed.print_modes.is_empty());
        assert!(allowed.cover_weights.is_empty());
        // Only universally-eligible add-ons before a binding is chosen
        assert!(allowed.add_ons.iter().all(|a| a.name != "Hole punching"));
    }

    #[test]
    fn test_paper_type_unlocks_weights() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.paper_type = Some("Bond".to_string());

        let allowed = resolve(&catalog, &selection).unwrap();
        assert_eq!(allowed.paper_weights, vec![60, 80]);
        assert!(allowed.print_modes.is_empty());
    }

    #[test]
    fn test_mixed_offered_only_when_both_base_modes_present() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.paper_type = Some("Bond".to_string());

        // 80gsm Bond supports bw + color → mixed is derived
        selection.paper_weight = Some(80);
        let allowed = resolve(&catalog, &selection).unwrap();
        assert_eq!(
            allowed.print_modes,
            vec![PrintMode::Bw, PrintMode::Color, PrintMode::Mixed]
        );

        // 60gsm Bond is bw-only → neither color nor mixed
        selection.paper_weight = Some(60);
        let allowed = resolve(&catalog, &selection).unwrap();
        assert_eq!(allowed.print_modes, vec![PrintMode::Bw]);
    }

    #[test]
    fn test_mixed_rejected_on_bw_only_stock() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.paper_type = Some("Bond".to_string());
        selection.paper_weight = Some(60);
        selection.print_mode = Some(PrintMode::Mixed);

        let err = resolve(&catalog, &selection).unwrap_err();
        assert_eq!(err.field, "printMode");
        assert_eq!(err.value, "mixed");
        assert_eq!(err.parent, "Bond 60gsm");
    }

    #[test]
    fn test_unknown_paper_type_is_incompatible() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.paper_type = Some("Parchment".to_string());

        let err = resolve(&catalog, &selection).unwrap_err();
        assert_eq!(err.field, "paperType");
        assert_eq!(err.value, "Parchment");
    }

    #[test]
    fn test_weight_not_under_chosen_paper_is_incompatible() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.paper_type = Some("Coated".to_string());
        selection.paper_weight = Some(80); // only Bond has 80gsm

        let err = resolve(&catalog, &selection).unwrap_err();
        assert_eq!(err.field, "paperWeight");
        assert_eq!(err.parent, "Coated");
    }

    #[test]
    fn test_binding_unlocks_cover_weights_and_add_ons() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.binding_type = Some("Spiral".to_string());

        let allowed = resolve(&catalog, &selection).unwrap();
        assert_eq!(allowed.cover_weights, vec![200]);
        assert!(allowed.add_ons.iter().any(|a| a.name == "Hole punching"));
    }

    #[test]
    fn test_restricted_add_on_omitted_under_other_binding() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.binding_type = Some("Perfect bound".to_string());

        let allowed = resolve(&catalog, &selection).unwrap();
        // "Hole punching" is Spiral-only: omitted, never listed as disabled
        assert!(allowed.add_ons.iter().all(|a| a.name != "Hole punching"));
        assert!(allowed.add_ons.iter().any(|a| a.name == "Gloss lamination"));
    }

    #[test]
    fn test_selected_ineligible_add_on_is_incompatible() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.binding_type = Some("Perfect bound".to_string());
        selection.add_ons = vec!["Hole punching".to_string()];

        let err = resolve(&catalog, &selection).unwrap_err();
        assert_eq!(err.field, "addOns");
        assert_eq!(err.value, "Hole punching");
        assert_eq!(err.parent, "Perfect bound");
    }

    #[test]
    fn test_cover_weight_not_under_binding_is_incompatible() {
        let catalog = fixture_catalog();
        let mut selection = empty_selection();
        selection.binding_type = Some("Spiral".to_string());
        selection.cover_weight = Some(250); // Perfect bound's cover stock

        let err = resolve(&catalog, &selection).unwrap_err();
        assert_eq!(err.field, "coverWeight");
        assert_eq!(err.parent, "Spiral");
    }

    /// Cascade consistency: every value reported as allowed, when added to
    /// the selection, must survive the next resolver call.
    #[test]
    fn test_allowed_values_stay_allowed_when_chosen() {
        let catalog = fixture_catalog();

        for paper in resolve(&catalog, &empty_selection()).unwrap().paper_types {
            let mut selection = empty_selection();
            selection.paper_type = Some(paper);

            for grams in resolve(&catalog, &selection).unwrap().paper_weights {
                let mut selection = selection.clone();
                selection.paper_weight = Some(grams);

                for mode in resolve(&catalog, &selection).unwrap().print_modes {
                    let mut selection = selection.clone();
                    selection.print_mode = Some(mode);
                    resolve(&catalog, &selection).expect("allowed mode must stay allowed");
                }
            }
        }

        for binding in resolve(&catalog, &empty_selection()).unwrap().binding_types {
            let mut selection = empty_selection();
            selection.binding_type = Some(binding);

            let allowed = resolve(&catalog, &selection).unwrap();
            for grams in allowed.cover_weights {
                let mut selection = selection.clone();
                selection.cover_weight = Some(grams);
                resolve(&catalog, &selection).expect("allowed cover must stay allowed");
            }
            for add_on in allowed.add_ons {
                let mut selection = selection.clone();
                selection.add_ons = vec![add_on.name];
                resolve(&catalog, &selection).expect("allowed add-on must stay allowed");
            }
        }
    }
}
