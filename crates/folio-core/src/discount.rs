//! # Discount Tier Lookup
//!
//! Pure mapping from an order quantity to its discount tier.
//!
//! The tier table is validated at catalog-load time to be contiguous,
//! non-overlapping, and unbounded at the top, so every legal quantity
//! matches exactly one tier. A miss can therefore only mean a hand-edited
//! or corrupted catalog - that is a catalog-authoring defect, not a user
//! error, and it degrades to a zero discount rather than failing the
//! order. The calculator logs the degrade for catalog maintainers.

use crate::catalog::DiscountTier;
use crate::money::DiscountRate;

/// Result of a tier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierMatch<'a> {
    /// Exactly one tier contains the quantity.
    Matched {
        /// Position in the catalog's tier table (for audit logs).
        index: usize,
        tier: &'a DiscountTier,
    },

    /// No tier contains the quantity - catalog-authoring defect.
    NoTierMatched,
}

impl TierMatch<'_> {
    /// The rate to apply; zero on a miss.
    pub fn rate(&self) -> DiscountRate {
        match self {
            TierMatch::Matched { tier, .. } => tier.rate,
            TierMatch::NoTierMatched => DiscountRate::zero(),
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, TierMatch::Matched { .. })
    }
}

/// Finds the tier whose `[min_quantity, max_quantity]` range contains
/// `quantity`.
///
/// Linear scan: tier tables are a handful of entries, ordered, and this
/// sits on a sub-millisecond path.
pub fn tier_for<'a>(tiers: &'a [DiscountTier], quantity: u32) -> TierMatch<'a> {
    tiers
        .iter()
        .enumerate()
        .find(|(_, tier)| tier.contains(quantity))
        .map(|(index, tier)| TierMatch::Matched { index, tier })
        .unwrap_or(TierMatch::NoTierMatched)
}

// =============================================================================
// Unit Tests
// =============================================================================


// ---------------------------------------------------------------------------
// Property tests: tier totality over arbitrary well-formed tables
// ---------------------------------------------------------------------------

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::tier_for;
    use crate::catalog::DiscountTier;
    use crate::money::DiscountRate;

    /// Builds a contiguous table: `widths` sized bounded tiers from
    /// `base`, then the mandatory unbounded top tier.
    fn contiguous_tiers(base: u32, widths: &[u32]) -> Vec<DiscountTier> {
        let mut tiers = Vec::new();
        let mut start = base;
        for (i, width) in widths.iter().enumerate() {
            tiers.push(DiscountTier {
                min_quantity: start,
                max_quantity: Some(start + width - 1),
                rate: DiscountRate::from_bps(i as u32 * 100),
            });
            start += width;
        }
        tiers.push(DiscountTier {
            min_quantity: start,
            max_quantity: None,
            rate: DiscountRate::from_bps(widths.len() as u32 * 100),
        });
        tiers
    }

    proptest! {
        /// No gaps, no overlaps: every quantity at or above the table's
        /// base matches exactly one tier, and the lookup finds it.
        #[test]
        fn prop_contiguous_tables_are_total(
            base in 1..200u32,
            widths in prop::collection::vec(1..250u32, 1..6),
        ) {
            let tiers = contiguous_tiers(base, &widths);
            let top = base + widths.iter().sum::<u32>();

            for quantity in base..top + 50 {
                let matching = tiers.iter().filter(|t| t.contains(quantity)).count();
                prop_assert_eq!(matching, 1);
                prop_assert!(tier_for(&tiers, quantity).is_matched());
            }
        }

        /// Below the table's base nothing matches and the lookup degrades
        /// to a zero rate instead of failing.
        #[test]
        fn prop_below_base_degrades_to_zero(
            base in 2..200u32,
            widths in prop::collection::vec(1..250u32, 1..6),
        ) {
            let tiers = contiguous_tiers(base, &widths);
            let lookup = tier_for(&tiers, base - 1);
            prop_assert!(!lookup.is_matched());
            prop_assert!(lookup.rate().is_zero());
        }
    }
}
