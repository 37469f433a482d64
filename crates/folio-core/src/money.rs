//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A quote recomputed from the same selection MUST be byte-identical -   │
//! │  the order side persists the breakdown verbatim and never recomputes.  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    All rates, line items, and totals are i64 minor units.              │
//! │    The single rounding point is percentage application, which rounds   │
//! │    half-up - at the final total only, never at intermediate items.     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::money::{DiscountRate, Money};
//!
//! // Create from minor units (the only way in)
//! let per_page = Money::from_minor(12);
//!
//! // Arithmetic operations
//! let pages = per_page * 200u32;              // 2400 minor units
//! let subtotal = pages * 150u32;              // × quantity
//!
//! // Percentage application (round half-up, the single rounding point)
//! let discount = subtotal.percent_of(DiscountRate::from_bps(500)); // 5%
//! assert_eq!(discount.minor(), 18_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: discount line items and override deltas are negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: formatting/localization is a presentation
///   concern and lives outside this workspace
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor currency units.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::Money;
    ///
    /// let rate = Money::from_minor(5000);
    /// assert_eq!(rate.minor(), 5000);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor currency units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a rate in basis points and returns the resulting amount,
    /// rounding half-up.
    ///
    /// ## Implementation
    /// Integer math with an i128 intermediate to prevent overflow:
    /// `(amount * bps + 5000) / 10000`. The `+5000` is half of the divisor,
    /// which rounds the truncating division half-up.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::money::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_minor(10_000);
    /// let discount = subtotal.percent_of(DiscountRate::from_bps(825)); // 8.25%
    /// assert_eq!(discount.minor(), 825);
    ///
    /// // 1001 × 5% = 50.05 → rounds to 50
    /// assert_eq!(Money::from_minor(1001).percent_of(DiscountRate::from_bps(500)).minor(), 50);
    /// // 1010 × 5% = 50.5 → rounds half-up to 51
    /// assert_eq!(Money::from_minor(1010).percent_of(DiscountRate::from_bps(500)).minor(), 51);
    /// ```
    pub fn percent_of(&self, rate: DiscountRate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_minor(amount as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows raw minor units.
///
/// Currency formatting is explicitly out of scope; this exists for logs
/// and assertions only.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by page counts and billed step counts.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: u32) -> Self {
        Money(self.0 * count as i64)
    }
}

/// Multiplication by i64 (order quantities).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% - tier tables stay integer all the way down.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a percentage (catalog-authoring convenience).
    pub fn from_percent(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
