//! # Money Module
//!
//! Provides the `Money` type for prices and bids.
//!
//! Artwork prices and bid amounts are whole currency units. They are stored
//! as `INTEGER` columns, and the pricing engine only ever produces integers,
//! so there is no minor unit here.
//!
//! ## Usage
//! ```rust
//! use artbid_core::money::Money;
//!
//! let price = Money::from_units(1400);
//! let framed = price + Money::from_units(100);
//! assert_eq!(framed.units(), 1500);
//! assert_eq!(framed.to_string(), "1,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units.
///
/// ## Where Money is Used
/// ```text
/// PricingInput ──► compute_price() ──► Artwork.price ──► bid floor
///                                                            │
///                                       Bid.bid_price ◄──────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in whole units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    ///
    /// ## Example
    /// ```rust
    /// use artbid_core::money::Money;
    ///
    /// assert!(Money::zero().is_zero());
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Display groups thousands with commas: `700000` → `700,000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}
