//! # Pricing Engine
//!
//! Computes the suggested price of an artwork from its attributes.
//!
//! ## Price Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price = size + time + color   (steps 1-3, summed)                      │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  base:  Poster  → REPLACE with lookup (sizes 1-5 only)                  │
//! │         Paper   → unchanged                                             │
//! │         Canvas  → + size × 20                                           │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  frame: framed  → + 100                                                 │
//! │                                                                         │
//! │  Category selects the size unit:                                        │
//! │    Abstract 50 │ Realistic 100 │ Portrait 300 │ Other → price is 0      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a pure function: no state, no I/O, no errors. Inputs are
//! assumed to have passed [`crate::validation`] already and are not clamped.
//!
//! ## Example
//! ```rust
//! use artbid_core::pricing::{compute_price, Category, PricingInput};
//!
//! let input = PricingInput {
//!     category: Category::Realistic,
//!     size: 2,
//!     time: 5.0,
//!     color: 1,
//!     base: 2,
//!     frame: 1,
//! };
//! assert_eq!(compute_price(&input).units(), 1400);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::MAX_BID_PRICE;

/// Per-unit price of color (one step per medium).
const COLOR_UNIT: i64 = 100;

/// Per-size surcharge for canvas and unlisted bases.
const CANVAS_SIZE_UNIT: i64 = 20;

/// Flat surcharge for a framed artwork.
const FRAME_SURCHARGE: i64 = 100;

/// Poster prices by size; sizes past the end keep the accumulated price.
const POSTER_PRICES: [i64; 5] = [100, 200, 350, 450, 550];

// =============================================================================
// Category
// =============================================================================

/// Artwork category as seen by the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Abstract,
    Realistic,
    Portrait,
    /// Anything without a pricing rule. Always prices at zero.
    Other,
}

impl Category {
    /// Every category that has a pricing rule, in display order.
    pub const PRICED: [Category; 3] = [Category::Abstract, Category::Realistic, Category::Portrait];

    /// Maps a stored category name onto the engine's categories.
    ///
    /// Matching is exact, so `"abstract"` or `" Abstract"` fall through to
    /// [`Category::Other`]. Use `str::parse` for a strict lookup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Abstract" => Category::Abstract,
            "Realistic" => Category::Realistic,
            "Portrait" => Category::Portrait,
            _ => Category::Other,
        }
    }

    /// The stored name of the category.
    pub const fn name(&self) -> &'static str {
        match self {
            Category::Abstract => "Abstract",
            Category::Realistic => "Realistic",
            Category::Portrait => "Portrait",
            Category::Other => "Other",
        }
    }

    /// Price of one size step, or `None` when the category has no rule.
    pub const fn size_unit(&self) -> Option<i64> {
        match self {
            Category::Abstract => Some(50),
            Category::Realistic => Some(100),
            Category::Portrait => Some(300),
            Category::Other => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict parse: only the three priced category names are accepted.
impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Category::from_name(s) {
            Category::Other => Err(CoreError::UnknownCategory(s.to_string())),
            category => Ok(category),
        }
    }
}

// =============================================================================
// Base & Frame
// =============================================================================

/// Physical substrate of an artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    /// Code 1. Replaces the price with a fixed lookup by size.
    Poster,
    /// Code 2. No adjustment.
    Paper,
    /// Code 3, and any code without a rule of its own.
    Canvas,
}

impl Base {
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Base::Poster,
            2 => Base::Paper,
            _ => Base::Canvas,
        }
    }
}

/// Whether the artwork comes framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Frame {
    /// Code 1.
    Unframed,
    /// Any other code.
    Framed,
}

impl Frame {
    pub const fn from_code(code: i64) -> Self {
        if code == 1 {
            Frame::Unframed
        } else {
            Frame::Framed
        }
    }
}

// =============================================================================
// Pricing Input
// =============================================================================

/// Everything the engine needs to price one artwork.
///
/// The numeric fields keep the codes used by the artwork form and the
/// database; [`Base::from_code`] and [`Frame::from_code`] interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingInput {
    pub category: Category,
    /// Size code, 1 (A5) through 10 (F40).
    pub size: i64,
    /// Hours spent on the piece.
    pub time: f64,
    /// Number of color/medium steps.
    pub color: i64,
    /// Base code: 1 Poster, 2 Paper, 3 Canvas.
    pub base: i64,
    /// Frame code: 1 without frame, 2 with frame.
    pub frame: i64,
}

impl PricingInput {
    /// Prices this input. Shorthand for [`compute_price`].
    pub fn price(&self) -> Money {
        compute_price(self)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Computes the suggested price of an artwork.
pub fn compute_price(input: &PricingInput) -> Money {
    match input.category.size_unit() {
        Some(unit) => Money::from_units(price_with_unit(unit, input)),
        None => Money::zero(),
    }
}

/// Name-keyed entry point: `(category_name, size, time, color, base, frame)`.
///
/// Unknown or empty category names price at zero. Callers must treat a zero
/// from an unknown category as "no rule", not as a free artwork.
pub fn compute_price_for_name(
    category_name: &str,
    size: i64,
    time: f64,
    color: i64,
    base: i64,
    frame: i64,
) -> i64 {
    compute_price(&PricingInput {
        category: Category::from_name(category_name),
        size,
        time,
        color,
        base,
        frame,
    })
    .units()
}

/// Shared rule for all priced categories; only the size unit differs.
///
/// Arithmetic saturates, so out-of-range input yields `i64::MAX` instead of
/// overflowing.
fn price_with_unit(unit: i64, input: &PricingInput) -> i64 {
    let mut price = size_contribution(unit, input.size)
        .saturating_add(time_contribution(input.time))
        .saturating_add(color_contribution(input.color));

    match Base::from_code(input.base) {
        Base::Poster => {
            if let Some(fixed) = poster_price(input.size) {
                price = fixed.units();
            }
        }
        Base::Paper => {}
        Base::Canvas => price = price.saturating_add(input.size.saturating_mul(CANVAS_SIZE_UNIT)),
    }

    if Frame::from_code(input.frame) == Frame::Framed {
        price = price.saturating_add(FRAME_SURCHARGE);
    }

    price
}

/// `unit * (1 + 2 + ... + size)`.
fn size_contribution(unit: i64, size: i64) -> i64 {
    if size <= 0 {
        return 0;
    }
    // size * (size + 1) is always even
    unit.saturating_mul(size.saturating_mul(size.saturating_add(1)) / 2)
}

/// Whole hours times the per-hour delta of the band `time` falls in.
fn time_contribution(time: f64) -> i64 {
    // NaN and anything below one hour count no whole hours; `as` saturates.
    let hours = if time >= 1.0 { time.floor() as i64 } else { 0 };
    hours.saturating_mul(time_delta(time))
}

fn color_contribution(color: i64) -> i64 {
    color.max(0).saturating_mul(COLOR_UNIT)
}

/// Per-hour price for a piece that took `time` hours in total.
///
/// Bands use strict comparisons, so exactly 10, 15 and 20 hours all land in
/// the default 200 band.
///
/// ```rust
/// use artbid_core::pricing::time_delta;
///
/// assert_eq!(time_delta(10.0), 200);
/// assert_eq!(time_delta(11.0), 150);
/// assert_eq!(time_delta(15.0), 200);
/// assert_eq!(time_delta(16.0), 100);
/// assert_eq!(time_delta(21.0), 30);
/// ```
pub fn time_delta(time: f64) -> i64 {
    if time > 10.0 && time < 15.0 {
        150
    } else if time > 15.0 && time < 20.0 {
        100
    } else if time > 20.0 {
        30
    } else {
        200
    }
}

/// Fixed poster price for sizes 1-5; `None` for every other size.
pub fn poster_price(size: i64) -> Option<Money> {
    usize::try_from(size - 1)
        .ok()
        .and_then(|idx| POSTER_PRICES.get(idx))
        .map(|&units| Money::from_units(units))
}

/// Range a seeded bid is drawn from: the suggested price up to
/// [`MAX_BID_PRICE`].
pub fn bid_range(suggested: Money) -> RangeInclusive<i64> {
    suggested.units().clamp(0, MAX_BID_PRICE)..=MAX_BID_PRICE
}

// =============================================================================
// Unit Tests
// =============================================================================
