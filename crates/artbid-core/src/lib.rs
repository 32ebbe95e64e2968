//! # artbid-core: Pure Business Logic for Artbid
//!
//! This crate is the **heart** of Artbid, a marketplace for listing artworks
//! and bidding on them. It holds the pricing engine and every rule the
//! marketplace enforces, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Artbid Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web front end (not in this workspace)        │   │
//! │  │    Register ──► New artwork ──► Artwork page ──► Place bid      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ artbid-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   types   │  │   money   │  │ validation│  │   │
//! │  │   │ Category  │  │  Artwork  │  │   Money   │  │   forms   │  │   │
//! │  │   │ compute_* │  │  User/Bid │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    artbid-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - The price engine (category, size, time, color, base, frame)
//! - [`types`] - Domain types (User, Artwork, Bid, Page, form payloads)
//! - [`money`] - Whole-unit money type
//! - [`error`] - Domain error types
//! - [`validation`] - Form constraint validation
//!
//! ## Example Usage
//!
//! ```rust
//! use artbid_core::pricing::compute_price_for_name;
//!
//! // Realistic, size A4, 5 hours, 1 medium, paper, no frame
//! let price = compute_price_for_name("Realistic", 2, 5.0, 1, 2, 1);
//! assert_eq!(price, 1400);
//!
//! // No pricing rule for this category
//! assert_eq!(compute_price_for_name("Sculpture", 2, 5.0, 1, 2, 1), 0);
//! ```

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{compute_price, compute_price_for_name, Category, PricingInput};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Placeholder picture for users and artworks without an upload.
pub const DEFAULT_IMAGE_FILE: &str = "IMG_8912.JPG";

/// Highest bid the marketplace accepts, and the ceiling for seeded bids.
pub const MAX_BID_PRICE: i64 = 700_000;

/// Most hours an artwork form accepts.
pub const MAX_TIME_HOURS: i64 = 80;

/// Artworks per page on the home and search listings.
pub const HOME_PAGE_SIZE: u32 = 10;

/// Artworks per page on a user's listing.
pub const USER_PAGE_SIZE: u32 = 5;
