//! # Repository Module
//!
//! One repository per table, each holding a clone of the pool.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Web handler                                                            │
//! │       │                                                                 │
//! │       │  db.artworks().create(&owner_id, &form)                        │
//! │       ▼                                                                 │
//! │  ArtworkRepository                                                      │
//! │  ├── validate form            (artbid-core)                            │
//! │  ├── resolve category name                                             │
//! │  ├── compute_price(...)       (artbid-core)                            │
//! │  └── INSERT INTO artworks                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Registration, login, profile
//! - [`CategoryRepository`](category::CategoryRepository) - Category lookup
//! - [`ArtworkRepository`](artwork::ArtworkRepository) - Listings, pricing on save
//! - [`BidRepository`](bid::BidRepository) - Bids per artwork

pub mod artwork;
pub mod bid;
pub mod category;
pub mod user;
