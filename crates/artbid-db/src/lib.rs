//! # artbid-db: Database Layer for Artbid
//!
//! SQLite persistence for the marketplace: accounts, categories, artworks and
//! bids, with sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Artbid Data Flow                                 │
//! │                                                                         │
//! │  Web handler (new artwork form)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     artbid-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CategoryRepo  │    │ 001_initial  │  │   │
//! │  │   │ DbConfig      │    │ ArtworkRepo   │    │ _schema.sql  │  │   │
//! │  │   │               │    │ BidRepo       │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ compute_price (artbid-core)   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            SQLite Database ($ARTBID_DATABASE_PATH)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, category, artwork, bid)
//! - [`seed`] - Development data for the `seed` binary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use artbid_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let artwork = db.artworks().create(&user.id, &form).await?;
//! println!("Suggested price: {}", artwork.price());
//!
//! let home = db.artworks().list_recent(1, artbid_core::HOME_PAGE_SIZE).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{ConfigError, Database, DbConfig};

// Repository re-exports for convenience
pub use repository::artwork::ArtworkRepository;
pub use repository::bid::BidRepository;
pub use repository::category::CategoryRepository;
pub use repository::user::UserRepository;
