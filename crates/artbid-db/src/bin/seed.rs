//! # Seed Data Generator
//!
//! Rebuilds a development database with default accounts, the three priced
//! categories, random artworks and random bids.
//!
//! ## Usage
//! ```bash
//! # Fresh database at $ARTBID_DATABASE_PATH (or ./artbid.db)
//! cargo run -p artbid-db --bin seed
//!
//! # Custom amounts and path
//! cargo run -p artbid-db --bin seed -- --db ./data/artbid.db --artworks 500 --bids 2000
//!
//! # Add to an existing database instead of starting over
//! cargo run -p artbid-db --bin seed -- --keep
//! ```
//!
//! ## Default Accounts
//! | Username       | Email            | Password |
//! |----------------|------------------|----------|
//! | Default        | default@test.com | testing  |
//! | Default Second | second@test.com  | testing2 |
//! | Default Third  | third@test.com   | testing3 |
//!
//! ## Generated Data
//! - Artworks: base 1-3, color 0-10, time 1-80 h, size 1-10, frame 1-2,
//!   posted up to ~161 days ago, priced by the pricing engine
//! - Bids: uniform in `[suggested price, 700,000]` on a random artwork

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use artbid_db::seed::{seed, SeedOptions};
use artbid_db::{Database, DbConfig};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Rebuild the Artbid development database with sample data")]
struct Args {
    /// Database file path (defaults to $ARTBID_DATABASE_PATH or ./artbid.db)
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// Number of random artworks
    #[arg(short, long, default_value_t = 100)]
    artworks: usize,

    /// Number of random bids
    #[arg(short, long, default_value_t = 100)]
    bids: usize,

    /// Keep the existing database file and add to it
    #[arg(long)]
    keep: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();

    let config = match args.db {
        Some(path) => DbConfig::new(path),
        None => DbConfig::from_env().context("invalid database configuration")?,
    };

    if !args.keep {
        remove_database(&config.database_path)?;
    }

    let db = Database::new(config).await.context("failed to open database")?;
    info!("Migrations applied");

    let start = Instant::now();
    let mut rng = StdRng::from_entropy();

    let options = SeedOptions {
        artworks: args.artworks,
        bids: args.bids,
    };
    let report = seed(&db, &mut rng, options).await.context("seeding failed")?;

    info!(
        users = report.users.len(),
        categories = report.categories.len(),
        artworks = report.artworks.len(),
        bids = report.bids,
        elapsed = ?start.elapsed(),
        "Database created successfully"
    );

    db.close().await;
    Ok(())
}

/// Deletes the database file and its WAL companions, if present.
fn remove_database(path: &Path) -> Result<()> {
    if !path.exists() {
        info!(path = %path.display(), "No previous database file found");
        return Ok(());
    }

    std::fs::remove_file(path)
        .with_context(|| format!("failed to remove {}", path.display()))?;

    for suffix in ["-wal", "-shm"] {
        let mut companion = path.as_os_str().to_owned();
        companion.push(suffix);
        let companion = PathBuf::from(companion);
        if companion.exists() {
            std::fs::remove_file(&companion)
                .with_context(|| format!("failed to remove {}", companion.display()))?;
        }
    }

    info!(path = %path.display(), "Previous database file removed");
    Ok(())
}
