//! # Development Data
//!
//! Default accounts, the three priced categories, random artworks and random
//! bids. The `seed` binary wraps [`seed`] with flag parsing and file cleanup.
//!
//! ## Generated Data
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  users        Default / Default Second / Default Third (reused if      │
//! │               their email already exists)                               │
//! │  categories   Abstract, Realistic, Portrait (reused by name)           │
//! │  artworks     base 1-3, color 0-10, time 1-80 h, size 1-10, frame 1-2, │
//! │               posted up to 160 d 24 h 60 min ago, priced on insert     │
//! │  bids         random user, random artwork,                              │
//! │               amount uniform in [artwork price, MAX_BID_PRICE]          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::user::hash_password;
use crate::Database;
use artbid_core::pricing::bid_range;
use artbid_core::{Artwork, Bid, CategoryRecord, User, DEFAULT_IMAGE_FILE};

/// (username, email, password, picture)
pub const DEFAULT_USERS: &[(&str, &str, &str, &str)] = &[
    ("Default", "default@test.com", "testing", "another_pic.jpg"),
    ("Default Second", "second@test.com", "testing2", "7798432669b8b3ac.jpg"),
    ("Default Third", "third@test.com", "testing3", DEFAULT_IMAGE_FILE),
];

pub const DEFAULT_CATEGORIES: &[&str] = &["Abstract", "Realistic", "Portrait"];

/// Words artwork titles are drawn from.
const TITLE_WORDS: &[&str] = &[
    "harbour", "dusk", "study", "light", "quiet", "river", "portrait", "morning",
    "blue", "garden", "window", "storm", "silence", "field", "figure", "shadow",
    "orchard", "winter", "red", "coast", "still", "life", "city", "memory",
    "bridge", "tide", "golden", "hour", "mountain", "reflection",
];

/// How much random data to generate.
#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    pub artworks: usize,
    pub bids: usize,
}

impl Default for SeedOptions {
    fn default() -> Self {
        SeedOptions {
            artworks: 100,
            bids: 100,
        }
    }
}

/// What [`seed`] stored.
#[derive(Debug)]
pub struct SeedReport {
    pub users: Vec<User>,
    pub categories: Vec<CategoryRecord>,
    pub artworks: Vec<Artwork>,
    pub bids: usize,
}

/// Seeds `db`. Existing default users and categories are reused, so seeding
/// an already seeded database only adds artworks and bids.
pub async fn seed(db: &Database, rng: &mut StdRng, options: SeedOptions) -> DbResult<SeedReport> {
    let users = seed_users(db).await?;
    let categories = seed_categories(db).await?;
    let artworks = seed_artworks(db, rng, &users, &categories, options.artworks).await?;
    let bids = seed_bids(db, rng, &users, &artworks, options.bids).await?;

    Ok(SeedReport {
        users,
        categories,
        artworks,
        bids,
    })
}

pub async fn seed_users(db: &Database) -> DbResult<Vec<User>> {
    let repo = db.users();
    let mut users = Vec::with_capacity(DEFAULT_USERS.len());

    for &(username, email, password, image_file) in DEFAULT_USERS {
        if let Some(existing) = repo.get_by_email(email).await? {
            warn!(email, "Default user already exists, reusing it");
            users.push(existing);
            continue;
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            image_file: image_file.to_string(),
            password_hash: hash_password(password)?,
        };
        repo.insert(&user).await?;
        users.push(user);
    }

    Ok(users)
}

pub async fn seed_categories(db: &Database) -> DbResult<Vec<CategoryRecord>> {
    let repo = db.categories();
    let mut categories = Vec::with_capacity(DEFAULT_CATEGORIES.len());

    for &name in DEFAULT_CATEGORIES {
        let category = match repo.get_by_name(name).await? {
            Some(existing) => existing,
            None => repo.insert(name, None).await?,
        };
        categories.push(category);
    }

    Ok(categories)
}

pub async fn seed_artworks(
    db: &Database,
    rng: &mut StdRng,
    users: &[User],
    categories: &[CategoryRecord],
    count: usize,
) -> DbResult<Vec<Artwork>> {
    let repo = db.artworks();
    let mut artworks = Vec::with_capacity(count);

    for _ in 0..count {
        let owner = users
            .choose(rng)
            .ok_or_else(|| DbError::Internal("no users to own artworks".to_string()))?;
        let category = categories
            .choose(rng)
            .ok_or_else(|| DbError::Internal("no categories to file artworks under".to_string()))?;

        let posted_ago = Duration::days(rng.gen_range(0..=160))
            + Duration::hours(rng.gen_range(0..=24))
            + Duration::minutes(rng.gen_range(0..=60));

        let artwork = Artwork {
            id: Uuid::new_v4().to_string(),
            name: random_title(rng),
            base: rng.gen_range(1..=3),
            color: rng.gen_range(0..=10),
            date_posted: Utc::now() - posted_ago,
            size: rng.gen_range(1..=10),
            frame: rng.gen_range(1..=2),
            time: f64::from(rng.gen_range(1..=80_u8)),
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            user_id: owner.id.clone(),
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            // Recomputed on insert
            price: 0,
        };

        artworks.push(repo.insert(&artwork).await?);
    }

    info!(count = artworks.len(), "Artworks generated");
    Ok(artworks)
}

/// Bids on random artworks, each at or above the artwork's stored price.
pub async fn seed_bids(
    db: &Database,
    rng: &mut StdRng,
    users: &[User],
    artworks: &[Artwork],
    count: usize,
) -> DbResult<usize> {
    if artworks.is_empty() {
        warn!("No artworks generated, skipping bids");
        return Ok(0);
    }

    let repo = db.bids();

    for _ in 0..count {
        let bidder = users
            .choose(rng)
            .ok_or_else(|| DbError::Internal("no users to bid".to_string()))?;
        let artwork = artworks
            .choose(rng)
            .ok_or_else(|| DbError::Internal("no artworks to bid on".to_string()))?;

        let bid = Bid {
            id: Uuid::new_v4().to_string(),
            bid_price: rng.gen_range(bid_range(artwork.price())),
            user_id: bidder.id.clone(),
            artwork_id: artwork.id.clone(),
            created_at: Utc::now(),
        };
        repo.insert(&bid).await?;
    }

    info!(count, "Bids generated");
    Ok(count)
}

/// Two to four words, first letter capitalised.
fn random_title(rng: &mut StdRng) -> String {
    let len = rng.gen_range(2..=4);
    let words: Vec<&str> = TITLE_WORDS.choose_multiple(rng, len).copied().collect();
    let title = words.join(" ");

    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use artbid_core::validation::{validate_artwork_name, validate_image_file};
    use artbid_core::MAX_BID_PRICE;
    use rand::SeedableRng;

    async fn seeded(options: SeedOptions) -> (Database, SeedReport) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let report = seed(&db, &mut rng, options).await.unwrap();
        (db, report)
    }

    #[tokio::test]
    async fn test_artworks_stay_within_form_ranges() {
        let (db, report) = seeded(SeedOptions { artworks: 60, bids: 0 }).await;

        let stored = db.artworks().list_recent(1, 100).await.unwrap();
        assert_eq!(stored.total, 60);

        let oldest = Utc::now() - Duration::days(160) - Duration::hours(24) - Duration::minutes(61);
        for art in &stored.items {
            assert!((1..=3).contains(&art.base), "base {}", art.base);
            assert!((0..=10).contains(&art.color), "color {}", art.color);
            assert!((1..=10).contains(&art.size), "size {}", art.size);
            assert!((1..=2).contains(&art.frame), "frame {}", art.frame);
            assert!((1.0..=80.0).contains(&art.time), "time {}", art.time);
            assert_eq!(art.time.fract(), 0.0);
            assert!(art.date_posted > oldest && art.date_posted <= Utc::now());
            assert!(validate_artwork_name(&art.name).is_ok(), "name {:?}", art.name);
            assert_eq!(art.price, art.suggested_price().units());
        }
        assert_eq!(report.artworks.len(), 60);
    }

    #[tokio::test]
    async fn test_bids_start_at_artwork_price() {
        let (db, report) = seeded(SeedOptions { artworks: 25, bids: 150 }).await;
        assert_eq!(report.bids, 150);
        assert_eq!(db.bids().count().await.unwrap(), 150);

        let mut checked = 0;
        for art in &report.artworks {
            for bid in db.bids().list_for_artwork(&art.id).await.unwrap() {
                assert!(
                    bid.bid_price >= art.price && bid.bid_price <= MAX_BID_PRICE,
                    "bid {} on artwork priced {}",
                    bid.bid_price,
                    art.price
                );
                checked += 1;
            }
        }
        assert_eq!(checked, 150);
    }

    #[tokio::test]
    async fn test_default_accounts() {
        let (db, report) = seeded(SeedOptions { artworks: 0, bids: 10 }).await;
        assert_eq!(report.bids, 0);

        for user in &report.users {
            assert!(validate_image_file(&user.image_file).is_ok(), "{}", user.image_file);
        }
        let names: Vec<&str> = report.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CATEGORIES);

        let user = db
            .users()
            .verify_credentials("second@test.com", "testing2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "Default Second");
    }

    #[tokio::test]
    async fn test_reseeding_reuses_accounts_and_categories() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let options = SeedOptions { artworks: 3, bids: 2 };

        let first = seed(&db, &mut rng, options).await.unwrap();
        let second = seed(&db, &mut rng, options).await.unwrap();

        assert_eq!(db.users().count().await.unwrap(), 3);
        assert_eq!(db.categories().count().await.unwrap(), 3);
        assert_eq!(db.artworks().count().await.unwrap(), 6);
        assert_eq!(first.users[0].id, second.users[0].id);
    }
}
