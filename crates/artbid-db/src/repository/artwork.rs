//! # Artwork Repository
//!
//! Database operations for artwork listings.
//!
//! ## Pricing on Save
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     create() / update()                                 │
//! │                                                                         │
//! │  NewArtwork (form) ──► validate() ──► category_id ──► CategoryRecord   │
//! │                                                            │            │
//! │                                              pricing_category()         │
//! │                                                            │            │
//! │                                                            ▼            │
//! │                          compute_price(size, time, color, base, frame) │
//! │                                                            │            │
//! │                                                            ▼            │
//! │                                           artworks.price column         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stored price is never taken from the caller. Every write path runs
//! the pricing engine again, so a listing always shows the price its current
//! attributes produce.
//!
//! ## Listings
//! All listings are newest first and paginated with [`Page`]. Searching
//! matches the artwork name as a substring; `%` and `_` in the keyword match
//! literally.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artbid_core::validation::validate_search_keyword;
use artbid_core::{compute_price, Artwork, CategoryRecord, NewArtwork, Page};

/// Columns selected for every [`Artwork`] read, joined with the category name.
const ARTWORK_SELECT: &str = r#"
    SELECT a.id, a.name, a.base, a.color, a.date_posted, a.size, a.frame,
           a.time, a.image_file, a.user_id, a.category_id,
           c.name AS category_name, a.price
    FROM artworks a
    INNER JOIN categories c ON c.id = a.category_id
"#;

/// Repository for artwork database operations.
#[derive(Debug, Clone)]
pub struct ArtworkRepository {
    pool: SqlitePool,
}

impl ArtworkRepository {
    /// Creates a new ArtworkRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ArtworkRepository { pool }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Lists a new artwork for `owner_id`.
    ///
    /// ## Returns
    /// * `Ok(Artwork)` - Stored artwork with its suggested price
    /// * `Err(DbError::Domain)` - Form validation failed
    /// * `Err(DbError::NotFound)` - Owner or category doesn't exist
    pub async fn create(&self, owner_id: &str, form: &NewArtwork) -> DbResult<Artwork> {
        form.validate()?;

        self.ensure_user_exists(owner_id).await?;
        let category = self.category(&form.category_id).await?;

        let price = compute_price(&form.pricing_input(category.pricing_category()));

        let artwork = Artwork {
            id: Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            base: form.base,
            color: form.color,
            date_posted: Utc::now(),
            size: form.size,
            frame: form.frame,
            time: form.time,
            image_file: form.image_file_or_default(),
            user_id: owner_id.to_string(),
            category_id: category.id,
            category_name: category.name,
            price: price.units(),
        };

        info!(
            id = %artwork.id,
            owner = %owner_id,
            category = %artwork.category_name,
            price = %price,
            "Artwork listed"
        );

        self.insert_row(&artwork).await?;
        Ok(artwork)
    }

    /// Inserts a fully formed artwork, keeping its id and posting date.
    ///
    /// The price is recomputed from the attributes and the category name;
    /// whatever `artwork.price` holds is ignored.
    pub async fn insert(&self, artwork: &Artwork) -> DbResult<Artwork> {
        let category = self.category(&artwork.category_id).await?;

        let mut stored = artwork.clone();
        stored.category_name = category.name;
        stored.price = stored.suggested_price().units();

        debug!(id = %stored.id, price = stored.price, "Inserting artwork");

        self.insert_row(&stored).await?;
        Ok(stored)
    }

    async fn insert_row(&self, artwork: &Artwork) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO artworks (
                id, name, base, color, date_posted, size, frame,
                time, image_file, price, user_id, category_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&artwork.id)
        .bind(&artwork.name)
        .bind(artwork.base)
        .bind(artwork.color)
        .bind(artwork.date_posted)
        .bind(artwork.size)
        .bind(artwork.frame)
        .bind(artwork.time)
        .bind(&artwork.image_file)
        .bind(artwork.price)
        .bind(&artwork.user_id)
        .bind(&artwork.category_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Applies the artwork form to an existing listing.
    ///
    /// Only the owner may update. The picture is kept unless the form
    /// carries a new one; the posting date never changes.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Artwork or category doesn't exist
    /// * `Err(DbError::Domain(CoreError::NotArtworkOwner))` - Editor isn't the owner
    pub async fn update(&self, artwork_id: &str, editor_id: &str, form: &NewArtwork) -> DbResult<Artwork> {
        let mut artwork = self.require(artwork_id).await?;
        if let Err(err) = artwork.ensure_owned_by(editor_id) {
            warn!(artwork_id = %artwork_id, editor = %editor_id, "Update rejected: not the owner");
            return Err(err.into());
        }

        form.validate()?;
        let category = self.category(&form.category_id).await?;

        artwork.name = form.name.trim().to_string();
        artwork.base = form.base;
        artwork.color = form.color;
        artwork.size = form.size;
        artwork.frame = form.frame;
        artwork.time = form.time;
        if let Some(image_file) = &form.image_file {
            artwork.image_file = image_file.clone();
        }
        artwork.category_id = category.id;
        artwork.category_name = category.name;
        artwork.price = artwork.suggested_price().units();

        debug!(id = %artwork.id, price = artwork.price, "Updating artwork");

        sqlx::query(
            r#"
            UPDATE artworks SET
                name = ?2,
                base = ?3,
                color = ?4,
                size = ?5,
                frame = ?6,
                time = ?7,
                image_file = ?8,
                price = ?9,
                category_id = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&artwork.id)
        .bind(&artwork.name)
        .bind(artwork.base)
        .bind(artwork.color)
        .bind(artwork.size)
        .bind(artwork.frame)
        .bind(artwork.time)
        .bind(&artwork.image_file)
        .bind(artwork.price)
        .bind(&artwork.category_id)
        .execute(&self.pool)
        .await?;

        Ok(artwork)
    }

    /// Removes an artwork and its bids. Only the owner may delete.
    pub async fn delete(&self, artwork_id: &str, editor_id: &str) -> DbResult<()> {
        let artwork = self.require(artwork_id).await?;
        if let Err(err) = artwork.ensure_owned_by(editor_id) {
            warn!(artwork_id = %artwork_id, editor = %editor_id, "Delete rejected: not the owner");
            return Err(err.into());
        }

        let mut tx = self.pool.begin().await.map_err(DbError::transaction)?;

        let bids = sqlx::query("DELETE FROM bids WHERE artwork_id = ?1")
            .bind(artwork_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM artworks WHERE id = ?1")
            .bind(artwork_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await.map_err(DbError::transaction)?;

        info!(id = %artwork_id, bids_removed = bids, "Artwork deleted");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Artwork>> {
        let sql = format!("{ARTWORK_SELECT} WHERE a.id = ?1");

        let artwork = sqlx::query_as::<_, Artwork>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(artwork)
    }

    /// Home page listing, newest first.
    pub async fn list_recent(&self, page: u32, per_page: u32) -> DbResult<Page<Artwork>> {
        let total = self.count().await?;

        let sql = format!("{ARTWORK_SELECT} ORDER BY a.date_posted DESC, a.id LIMIT ?1 OFFSET ?2");
        let items = sqlx::query_as::<_, Artwork>(&sql)
            .bind(i64::from(per_page))
            .bind(Page::<Artwork>::offset(page, per_page))
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page, per_page, total))
    }

    /// Artworks whose name contains `keyword`, newest first.
    ///
    /// A blank keyword lists everything, like [`Self::list_recent`].
    pub async fn search(&self, keyword: &str, page: u32, per_page: u32) -> DbResult<Page<Artwork>> {
        let keyword = validate_search_keyword(keyword)?;
        if keyword.is_empty() {
            return self.list_recent(page, per_page).await;
        }

        let pattern = format!("%{}%", escape_like(&keyword));

        let total: i64 = sqlx::query_scalar(
            r"SELECT COUNT(*) FROM artworks WHERE name LIKE ?1 ESCAPE '\'",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            r"{ARTWORK_SELECT} WHERE a.name LIKE ?1 ESCAPE '\'
              ORDER BY a.date_posted DESC, a.id LIMIT ?2 OFFSET ?3"
        );
        let items = sqlx::query_as::<_, Artwork>(&sql)
            .bind(&pattern)
            .bind(i64::from(per_page))
            .bind(Page::<Artwork>::offset(page, per_page))
            .fetch_all(&self.pool)
            .await?;

        debug!(keyword = %keyword, total, "Artwork search");

        Ok(Page::new(items, page, per_page, total))
    }

    /// A user's artworks, newest first.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No user has this username
    pub async fn list_by_username(&self, username: &str, page: u32, per_page: u32) -> DbResult<Page<Artwork>> {
        let user_id: String = sqlx::query_scalar("SELECT id FROM users WHERE username = ?1")
            .bind(username.trim())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("User", username))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artworks WHERE user_id = ?1")
            .bind(&user_id)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            "{ARTWORK_SELECT} WHERE a.user_id = ?1 ORDER BY a.date_posted DESC, a.id LIMIT ?2 OFFSET ?3"
        );
        let items = sqlx::query_as::<_, Artwork>(&sql)
            .bind(&user_id)
            .bind(i64::from(per_page))
            .bind(Page::<Artwork>::offset(page, per_page))
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page, per_page, total))
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artworks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn require(&self, artwork_id: &str) -> DbResult<Artwork> {
        self.get_by_id(artwork_id)
            .await?
            .ok_or_else(|| DbError::not_found("Artwork", artwork_id))
    }

    async fn category(&self, category_id: &str) -> DbResult<CategoryRecord> {
        sqlx::query_as::<_, CategoryRecord>("SELECT id, name, description FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Category", category_id))
    }

    async fn ensure_user_exists(&self, user_id: &str) -> DbResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            Ok(())
        } else {
            Err(DbError::not_found("User", user_id))
        }
    }
}

/// Escapes LIKE wildcards so they match literally under `ESCAPE '\'`.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{fixture, form, Fixture};
    use artbid_core::{Category, CoreError, DEFAULT_IMAGE_FILE, HOME_PAGE_SIZE, USER_PAGE_SIZE};
    use chrono::Duration;

    #[tokio::test]
    async fn test_create_prices_by_category() {
        let fx = fixture().await;
        let artworks = fx.db.artworks();

        let realistic = artworks
            .create(&fx.alice.id, &form("Harbour", &fx.realistic))
            .await
            .unwrap();
        assert_eq!(realistic.price, 1400);
        assert_eq!(realistic.category_name, "Realistic");
        assert_eq!(realistic.image_file, DEFAULT_IMAGE_FILE);

        let abstract_ = artworks
            .create(&fx.alice.id, &form("Shapes", &fx.abstract_))
            .await
            .unwrap();
        assert_eq!(abstract_.price, 1250);

        let portrait = artworks
            .create(&fx.alice.id, &form("Grandmother", &fx.portrait))
            .await
            .unwrap();
        assert_eq!(portrait.price, 2000);

        let stored = artworks.get_by_id(&realistic.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 1400);
        assert_eq!(stored.pricing_input().category, Category::Realistic);
        assert_eq!(stored.user_id, fx.alice.id);
    }

    #[tokio::test]
    async fn test_create_poster_and_frame() {
        let fx = fixture().await;

        let mut poster = form("Gig poster", &fx.realistic);
        poster.base = 1;
        poster.size = 3;
        poster.frame = 2;
        let art = fx.db.artworks().create(&fx.bob.id, &poster).await.unwrap();

        // Poster table replaces the accumulated price, then the frame is added
        assert_eq!(art.price, 350 + 100);
    }

    #[tokio::test]
    async fn test_unpriced_category_stores_zero() {
        let fx = fixture().await;
        let sculpture = fx.db.categories().insert("Sculpture", None).await.unwrap();

        let art = fx
            .db
            .artworks()
            .create(&fx.alice.id, &form("Bust", &sculpture))
            .await
            .unwrap();
        assert_eq!(art.price, 0);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let fx = fixture().await;
        let artworks = fx.db.artworks();

        let mut too_long = form("Harbour", &fx.realistic);
        too_long.time = 81.0;
        assert!(artworks.create(&fx.alice.id, &too_long).await.unwrap_err().is_validation());

        let mut missing_category = form("Harbour", &fx.realistic);
        missing_category.category_id = Uuid::new_v4().to_string();
        assert!(matches!(
            artworks.create(&fx.alice.id, &missing_category).await,
            Err(DbError::NotFound { ref entity, .. }) if entity == "Category"
        ));

        assert!(matches!(
            artworks.create("ghost", &form("Harbour", &fx.realistic)).await,
            Err(DbError::NotFound { ref entity, .. }) if entity == "User"
        ));

        assert_eq!(artworks.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_recomputes_price() {
        let fx = fixture().await;
        let created = fx
            .db
            .artworks()
            .create(&fx.alice.id, &form("Harbour", &fx.realistic))
            .await
            .unwrap();

        let mut copy = created.clone();
        copy.id = Uuid::new_v4().to_string();
        copy.price = 999_999;
        copy.category_name = String::new();

        let stored = fx.db.artworks().insert(&copy).await.unwrap();
        assert_eq!(stored.price, 1400);
        assert_eq!(stored.category_name, "Realistic");
    }

    #[tokio::test]
    async fn test_update_by_owner_recomputes_price() {
        let fx = fixture().await;
        let artworks = fx.db.artworks();

        let mut edit = form("Harbour", &fx.realistic);
        edit.image_file = Some("harbour.png".to_string());
        let art = artworks.create(&fx.alice.id, &edit).await.unwrap();

        let mut changed = form("Harbour at dusk", &fx.portrait);
        changed.frame = 2;
        let updated = artworks.update(&art.id, &fx.alice.id, &changed).await.unwrap();
        assert_eq!(updated.price, 2100);
        assert_eq!(updated.category_name, "Portrait");
        // No new upload keeps the old picture
        assert_eq!(updated.image_file, "harbour.png");
        assert_eq!(updated.date_posted.timestamp(), art.date_posted.timestamp());

        let stored = artworks.get_by_id(&art.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Harbour at dusk");
        assert_eq!(stored.price, 2100);
    }

    #[tokio::test]
    async fn test_only_owner_may_update_or_delete() {
        let fx = fixture().await;
        let artworks = fx.db.artworks();
        let art = artworks
            .create(&fx.alice.id, &form("Harbour", &fx.realistic))
            .await
            .unwrap();

        let err = artworks
            .update(&art.id, &fx.bob.id, &form("Mine now", &fx.realistic))
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert!(matches!(err, DbError::Domain(CoreError::NotArtworkOwner { .. })));

        assert!(artworks.delete(&art.id, &fx.bob.id).await.unwrap_err().is_forbidden());
        assert_eq!(artworks.get_by_id(&art.id).await.unwrap().unwrap().name, "Harbour");

        assert!(matches!(
            artworks.delete("missing", &fx.alice.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_removes_bids() {
        let fx = fixture().await;
        let art = fx
            .db
            .artworks()
            .create(&fx.alice.id, &form("Harbour", &fx.realistic))
            .await
            .unwrap();
        fx.db.bids().place(&fx.bob.id, &art.id, 5_000).await.unwrap();
        fx.db.bids().place(&fx.bob.id, &art.id, 6_000).await.unwrap();

        fx.db.artworks().delete(&art.id, &fx.alice.id).await.unwrap();

        assert!(fx.db.artworks().get_by_id(&art.id).await.unwrap().is_none());
        assert_eq!(fx.db.bids().count().await.unwrap(), 0);
    }

    async fn insert_posted(fx: &Fixture, name: &str, days_ago: i64) {
        let art = Artwork {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            base: 2,
            color: 1,
            date_posted: Utc::now() - Duration::days(days_ago),
            size: 2,
            frame: 1,
            time: 5.0,
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            user_id: fx.alice.id.clone(),
            category_id: fx.abstract_.id.clone(),
            category_name: String::new(),
            price: 0,
        };
        fx.db.artworks().insert(&art).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_paginated() {
        let fx = fixture().await;
        for days_ago in 0..12 {
            insert_posted(&fx, &format!("Study {days_ago}"), days_ago).await;
        }

        let first = fx.db.artworks().list_recent(1, HOME_PAGE_SIZE).await.unwrap();
        assert_eq!(first.total, 12);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].name, "Study 0");
        assert_eq!(first.items[9].name, "Study 9");
        assert_eq!(first.total_pages(), 2);
        assert!(first.has_next());

        let second = fx.db.artworks().list_recent(2, HOME_PAGE_SIZE).await.unwrap();
        let names: Vec<_> = second.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Study 10", "Study 11"]);
        assert!(!second.has_next());
        assert!(second.has_prev());
    }

    #[tokio::test]
    async fn test_search_matches_name_substring() {
        let fx = fixture().await;
        insert_posted(&fx, "Harbour at dusk", 2).await;
        insert_posted(&fx, "Old harbour", 1).await;
        insert_posted(&fx, "Mountain", 0).await;
        insert_posted(&fx, "100% cotton", 3).await;

        let hits = fx.db.artworks().search("harbour", 1, HOME_PAGE_SIZE).await.unwrap();
        let names: Vec<_> = hits.items.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Old harbour", "Harbour at dusk"]);
        assert_eq!(hits.total, 2);

        let literal = fx.db.artworks().search("%", 1, HOME_PAGE_SIZE).await.unwrap();
        assert_eq!(literal.total, 1);
        assert_eq!(literal.items[0].name, "100% cotton");

        let everything = fx.db.artworks().search("  ", 1, HOME_PAGE_SIZE).await.unwrap();
        assert_eq!(everything.total, 4);
    }

    #[tokio::test]
    async fn test_list_by_username() {
        let fx = fixture().await;
        for i in 0..7 {
            fx.db
                .artworks()
                .create(&fx.alice.id, &form(&format!("Alice {i}"), &fx.abstract_))
                .await
                .unwrap();
        }
        fx.db
            .artworks()
            .create(&fx.bob.id, &form("Bob's only", &fx.portrait))
            .await
            .unwrap();

        let alice = fx
            .db
            .artworks()
            .list_by_username(&fx.alice.username, 1, USER_PAGE_SIZE)
            .await
            .unwrap();
        assert_eq!(alice.total, 7);
        assert_eq!(alice.items.len(), 5);
        assert!(alice.items.iter().all(|a| a.user_id == fx.alice.id));

        let bob = fx
            .db
            .artworks()
            .list_by_username(&fx.bob.username, 1, USER_PAGE_SIZE)
            .await
            .unwrap();
        assert_eq!(bob.total, 1);

        assert!(matches!(
            fx.db.artworks().list_by_username("nobody", 1, USER_PAGE_SIZE).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
