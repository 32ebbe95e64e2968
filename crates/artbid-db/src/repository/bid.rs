//! # Bid Repository
//!
//! Bids are plain offers: any signed-in user may bid any positive amount up
//! to [`MAX_BID_PRICE`](artbid_core::MAX_BID_PRICE) on an existing artwork.
//! Nothing closes an auction; the artwork page shows the bids highest first.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artbid_core::validation::validate_bid_amount;
use artbid_core::Bid;

/// Repository for bid database operations.
#[derive(Debug, Clone)]
pub struct BidRepository {
    pool: SqlitePool,
}

impl BidRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BidRepository { pool }
    }

    /// Places a bid of `amount` on `artwork_id`.
    ///
    /// ## Returns
    /// * `Ok(Bid)` - The stored bid
    /// * `Err(DbError::Domain)` - Amount not in `1..=MAX_BID_PRICE`
    /// * `Err(DbError::NotFound)` - Bidder or artwork doesn't exist
    pub async fn place(&self, user_id: &str, artwork_id: &str, amount: i64) -> DbResult<Bid> {
        validate_bid_amount(amount)?;

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        if users == 0 {
            return Err(DbError::not_found("User", user_id));
        }

        let artworks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artworks WHERE id = ?1")
            .bind(artwork_id)
            .fetch_one(&self.pool)
            .await?;
        if artworks == 0 {
            return Err(DbError::not_found("Artwork", artwork_id));
        }

        let bid = Bid {
            id: Uuid::new_v4().to_string(),
            bid_price: amount,
            user_id: user_id.to_string(),
            artwork_id: artwork_id.to_string(),
            created_at: Utc::now(),
        };

        self.insert(&bid).await?;

        info!(artwork_id = %artwork_id, user_id = %user_id, amount = %bid.amount(), "Bid placed");
        Ok(bid)
    }

    /// Inserts a fully formed bid. Used by the seeder.
    pub async fn insert(&self, bid: &Bid) -> DbResult<()> {
        debug!(id = %bid.id, artwork_id = %bid.artwork_id, "Inserting bid");

        sqlx::query(
            r#"
            INSERT INTO bids (id, bid_price, user_id, artwork_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&bid.id)
        .bind(bid.bid_price)
        .bind(&bid.user_id)
        .bind(&bid.artwork_id)
        .bind(bid.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Bids on one artwork, highest first. Equal amounts keep placing order.
    pub async fn list_for_artwork(&self, artwork_id: &str) -> DbResult<Vec<Bid>> {
        let bids = sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, bid_price, user_id, artwork_id, created_at
            FROM bids
            WHERE artwork_id = ?1
            ORDER BY bid_price DESC, created_at ASC
            "#,
        )
        .bind(artwork_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bids)
    }

    pub async fn highest_for_artwork(&self, artwork_id: &str) -> DbResult<Option<Bid>> {
        let bid = sqlx::query_as::<_, Bid>(
            r#"
            SELECT id, bid_price, user_id, artwork_id, created_at
            FROM bids
            WHERE artwork_id = ?1
            ORDER BY bid_price DESC, created_at ASC
            LIMIT 1
            "#,
        )
        .bind(artwork_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bid)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bids")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
