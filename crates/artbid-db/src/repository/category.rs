//! # Category Repository
//!
//! Artwork categories. Their names decide which pricing rule applies, so a
//! category named anything other than Abstract, Realistic or Portrait prices
//! its artworks at zero.

use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artbid_core::{Category, CategoryRecord, ValidationError};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a category.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Name already exists
    pub async fn insert(&self, name: &str, description: Option<&str>) -> DbResult<CategoryRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Required {
                field: "name".to_string(),
            }
            .into());
        }

        if Category::from_name(name) == Category::Other {
            warn!(name = %name, "Category has no pricing rule; its artworks will price at 0");
        }

        if self.get_by_name(name).await?.is_some() {
            return Err(DbError::duplicate("category", name));
        }

        let category = CategoryRecord {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
        };

        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query("INSERT INTO categories (id, name, description) VALUES (?1, ?2, ?3)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.description)
            .execute(&self.pool)
            .await?;

        Ok(category)
    }

    /// All categories, ordered by name (the artwork form's choices).
    pub async fn list(&self) -> DbResult<Vec<CategoryRecord>> {
        let categories = sqlx::query_as::<_, CategoryRecord>(
            "SELECT id, name, description FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CategoryRecord>> {
        let category = sqlx::query_as::<_, CategoryRecord>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<CategoryRecord>> {
        let category = sqlx::query_as::<_, CategoryRecord>(
            "SELECT id, name, description FROM categories WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
