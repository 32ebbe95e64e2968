//! # Domain Types
//!
//! Core domain types used throughout Artbid.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Artwork     │   │       Bid       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  user_id (FK)   │◄──│  artwork_id     │       │
//! │  │  username       │   │  category_id ───┼─┐ │  user_id (FK)   │       │
//! │  │  email          │   │  size/time/...  │ │ │  bid_price      │       │
//! │  │  password_hash  │   │  price          │ │ └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘ │                           │
//! │                                            ▼                           │
//! │                              ┌─────────────────┐                       │
//! │                              │ CategoryRecord  │                       │
//! │                              │  name ──► pricing::Category             │
//! │                              └─────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `New*` types are what the registration, account and artwork forms submit.
//! Their `validate()` methods apply the same constraints as the forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{compute_price, Category, PricingInput};
use crate::validation::{self, ValidationResult};
use crate::DEFAULT_IMAGE_FILE;

// =============================================================================
// Form Choice Labels
// =============================================================================

/// Size choices, indexed by `size - 1`.
pub const SIZE_LABELS: [&str; 10] = ["A5", "A4", "A3", "A2", "A1", "F1", "F10", "F15", "F25", "F40"];

/// Color/medium choices, indexed by `color - 1`.
pub const MEDIUM_LABELS: [&str; 10] = [
    "Photography",
    "Digital",
    "Pencils",
    "Markers",
    "Ink",
    "Charcoal",
    "Gouache",
    "Watercolors",
    "Acrylic",
    "Oil",
];

/// Base choices, indexed by `base - 1`.
pub const BASE_LABELS: [&str; 3] = ["Poster", "Paper", "Canvas"];

/// Frame choices, indexed by `frame - 1`.
pub const FRAME_LABELS: [&str; 2] = ["Without Frame", "With Frame"];

fn label(labels: &'static [&'static str], code: i64) -> Option<&'static str> {
    usize::try_from(code - 1).ok().and_then(|idx| labels.get(idx).copied())
}

// =============================================================================
// User
// =============================================================================

/// A registered marketplace user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Public handle, 2-20 characters, unique.
    pub username: String,

    /// Login email, unique.
    pub email: String,

    /// Profile picture file name.
    pub image_file: String,

    /// Argon2 PHC string. Never leaves the server.
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
}

/// Registration form payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl NewUser {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_username(&self.username)?;
        validation::validate_email(&self.email)?;
        validation::validate_password(&self.password)?;
        validation::validate_password_confirmation(&self.password, &self.confirm_password)
    }
}

/// Account form payload.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileUpdate {
    pub username: String,
    pub email: String,
    /// New profile picture, already stored by the web layer.
    pub image_file: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_username(&self.username)?;
        validation::validate_email(&self.email)?;
        if let Some(file) = &self.image_file {
            validation::validate_image_file(file)?;
        }
        Ok(())
    }
}

// =============================================================================
// Category
// =============================================================================

/// A persisted artwork category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl CategoryRecord {
    /// The pricing category this record maps to.
    #[inline]
    pub fn pricing_category(&self) -> Category {
        Category::from_name(&self.name)
    }
}

// =============================================================================
// Artwork
// =============================================================================

/// An artwork listed on the marketplace.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Artwork {
    pub id: String,
    pub name: String,
    /// Base code: 1 Poster, 2 Paper, 3 Canvas.
    pub base: i64,
    /// Color/medium code, 0-10.
    pub color: i64,
    #[ts(as = "String")]
    pub date_posted: DateTime<Utc>,
    /// Size code, 1-10.
    pub size: i64,
    /// Frame code: 1 without frame, 2 with frame.
    pub frame: i64,
    /// Hours spent.
    pub time: f64,
    pub image_file: String,
    /// Owner.
    pub user_id: String,
    pub category_id: String,
    /// Joined from `categories.name`.
    pub category_name: String,
    /// Suggested price computed by the pricing engine at last save.
    pub price: i64,
}

impl Artwork {
    /// Engine input built from this artwork's attributes.
    pub fn pricing_input(&self) -> PricingInput {
        PricingInput {
            category: Category::from_name(&self.category_name),
            size: self.size,
            time: self.time,
            color: self.color,
            base: self.base,
            frame: self.frame,
        }
    }

    /// Recomputes the suggested price from the current attributes.
    pub fn suggested_price(&self) -> Money {
        compute_price(&self.pricing_input())
    }

    /// The stored price.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_units(self.price)
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Only the owner may edit or delete an artwork.
    pub fn ensure_owned_by(&self, user_id: &str) -> CoreResult<()> {
        if !self.is_owned_by(user_id) {
            return Err(CoreError::NotArtworkOwner {
                artwork_id: self.id.clone(),
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn size_label(&self) -> Option<&'static str> {
        label(&SIZE_LABELS, self.size)
    }

    pub fn medium_label(&self) -> Option<&'static str> {
        label(&MEDIUM_LABELS, self.color)
    }

    pub fn base_label(&self) -> Option<&'static str> {
        label(&BASE_LABELS, self.base)
    }

    pub fn frame_label(&self) -> Option<&'static str> {
        label(&FRAME_LABELS, self.frame)
    }
}

/// Artwork form payload, used for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewArtwork {
    pub name: String,
    pub category_id: String,
    pub time: f64,
    pub color: i64,
    pub base: i64,
    pub size: i64,
    pub frame: i64,
    /// Uploaded picture, already stored by the web layer.
    pub image_file: Option<String>,
}

impl NewArtwork {
    pub fn validate(&self) -> ValidationResult<()> {
        validation::validate_artwork_name(&self.name)?;
        if self.category_id.trim().is_empty() {
            return Err(crate::ValidationError::Required {
                field: "category".to_string(),
            });
        }
        validation::validate_time(self.time)?;
        validation::validate_color(self.color)?;
        validation::validate_base(self.base)?;
        validation::validate_size(self.size)?;
        validation::validate_frame(self.frame)?;
        if let Some(file) = &self.image_file {
            validation::validate_image_file(file)?;
        }
        Ok(())
    }

    /// Engine input for this payload once its category name is known.
    pub fn pricing_input(&self, category: Category) -> PricingInput {
        PricingInput {
            category,
            size: self.size,
            time: self.time,
            color: self.color,
            base: self.base,
            frame: self.frame,
        }
    }

    /// Image file to store, falling back to the placeholder.
    pub fn image_file_or_default(&self) -> String {
        self.image_file
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_FILE.to_string())
    }
}

// =============================================================================
// Bid
// =============================================================================

/// A bid on an artwork.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Bid {
    pub id: String,
    pub bid_price: i64,
    pub user_id: String,
    pub artwork_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Bid {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_units(self.bid_price)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a listing. Pages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    /// Total matching rows across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: i64) -> Self {
        Page {
            items,
            page: page.max(1),
            per_page,
            total,
        }
    }

    /// Row offset of `page` for `per_page` rows per page.
    pub fn offset(page: u32, per_page: u32) -> i64 {
        i64::from(page.max(1) - 1) * i64::from(per_page)
    }

    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 || self.total <= 0 {
            return 0;
        }
        let per_page = i64::from(self.per_page);
        u32::try_from((self.total + per_page - 1) / per_page).unwrap_or(u32::MAX)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(category_name: &str) -> Artwork {
        Artwork {
            id: "art-1".to_string(),
            name: "Harbour at dusk".to_string(),
            base: 2,
            color: 1,
            date_posted: Utc::now(),
            size: 2,
            frame: 1,
            time: 5.0,
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            user_id: "user-1".to_string(),
            category_id: "cat-1".to_string(),
            category_name: category_name.to_string(),
            price: 0,
        }
    }

    fn new_artwork() -> NewArtwork {
        NewArtwork {
            name: "Harbour at dusk".to_string(),
            category_id: "cat-1".to_string(),
            time: 5.0,
            color: 1,
            base: 2,
            size: 2,
            frame: 1,
            image_file: None,
        }
    }

    #[test]
    fn test_artwork_suggested_price() {
        assert_eq!(artwork("Realistic").suggested_price().units(), 1400);
        assert!(artwork("Sculpture").suggested_price().is_zero());
    }

    #[test]
    fn test_artwork_ownership() {
        let art = artwork("Abstract");
        assert!(art.ensure_owned_by("user-1").is_ok());
        assert!(matches!(
            art.ensure_owned_by("user-2"),
            Err(CoreError::NotArtworkOwner { .. })
        ));
    }

    #[test]
    fn test_artwork_labels() {
        let art = artwork("Abstract");
        assert_eq!(art.size_label(), Some("A4"));
        assert_eq!(art.medium_label(), Some("Photography"));
        assert_eq!(art.base_label(), Some("Paper"));
        assert_eq!(art.frame_label(), Some("Without Frame"));

        let mut art = art;
        art.color = 0;
        art.size = 11;
        assert_eq!(art.medium_label(), None);
        assert_eq!(art.size_label(), None);
    }

    #[test]
    fn test_new_artwork_validation() {
        assert!(new_artwork().validate().is_ok());

        let mut form = new_artwork();
        form.size = 11;
        assert!(form.validate().is_err());

        let mut form = new_artwork();
        form.category_id = " ".to_string();
        assert_eq!(
            form.validate(),
            Err(crate::ValidationError::Required {
                field: "category".to_string()
            })
        );

        let mut form = new_artwork();
        form.image_file = Some("portrait.gif".to_string());
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_new_artwork_default_image() {
        assert_eq!(new_artwork().image_file_or_default(), DEFAULT_IMAGE_FILE);
    }

    #[test]
    fn test_new_user_validation() {
        let user = NewUser {
            username: "Default".to_string(),
            email: "default@test.com".to_string(),
            password: "testing".to_string(),
            confirm_password: "testing".to_string(),
        };
        assert!(user.validate().is_ok());

        let mismatched = NewUser {
            confirm_password: "testing2".to_string(),
            ..user
        };
        assert!(mismatched.validate().is_err());
    }

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: "u-1".to_string(),
            username: "Default".to_string(),
            email: "default@test.com".to_string(),
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_page_math() {
        let page = Page::new(vec![1, 2, 3], 1, 10, 23);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_prev());

        let last = Page::new(vec![21, 22, 23], 3, 10, 23);
        assert!(!last.has_next());
        assert!(last.has_prev());

        let empty: Page<i32> = Page::new(vec![], 0, 10, 0);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());

        assert_eq!(Page::<()>::offset(1, 10), 0);
        assert_eq!(Page::<()>::offset(3, 5), 10);
        assert_eq!(Page::<()>::offset(0, 5), 0);
    }
}
