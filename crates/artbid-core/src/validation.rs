//! # Validation Module
//!
//! Input validation for the marketplace forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web forms                                                    │
//! │  ├── Required fields, radio choices                                    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repositories (artbid-db)                                     │
//! │  └── THIS MODULE: the same constraints, re-checked before writes       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE constraints                                     │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine relies on layers 1 and 2: it never clamps its inputs.
//!
//! ## Usage
//! ```rust
//! use artbid_core::validation::{validate_size, validate_username};
//!
//! validate_username("Default").unwrap();
//! assert!(validate_size(11).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_BID_PRICE, MAX_TIME_HOURS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const USERNAME_MIN: usize = 2;
const USERNAME_MAX: usize = 20;
const EMAIL_MAX: usize = 120;
const ARTWORK_NAME_MAX: usize = 60;
const SEARCH_MAX: usize = 100;
const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn in_range(field: &str, value: i64, min: i64, max: i64) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Account Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 2 and 20 characters
///
/// ```rust
/// use artbid_core::validation::validate_username;
///
/// assert!(validate_username("Default Second").is_ok());
/// assert!(validate_username("D").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    required("username", username)?;

    let len = username.trim().chars().count();
    if len < USERNAME_MIN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: USERNAME_MIN,
        });
    }
    if len > USERNAME_MAX {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: USERNAME_MAX,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty, at most 120 characters
/// - Exactly one `@`, a non-empty local part, and a domain containing a dot
///   that neither starts nor ends the domain
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    required("email", email)?;

    let email = email.trim();
    if email.len() > EMAIL_MAX {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: EMAIL_MAX,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@domain"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(())
}

/// The confirmation field must repeat the password exactly.
pub fn validate_password_confirmation(password: &str, confirm: &str) -> ValidationResult<()> {
    if confirm.is_empty() {
        return Err(ValidationError::Required {
            field: "confirm_password".to_string(),
        });
    }
    if password != confirm {
        return Err(ValidationError::InvalidFormat {
            field: "confirm_password".to_string(),
            reason: "must match password".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Artwork Validators
// =============================================================================

pub fn validate_artwork_name(name: &str) -> ValidationResult<()> {
    required("name", name)?;

    if name.trim().chars().count() > ARTWORK_NAME_MAX {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: ARTWORK_NAME_MAX,
        });
    }

    Ok(())
}

/// Size code: 1 (A5) through 10 (F40).
pub fn validate_size(size: i64) -> ValidationResult<()> {
    in_range("size", size, 1, 10)
}

/// Hours spent: 1 through 80.
pub fn validate_time(time: f64) -> ValidationResult<()> {
    if !time.is_finite() || time < 1.0 || time > MAX_TIME_HOURS as f64 {
        return Err(ValidationError::OutOfRange {
            field: "time".to_string(),
            min: 1,
            max: MAX_TIME_HOURS,
        });
    }
    Ok(())
}

/// Color/medium code: 0 through 10.
pub fn validate_color(color: i64) -> ValidationResult<()> {
    in_range("color", color, 0, 10)
}

/// Base code: 1 Poster, 2 Paper, 3 Canvas.
pub fn validate_base(base: i64) -> ValidationResult<()> {
    in_range("base", base, 1, 3)
}

/// Frame code: 1 without frame, 2 with frame.
pub fn validate_frame(frame: i64) -> ValidationResult<()> {
    in_range("frame", frame, 1, 2)
}

/// Uploaded pictures must be `.jpg` or `.png`.
///
/// ```rust
/// use artbid_core::validation::validate_image_file;
///
/// assert!(validate_image_file("IMG_8912.JPG").is_ok());
/// assert!(validate_image_file("scan.tiff").is_err());
/// ```
pub fn validate_image_file(file_name: &str) -> ValidationResult<()> {
    required("image_file", file_name)?;

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::NotAllowed {
            field: "image_file".to_string(),
            allowed: IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        });
    }

    Ok(())
}

// =============================================================================
// Bid & Search Validators
// =============================================================================

/// Validates a bid amount.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_BID_PRICE (700,000)
pub fn validate_bid_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "bid".to_string(),
        });
    }
    in_range("bid", amount, 1, MAX_BID_PRICE)
}

/// Validates a search keyword.
///
/// ## Returns
/// The trimmed keyword. Empty is allowed and means "no filter".
pub fn validate_search_keyword(keyword: &str) -> ValidationResult<String> {
    let keyword = keyword.trim();

    if keyword.chars().count() > SEARCH_MAX {
        return Err(ValidationError::TooLong {
            field: "keyword".to_string(),
            max: SEARCH_MAX,
        });
    }

    Ok(keyword.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
