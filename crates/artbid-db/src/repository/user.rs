//! # User Repository
//!
//! Database operations for marketplace accounts.
//!
//! ## Registration Flow
//! ```text
//! NewUser (form)
//!      │
//!      ▼
//! validate() ── username 2-20, email shape, passwords match
//!      │
//!      ▼
//! username / email free? ── no → UniqueViolation
//!      │
//!      ▼
//! argon2 hash ──► INSERT INTO users
//! ```
//!
//! Passwords are only ever stored as argon2 PHC strings. Sessions and login
//! cookies are the web layer's business; this module only answers "do these
//! credentials belong to a user".

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use artbid_core::{NewUser, ProfileUpdate, User, DEFAULT_IMAGE_FILE};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Registers a new account.
    ///
    /// ## Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(DbError::Domain)` - Form validation failed
    /// * `Err(DbError::UniqueViolation)` - Username or email is taken
    pub async fn register(&self, new_user: &NewUser) -> DbResult<User> {
        new_user.validate()?;

        let username = new_user.username.trim();
        let email = new_user.email.trim();

        if self.get_by_username(username).await?.is_some() {
            warn!(username = %username, "Registration rejected: username taken");
            return Err(DbError::duplicate("username", username));
        }
        if self.get_by_email(email).await?.is_some() {
            warn!(email = %email, "Registration rejected: email taken");
            return Err(DbError::duplicate("email", email));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
            image_file: DEFAULT_IMAGE_FILE.to_string(),
            password_hash: hash_password(&new_user.password)?,
        };

        self.insert(&user).await?;
        Ok(user)
    }

    /// Inserts a fully formed user (password already hashed).
    ///
    /// Used by the seeder; the web layer goes through [`Self::register`].
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, username = %user.username, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, image_file, password_hash)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.image_file)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, image_file, password_hash
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, image_file, password_hash
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, image_file, password_hash
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Checks a login attempt.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Email exists and the password matches
    /// * `Ok(None)` - Unknown email or wrong password (indistinguishable)
    pub async fn verify_credentials(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        let Some(user) = self.get_by_email(email).await? else {
            debug!("Login failed: unknown email");
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            debug!(user_id = %user.id, "Login failed: wrong password");
            Ok(None)
        }
    }

    /// Applies the account form.
    ///
    /// A changed username or email must not belong to anybody else. The
    /// picture is only replaced when the form carries a new one.
    pub async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> DbResult<User> {
        update.validate()?;

        let mut user = self
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| DbError::not_found("User", user_id))?;

        let username = update.username.trim();
        let email = update.email.trim();

        if username != user.username && self.get_by_username(username).await?.is_some() {
            return Err(DbError::duplicate("username", username));
        }
        if email != user.email && self.get_by_email(email).await?.is_some() {
            return Err(DbError::duplicate("email", email));
        }

        user.username = username.to_string();
        user.email = email.to_string();
        if let Some(image_file) = &update.image_file {
            user.image_file = image_file.clone();
        }

        debug!(id = %user.id, "Updating profile");

        sqlx::query(
            r#"
            UPDATE users SET
                username = ?2,
                email = ?3,
                image_file = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.image_file)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> DbResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn form(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password: "testing".to_string(),
            confirm_password: "testing".to_string(),
        }
    }

    async fn repo() -> UserRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().users()
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let users = repo().await;

        let user = users.register(&form("Default", "default@test.com")).await.unwrap();
        assert_eq!(user.image_file, DEFAULT_IMAGE_FILE);
        assert_ne!(user.password_hash, "testing");

        let found = users
            .verify_credentials("default@test.com", "testing")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);

        assert!(users
            .verify_credentials("default@test.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(users
            .verify_credentials("nobody@test.com", "testing")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username_and_email() {
        let users = repo().await;
        users.register(&form("Default", "default@test.com")).await.unwrap();

        let err = users
            .register(&form("Default", "other@test.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "username"));

        let err = users
            .register(&form("Someone", "default@test.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "email"));

        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validates_form() {
        let users = repo().await;

        let err = users.register(&form("D", "default@test.com")).await.unwrap_err();
        assert!(err.is_validation());

        let mut mismatched = form("Default", "default@test.com");
        mismatched.confirm_password = "testing2".to_string();
        assert!(users.register(&mismatched).await.unwrap_err().is_validation());

        assert_eq!(users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let users = repo().await;
        let first = users.register(&form("Default", "default@test.com")).await.unwrap();
        users.register(&form("Default Second", "second@test.com")).await.unwrap();

        // Keeping your own username and email is not a conflict
        let same = ProfileUpdate {
            username: "Default".to_string(),
            email: "default@test.com".to_string(),
            image_file: Some("7798432669b8b3ac.jpg".to_string()),
        };
        let updated = users.update_profile(&first.id, &same).await.unwrap();
        assert_eq!(updated.image_file, "7798432669b8b3ac.jpg");

        let taken = ProfileUpdate {
            username: "Default Second".to_string(),
            email: "default@test.com".to_string(),
            image_file: None,
        };
        assert!(matches!(
            users.update_profile(&first.id, &taken).await,
            Err(DbError::UniqueViolation { .. })
        ));

        let renamed = ProfileUpdate {
            username: "Renamed".to_string(),
            email: "renamed@test.com".to_string(),
            image_file: None,
        };
        users.update_profile(&first.id, &renamed).await.unwrap();

        let stored = users.get_by_id(&first.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "Renamed");
        assert_eq!(stored.email, "renamed@test.com");
        assert_eq!(stored.image_file, "7798432669b8b3ac.jpg");

        assert!(matches!(
            users.update_profile("missing", &renamed).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("testing3").unwrap();
        assert!(verify_password("testing3", &hash));
        assert!(!verify_password("testing", &hash));
        assert!(!verify_password("testing3", "not-a-phc-string"));
    }
}
