//! User account rows

use crate::Result;
use sqlx::{Row, SqlitePool};

/// Stored user record
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub bio: String,
}

/// Insert a new user and return the assigned id
///
/// Uniqueness of username and email is enforced by the schema; callers
/// check availability first to produce field-specific conflict messages.
pub async fn insert_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
    password_salt: &str,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, password_salt)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(password_salt)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Load a user by email (login lookup)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT user_id, username, email, password_hash, password_salt, bio
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| User {
        user_id: row.get("user_id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        password_salt: row.get("password_salt"),
        bio: row.get("bio"),
    }))
}

/// Look up the id for a username (activity pages)
pub async fn id_for_username(pool: &SqlitePool, username: &str) -> Result<Option<i64>> {
    let id = sqlx::query_scalar("SELECT user_id FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(id)
}

/// Whether an email is already registered
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Whether a username is already taken
pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        init_schema(&pool).await.expect("Failed to apply schema");
        pool
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let pool = test_pool().await;

        let id = insert_user(&pool, "ryan", "ryan@example.com", "hash", "salt")
            .await
            .expect("Failed to insert user");
        assert!(id > 0);

        let user = find_by_email(&pool, "ryan@example.com")
            .await
            .unwrap()
            .expect("User not found");
        assert_eq!(user.user_id, id);
        assert_eq!(user.username, "ryan");
        assert_eq!(user.bio, "No Bio");
    }

    #[tokio::test]
    async fn test_existence_checks() {
        let pool = test_pool().await;
        insert_user(&pool, "ryan", "ryan@example.com", "hash", "salt")
            .await
            .unwrap();

        assert!(email_exists(&pool, "ryan@example.com").await.unwrap());
        assert!(!email_exists(&pool, "other@example.com").await.unwrap());
        assert!(username_exists(&pool, "ryan").await.unwrap());
        assert!(!username_exists(&pool, "gaetano").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_schema() {
        let pool = test_pool().await;
        insert_user(&pool, "ryan", "ryan@example.com", "hash", "salt")
            .await
            .unwrap();

        let dup = insert_user(&pool, "ryan2", "ryan@example.com", "hash", "salt").await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_id_for_unknown_username_is_none() {
        let pool = test_pool().await;
        assert!(id_for_username(&pool, "nobody").await.unwrap().is_none());
    }
}
