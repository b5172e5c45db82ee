use crate::types::{CreateUserParams, UserRow};
use sqlx::PgPool;

/// Insert a user record
pub async fn create(pool: &PgPool, p: &CreateUserParams) -> Result<UserRow, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, email, password_hash, date_joined)
        VALUES ($1, $2, $3, NOW())
        RETURNING id, username, email, password_hash, date_joined
        "#,
    )
    .bind(&p.username)
    .bind(&p.email)
    .bind(&p.password_hash)
    .fetch_one(pool)
    .await
}

/// Look up a user by username
pub async fn get_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, email, password_hash, date_joined
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}
