use sqlx::PgPool;
use tracing::info;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username VARCHAR(150) NOT NULL UNIQUE,
    email VARCHAR(254) NOT NULL DEFAULT '',
    password_hash TEXT NOT NULL,
    date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_ITEMS: &str = r#"
CREATE TABLE IF NOT EXISTS items (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    description TEXT NOT NULL,
    quantity INTEGER NOT NULL DEFAULT 0
)
"#;

/// Create the `users` and `items` tables if they are missing
pub async fn ensure_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Ensuring database tables exist...");
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_ITEMS).execute(pool).await?;
    Ok(())
}
