use sqlx::PgPool;

/// A sign-in account. `id` is the opaque identifier submissions are filed under.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT id, username, password_hash FROM profiles WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await
}

/// Insert a profile and return its generated id.
pub async fn create(pool: &PgPool, username: &str, password_hash: &str) -> Result<String, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO profiles (username, password_hash) VALUES ($1, $2) RETURNING id",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}
