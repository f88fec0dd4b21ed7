use crate::models::Channel;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub async fn create(
    pool: &PgPool,
    id: &str,
    channel_id: &str,
    name: &str,
    is_active: bool,
) -> Result<Channel, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        INSERT INTO channels (id, channel_id, name, is_active)
        VALUES ($1, $2, $3, $4)
        RETURNING id, channel_id, name, is_active, last_scanned_at, created_at
        "#,
    )
    .bind(id)
    .bind(channel_id)
    .bind(name)
    .bind(is_active)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, channel_id, name, is_active, last_scanned_at, created_at
        FROM channels
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, channel_id, name, is_active, last_scanned_at, created_at
        FROM channels
        WHERE is_active = true
        ORDER BY created_at
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn set_active(
    pool: &PgPool,
    id: &str,
    is_active: bool,
) -> Result<Option<Channel>, sqlx::Error> {
    sqlx::query_as::<_, Channel>(
        r#"
        UPDATE channels
        SET is_active = $1
        WHERE id = $2
        RETURNING id, channel_id, name, is_active, last_scanned_at, created_at
        "#,
    )
    .bind(is_active)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn mark_scanned(
    pool: &PgPool,
    channel_id: &str,
    scanned_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE channels
        SET last_scanned_at = $1
        WHERE channel_id = $2
        "#,
    )
    .bind(scanned_at)
    .bind(channel_id)
    .execute(pool)
    .await?;
    Ok(())
}
