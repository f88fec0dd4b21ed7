use crate::models::Video;
use scout_core::types::NewItem;
use sqlx::{PgPool, Postgres, QueryBuilder};

/// Inserts the batch in one statement; rows whose `video_id` already exists
/// are skipped. Returns the number of rows actually inserted.
pub async fn upsert_batch(pool: &PgPool, items: &[NewItem]) -> Result<u64, sqlx::Error> {
    if items.is_empty() {
        return Ok(0);
    }

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO videos (video_id, title, url, channel_id, status, created_at) ");
    qb.push_values(items, |mut row, item| {
        row.push_bind(&item.video_id)
            .push_bind(&item.title)
            .push_bind(&item.url)
            .push_bind(&item.channel_id)
            .push_bind(item.status.as_str())
            .push_bind(item.created_at);
    });
    qb.push(" ON CONFLICT (video_id) DO NOTHING");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

pub async fn list_by_channel(
    pool: &PgPool,
    channel_id: &str,
    limit: i64,
) -> Result<Vec<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(
        r#"
        SELECT video_id, title, url, channel_id, status, created_at
        FROM videos
        WHERE channel_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(channel_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}
