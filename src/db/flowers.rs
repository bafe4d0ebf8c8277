//! Flower database queries.
//!
//! Flowers are insert-only: there is no update or delete path.

use crate::models::{Flower, NewFlower};
use crate::{Error, Result};

use super::DbPool;

/// Persist a new flower.
///
/// The owner token is generated here, immediately before the insert, unless
/// the caller already assigned one. A token collision is rejected by the
/// UNIQUE constraint and surfaces as [`Error::Database`].
pub async fn create_flower(pool: &DbPool, mut input: NewFlower) -> Result<Flower> {
    input.ensure_owner_token();

    sqlx::query_as::<_, Flower>(
        r#"
        INSERT INTO flowers (id, planted_at, variation, seed, owner_token, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&input.id)
    .bind(input.planted_at)
    .bind(input.variation.as_str())
    .bind(input.seed)
    .bind(&input.owner_token)
    .bind(crate::models::now())
    .fetch_one(pool)
    .await
    .map_err(Error::Database)
}

/// Get a flower by ID.
pub async fn get_flower(pool: &DbPool, id: &str) -> Result<Flower> {
    sqlx::query_as::<_, Flower>("SELECT * FROM flowers WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Flower not found: {}", id)))
}

/// Find the flower owned by the holder of `owner_token`.
pub async fn find_flower_by_owner_token(
    pool: &DbPool,
    owner_token: &str,
) -> Result<Option<Flower>> {
    sqlx::query_as::<_, Flower>("SELECT * FROM flowers WHERE owner_token = ?")
        .bind(owner_token)
        .fetch_optional(pool)
        .await
        .map_err(Error::Database)
}

/// Count all planted flowers.
pub async fn count_flowers(pool: &DbPool) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flowers")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
