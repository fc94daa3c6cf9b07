use anyhow::Result;
use sqlx::{PgPool, Row};

use super::types::ProductRow;

pub async fn upsert_product(
    pool: &PgPool,
    url: &str,
    name: Option<&str>,
    chat_id: Option<&str>,
    active: bool,
) -> Result<bool> {
    let row = sqlx::query(
        r#"
        INSERT INTO product (url, name, chat_id, is_active)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (url)
        DO UPDATE SET name = EXCLUDED.name, chat_id = EXCLUDED.chat_id, is_active = EXCLUDED.is_active
        RETURNING (xmax = 0) AS inserted
        "#,
    )
    .bind(url)
    .bind(name)
    .bind(chat_id)
    .bind(active)
    .fetch_one(pool)
    .await?;
    Ok(row.try_get("inserted")?)
}

pub async fn list_products(pool: &PgPool, active: Option<bool>) -> Result<Vec<ProductRow>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT product_id, url, name, chat_id, is_active, added_at, last_price, last_checked_at
        FROM product
        WHERE ($1::bool IS NULL OR is_active = $1)
        ORDER BY product_id
        "#,
    )
    .bind(active)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn remove_product(pool: &PgPool, product_id: i32) -> Result<bool> {
    let res = sqlx::query("DELETE FROM product WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() == 1)
}
