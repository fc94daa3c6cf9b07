use anyhow::Result;
use sqlx::PgPool;

use crate::product::types::ProductRow;

pub async fn select_products(
    pool: &PgPool,
    product: Option<i32>,
    product_url: Option<&str>,
) -> Result<Vec<ProductRow>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT product_id, url, name, chat_id, is_active, added_at, last_price, last_checked_at
        FROM product
        WHERE
          ($1::INT4 IS NULL OR product_id = $1::INT4) AND
          ($2::TEXT IS NULL OR url        = $2::TEXT) AND
          ($1::INT4 IS NOT NULL OR $2::TEXT IS NOT NULL OR is_active = TRUE)
        ORDER BY product_id
        "#,
    )
    .bind(product)
    .bind(product_url)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Record an observed price: append a history point and refresh the
/// last-known value on the product.
pub async fn record_price(pool: &PgPool, product_id: i32, price: f64) -> Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("INSERT INTO price_point (product_id, price) VALUES ($1, $2)")
        .bind(product_id)
        .bind(price)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "UPDATE product SET last_price = $2, last_checked_at = now() WHERE product_id = $1",
    )
    .bind(product_id)
    .bind(price)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

pub async fn touch_checked(pool: &PgPool, product_id: i32) -> Result<()> {
    sqlx::query("UPDATE product SET last_checked_at = now() WHERE product_id = $1")
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}
