use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, sqlx::FromRow)]
pub struct ProductRow {
    pub product_id: i32,
    pub url: String,
    pub name: Option<String>,
    pub chat_id: Option<String>,
    pub is_active: bool,
    pub added_at: Option<DateTime<Utc>>,
    pub last_price: Option<f64>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
pub struct ProductAddPlan {
    pub action: &'static str,
    pub url: String,
    pub name: Option<String>,
    pub chat_id: Option<String>,
    pub active: bool,
}

#[derive(Serialize)]
pub struct ProductAddResult {
    pub inserted: bool,
    pub url: String,
}

#[derive(Serialize)]
pub struct ProductRmResult {
    pub removed: bool,
    pub product_id: i32,
}

#[derive(Serialize)]
pub struct ProductList {
    pub products: Vec<ProductRow>,
}
