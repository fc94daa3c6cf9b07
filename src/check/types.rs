use serde::Serialize;

// Plan envelope types
#[derive(Serialize)]
pub struct ProductSample {
    pub product_id: i32,
    pub url: String,
    pub name: Option<String>,
}

#[derive(Serialize)]
pub struct CheckPlan {
    pub products: usize,
    pub notify: bool,
    pub sample_products: Vec<ProductSample>,
}

// Apply/result envelope types
#[derive(Serialize)]
pub struct ProductOutcome {
    pub product_id: i32,
    pub url: String,
    pub price: Option<f64>,
    pub previous: Option<f64>,
    pub outcome: &'static str,
}

#[derive(Serialize)]
pub struct CheckTotals {
    pub changed: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub errors: usize,
}

#[derive(Serialize)]
pub struct CheckApply {
    pub totals: CheckTotals,
    pub per_product: Vec<ProductOutcome>,
}
