use anyhow::Result;
use clap::Args;
use reqwest::Client;
use serde::Serialize;

use crate::extract::{Extractor, ProductInfo, default_rules};
use crate::fetch;
use crate::telemetry::{self};
use crate::telemetry::ops::lookup::Phase as LookupPhase;

#[derive(Args)]
pub struct PriceCmd {
    pub url: String,
}

#[derive(Args)]
pub struct InfoCmd {
    pub url: String,
}

#[derive(Serialize)]
pub struct PriceResult {
    pub url: String,
    pub price: Option<f64>,
}

#[derive(Serialize)]
pub struct InfoResult {
    pub url: String,
    pub price: Option<f64>,
    pub title: Option<String>,
}

/// Fetch a page and run the price pipeline. Fetch failures are logged and
/// surface as "no price found" — retry policy belongs to the caller.
pub async fn get_price(client: &Client, ex: &Extractor<'_>, url: &str) -> Option<f64> {
    let html = fetch_logged(client, url).await?;
    let log = telemetry::lookup();
    let _s = log.span(&LookupPhase::Extract).entered();
    ex.price(&html, url)
}

/// Fetch once, then price and title against the same parsed document.
pub async fn get_product_info(client: &Client, ex: &Extractor<'_>, url: &str) -> ProductInfo {
    match fetch_logged(client, url).await {
        Some(html) => ex.product_info(&html, url),
        None => ProductInfo { price: None, title: None },
    }
}

async fn fetch_logged(client: &Client, url: &str) -> Option<String> {
    let log = telemetry::lookup();
    let _s = log
        .span_kv(&LookupPhase::Fetch, [("url", url.to_string())])
        .entered();
    match fetch::fetch_page(client, url).await {
        Ok(html) => Some(html),
        Err(e) => {
            log.warn_kv(
                "⚠️ fetch failed",
                [("url", url.to_string()), ("error", e.to_string())],
            );
            None
        }
    }
}

pub async fn run_price(args: PriceCmd) -> Result<()> {
    let log = telemetry::lookup();
    let _g = log.root_span_kv([("url", args.url.clone())]).entered();

    let client = fetch::client()?;
    let ex = Extractor::new(default_rules());
    let price = get_price(&client, &ex, &args.url).await;

    match price {
        Some(p) => log.info(format!("💰 {} → {}", args.url, p)),
        None => log.info(format!("🚫 {} → no price found", args.url)),
    }
    if telemetry::config::json_mode() {
        log.result(&PriceResult { url: args.url, price })?;
    }
    Ok(())
}

pub async fn run_info(args: InfoCmd) -> Result<()> {
    let log = telemetry::lookup();
    let _g = log.root_span_kv([("url", args.url.clone())]).entered();

    let client = fetch::client()?;
    let ex = Extractor::new(default_rules());
    let info = get_product_info(&client, &ex, &args.url).await;

    log.info(format!(
        "ℹ️ {} → price={:?} title={:?}",
        args.url, info.price, info.title
    ));
    if telemetry::config::json_mode() {
        log.result(&InfoResult {
            url: args.url,
            price: info.price,
            title: info.title,
        })?;
    }
    Ok(())
}
