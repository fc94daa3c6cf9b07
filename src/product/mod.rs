use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use sqlx::PgPool;
use url::Url;

use crate::telemetry::{self};
use crate::telemetry::ops::product::Phase as ProductPhase;

mod db;
pub mod types;

/// pricewatch product add/ls/rm
#[derive(Args)]
pub struct ProductCmd {
    #[command(subcommand)]
    pub cmd: ProductSub,
}

#[derive(Subcommand)]
pub enum ProductSub {
    // track a new product (plan-only by default; use --apply to write)
    Add {
        url: String,
        #[arg(long)]
        name: Option<String>,
        /// Chat recipient for price-change notifications
        #[arg(long)]
        chat_id: Option<String>,
        #[arg(long, default_value_t = true)]
        active: bool,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    // list tracked products
    Ls {
        /// Filter by active status: true/false. Omit to show all.
        #[arg(long)]
        active: Option<bool>,
    },
    // stop tracking a product
    Rm {
        product_id: i32,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

pub async fn run(pool: &PgPool, args: ProductCmd) -> Result<()> {
    let log = telemetry::product();
    let _g = log.root_span().entered();
    match args.cmd {
        ProductSub::Add { url, name, chat_id, active, apply } => {
            add_product(pool, url, name, chat_id, active, apply).await?
        }
        ProductSub::Ls { active } => ls_products(pool, active).await?,
        ProductSub::Rm { product_id, apply } => rm_product(pool, product_id, apply).await?,
    }
    Ok(())
}

async fn add_product(
    pool: &PgPool,
    url: String,
    name: Option<String>,
    chat_id: Option<String>,
    active: bool,
    apply: bool,
) -> Result<()> {
    let log = telemetry::product();
    let _g = log
        .root_span_kv([
            ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
            ("url", url.clone()),
            ("name", format!("{:?}", name)),
            ("active", active.to_string()),
        ])
        .entered();

    // URL validation (friendly error before DB I/O)
    if Url::parse(&url).is_err() {
        bail!("Invalid URL: {}", url);
    }

    if !apply {
        let _s = log.span(&ProductPhase::Plan).entered();
        log.info(format!(
            "📝 Product plan — add url={} name={:?} chat_id={:?} active={}",
            url, name, chat_id, active
        ));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            let plan = types::ProductAddPlan {
                action: "add",
                url: url.clone(),
                name: name.clone(),
                chat_id: chat_id.clone(),
                active,
            };
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let _s = log.span(&ProductPhase::Add).entered();
    let inserted =
        db::upsert_product(pool, &url, name.as_deref(), chat_id.as_deref(), active).await?;
    if inserted {
        log.info("➕ Product added");
    } else {
        log.info("♻️ Product updated");
    }
    if telemetry::config::json_mode() {
        log.result(&types::ProductAddResult { inserted, url })?;
    }
    Ok(())
}

async fn ls_products(pool: &PgPool, active: Option<bool>) -> Result<()> {
    let log = telemetry::product();
    let _g = log.root_span_kv([("active", format!("{:?}", active))]).entered();
    let _s = log.span(&ProductPhase::List).entered();

    let products = db::list_products(pool, active).await?;
    log.info("🛒 Products:");
    for row in &products {
        log.info(format!(
            "[{}] {} ({:?}) active={} last_price={:?} checked={:?}",
            row.product_id, row.url, row.name, row.is_active, row.last_price, row.last_checked_at
        ));
    }
    if telemetry::config::json_mode() {
        log.result(&types::ProductList { products })?;
    }
    Ok(())
}

async fn rm_product(pool: &PgPool, product_id: i32, apply: bool) -> Result<()> {
    let log = telemetry::product();
    let _g = log
        .root_span_kv([
            ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
            ("product_id", product_id.to_string()),
        ])
        .entered();

    if !apply {
        let _s = log.span(&ProductPhase::Plan).entered();
        log.info(format!("📝 Product plan — rm product_id={}", product_id));
        log.info("   Use --apply to execute.");
        return Ok(());
    }

    let _s = log.span(&ProductPhase::Remove).entered();
    let removed = db::remove_product(pool, product_id).await?;
    if removed {
        log.info("🗑️ Product removed");
    } else {
        log.warn(format!("Product {} not found", product_id));
    }
    if telemetry::config::json_mode() {
        log.result(&types::ProductRmResult { removed, product_id })?;
    }
    Ok(())
}
