use anyhow::Result;
use clap::Args;
use sqlx::PgPool;

use crate::extract::{Extractor, default_rules};
use crate::fetch;
use crate::notify::Notifier;
use crate::telemetry::{self};
use crate::telemetry::ops::check::Phase as CheckPhase;

mod db;
mod types;

/// One tracking pass over the watched products. Fetch or extraction failures
/// for one product never abort the run.
#[derive(Args)]
pub struct CheckCmd {
    #[arg(long)]
    pub product: Option<i32>,
    #[arg(long)]
    pub product_url: Option<String>,
    /// Deliver chat notifications for price changes
    #[arg(long, default_value_t = false)]
    pub notify: bool,
    #[arg(long, default_value_t = false)]
    pub apply: bool,
    #[arg(long, default_value_t = 10)]
    pub plan_limit: usize,
}

pub async fn run(pool: &PgPool, args: CheckCmd) -> Result<()> {
    let log = telemetry::check();
    let _g = log
        .root_span_kv([
            ("apply", args.apply.to_string()),
            ("notify", args.notify.to_string()),
            ("product", format!("{:?}", args.product)),
            ("product_url", format!("{:?}", args.product_url)),
        ])
        .entered();

    let products = db::select_products(pool, args.product, args.product_url.as_deref()).await?;

    if !args.apply {
        if telemetry::config::json_mode() {
            let samples: Vec<types::ProductSample> = products
                .iter()
                .take(args.plan_limit)
                .map(|p| types::ProductSample {
                    product_id: p.product_id,
                    url: p.url.clone(),
                    name: p.name.clone(),
                })
                .collect();
            let plan = types::CheckPlan {
                products: products.len(),
                notify: args.notify,
                sample_products: samples,
            };
            log.plan(&plan)?;
        } else {
            log.info(format!(
                "📝 Check plan — products={} notify={}",
                products.len(),
                args.notify
            ));
            for p in products.iter().take(args.plan_limit) {
                log.info(format!(
                    "  product_id={} url={} last_price={:?}",
                    p.product_id, p.url, p.last_price
                ));
            }
            if products.len() > args.plan_limit {
                log.info(format!("  ... ({} more)", products.len() - args.plan_limit));
            }
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    let client = fetch::client()?;
    let ex = Extractor::new(default_rules());
    let notifier = args.notify.then(Notifier::from_env);

    let mut changed = 0usize;
    let mut unchanged = 0usize;
    let mut missing = 0usize;
    let mut errors = 0usize;
    let mut per_product: Vec<types::ProductOutcome> = Vec::new();

    // sequential on purpose: per-site politeness is the caller's schedule,
    // but there is no reason to hammer hosts from inside one pass
    for p in &products {
        let _ps = log
            .span_kv(&CheckPhase::Product, [
                ("product_id", p.product_id.to_string()),
                ("url", p.url.clone()),
            ])
            .entered();

        let html = {
            let _s = log.span(&CheckPhase::Fetch).entered();
            match fetch::fetch_page(&client, &p.url).await {
                Ok(h) => h,
                Err(e) => {
                    errors += 1;
                    log.warn_kv(
                        "⚠️ fetch failed",
                        [("url", p.url.clone()), ("error", e.to_string())],
                    );
                    per_product.push(outcome(p.product_id, &p.url, None, p.last_price, "error"));
                    continue;
                }
            }
        };

        let price = {
            let _s = log.span(&CheckPhase::Extract).entered();
            ex.price(&html, &p.url)
        };

        let Some(price) = price else {
            missing += 1;
            log.info_kv("🚫 no price", [("url", p.url.clone())]);
            db::touch_checked(pool, p.product_id).await?;
            per_product.push(outcome(p.product_id, &p.url, None, p.last_price, "missing"));
            continue;
        };

        if p.last_price == Some(price) {
            unchanged += 1;
            log.info_kv("↩️ unchanged", [("url", p.url.clone()), ("price", price.to_string())]);
            db::touch_checked(pool, p.product_id).await?;
            per_product.push(outcome(p.product_id, &p.url, Some(price), p.last_price, "unchanged"));
            continue;
        }

        changed += 1;
        {
            let _s = log.span(&CheckPhase::Record).entered();
            db::record_price(pool, p.product_id, price).await?;
        }
        log.price_change(p.product_id, &p.url, p.last_price, price);

        // notify only on a real change; the first observation is the baseline
        if let (Some(n), Some(old), Some(chat)) = (&notifier, p.last_price, p.chat_id.as_deref()) {
            let _s = log.span(&CheckPhase::Notify).entered();
            let label = p.name.as_deref().unwrap_or(&p.url);
            let text = format!("Price change for {label}: {old} → {price}\n{}", p.url);
            if let Err(e) = n.send(&client, chat, &text).await {
                log.warn_kv(
                    "⚠️ notify failed",
                    [("chat_id", chat.to_string()), ("error", e.to_string())],
                );
            }
        }
        per_product.push(outcome(p.product_id, &p.url, Some(price), p.last_price, "changed"));
    }

    log.totals(changed, unchanged, missing, errors);

    if telemetry::config::json_mode() {
        let result = types::CheckApply {
            totals: types::CheckTotals { changed, unchanged, missing, errors },
            per_product,
        };
        log.result(&result)?;
    }
    Ok(())
}

fn outcome(
    product_id: i32,
    url: &str,
    price: Option<f64>,
    previous: Option<f64>,
    outcome: &'static str,
) -> types::ProductOutcome {
    types::ProductOutcome { product_id, url: url.to_string(), price, previous, outcome }
}
