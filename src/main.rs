use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sqlx::PgPool;
use std::env;

mod check;
mod extract;
mod fetch;
mod init;
mod lookup;
mod notify;
mod product;
mod telemetry;

#[derive(Parser)]
#[command(name = "pricewatch", about = "Product price tracker CLI")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Init(init::InitCmd),
    Product(product::ProductCmd),
    Check(check::CheckCmd),
    /// One-off price lookup for a URL (no database needed)
    Price(lookup::PriceCmd),
    /// One-off price + title lookup for a URL (no database needed)
    Info(lookup::InfoCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and PRICEWATCH_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Price(args) => lookup::run_price(args).await?,
        Commands::Info(args) => lookup::run_info(args).await?,
        Commands::Init(args) => {
            let pool = connect(cli.dsn).await?;
            init::run(&pool, args).await?
        }
        Commands::Product(args) => {
            let pool = connect(cli.dsn).await?;
            product::run(&pool, args).await?
        }
        Commands::Check(args) => {
            let pool = connect(cli.dsn).await?;
            check::run(&pool, args).await?
        }
    }

    Ok(())
}

async fn connect(dsn: Option<String>) -> Result<PgPool> {
    let dsn = dsn
        .or_else(|| env::var("DATABASE_URL").ok())
        .ok_or_else(|| anyhow!("Please provide --dsn or set DATABASE_URL in .env"))?;
    Ok(PgPool::connect(&dsn).await?)
}
