//! Manual entry point that refetches a full year of history.

use quotecache_core::market_data::{MarketDataServiceTrait, BACKFILL_LOOKBACK_DAYS};
use quotecache_fetcher::config::Config;
use quotecache_fetcher::{build_service, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let service = build_service(&config)?;
    let summary = service.sync_all_symbols(BACKFILL_LOOKBACK_DAYS).await?;

    println!("Price data fetch completed:");
    println!(
        "  Success: {}/{} assets",
        summary.success_count, summary.total_symbols
    );
    println!("  Errors: {} assets", summary.error_count);
    if summary.error_count > 0 {
        println!("Check logs for error details");
    }

    Ok(())
}
