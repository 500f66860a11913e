//! Daily price fetch, meant to be run once a day by an external scheduler.

use quotecache_core::market_data::{MarketDataServiceTrait, DEFAULT_LOOKBACK_DAYS};
use quotecache_fetcher::config::Config;
use quotecache_fetcher::{build_service, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    tracing::info!("=== Starting daily price data fetch ===");

    let service = build_service(&config)?;
    let summary = service.sync_all_symbols(DEFAULT_LOOKBACK_DAYS).await?;

    tracing::info!(
        "Success: {}/{} assets, errors: {}",
        summary.success_count,
        summary.total_symbols,
        summary.error_count
    );
    if summary.error_count > 0 {
        tracing::warn!("Some assets failed to fetch. Check logs for details.");
    }

    tracing::info!("=== Daily price data fetch completed ===");
    Ok(())
}
