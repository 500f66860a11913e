pub mod config;

use std::sync::Arc;

use quotecache_core::db;
use quotecache_core::market_data::{
    MarketDataRepository, MarketDataService, YahooProvider, SYMBOL_UNIVERSE,
};

use config::Config;

pub fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

pub fn build_service(config: &Config) -> anyhow::Result<MarketDataService> {
    db::init(&config.database_url)?;
    let pool = db::create_pool(&config.database_url)?;

    let repository = Arc::new(MarketDataRepository::new(pool));
    let provider = Arc::new(YahooProvider::new()?);
    let universe = SYMBOL_UNIVERSE.iter().map(|s| s.to_string()).collect();

    Ok(MarketDataService::new(provider, repository, universe))
}
