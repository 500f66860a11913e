/// Instruments tracked by the daily fetch job. Changing this list means
/// redeploying the fetcher; it is not a runtime setting.
pub const SYMBOL_UNIVERSE: &[&str] = &[
    // Major stocks
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "NVDA", "META", "NFLX",
    // ETFs
    "SPY", "QQQ", "IWM", "VTI", "VOO", "VEA", "VWO", "TLT", "GLD",
    // Crypto (Yahoo Finance format)
    "BTC-USD", "ETH-USD", "ADA-USD", "SOL-USD", "DOT-USD", "MATIC-USD", "AVAX-USD", "LINK-USD",
];

/// Default values
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30; // daily cron window
pub const BACKFILL_LOOKBACK_DAYS: i64 = 365; // manual backfill window
pub const UPSERT_CHUNK_SIZE: usize = 100;

/// Prices are rounded to this many fractional digits when normalized.
pub const PRICE_DECIMAL_PLACES: u32 = 4;
