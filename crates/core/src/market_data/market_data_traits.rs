use async_trait::async_trait;
use chrono::NaiveDate;

use super::market_data_model::{Bar, FetchSummary};
use crate::errors::Result;

#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Fetches the trailing `days_back` window for every symbol in the
    /// universe and upserts the results. Per-symbol failures are absorbed
    /// into the returned tally; only schema setup errors abort the run.
    async fn sync_all_symbols(&self, days_back: i64) -> Result<FetchSummary>;

    /// Cached bars for `symbol` with date in `[start_date, end_date]`,
    /// ascending by date.
    fn get_bars_in_range(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>>;
}

pub trait MarketDataRepositoryTrait: Send + Sync {
    /// Creates the price table and its index if absent. Safe to call on
    /// every run.
    fn ensure_schema(&self) -> Result<()>;

    /// Writes a batch of bars, overwriting on `(symbol, date)` conflicts.
    /// Returns the number of rows written.
    fn upsert_bars(&self, bars: &[Bar]) -> Result<usize>;

    fn get_bars_in_range(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>>;
}
