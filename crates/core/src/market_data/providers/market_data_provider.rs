use async_trait::async_trait;
use chrono::NaiveDate;

use super::models::ProviderBar;
use crate::market_data::MarketDataError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the daily bars for `symbol` between `start` and `end`
    /// (inclusive calendar dates).
    ///
    /// A symbol the provider has no rows for (delisted, unrecognized, no
    /// trading activity) yields an empty vector, not an error. The adapter
    /// does not retry; transport and provider failures surface as
    /// `MarketDataError` for the caller to handle.
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderBar>, MarketDataError>;
}
