use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use log::{debug, error, info, warn};
use std::sync::Arc;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{Bar, FetchStatus, FetchSummary, SymbolFetchResult};
use super::market_data_traits::{MarketDataRepositoryTrait, MarketDataServiceTrait};
use super::providers::MarketDataProvider;
use crate::errors::Result;

/// Orchestrates the daily fetch: walks the symbol universe in order, pulls
/// each symbol's history from the provider, normalizes it, and upserts the
/// batch. Symbols are processed strictly sequentially.
pub struct MarketDataService {
    provider: Arc<dyn MarketDataProvider>,
    repository: Arc<dyn MarketDataRepositoryTrait>,
    universe: Vec<String>,
}

impl MarketDataService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        repository: Arc<dyn MarketDataRepositoryTrait>,
        universe: Vec<String>,
    ) -> Self {
        Self {
            provider,
            repository,
            universe,
        }
    }

    /// Fetch, normalize and upsert one symbol. Any error along the way is
    /// the symbol's problem alone; the caller turns it into a failure entry.
    async fn fetch_and_store(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<usize> {
        debug!("Fetching {} from {} to {}", symbol, start_date, end_date);

        let raw_bars = self
            .provider
            .daily_history(symbol, start_date, end_date)
            .await?;

        if raw_bars.is_empty() {
            warn!("No data returned for {}", symbol);
            return Err(
                MarketDataError::NotFound(format!("no data returned for {}", symbol)).into(),
            );
        }

        let bars: Vec<Bar> = raw_bars
            .iter()
            .map(|raw| Bar::from_provider(symbol, raw))
            .collect();

        let written = self.repository.upsert_bars(&bars)?;
        debug!("Saved {} bars for {}", written, symbol);

        Ok(written)
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn sync_all_symbols(&self, days_back: i64) -> Result<FetchSummary> {
        info!("Starting daily price data fetch");

        self.repository.ensure_schema()?;

        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(days_back);

        let mut results = Vec::with_capacity(self.universe.len());
        for symbol in &self.universe {
            let result = match self.fetch_and_store(symbol, start_date, end_date).await {
                Ok(bars_written) => SymbolFetchResult {
                    symbol: symbol.clone(),
                    bars_written,
                    status: FetchStatus::Success,
                    error: None,
                },
                Err(e) => {
                    error!("Failed to process {}: {}", symbol, e);
                    SymbolFetchResult {
                        symbol: symbol.clone(),
                        bars_written: 0,
                        status: FetchStatus::Failed,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(result);
        }

        let summary = FetchSummary::from_results(&results);
        info!(
            "Price data fetch completed: {} successful, {} errors",
            summary.success_count, summary.error_count
        );

        Ok(summary)
    }

    fn get_bars_in_range(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>> {
        self.repository
            .get_bars_in_range(symbol, start_date, end_date)
    }
}
