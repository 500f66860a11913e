//! Tests for the fetch orchestrator against mock provider and store.
//!
//! Failure isolation and tally semantics live here; storage behavior against
//! a real SQLite file is covered by the integration tests.

#[cfg(test)]
mod tests {
    use crate::errors::Result;
    use crate::market_data::market_data_model::{Bar, FetchSummary};
    use crate::market_data::market_data_traits::{
        MarketDataRepositoryTrait, MarketDataServiceTrait,
    };
    use crate::market_data::providers::{MarketDataProvider, ProviderBar};
    use crate::market_data::{MarketDataError, MarketDataService};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock MarketDataProvider
    // =========================================================================

    #[derive(Default)]
    struct MockProvider {
        data: HashMap<String, Vec<ProviderBar>>,
        fail_symbols: HashSet<String>,
    }

    impl MockProvider {
        fn new() -> Self {
            Self::default()
        }

        fn with_bars(mut self, symbol: &str, bars: Vec<ProviderBar>) -> Self {
            self.data.insert(symbol.to_string(), bars);
            self
        }

        fn with_failure(mut self, symbol: &str) -> Self {
            self.fail_symbols.insert(symbol.to_string());
            self
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        async fn daily_history(
            &self,
            symbol: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> std::result::Result<Vec<ProviderBar>, MarketDataError> {
            if self.fail_symbols.contains(symbol) {
                return Err(MarketDataError::ProviderError(format!(
                    "connection reset while fetching {}",
                    symbol
                )));
            }
            Ok(self.data.get(symbol).cloned().unwrap_or_default())
        }
    }

    // =========================================================================
    // Mock repository
    // =========================================================================

    #[derive(Default)]
    struct MockRepository {
        bars: Arc<Mutex<HashMap<(String, NaiveDate), Bar>>>,
        schema_calls: Arc<Mutex<usize>>,
    }

    impl MockRepository {
        fn row_count(&self) -> usize {
            self.bars.lock().unwrap().len()
        }

        fn get(&self, symbol: &str, date: NaiveDate) -> Option<Bar> {
            self.bars
                .lock()
                .unwrap()
                .get(&(symbol.to_string(), date))
                .cloned()
        }
    }

    impl MarketDataRepositoryTrait for MockRepository {
        fn ensure_schema(&self) -> Result<()> {
            *self.schema_calls.lock().unwrap() += 1;
            Ok(())
        }

        fn upsert_bars(&self, bars: &[Bar]) -> Result<usize> {
            let mut store = self.bars.lock().unwrap();
            for bar in bars {
                store.insert((bar.symbol.clone(), bar.date), bar.clone());
            }
            Ok(bars.len())
        }

        fn get_bars_in_range(
            &self,
            symbol: &str,
            start_date: NaiveDate,
            end_date: NaiveDate,
        ) -> Result<Vec<Bar>> {
            let store = self.bars.lock().unwrap();
            let mut bars: Vec<Bar> = store
                .values()
                .filter(|b| b.symbol == symbol && b.date >= start_date && b.date <= end_date)
                .cloned()
                .collect();
            bars.sort_by_key(|b| b.date);
            Ok(bars)
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn provider_bars(base_close: f64, days: u32) -> Vec<ProviderBar> {
        (0..days)
            .map(|i| ProviderBar {
                timestamp: Utc
                    .with_ymd_and_hms(2024, 1, 1 + i, 21, 0, 0)
                    .unwrap(),
                open: base_close - 1.0,
                high: base_close + 2.0,
                low: base_close - 2.0,
                close: base_close,
                volume: Some(1_000_000.0),
            })
            .collect()
    }

    fn service_with(
        provider: MockProvider,
        universe: &[&str],
    ) -> (MarketDataService, Arc<MockRepository>) {
        let repository = Arc::new(MockRepository::default());
        let service = MarketDataService::new(
            Arc::new(provider),
            repository.clone(),
            universe.iter().map(|s| s.to_string()).collect(),
        );
        (service, repository)
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn one_failing_symbol_never_aborts_the_batch() {
        let provider = MockProvider::new()
            .with_bars("AAPL", provider_bars(188.0, 3))
            .with_failure("MSFT")
            .with_bars("SPY", provider_bars(475.0, 3));
        let (service, repository) = service_with(provider, &["AAPL", "MSFT", "SPY"]);

        let summary = service.sync_all_symbols(30).await.unwrap();

        assert_eq!(
            summary,
            FetchSummary {
                success_count: 2,
                error_count: 1,
                total_symbols: 3,
            }
        );
        assert_eq!(repository.row_count(), 6);
        let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(repository.get("AAPL", jan_1).is_some());
        assert!(repository.get("SPY", jan_1).is_some());
        assert!(repository.get("MSFT", jan_1).is_none());
    }

    #[tokio::test]
    async fn empty_provider_result_counts_as_error() {
        let provider = MockProvider::new().with_bars("AAPL", provider_bars(188.0, 5));
        let (service, repository) = service_with(provider, &["AAPL", "BTC-USD"]);

        let summary = service.sync_all_symbols(30).await.unwrap();

        assert_eq!(
            summary,
            FetchSummary {
                success_count: 1,
                error_count: 1,
                total_symbols: 2,
            }
        );
        assert_eq!(repository.row_count(), 5);
    }

    #[tokio::test]
    async fn rerun_updates_rows_in_place() {
        let universe = &["AAPL"];

        let (service, repository) =
            service_with(MockProvider::new().with_bars("AAPL", provider_bars(188.0, 5)), universe);
        service.sync_all_symbols(30).await.unwrap();
        assert_eq!(repository.row_count(), 5);

        // Second run over the same window with fresher prices reuses the
        // same repository.
        let second = MarketDataService::new(
            Arc::new(MockProvider::new().with_bars("AAPL", provider_bars(191.5, 5))),
            repository.clone(),
            vec!["AAPL".to_string()],
        );
        second.sync_all_symbols(30).await.unwrap();

        assert_eq!(repository.row_count(), 5);
        let jan_3 = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let bar = repository.get("AAPL", jan_3).unwrap();
        assert_eq!(bar.close.to_string(), "191.5");
    }

    #[tokio::test]
    async fn schema_is_ensured_on_every_run() {
        let (service, repository) = service_with(MockProvider::new(), &[]);

        service.sync_all_symbols(30).await.unwrap();
        service.sync_all_symbols(30).await.unwrap();

        assert_eq!(*repository.schema_calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn query_interface_passes_through_to_store() {
        let provider = MockProvider::new().with_bars("AAPL", provider_bars(188.0, 10));
        let (service, _repository) = service_with(provider, &["AAPL"]);
        service.sync_all_symbols(30).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let bars = service.get_bars_in_range("AAPL", start, end).unwrap();

        assert_eq!(bars.len(), 3);
        assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(bars[0].date, start);
        assert_eq!(bars[2].date, end);
    }
}
