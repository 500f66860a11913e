use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;
use yahoo_finance_api::YahooError;

use super::market_data_provider::MarketDataProvider;
use super::models::ProviderBar;
use crate::market_data::market_data_errors::MarketDataError;

pub struct YahooProvider {
    provider: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        let provider = yahoo::YahooConnector::new()?;
        Ok(YahooProvider { provider })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn daily_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ProviderBar>, MarketDataError> {
        let start_offset = to_offset(start, NaiveTime::MIN);
        // Push the end bound to the end of its calendar day so the range is
        // inclusive of `end`.
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        let end_offset = to_offset(end, end_of_day);

        let response = match self
            .provider
            .get_quote_history(symbol, start_offset, end_offset)
            .await
        {
            Ok(response) => response,
            Err(YahooError::NoQuotes | YahooError::NoResult) => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(YahooError::NoQuotes | YahooError::NoResult) => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        // Rows with an unrepresentable timestamp are dropped rather than
        // failing the whole symbol.
        let bars = quotes
            .into_iter()
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0).map(|timestamp| ProviderBar {
                    timestamp,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: Some(q.volume as f64),
                })
            })
            .collect();

        Ok(bars)
    }
}

fn to_offset(date: NaiveDate, time: NaiveTime) -> OffsetDateTime {
    let system_time: SystemTime = Utc.from_utc_datetime(&date.and_time(time)).into();
    system_time.into()
}
