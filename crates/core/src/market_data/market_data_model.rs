use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::market_data_constants::PRICE_DECIMAL_PLACES;
use super::market_data_errors::MarketDataError;
use super::providers::models::ProviderBar;

/// One instrument's trading data for one calendar date.
///
/// Exactly one bar exists per `(symbol, date)` pair in the store; the pair is
/// also the upsert conflict key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
    pub created_at: NaiveDateTime,
}

impl Bar {
    /// Builds a canonical bar from a raw provider row.
    ///
    /// Prices are rounded to four fractional digits, the timestamp is
    /// truncated to its calendar date, and a missing or not-a-number volume
    /// becomes 0. No further validation happens here: whatever prices the
    /// provider reports are passed through.
    pub fn from_provider(symbol: &str, raw: &ProviderBar) -> Self {
        Bar {
            symbol: symbol.to_string(),
            date: raw.timestamp.date_naive(),
            open: to_price(raw.open),
            high: to_price(raw.high),
            low: to_price(raw.low),
            close: to_price(raw.close),
            volume: raw
                .volume
                .filter(|v| v.is_finite())
                .map(|v| v as i64)
                .unwrap_or(0),
            created_at: Utc::now().naive_utc(),
        }
    }
}

fn to_price(value: f64) -> Decimal {
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(PRICE_DECIMAL_PLACES)
}

/// Database model for price bars
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::price_bars)]
#[diesel(primary_key(symbol, date))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BarDB {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: i64,
    pub created_at: NaiveDateTime,
}

impl From<&Bar> for BarDB {
    fn from(bar: &Bar) -> Self {
        BarDB {
            symbol: bar.symbol.clone(),
            date: bar.date,
            open: bar.open.to_string(),
            high: bar.high.to_string(),
            low: bar.low.to_string(),
            close: bar.close.to_string(),
            volume: bar.volume,
            created_at: bar.created_at,
        }
    }
}

impl TryFrom<BarDB> for Bar {
    type Error = MarketDataError;

    fn try_from(db: BarDB) -> Result<Self, Self::Error> {
        Ok(Bar {
            open: parse_price(&db.open)?,
            high: parse_price(&db.high)?,
            low: parse_price(&db.low)?,
            close: parse_price(&db.close)?,
            symbol: db.symbol,
            date: db.date,
            volume: db.volume,
            created_at: db.created_at,
        })
    }
}

fn parse_price(value: &str) -> Result<Decimal, MarketDataError> {
    Decimal::from_str(value)
        .map_err(|e| MarketDataError::ParsingError(format!("invalid stored price '{value}': {e}")))
}

/// Outcome of the fetch-and-store step for a single symbol.
#[derive(Debug, Clone)]
pub struct SymbolFetchResult {
    pub symbol: String,
    /// Number of bars written for this symbol.
    pub bars_written: usize,
    pub status: FetchStatus,
    /// Error message when the fetch failed.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Success,
    Failed,
}

/// Per-run tally returned by the fetch orchestrator. Not persisted.
///
/// A symbol with no data counts as an error, same as a fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchSummary {
    pub success_count: usize,
    pub error_count: usize,
    pub total_symbols: usize,
}

impl FetchSummary {
    pub fn from_results(results: &[SymbolFetchResult]) -> Self {
        let success_count = results
            .iter()
            .filter(|r| r.status == FetchStatus::Success)
            .count();
        FetchSummary {
            success_count,
            error_count: results.len() - success_count,
            total_symbols: results.len(),
        }
    }
}
