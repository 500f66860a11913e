use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_query;
use std::sync::Arc;

use super::market_data_constants::UPSERT_CHUNK_SIZE;
use super::market_data_errors::MarketDataError;
use super::market_data_model::{Bar, BarDB};
use super::market_data_traits::MarketDataRepositoryTrait;
use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::price_bars;

pub struct MarketDataRepository {
    pool: Arc<DbPool>,
}

impl MarketDataRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl MarketDataRepositoryTrait for MarketDataRepository {
    fn ensure_schema(&self) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        sql_query(
            "CREATE TABLE IF NOT EXISTS price_bars (
                symbol TEXT NOT NULL,
                date DATE NOT NULL,
                open TEXT NOT NULL,
                high TEXT NOT NULL,
                low TEXT NOT NULL,
                close TEXT NOT NULL,
                volume BIGINT NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (symbol, date)
            )",
        )
        .execute(&mut conn)
        .map_err(MarketDataError::DatabaseError)?;

        sql_query(
            "CREATE INDEX IF NOT EXISTS idx_price_bars_symbol_date
             ON price_bars(symbol, date)",
        )
        .execute(&mut conn)
        .map_err(MarketDataError::DatabaseError)?;

        log::debug!("Price bar table setup completed");
        Ok(())
    }

    fn upsert_bars(&self, bars: &[Bar]) -> Result<usize> {
        if bars.is_empty() {
            return Ok(0);
        }

        let mut conn = get_connection(&self.pool)?;
        let mut total_written = 0;

        // Chunked purely to keep statements small; REPLACE resolves each
        // (symbol, date) conflict by rewriting the row, so the net effect is
        // identical to one-at-a-time upserts with last-write-wins.
        for chunk in bars.chunks(UPSERT_CHUNK_SIZE) {
            let rows: Vec<BarDB> = chunk.iter().map(BarDB::from).collect();
            total_written += diesel::replace_into(price_bars::table)
                .values(rows)
                .execute(&mut conn)
                .map_err(MarketDataError::DatabaseError)?;
        }

        Ok(total_written)
    }

    fn get_bars_in_range(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = price_bars::table
            .filter(price_bars::symbol.eq(symbol))
            .filter(price_bars::date.ge(start_date))
            .filter(price_bars::date.le(end_date))
            .order(price_bars::date.asc())
            .load::<BarDB>(&mut conn)
            .map_err(MarketDataError::DatabaseError)?;

        let bars = rows
            .into_iter()
            .map(Bar::try_from)
            .collect::<std::result::Result<Vec<_>, MarketDataError>>()?;

        Ok(bars)
    }
}
